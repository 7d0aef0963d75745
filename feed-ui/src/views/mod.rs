//! Plain-text renderings of the application state.

pub mod banner;
pub mod form_view;
pub mod order_view;
pub mod result_view;
pub mod status_bar;

pub use banner::{Banner, Severity};
pub use form_view::FormView;
pub use order_view::OrderView;
pub use result_view::{IngredientRow, RequirementIndicator, ResultView};
pub use status_bar::{KeyHint, build_status_bar};

use crate::{sessions::CalculationState, state::AppState};

/// Renders the whole screen: form, banners, result and order area.
pub fn render_screen(state: &AppState) -> String {
    let mut out = FormView::new(state.fields(), state.catalog()).to_string();

    if let Some(message) = state.catalog().error() {
        out.push_str(&format!("\n{}\n", Banner::error(message)));
    }

    match state.calculation().state() {
        CalculationState::Idle => {}
        CalculationState::Loading => out.push_str("\nCalculating…\n"),
        CalculationState::Error(message) => {
            out.push_str(&format!("\n{}\n", Banner::calculation_failed(message)));
        }
        CalculationState::Success(result) => {
            out.push('\n');
            out.push_str(&ResultView::new(result).to_string());
            out.push('\n');
            out.push_str(&OrderView::new(state.order().state()).to_string());
        }
    }
    out
}
