use feed_core::{CalculationResult, ServiceError};
use tracing::{debug, info, warn};

use super::{Generation, Ticket};

pub const CALCULATION_FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CalculationState {
    #[default]
    Idle,
    Loading,
    Success(CalculationResult),
    Error(String),
}

/// Submit → remote calculation → result or error.
///
/// Re-submitting is allowed from any state; each submission clears the
/// previous result and error before the call is made.
#[derive(Debug, Clone, Default)]
pub struct CalculationSession {
    state: CalculationState,
    generation: Generation,
}

impl CalculationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CalculationState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CalculationState::Loading)
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        match &self.state {
            CalculationState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CalculationState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn begin(&mut self) -> Ticket {
        self.state = CalculationState::Loading;
        let ticket = self.generation.advance();
        debug!(ticket = ticket.value(), "calculation started");
        ticket
    }

    /// Applies the outcome of the call issued with `ticket`. Returns `false`
    /// when a later submission superseded it and the outcome was dropped.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        outcome: Result<CalculationResult, ServiceError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(ticket = ticket.value(), "dropping superseded calculation response");
            return false;
        }
        self.state = match outcome {
            Ok(result) => {
                info!(
                    ingredients = result.ingredients.len(),
                    "calculation succeeded"
                );
                CalculationState::Success(result)
            }
            Err(err) => {
                warn!(error = %err, "calculation failed");
                CalculationState::Error(err.user_message(CALCULATION_FALLBACK_MESSAGE))
            }
        };
        true
    }
}
