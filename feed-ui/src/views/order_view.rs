use std::fmt;

use feed_core::presentation::format_amount;

use super::Banner;
use crate::sessions::OrderState;

/// The "Place Feed Order" area under a result.
///
/// Until an order is confirmed it offers the action (and shows the last
/// failure, if any); afterwards it shows the confirmation instead.
pub struct OrderView<'a> {
    state: &'a OrderState,
}

impl<'a> OrderView<'a> {
    pub fn new(state: &'a OrderState) -> Self {
        Self { state }
    }

    /// Whether the order action is offered in this rendering.
    pub fn shows_action(&self) -> bool {
        !matches!(self.state, OrderState::Confirmed(_))
    }
}

impl fmt::Display for OrderView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Place Feed Order")?;
        match self.state {
            OrderState::Idle => writeln!(f, "  Type `order` to Place Simulated Order."),
            OrderState::Loading => writeln!(f, "  Placing order…"),
            OrderState::Error(message) => {
                writeln!(f, "  Type `order` to Place Simulated Order.")?;
                writeln!(f, "  {}", Banner::error(message.as_str()))
            }
            OrderState::Confirmed(confirmation) => {
                writeln!(f, "  {}", Banner::success("Order Confirmed!"))?;
                writeln!(f, "  Order ID:   {}", confirmation.order_id)?;
                writeln!(f, "  Supplier:   {}", confirmation.supplier)?;
                writeln!(f, "  Total Cost: ${}", format_amount(confirmation.total_cost))
            }
        }
    }
}
