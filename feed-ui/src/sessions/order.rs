use feed_core::{CalculationResult, OrderConfirmation, OrderRequest, ServiceError};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Generation, Ticket};

pub const ORDER_FALLBACK_MESSAGE: &str = "Could not place the order.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OrderState {
    #[default]
    Idle,
    Loading,
    Confirmed(OrderConfirmation),
    Error(String),
}

/// Why the order action is not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderGateError {
    #[error("there is no calculation result to order from")]
    NoResult,

    #[error("this result has already been ordered")]
    AlreadyConfirmed,
}

/// Places a supply order for the current calculation result.
///
/// A result admits one confirmed order; after that the action is gone until
/// a new calculation resets the session. Failures leave the action available.
#[derive(Debug, Clone, Default)]
pub struct OrderSession {
    state: OrderState,
    generation: Generation,
}

impl OrderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        match &self.state {
            OrderState::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            OrderState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the order action may be offered.
    pub fn can_order(&self) -> bool {
        !matches!(self.state, OrderState::Confirmed(_))
    }

    /// Starts an order for `result`, returning the ticket and the projected
    /// request body.
    pub fn begin(
        &mut self,
        result: &CalculationResult,
    ) -> Result<(Ticket, OrderRequest), OrderGateError> {
        if !self.can_order() {
            return Err(OrderGateError::AlreadyConfirmed);
        }
        let request = OrderRequest::from_result(result);
        self.state = OrderState::Loading;
        let ticket = self.generation.advance();
        debug!(ticket = ticket.value(), items = request.items.len(), "order started");
        Ok((ticket, request))
    }

    /// Forgets any order state for a previous result. Outstanding responses
    /// are invalidated.
    pub fn reset(&mut self) {
        self.state = OrderState::Idle;
        self.generation.advance();
    }

    /// Applies the outcome of the order issued with `ticket`. Returns `false`
    /// when the ticket was superseded and the outcome was dropped.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        outcome: Result<OrderConfirmation, ServiceError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(ticket = ticket.value(), "dropping superseded order response");
            return false;
        }
        self.state = match outcome {
            Ok(confirmation) => {
                info!(order_id = %confirmation.order_id, supplier = %confirmation.supplier, "order confirmed");
                OrderState::Confirmed(confirmation)
            }
            Err(err) => {
                warn!(error = %err, "order failed");
                OrderState::Error(err.user_message(ORDER_FALLBACK_MESSAGE))
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use feed_core::{Ingredient, OrderItem};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn corn_result() -> CalculationResult {
        CalculationResult {
            ingredients: vec![Ingredient {
                ingredient_name: "Corn".to_string(),
                percentage: Some(dec!(50)),
                daily_amount_kg: Some(dec!(0.5)),
                total_amount_kg: Some(dec!(10)),
                cost_per_kg: Some(dec!(0.75)),
            }],
            ..Default::default()
        }
    }

    fn confirmation() -> OrderConfirmation {
        OrderConfirmation {
            order_id: "ORD-1".to_string(),
            supplier: "Delta Mills".to_string(),
            total_cost: Some(dec!(7.5)),
        }
    }

    #[test]
    fn begin_projects_ingredients_and_enters_loading() {
        let mut session = OrderSession::new();

        let (_, request) = session.begin(&corn_result()).unwrap();

        assert_eq!(
            request.items,
            vec![OrderItem {
                ingredient_name: "Corn".to_string(),
                total_amount_kg: Some(dec!(10)),
            }]
        );
        assert_eq!(session.state(), &OrderState::Loading);
    }

    #[test]
    fn confirmation_closes_the_gate() {
        let mut session = OrderSession::new();
        let (ticket, _) = session.begin(&corn_result()).unwrap();

        session.finish(ticket, Ok(confirmation()));

        assert_eq!(session.confirmation(), Some(&confirmation()));
        assert!(!session.can_order());
        assert_eq!(
            session.begin(&corn_result()).unwrap_err(),
            OrderGateError::AlreadyConfirmed
        );
    }

    #[test]
    fn failure_keeps_the_action_available() {
        let mut session = OrderSession::new();
        let (ticket, _) = session.begin(&corn_result()).unwrap();

        session.finish(ticket, Err(ServiceError::Rejected { status: 503, message: None }));

        assert_eq!(session.error(), Some(ORDER_FALLBACK_MESSAGE));
        assert!(session.can_order());
        assert!(session.begin(&corn_result()).is_ok());
    }

    #[test]
    fn failure_prefers_server_message() {
        let mut session = OrderSession::new();
        let (ticket, _) = session.begin(&corn_result()).unwrap();

        session.finish(
            ticket,
            Err(ServiceError::Rejected {
                status: 409,
                message: Some("Supplier out of stock".into()),
            }),
        );

        assert_eq!(session.error(), Some("Supplier out of stock"));
    }

    #[test]
    fn reset_reopens_gate_and_drops_outstanding_response() {
        let mut session = OrderSession::new();
        let (confirmed, _) = session.begin(&corn_result()).unwrap();
        session.finish(confirmed, Ok(confirmation()));

        session.reset();
        assert!(session.can_order());
        let (pending, _) = session.begin(&corn_result()).unwrap();
        session.reset();

        assert!(!session.finish(pending, Ok(confirmation())));
        assert_eq!(session.state(), &OrderState::Idle);
    }
}
