//! Application state for the feed calculator front end.
//!
//! Holds the form inputs and the three sessions for as long as the front end
//! runs. Service outcomes arrive as [`SessionEvent`]s and are applied here,
//! on the single loop that owns the state.

use feed_core::{
    CalculationRequest, CalculationResult, OrderConfirmation, OrderRequest, ServiceError,
};

use crate::{
    models::{FieldName, InputError, InputFields},
    sessions::{CalculationSession, OrderGateError, OrderSession, SpeciesCatalog, Ticket},
};

/// A finished service call, tagged with the ticket it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SpeciesLoaded {
        ticket: Ticket,
        outcome: Result<Vec<String>, ServiceError>,
    },
    Calculated {
        ticket: Ticket,
        outcome: Result<CalculationResult, ServiceError>,
    },
    OrderPlaced {
        ticket: Ticket,
        outcome: Result<OrderConfirmation, ServiceError>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    fields: InputFields,
    catalog: SpeciesCatalog,
    calculation: CalculationSession,
    order: OrderSession,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &InputFields {
        &self.fields
    }

    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    pub fn calculation(&self) -> &CalculationSession {
        &self.calculation
    }

    pub fn order(&self) -> &OrderSession {
        &self.order
    }

    pub fn set_field(
        &mut self,
        field: FieldName,
        value: impl Into<String>,
    ) {
        self.fields.set(field, value);
    }

    pub fn begin_species_load(&mut self) -> Ticket {
        self.catalog.begin()
    }

    /// Validates the form and, if it passes the submission gate, starts a
    /// new calculation. The order session is reset so the coming result gets
    /// its own order action. On error no session is touched.
    pub fn begin_calculation(&mut self) -> Result<(Ticket, CalculationRequest), InputError> {
        let request = self.fields.to_request()?;
        self.order.reset();
        Ok((self.calculation.begin(), request))
    }

    /// Starts an order for the current calculation result.
    pub fn begin_order(&mut self) -> Result<(Ticket, OrderRequest), OrderGateError> {
        let result = self.calculation.result().ok_or(OrderGateError::NoResult)?;
        self.order.begin(result)
    }

    /// Applies a finished call. Returns `false` when the event belonged to a
    /// superseded invocation and changed nothing.
    pub fn apply(
        &mut self,
        event: SessionEvent,
    ) -> bool {
        match event {
            SessionEvent::SpeciesLoaded { ticket, outcome } => self.catalog.finish(ticket, outcome),
            SessionEvent::Calculated { ticket, outcome } => {
                self.calculation.finish(ticket, outcome)
            }
            SessionEvent::OrderPlaced { ticket, outcome } => self.order.finish(ticket, outcome),
        }
    }

    /// `true` while any session waits for the service.
    pub fn is_busy(&self) -> bool {
        use crate::sessions::{CatalogState, OrderState};

        matches!(self.catalog.state(), CatalogState::Loading)
            || self.calculation.is_loading()
            || matches!(self.order.state(), OrderState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use feed_core::Ingredient;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::sessions::{CalculationState, OrderState};

    fn filled_state() -> AppState {
        let mut state = AppState::new();
        state.set_field(FieldName::FishQuantity, "100");
        state.set_field(FieldName::CurrentWeightPerFish, "0.5");
        state.set_field(FieldName::TargetWeightPerFish, "1.2");
        state
    }

    fn result() -> CalculationResult {
        CalculationResult {
            ingredients: vec![Ingredient {
                ingredient_name: "Corn".into(),
                total_amount_kg: Some(dec!(10)),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn confirmation() -> OrderConfirmation {
        OrderConfirmation {
            order_id: "ORD-9".into(),
            supplier: "Delta Mills".into(),
            total_cost: Some(dec!(12)),
        }
    }

    fn calculated(state: &mut AppState) {
        let (ticket, _) = state.begin_calculation().unwrap();
        state.apply(SessionEvent::Calculated {
            ticket,
            outcome: Ok(result()),
        });
    }

    #[test]
    fn gate_rejection_leaves_sessions_untouched() {
        let mut state = AppState::new();

        assert!(matches!(
            state.begin_calculation(),
            Err(InputError::MissingRequired(_))
        ));
        assert_eq!(state.calculation().state(), &CalculationState::Idle);
        assert!(!state.is_busy());
    }

    #[test]
    fn order_requires_a_calculation_result() {
        let mut state = filled_state();

        assert_eq!(state.begin_order().unwrap_err(), OrderGateError::NoResult);

        state.begin_calculation().unwrap();
        assert_eq!(state.begin_order().unwrap_err(), OrderGateError::NoResult);
    }

    #[test]
    fn new_calculation_reopens_the_order_gate() {
        let mut state = filled_state();
        calculated(&mut state);
        let (ticket, _) = state.begin_order().unwrap();
        state.apply(SessionEvent::OrderPlaced {
            ticket,
            outcome: Ok(confirmation()),
        });
        assert_eq!(
            state.begin_order().unwrap_err(),
            OrderGateError::AlreadyConfirmed
        );

        calculated(&mut state);

        assert_eq!(state.order().state(), &OrderState::Idle);
        assert!(state.begin_order().is_ok());
    }

    #[test]
    fn order_failure_keeps_calculation_result() {
        let mut state = filled_state();
        calculated(&mut state);
        let (ticket, _) = state.begin_order().unwrap();

        state.apply(SessionEvent::OrderPlaced {
            ticket,
            outcome: Err(ServiceError::Connection("refused".into())),
        });

        assert_eq!(state.calculation().result(), Some(&result()));
        assert!(state.order().error().is_some());
    }

    #[test]
    fn order_response_for_previous_result_is_dropped() {
        let mut state = filled_state();
        calculated(&mut state);
        let (old_order, _) = state.begin_order().unwrap();

        calculated(&mut state);
        let applied = state.apply(SessionEvent::OrderPlaced {
            ticket: old_order,
            outcome: Ok(confirmation()),
        });

        assert!(!applied);
        assert_eq!(state.order().state(), &OrderState::Idle);
    }

    #[test]
    fn species_failure_does_not_affect_submission() {
        let mut state = filled_state();
        let ticket = state.begin_species_load();
        state.apply(SessionEvent::SpeciesLoaded {
            ticket,
            outcome: Err(ServiceError::Connection("down".into())),
        });

        assert!(state.catalog().options().is_empty());
        assert!(state.begin_calculation().is_ok());
        assert!(state.calculation().is_loading());
    }
}
