//! Request/response lifecycles.
//!
//! Each session is a small state machine driven in two halves: `begin`
//! moves it to its loading state and hands out a [`Ticket`], and `finish`
//! applies the service outcome for that ticket. A session only honours the
//! ticket it issued last, so a slow response to an earlier call can never
//! overwrite the state produced by a later one.

pub mod calculation;
pub mod catalog;
pub mod order;

pub use calculation::{CalculationSession, CalculationState};
pub use catalog::{CatalogState, SpeciesCatalog};
pub use order::{OrderGateError, OrderSession, OrderState};

/// Identifies one invocation of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic invocation counter owned by a session.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    /// Invalidates every outstanding ticket and issues a new one.
    pub fn advance(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn is_current(
        &self,
        ticket: Ticket,
    ) -> bool {
        ticket.0 == self.current && self.current != 0
    }
}
