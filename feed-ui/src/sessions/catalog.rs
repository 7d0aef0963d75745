use feed_core::ServiceError;
use tracing::{debug, error, info};

use super::{Generation, Ticket};

pub const CATALOG_ERROR_MESSAGE: &str = "Could not connect to the server to fetch fish species.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    #[default]
    Idle,
    Loading,
    /// Species identifiers in service order (which is also display order).
    Loaded(Vec<String>),
    Failed(String),
}

/// The supported-species enumeration, loaded once and never retried
/// automatically. It does not gate the calculation form.
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    state: CatalogState,
    generation: Generation,
}

impl SpeciesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Selectable species; empty until loaded and after a failure.
    pub fn options(&self) -> &[String] {
        match &self.state {
            CatalogState::Loaded(species) => species,
            _ => &[],
        }
    }

    /// Standing connectivity banner, if the load failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CatalogState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn begin(&mut self) -> Ticket {
        self.state = CatalogState::Loading;
        self.generation.advance()
    }

    /// Applies the outcome of the load issued with `ticket`. Returns `false`
    /// when the ticket was superseded and the outcome was dropped.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<String>, ServiceError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(ticket = ticket.value(), "dropping superseded species response");
            return false;
        }
        self.state = match outcome {
            Ok(species) => {
                info!(count = species.len(), "species catalog loaded");
                CatalogState::Loaded(species)
            }
            Err(err) => {
                error!(error = %err, "failed to fetch species");
                CatalogState::Failed(CATALOG_ERROR_MESSAGE.to_string())
            }
        };
        true
    }
}
