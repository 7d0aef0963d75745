//! Runs service calls off the state-owning loop.
//!
//! Every call is spawned on the tokio runtime and its outcome is posted back
//! as a [`SessionEvent`]. Nothing here blocks the caller, cancels an earlier
//! call, or retries a failed one.

use std::sync::Arc;

use feed_core::{CalculationRequest, FeedService, OrderRequest};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use crate::{
    models::InputError,
    sessions::{OrderGateError, Ticket},
    state::{AppState, SessionEvent},
};

#[derive(Clone)]
pub struct Dispatcher {
    service: Arc<dyn FeedService>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl Dispatcher {
    /// Creates a dispatcher and the receiving end its events arrive on.
    pub fn new(service: Arc<dyn FeedService>) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (Self { service, events }, receiver)
    }

    /// Starts the species catalog load.
    pub fn load_species(
        &self,
        state: &mut AppState,
    ) -> JoinHandle<()> {
        let ticket = state.begin_species_load();
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = service.list_species().await;
            post(&events, SessionEvent::SpeciesLoaded { ticket, outcome });
        })
    }

    /// Submits the form. A submission rejected by the gate makes no call.
    pub fn submit(
        &self,
        state: &mut AppState,
    ) -> Result<(Ticket, JoinHandle<()>), InputError> {
        let (ticket, request) = state.begin_calculation()?;
        Ok((ticket, self.spawn_calculation(ticket, request)))
    }

    /// Orders the ingredients of the current result.
    pub fn place_order(
        &self,
        state: &mut AppState,
    ) -> Result<(Ticket, JoinHandle<()>), OrderGateError> {
        let (ticket, request) = state.begin_order()?;
        Ok((ticket, self.spawn_order(ticket, request)))
    }

    fn spawn_calculation(
        &self,
        ticket: Ticket,
        request: CalculationRequest,
    ) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = service.calculate(&request).await;
            post(&events, SessionEvent::Calculated { ticket, outcome });
        })
    }

    fn spawn_order(
        &self,
        ticket: Ticket,
        request: OrderRequest,
    ) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = service.place_order(&request).await;
            post(&events, SessionEvent::OrderPlaced { ticket, outcome });
        })
    }
}

fn post(
    events: &mpsc::UnboundedSender<SessionEvent>,
    event: SessionEvent,
) {
    // The loop may already be gone (user quit); the outcome has nowhere to go.
    if events.send(event).is_err() {
        debug!("event loop closed; discarding service outcome");
    }
}
