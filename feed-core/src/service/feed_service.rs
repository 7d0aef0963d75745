use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CalculationRequest, CalculationResult, OrderConfirmation, OrderRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with a non-2xx status.
    #[error("Service rejected the request (HTTP {status}){}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ServiceError {
    /// The message the service itself supplied, if any. Sessions prefer this
    /// over their own fallback text.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Resolves the text shown to the user for a failed call.
    pub fn user_message(
        &self,
        fallback: &str,
    ) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// The remote feed calculation service.
///
/// One implementation talks HTTP; tests substitute scripted stubs.
#[async_trait]
pub trait FeedService: Send + Sync {
    /// `GET /species`. A response without `data` is an empty catalog.
    async fn list_species(&self) -> Result<Vec<String>, ServiceError>;

    /// `POST /calculate`.
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ServiceError>;

    /// `POST /order`.
    async fn place_order(
        &self,
        request: &OrderRequest,
    ) -> Result<OrderConfirmation, ServiceError>;
}
