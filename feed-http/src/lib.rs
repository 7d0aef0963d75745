//! HTTP client for the feed calculation service.
//!
//! All requests go to a single base address (see [`ServiceConfig`]) and carry
//! a JSON content type. Success bodies use the `{ "data": ... }` envelope;
//! failure bodies may carry a `message` which is surfaced through
//! [`ServiceError::Rejected`].

use async_trait::async_trait;
use feed_core::{
    CalculationRequest, CalculationResult, Envelope, ErrorBody, FeedService, OrderConfirmation,
    OrderRequest, ServiceConfig, ServiceError,
};
use reqwest::{
    Client, RequestBuilder,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const SPECIES_PATH: &str = "/species";
const CALCULATE_PATH: &str = "/calculate";
const ORDER_PATH: &str = "/order";

pub struct HttpFeedService {
    client: Client,
    config: ServiceConfig,
}

impl HttpFeedService {
    /// Builds a client bound to `config.base_url`.
    ///
    /// # Errors
    /// [`ServiceError::Configuration`] when the base address is unusable or
    /// the underlying HTTP client cannot be constructed.
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        // Fail at start-up rather than on the first request.
        config.endpoint(SPECIES_PATH)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ServiceError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Sends `request` and unwraps the envelope's `data`.
    async fn send<T: DeserializeOwned>(
        &self,
        path: &'static str,
        request: RequestBuilder,
    ) -> Result<Option<T>, ServiceError> {
        let response = request.send().await.map_err(|e| {
            warn!(endpoint = path, error = %e, "service unreachable");
            ServiceError::Connection(e.to_string())
        })?;

        let status = response.status();
        debug!(endpoint = path, status = status.as_u16(), "service responded");

        let body = response.text().await.map_err(|e| {
            warn!(endpoint = path, error = %e, "response body unreadable");
            ServiceError::Connection(e.to_string())
        })?;

        if !status.is_success() {
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message: ErrorBody::message_from(&body),
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| ServiceError::Decode(format!("{path}: {e}")))?;
        Ok(envelope.data)
    }

    fn require_data<T>(
        path: &'static str,
        data: Option<T>,
    ) -> Result<T, ServiceError> {
        data.ok_or_else(|| ServiceError::Decode(format!("{path}: response has no data")))
    }
}

#[async_trait]
impl FeedService for HttpFeedService {
    async fn list_species(&self) -> Result<Vec<String>, ServiceError> {
        let url = self.config.endpoint(SPECIES_PATH)?;
        let species: Option<Vec<String>> = self.send(SPECIES_PATH, self.client.get(url)).await?;
        Ok(species.unwrap_or_default())
    }

    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ServiceError> {
        let url = self.config.endpoint(CALCULATE_PATH)?;
        let data = self
            .send(CALCULATE_PATH, self.client.post(url).json(request))
            .await?;
        Self::require_data(CALCULATE_PATH, data)
    }

    async fn place_order(
        &self,
        request: &OrderRequest,
    ) -> Result<OrderConfirmation, ServiceError> {
        let url = self.config.endpoint(ORDER_PATH)?;
        let data = self
            .send(ORDER_PATH, self.client.post(url).json(request))
            .await?;
        Self::require_data(ORDER_PATH, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_unusable_base_url() {
        assert!(matches!(
            HttpFeedService::new(&ServiceConfig::new("")),
            Err(ServiceError::Configuration(_))
        ));
    }

    #[test]
    fn new_keeps_configured_base_url() {
        let service = HttpFeedService::new(&ServiceConfig::new("http://feed.test/api")).unwrap();

        assert_eq!(service.config().base_url, "http://feed.test/api");
    }

    #[test]
    fn require_data_reports_missing_payload() {
        let missing: Result<u8, _> = HttpFeedService::require_data(ORDER_PATH, None);

        match missing {
            Err(ServiceError::Decode(msg)) => assert!(msg.contains("/order")),
            other => panic!("expected Decode error, got {other:#?}"),
        }
    }
}
