use super::ServiceError;

/// Where the feed calculation service lives.
///
/// Resolved once at start-up and handed to the client constructor; nothing
/// reads it from global state afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base address every endpoint path is appended to.
    pub base_url: String,
}

impl ServiceConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api/v1/feed-calculator";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Joins `path` (e.g. `"/calculate"`) onto the base address.
    ///
    /// # Errors
    /// [`ServiceError::Configuration`] when the base address is blank or is
    /// not an `http`/`https` URL.
    pub fn endpoint(
        &self,
        path: &str,
    ) -> Result<String, ServiceError> {
        let base = self.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ServiceError::Configuration(
                "service base URL is empty".to_string(),
            ));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ServiceError::Configuration(format!(
                "service base URL '{base}' must start with http:// or https://"
            )));
        }
        Ok(format!("{base}/{}", path.trim_start_matches('/')))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}
