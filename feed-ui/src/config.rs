//! Start-up configuration.
//!
//! Values come from command-line flags, then an optional TOML file, then
//! built-in defaults. The result is resolved once and passed down
//! explicitly; nothing re-reads it later.
//!
//! ```toml
//! [service]
//! base_url = "http://localhost:8080/api/v1/feed-calculator"
//!
//! [logging]
//! level = "info"
//! file = "feed-calculator.log"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use feed_core::ServiceConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of the TOML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub service: ServiceSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl ConfigFile {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn resolve(
        file: Option<ConfigFile>,
        overrides: Overrides,
    ) -> Self {
        let file = file.unwrap_or_default();
        let base_url = overrides
            .base_url
            .or(file.service.base_url)
            .unwrap_or_else(|| ServiceConfig::DEFAULT_BASE_URL.to_string());

        Self {
            service: ServiceConfig::new(base_url),
            log_level: overrides.log_level.or(file.logging.level),
            log_file: overrides.log_file.or(file.logging.file),
        }
    }
}
