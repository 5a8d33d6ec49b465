//! Service configuration and environment variable handling.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::error::DispatchError;
use crate::models::Clock;
use crate::services::schedule_number::DEFAULT_DRIVER_PREFIX;
use crate::services::{DispatchEngine, PricingTable, ScheduleNumberer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid port number, got '{value}'")]
    InvalidPort { name: &'static str, value: String },

    #[error("failed to read pricing table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pricing table {path} is invalid: {source}")]
    PricingTable {
        path: PathBuf,
        #[source]
        source: DispatchError,
    },
}

/// Configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Namespace prefix stripped from driver ids in schedule numbers
    pub driver_prefix: String,
    /// Optional TOML file replacing the standard pricing table
    pub pricing_table_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            driver_prefix: DEFAULT_DRIVER_PREFIX.to_string(),
            pricing_table_path: None,
        }
    }
}

impl AppConfig {
    /// Create a new configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` (optional, default: 0.0.0.0): Bind host
    /// - `PORT` (optional, default: 8080): Bind port
    /// - `DISPATCH_DRIVER_PREFIX` (optional, default: `driver-`): Driver id namespace
    /// - `DISPATCH_PRICING_TABLE` (optional): Path to a TOML pricing table
    ///
    /// # Errors
    /// Returns an error if `PORT` is set but not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { name: "PORT", value })?,
            Err(_) => defaults.port,
        };
        // An empty prefix is allowed and disables stripping
        let driver_prefix =
            env::var("DISPATCH_DRIVER_PREFIX").unwrap_or(defaults.driver_prefix);
        let pricing_table_path = env::var("DISPATCH_PRICING_TABLE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            driver_prefix,
            pricing_table_path,
        })
    }

    /// Bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pricing table from `pricing_table_path`, or the standard table.
    pub fn load_pricing_table(&self) -> Result<PricingTable, ConfigError> {
        let Some(path) = &self.pricing_table_path else {
            return Ok(PricingTable::standard());
        };
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        PricingTable::from_toml_str(&source).map_err(|source| ConfigError::PricingTable {
            path: path.clone(),
            source,
        })
    }

    /// Build a dispatch engine from this configuration.
    pub fn build_engine(&self, clock: Arc<dyn Clock>) -> Result<DispatchEngine, ConfigError> {
        Ok(DispatchEngine::new(
            Arc::new(self.load_pricing_table()?),
            ScheduleNumberer::new(self.driver_prefix.clone()),
            clock,
        ))
    }
}
