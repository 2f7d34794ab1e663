use std::time::Duration;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::cli::DetectArgs;
use crate::http::HttpSettings;
use crate::output::OutputFormat;
use crate::providers::ObserveConfig;
use crate::providers::aws::InventoryLocation;
use crate::terraform::{StateError, StateLocation};

pub const DEFAULT_REGION: &str = "eu-west-2";
pub const MAX_RETRIES_LIMIT: u32 = 10;
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid state location: {0}")]
    State(#[from] StateError),

    #[error("invalid inventory location: {0}")]
    Inventory(String),

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("timeout_seconds must be greater than 0")]
    ZeroTimeout,

    #[error("max_retries must be at most {}, got {found}", MAX_RETRIES_LIMIT)]
    TooManyRetries { found: u32 },

    #[error("unknown log level '{0}' (expected one of error, warn, info, debug, trace)")]
    LogLevel(String),
}

/// Validated settings for one detection run.
#[derive(Debug, Clone)]
pub struct DetectConfig {
    pub state: StateLocation,
    pub inventory: String,
    pub provider: String,
    pub region: String,
    pub http: HttpSettings,
    pub output: OutputFormat,
}

impl DetectConfig {
    pub fn from_args(args: &DetectArgs) -> Result<Self, ConfigError> {
        let state = StateLocation::parse(&args.state)?;

        if args.inventory.trim().is_empty() {
            return Err(ConfigError::Empty { field: "inventory" });
        }
        InventoryLocation::parse(&args.inventory).map_err(|e| ConfigError::Inventory(e.to_string()))?;

        let region = args.region.trim();
        if region.is_empty() {
            return Err(ConfigError::Empty { field: "region" });
        }
        if args.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if args.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::TooManyRetries {
                found: args.max_retries,
            });
        }

        Ok(Self {
            state,
            inventory: args.inventory.trim().to_string(),
            provider: "aws".to_string(),
            region: region.to_string(),
            http: HttpSettings {
                token: args.token.clone().filter(|t| !t.is_empty()),
                timeout: Duration::from_secs(args.timeout_seconds),
                max_retries: args.max_retries,
                ..HttpSettings::default()
            },
            output: args.output,
        })
    }

    pub fn observe_config(&self) -> ObserveConfig {
        ObserveConfig {
            inventory: self.inventory.clone(),
            region: self.region.clone(),
            http: self.http.clone(),
        }
    }
}

/// `RUST_LOG` when set, otherwise the configured level.
pub fn log_filter(log_level: &str) -> Result<EnvFilter, ConfigError> {
    let level = log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::LogLevel(log_level.to_string()));
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
}
