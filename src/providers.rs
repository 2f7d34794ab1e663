pub mod aws;

use async_trait::async_trait;
use thiserror::Error;

use crate::http::HttpSettings;
use crate::identity::IdentityResolver;
use crate::resource::ObservedResourceMap;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("aws error: {0}")]
    Aws(String),
}

/// Inputs a provider needs to observe live state.
#[derive(Debug, Clone)]
pub struct ObserveConfig {
    /// Inventory location: a plain path, `local://` path, `http(s)://` URL, or `live`.
    pub inventory: String,
    pub region: String,
    pub http: HttpSettings,
}

/// Live resources keyed with the shared resolver, plus where they came from.
#[derive(Debug, Clone)]
pub struct Observation {
    pub region: String,
    pub account_id: Option<String>,
    /// When the live data was captured, as reported by its source.
    pub captured_at: Option<String>,
    pub resources: ObservedResourceMap,
}

#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;
    fn resource_kinds(&self) -> Vec<&str>;
    async fn observe(
        &self,
        resolver: &IdentityResolver,
        config: &ObserveConfig,
    ) -> Result<Observation, ProviderError>;
}

pub fn get_provider(name: &str) -> Result<Box<dyn Provider>, ProviderError> {
    match name {
        "aws" => Ok(Box::new(aws::AwsProvider::new())),
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}
