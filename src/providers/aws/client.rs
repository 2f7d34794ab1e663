use super::AwsError;
use super::types::InventorySnapshot;
use crate::http::{self, HttpSettings};

/// HTTP client for inventory snapshots served by an exporter endpoint.
#[derive(Clone)]
pub struct AwsInventoryClient {
    client: reqwest::Client,
    settings: HttpSettings,
}

impl AwsInventoryClient {
    pub fn new(settings: HttpSettings) -> Result<Self, AwsError> {
        let client = http::build_client(&settings)?;
        Ok(Self { client, settings })
    }

    pub async fn fetch_snapshot(&self, url: &str) -> Result<InventorySnapshot, AwsError> {
        let body = http::get_text(&self.client, url, &self.settings).await?;
        InventorySnapshot::parse(&body)
    }
}

impl std::fmt::Debug for AwsInventoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsInventoryClient")
            .field("token", &"[REDACTED]")
            .field("timeout", &self.settings.timeout)
            .field("max_retries", &self.settings.max_retries)
            .finish()
    }
}
