mod client;
mod error;
mod live;
#[cfg(test)]
pub(crate) mod samples;
pub(crate) mod sdk;
mod types;

pub use client::AwsInventoryClient;
pub use error::AwsError;
pub use live::LiveInventory;
pub use types::{InventoryLocation, InventoryRecord, InventorySnapshot};

use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{Observation, ObserveConfig, Provider, ProviderError};
use crate::identity::IdentityResolver;
use crate::kinds;
use crate::resource::ObservedResourceMap;

/// Kinds the AWS identity and comparator tables understand.
pub const RESOURCE_KINDS: &[&str] = &[
    kinds::INSTANCE,
    kinds::VPC,
    kinds::SUBNET,
    kinds::SECURITY_GROUP,
    kinds::INTERNET_GATEWAY,
    kinds::ROUTE_TABLE,
    kinds::ROUTE_TABLE_ASSOCIATION,
    kinds::S3_BUCKET,
    kinds::DYNAMODB_TABLE,
    kinds::DB_INSTANCE,
    kinds::SQS_QUEUE,
    kinds::SQS_QUEUE_POLICY,
    kinds::LAMBDA_FUNCTION,
    kinds::LAMBDA_PERMISSION,
    kinds::IAM_ROLE,
    kinds::IAM_ROLE_POLICY,
    kinds::IAM_ROLE_POLICY_ATTACHMENT,
    kinds::IAM_POLICY,
    kinds::IAM_OIDC_PROVIDER,
    kinds::EVENT_BUS,
    kinds::EVENT_RULE,
    kinds::EVENT_TARGET,
    kinds::ECS_CLUSTER,
    kinds::ECS_SERVICE,
    kinds::ECS_TASK_DEFINITION,
    kinds::APIGW_REST_API,
    kinds::APIGW_RESOURCE,
    kinds::APIGW_METHOD,
    kinds::APIGW_INTEGRATION,
    kinds::APIGW_DEPLOYMENT,
    kinds::APIGW_STAGE,
    kinds::CLOUDWATCH_DASHBOARD,
    kinds::CLOUDWATCH_METRIC_ALARM,
    kinds::CLOUDWATCH_LOG_GROUP,
];

#[derive(Debug, Default)]
pub struct AwsProvider;

impl AwsProvider {
    pub fn new() -> Self {
        Self
    }

    async fn load_snapshot(&self, config: &ObserveConfig) -> Result<InventorySnapshot, AwsError> {
        match InventoryLocation::parse(&config.inventory)? {
            InventoryLocation::Local(path) => {
                info!(path = %path.display(), "reading inventory snapshot");
                let contents = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| AwsError::Read { path, source })?;
                InventorySnapshot::parse(&contents)
            }
            InventoryLocation::Http(url) => {
                info!(url = %crate::http::display_url(&url), "fetching inventory snapshot");
                let client = AwsInventoryClient::new(config.http.clone())?;
                client.fetch_snapshot(&url).await
            }
            InventoryLocation::Live => LiveInventory::connect(&config.region).await.snapshot().await,
        }
    }
}

#[async_trait]
impl Provider for AwsProvider {
    fn name(&self) -> &str {
        "aws"
    }

    fn resource_kinds(&self) -> Vec<&str> {
        RESOURCE_KINDS.to_vec()
    }

    async fn observe(
        &self,
        resolver: &IdentityResolver,
        config: &ObserveConfig,
    ) -> Result<Observation, ProviderError> {
        let snapshot = self.load_snapshot(config).await?;
        check_region(&snapshot, &config.region)?;

        let record_count = snapshot.resources.len();
        let resources = key_records(resolver, snapshot.resources);

        info!(
            region = %snapshot.region,
            records = record_count,
            keyed = resources.len(),
            generated_at = snapshot.generated_at.as_deref().unwrap_or("unknown"),
            "inventory loaded"
        );

        Ok(Observation {
            region: snapshot.region,
            account_id: snapshot.account_id,
            captured_at: snapshot.generated_at,
            resources,
        })
    }
}

pub fn check_region(snapshot: &InventorySnapshot, expected: &str) -> Result<(), AwsError> {
    if snapshot.region.eq_ignore_ascii_case(expected) {
        return Ok(());
    }
    Err(AwsError::RegionMismatch {
        expected: expected.to_string(),
        found: snapshot.region.clone(),
    })
}

/// Keys live records with the shared resolver. Records without an identity are
/// dropped; the first record wins on a duplicate key.
pub fn key_records(resolver: &IdentityResolver, records: Vec<InventoryRecord>) -> ObservedResourceMap {
    let mut observed = ObservedResourceMap::with_capacity(records.len());

    for record in records {
        let Some(resolved) = resolver.resolve_observed(&record.kind, &record.attributes) else {
            warn!(kind = %record.kind, "live record has no identity; skipped");
            continue;
        };
        match observed.entry(resolved.key) {
            Entry::Vacant(slot) => {
                slot.insert(record.attributes);
            }
            Entry::Occupied(slot) => {
                warn!(kind = %record.kind, key = %slot.key(), "duplicate live record; keeping the first");
            }
        }
    }

    observed
}
