use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compare::AttributeDifference;
use crate::identity::IdentityKey;
use crate::resource::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftClassification {
    AttributeDrift,
    Missing,
}

impl DriftClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftClassification::AttributeDrift => "attribute_drift",
            DriftClassification::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftRecord {
    pub key: IdentityKey,
    pub kind: ResourceKind,
    pub logical_name: String,
    pub address: String,
    pub classification: DriftClassification,
    pub description: String,
    pub differences: Vec<AttributeDifference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedResource {
    pub key: IdentityKey,
    pub kind: ResourceKind,
    pub logical_name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaResource {
    pub kind: ResourceKind,
    pub logical_name: String,
    pub display_name: String,
    /// ARN, else ID, else `(no id/arn)`.
    pub identifier: String,
}

/// A declared instance whose kind has no comparator registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnaccountedResource {
    pub key: IdentityKey,
    pub kind: ResourceKind,
    pub logical_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCounts {
    /// Every declared instance, duplicates included.
    pub declared_instances: usize,
    /// Distinct identity keys; each is classified exactly once.
    pub distinct_keys: usize,
    pub matched: usize,
    pub attribute_drift: usize,
    pub missing: usize,
    pub meta: usize,
    pub unaccounted: usize,
}

impl ReportCounts {
    pub fn drifted(&self) -> usize {
        self.attribute_drift + self.missing
    }

    pub fn duplicates(&self) -> usize {
        self.declared_instances - self.distinct_keys
    }
}

/// Where the two snapshots came from. Filled in by the orchestrator, not the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContext {
    pub state_location: String,
    pub inventory_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_captured_at: Option<String>,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    pub resource_blocks: usize,
    pub observed_resources: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ReportContext>,
    pub counts: ReportCounts,
    pub drift: Vec<DriftRecord>,
    pub matched: Vec<MatchedResource>,
    pub meta: Vec<MetaResource>,
    pub unaccounted: Vec<UnaccountedResource>,
}

impl ReconciliationReport {
    pub fn drift_detected(&self) -> bool {
        !self.drift.is_empty()
    }

    pub fn with_context(mut self, context: ReportContext) -> Self {
        self.context = Some(context);
        self
    }
}
