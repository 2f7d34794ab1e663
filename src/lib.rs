//! tfdrift - Terraform drift detection
//!
//! A library for reconciling Terraform state against live cloud inventory and
//! classifying every declared resource as matched, drifted, missing, meta or unaccounted.

pub mod cli;
pub mod compare;
pub mod config;
pub mod detect;
pub mod http;
pub mod identity;
pub mod kinds;
pub mod output;
pub mod providers;
pub mod reconcile;
pub mod resource;
pub mod terraform;

mod error;

pub use compare::{AttributeDifference, ComparatorRegistry};
pub use config::DetectConfig;
pub use detect::{DriftEngine, detect_drift, detect_with};
pub use error::TfDriftError;
pub use identity::{IdentityKey, IdentityResolver, KeySource};
pub use providers::aws::{AwsError, AwsInventoryClient, InventorySnapshot};
pub use reconcile::{DriftClassification, DriftRecord, ReconciliationReport, Reconciler};
pub use resource::{AttributeBag, DeclaredResource, ObservedResourceMap, ResourceKind};
pub use terraform::{StateError, StateLocation, TerraformState};
