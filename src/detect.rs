//! Orchestrates a run: read state, observe live resources, reconcile.

use tracing::info;

use crate::compare::ComparatorRegistry;
use crate::config::DetectConfig;
use crate::error::TfDriftError;
use crate::http;
use crate::identity::IdentityResolver;
use crate::providers::get_provider;
use crate::reconcile::{ReconciliationReport, Reconciler, ReportContext};
use crate::resource::ObservedResourceMap;
use crate::terraform::TerraformState;

/// Identity and comparator tables for one provider family. The same resolver keys both
/// the declared and the observed side.
#[derive(Debug)]
pub struct DriftEngine {
    pub resolver: IdentityResolver,
    pub comparators: ComparatorRegistry,
}

impl DriftEngine {
    pub fn aws() -> Self {
        Self {
            resolver: IdentityResolver::aws(),
            comparators: ComparatorRegistry::aws(),
        }
    }

    pub fn reconcile(&self, state: &TerraformState, observed: &ObservedResourceMap) -> ReconciliationReport {
        Reconciler::new(&self.resolver, &self.comparators).reconcile(&state.resources, observed)
    }
}

/// Reconciles an already-parsed state against an already-keyed observed map.
pub fn detect_with(state: &TerraformState, observed: &ObservedResourceMap) -> ReconciliationReport {
    DriftEngine::aws().reconcile(state, observed)
}

/// Full run. Collaborator failures abort before reconciliation starts.
pub async fn detect_drift(config: &DetectConfig) -> Result<ReconciliationReport, TfDriftError> {
    let contents = config.state.read(&config.http, &config.region).await?;
    let state = TerraformState::parse(&contents)?;
    info!(
        resources = state.resource_block_count(),
        instances = state.instance_count(),
        terraform_version = state.terraform_version.as_deref().unwrap_or("unknown"),
        "state parsed"
    );

    let engine = DriftEngine::aws();
    let provider = get_provider(&config.provider)?;
    let observation = provider
        .observe(&engine.resolver, &config.observe_config())
        .await?;

    let context = ReportContext {
        state_location: config.state.to_string(),
        inventory_location: http::display_url(&config.inventory),
        inventory_captured_at: observation.captured_at.clone(),
        region: observation.region.clone(),
        account_id: observation.account_id.clone(),
        terraform_version: state.terraform_version.clone(),
        resource_blocks: state.resource_block_count(),
        observed_resources: observation.resources.len(),
    };

    Ok(engine
        .reconcile(&state, &observation.resources)
        .with_context(context))
}
