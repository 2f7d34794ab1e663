//! Reconciliation Aggregator: keys every declared instance, matches it against the
//! observed snapshot and classifies it exactly once.
//!
//! A run moves through `KeysResolved → Reconciled → Classified → Reported`. Each stage is
//! a value consumed by the next; nothing is mutated in place and no stage can fail.

mod report;

use std::collections::HashSet;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::compare::{AttributeDifference, ComparatorRegistry};
use crate::compare::normalize;
use crate::identity::{Fallback, IdentityResolver, KeySource, ResolvedKey};
use crate::kinds::{self, PLACEHOLDER_NAME};
use crate::resource::{AttributeBag, DeclaredResource, ObservedResourceMap, ResourceKind, get_field};

pub use report::{
    DriftClassification, DriftRecord, MatchedResource, MetaResource, ReconciliationReport,
    ReportContext, ReportCounts, UnaccountedResource,
};

/// Observed fields that name a resource, tried after the kind's preferred field.
const NAME_FIELDS: &[&str] = &[
    "name",
    "Name",
    "FunctionName",
    "function_name",
    "clusterName",
    "serviceName",
    "TableName",
    "RoleName",
    "policy_name",
    "QueueName",
];

/// Last resort identifiers for placeholder-named resources.
const ID_FIELDS: &[&str] = &["id", "Id", "arn", "Arn"];

fn preferred_name_field(kind: &str) -> Option<&'static str> {
    let field = match kind {
        kinds::LAMBDA_FUNCTION => "FunctionName",
        kinds::LAMBDA_PERMISSION => "Sid",
        kinds::IAM_ROLE => "RoleName",
        kinds::IAM_ROLE_POLICY | kinds::IAM_POLICY => "PolicyName",
        kinds::ECS_CLUSTER => "clusterName",
        kinds::ECS_SERVICE => "serviceName",
        kinds::ECS_TASK_DEFINITION => "family",
        kinds::DYNAMODB_TABLE => "TableName",
        kinds::DB_INSTANCE => "DBInstanceIdentifier",
        kinds::S3_BUCKET | kinds::EVENT_BUS | kinds::EVENT_RULE => "Name",
        kinds::EVENT_TARGET => "Id",
        kinds::SECURITY_GROUP => "GroupName",
        kinds::CLOUDWATCH_LOG_GROUP => "logGroupName",
        kinds::CLOUDWATCH_METRIC_ALARM => "AlarmName",
        kinds::CLOUDWATCH_DASHBOARD => "DashboardName",
        kinds::APIGW_REST_API => "name",
        kinds::APIGW_RESOURCE => "path",
        kinds::APIGW_STAGE => "stageName",
        _ => return None,
    };
    Some(field)
}

/// One declared instance with its key.
#[derive(Debug, Clone)]
struct KeyedInstance<'a> {
    resource: &'a DeclaredResource,
    attributes: &'a AttributeBag,
    key: ResolvedKey,
}

impl KeyedInstance<'_> {
    fn kind(&self) -> &ResourceKind {
        &self.resource.kind
    }
}

/// Stage 1: every instance keyed, duplicates folded into their first occurrence.
struct KeysResolved<'a> {
    declared_instances: usize,
    unique: Vec<KeyedInstance<'a>>,
}

#[derive(Debug)]
enum Outcome<'a> {
    Meta,
    Unaccounted,
    Matched(&'a AttributeBag),
    Drifted(Vec<AttributeDifference>),
    Missing,
}

/// Stage 2: every distinct key paired with its outcome, in encounter order.
struct Reconciled<'a> {
    declared_instances: usize,
    outcomes: Vec<(KeyedInstance<'a>, Outcome<'a>)>,
}

/// Stage 3: outcomes split into the report's collections.
#[derive(Default)]
struct Classified {
    drift: Vec<DriftRecord>,
    matched: Vec<MatchedResource>,
    meta: Vec<MetaResource>,
    unaccounted: Vec<UnaccountedResource>,
}

pub struct Reconciler<'a> {
    resolver: &'a IdentityResolver,
    comparators: &'a ComparatorRegistry,
}

impl<'a> Reconciler<'a> {
    pub fn new(resolver: &'a IdentityResolver, comparators: &'a ComparatorRegistry) -> Self {
        Self {
            resolver,
            comparators,
        }
    }

    pub fn reconcile(
        &self,
        declared: &[DeclaredResource],
        observed: &ObservedResourceMap,
    ) -> ReconciliationReport {
        let keyed = self.resolve_keys(declared);
        let reconciled = self.reconcile_keys(keyed, observed);
        let declared_instances = reconciled.declared_instances;
        let distinct_keys = reconciled.outcomes.len();
        let classified = classify(reconciled);
        report(classified, declared_instances, distinct_keys)
    }

    fn resolve_keys<'d>(&self, declared: &'d [DeclaredResource]) -> KeysResolved<'d> {
        let instances: Vec<(&DeclaredResource, usize, &AttributeBag)> = declared
            .iter()
            .flat_map(|resource| {
                resource
                    .instances
                    .iter()
                    .enumerate()
                    .map(move |(index, instance)| (resource, index, &instance.attributes))
            })
            .collect();

        let keyed: Vec<KeyedInstance<'d>> = instances
            .par_iter()
            .map(|&(resource, index, attributes)| {
                let key = self.resolver.resolve(
                    &resource.kind,
                    attributes,
                    Fallback::new(&resource.name, index).in_module(resource.module.as_deref()),
                );
                KeyedInstance {
                    resource,
                    attributes,
                    key,
                }
            })
            .collect();

        let declared_instances = keyed.len();
        let mut seen = HashSet::with_capacity(declared_instances);
        let mut unique = Vec::with_capacity(declared_instances);
        for instance in keyed {
            debug!(
                address = %instance.resource.address(),
                key = %instance.key.key,
                source = ?instance.key.source,
                "resolved identity"
            );
            if instance.key.source == KeySource::Fallback && !instance.kind().is_meta() {
                debug!(key = %instance.key.key, "no ARN or ID; instance cannot match live state");
            }
            if seen.insert(instance.key.key.clone()) {
                unique.push(instance);
            } else {
                warn!(
                    address = %instance.resource.address(),
                    key = %instance.key.key,
                    "duplicate identity key; classified under its first occurrence"
                );
            }
        }

        KeysResolved {
            declared_instances,
            unique,
        }
    }

    fn reconcile_keys<'d>(
        &self,
        keyed: KeysResolved<'d>,
        observed: &'d ObservedResourceMap,
    ) -> Reconciled<'d> {
        let outcomes = keyed
            .unique
            .into_par_iter()
            .map(|instance| {
                let outcome = self.outcome(&instance, observed);
                (instance, outcome)
            })
            .collect();

        Reconciled {
            declared_instances: keyed.declared_instances,
            outcomes,
        }
    }

    fn outcome<'d>(&self, instance: &KeyedInstance<'d>, observed: &'d ObservedResourceMap) -> Outcome<'d> {
        let kind = instance.kind();
        if kind.is_meta() {
            return Outcome::Meta;
        }
        if !self.comparators.is_registered(kind) {
            return Outcome::Unaccounted;
        }
        match observed.get(&instance.key.key) {
            Some(live) => {
                let differences = self.comparators.compare(kind, instance.attributes, live);
                if differences.is_empty() {
                    Outcome::Matched(live)
                } else {
                    Outcome::Drifted(differences)
                }
            }
            None => Outcome::Missing,
        }
    }
}

fn classify(reconciled: Reconciled<'_>) -> Classified {
    let mut classified = Classified::default();

    for (instance, outcome) in reconciled.outcomes {
        let resource = instance.resource;
        let key = instance.key.key;
        match outcome {
            Outcome::Meta => classified.meta.push(MetaResource {
                kind: resource.kind.clone(),
                logical_name: resource.name.clone(),
                display_name: resource.address(),
                identifier: meta_identifier(instance.attributes),
            }),
            Outcome::Unaccounted => {
                warn!(kind = %resource.kind, key = %key, "no comparator registered for kind");
                classified.unaccounted.push(UnaccountedResource {
                    key,
                    kind: resource.kind.clone(),
                    logical_name: resource.name.clone(),
                });
            }
            Outcome::Matched(live) => classified.matched.push(MatchedResource {
                display_name: display_name(&resource.kind, &resource.name, &key, live),
                key,
                kind: resource.kind.clone(),
                logical_name: resource.name.clone(),
            }),
            Outcome::Drifted(differences) => classified.drift.push(DriftRecord {
                description: format!(
                    "Resource {key} differs from live infrastructure in {} attribute(s)",
                    differences.len()
                ),
                key,
                kind: resource.kind.clone(),
                logical_name: resource.name.clone(),
                address: resource.address(),
                classification: DriftClassification::AttributeDrift,
                differences,
            }),
            Outcome::Missing => classified.drift.push(DriftRecord {
                description: format!(
                    "Resource {key} exists in state but not in live infrastructure"
                ),
                key,
                kind: resource.kind.clone(),
                logical_name: resource.name.clone(),
                address: resource.address(),
                classification: DriftClassification::Missing,
                differences: Vec::new(),
            }),
        }
    }

    classified
        .matched
        .sort_by(|a, b| (&a.kind, &a.display_name).cmp(&(&b.kind, &b.display_name)));
    classified
        .meta
        .sort_by(|a, b| (&a.kind, &a.display_name).cmp(&(&b.kind, &b.display_name)));
    classified
}

fn report(classified: Classified, declared_instances: usize, distinct_keys: usize) -> ReconciliationReport {
    let attribute_drift = classified
        .drift
        .iter()
        .filter(|r| r.classification == DriftClassification::AttributeDrift)
        .count();
    let counts = ReportCounts {
        declared_instances,
        distinct_keys,
        matched: classified.matched.len(),
        attribute_drift,
        missing: classified.drift.len() - attribute_drift,
        meta: classified.meta.len(),
        unaccounted: classified.unaccounted.len(),
    };

    info!(
        declared = counts.declared_instances,
        matched = counts.matched,
        attribute_drift = counts.attribute_drift,
        missing = counts.missing,
        meta = counts.meta,
        unaccounted = counts.unaccounted,
        "reconciliation complete"
    );

    ReconciliationReport {
        generated_at: Utc::now(),
        context: None,
        counts,
        drift: classified.drift,
        matched: classified.matched,
        meta: classified.meta,
        unaccounted: classified.unaccounted,
    }
}

/// Name shown for a matched resource. Authored names win, decorated with the live name
/// when the two disagree; the `this` placeholder is replaced by whatever the live
/// record calls itself.
pub fn display_name(
    kind: &ResourceKind,
    logical_name: &str,
    key: impl std::fmt::Display,
    observed: &AttributeBag,
) -> String {
    let live_name = observed_name(kind, observed);

    if logical_name != PLACEHOLDER_NAME {
        return match live_name {
            Some(live) if live != logical_name => format!("{logical_name} (live: {live})"),
            _ => logical_name.to_string(),
        };
    }

    live_name
        .or_else(|| string_field(observed, ID_FIELDS))
        .unwrap_or_else(|| format!("{kind}:{key}"))
}

fn observed_name(kind: &ResourceKind, observed: &AttributeBag) -> Option<String> {
    preferred_name_field(kind.as_str())
        .and_then(|field| string_field(observed, &[field]))
        .or_else(|| name_tag(observed))
        .or_else(|| string_field(observed, NAME_FIELDS))
}

fn name_tag(observed: &AttributeBag) -> Option<String> {
    let tags = normalize::tags(get_field(observed, "Tags")?);
    tags.get("Name")
        .and_then(|value| value.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn string_field(bag: &AttributeBag, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| {
        bag.get(*field)
            .and_then(|value| value.as_str())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

fn meta_identifier(attributes: &AttributeBag) -> String {
    ["arn", "id"]
        .iter()
        .find_map(|field| {
            get_field(attributes, field)
                .and_then(|value| value.as_str())
                .filter(|value| !value.is_empty())
        })
        .unwrap_or("(no id/arn)")
        .to_string()
}
