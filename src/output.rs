//! Report rendering: human-readable tables and trees, or JSON.

use std::fmt;

use clap::ValueEnum;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use termtree::Tree;

use crate::compare::ComparatorRegistry;
use crate::error::TfDriftError;
use crate::identity::{IdentityResolver, IdentityStrategy};
use crate::reconcile::{DriftClassification, DriftRecord, ReconciliationReport};
use crate::resource::ResourceKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => f.write_str("pretty"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// `1` when anything drifted or went missing, `0` otherwise.
pub fn exit_code(report: &ReconciliationReport) -> u8 {
    if report.drift_detected() { 1 } else { 0 }
}

pub fn render(report: &ReconciliationReport, format: OutputFormat) -> Result<String, TfDriftError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Pretty => Ok(render_pretty(report)),
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Classification")]
    classification: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct ResourceRow<'a> {
    #[tabled(rename = "Kind")]
    kind: &'a str,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Identity")]
    identity: &'a str,
}

#[derive(Tabled)]
struct KindRow<'a> {
    #[tabled(rename = "Kind")]
    kind: &'a str,
    #[tabled(rename = "Identity")]
    identity: String,
    #[tabled(rename = "Comparator")]
    comparator: &'static str,
}

pub fn render_pretty(report: &ReconciliationReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Drift report ({})\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(context) = &report.context {
        out.push_str(&format!("State:     {}\n", context.state_location));
        match &context.inventory_captured_at {
            Some(at) => out.push_str(&format!("Inventory: {} (captured {})\n", context.inventory_location, at)),
            None => out.push_str(&format!("Inventory: {}\n", context.inventory_location)),
        }
        match &context.account_id {
            Some(account) => out.push_str(&format!("Region:    {} (account {})\n", context.region, account)),
            None => out.push_str(&format!("Region:    {}\n", context.region)),
        }
    }
    let verdict = if report.drift_detected() {
        "DRIFT DETECTED"
    } else {
        "NO DRIFT"
    };
    out.push_str(&format!("Verdict:   {}\n\n", verdict));

    let counts = &report.counts;
    let summary = vec![
        SummaryRow { classification: "declared instances", count: counts.declared_instances },
        SummaryRow { classification: "matched", count: counts.matched },
        SummaryRow { classification: "attribute drift", count: counts.attribute_drift },
        SummaryRow { classification: "missing", count: counts.missing },
        SummaryRow { classification: "meta", count: counts.meta },
        SummaryRow { classification: "unaccounted", count: counts.unaccounted },
        SummaryRow { classification: "duplicate keys", count: counts.duplicates() },
    ];
    out.push_str(&Table::new(summary).with(Style::rounded()).to_string());
    out.push('\n');

    if !report.drift.is_empty() {
        out.push_str("\nDrift:\n");
        for record in &report.drift {
            out.push_str(&drift_tree(record).to_string());
        }
    }

    if !report.matched.is_empty() {
        let rows = report.matched.iter().map(|m| ResourceRow {
            kind: m.kind.as_str(),
            name: &m.display_name,
            identity: m.key.as_str(),
        });
        section(&mut out, "Matched", Table::new(rows));
    }

    if !report.meta.is_empty() {
        let rows = report.meta.iter().map(|m| ResourceRow {
            kind: m.kind.as_str(),
            name: &m.display_name,
            identity: &m.identifier,
        });
        section(&mut out, "Meta (excluded)", Table::new(rows));
    }

    if !report.unaccounted.is_empty() {
        let rows = report.unaccounted.iter().map(|u| ResourceRow {
            kind: u.kind.as_str(),
            name: &u.logical_name,
            identity: u.key.as_str(),
        });
        section(&mut out, "Unaccounted (no comparator registered)", Table::new(rows));
    }

    out
}

fn section(out: &mut String, title: &str, mut table: Table) {
    out.push_str(&format!("\n{}:\n", title));
    out.push_str(&table.with(Style::rounded()).to_string());
    out.push('\n');
}

pub fn drift_tree(record: &DriftRecord) -> Tree<String> {
    let root = format!("{} [{}]", record.address, record.classification.as_str());
    let mut leaves = vec![format!("key: {}", record.key)];

    match record.classification {
        DriftClassification::Missing => leaves.push(record.description.clone()),
        DriftClassification::AttributeDrift => leaves.extend(record.differences.iter().map(|d| {
            format!("{}: declared='{}' observed='{}'", d.attribute, d.declared, d.observed)
        })),
    }

    Tree::new(root).with_leaves(leaves)
}

/// `id`, `arn, then id`, or `composite(a, b, …)` named by the declared fields.
fn describe_strategy(strategy: &IdentityStrategy) -> String {
    match strategy {
        IdentityStrategy::Simple { arn, .. } if arn.is_empty() => "id".to_string(),
        IdentityStrategy::Simple { .. } => "arn, then id".to_string(),
        IdentityStrategy::Composite { fields } => {
            let names: Vec<&str> = fields
                .iter()
                .filter_map(|field| field.declared.first().copied())
                .collect();
            format!("composite({})", names.join(", "))
        }
    }
}

/// Table of the kinds a provider supports and how each is keyed and compared.
pub fn render_kinds(kinds: &[&str], resolver: &IdentityResolver, comparators: &ComparatorRegistry) -> String {
    let kinds: Vec<ResourceKind> = kinds.iter().map(|k| ResourceKind::from(*k)).collect();
    let rows = kinds.iter().map(|kind| KindRow {
        kind: kind.as_str(),
        identity: describe_strategy(resolver.strategy_for(kind)),
        comparator: if comparators.is_registered(kind) {
            "registered"
        } else {
            "missing"
        },
    });

    Table::new(rows).with(Style::rounded()).to_string()
}
