//! Comparator Registry: per-kind semantic comparison of a declared and an observed bag.

mod aws;
pub mod normalize;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kinds::KindMatch;
use crate::resource::{AttributeBag, ResourceKind, get_path, is_unset};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDifference {
    pub attribute: String,
    pub declared: String,
    pub observed: String,
}

/// How the two sides of a field check are normalized before equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    Exact,
    /// Scalars compared as text, numbers by value (`30` == `"30"` == `30.0`).
    Loose,
    /// JSON documents, either serialized or decoded.
    Document,
    /// IAM principals, bare or wrapped in `{"Service": ..}`.
    Principal,
    /// `{k: v}` maps vs `[{Key, Value}]` lists.
    Tags,
    /// Last resource segment of an ARN.
    ArnName,
    /// Unordered lists.
    Set,
}

/// A provider default that counts as "not set".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProviderDefault {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl ProviderDefault {
    fn to_value(self) -> Value {
        match self {
            ProviderDefault::Bool(b) => Value::Bool(b),
            ProviderDefault::Int(n) => Value::from(n),
            ProviderDefault::Str(s) => Value::String(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldCheck {
    pub attribute: &'static str,
    pub declared: &'static [&'static str],
    pub observed: &'static [&'static str],
    pub mode: ValueMode,
    pub defaults: &'static [ProviderDefault],
}

impl FieldCheck {
    /// Exact check where the reported attribute is the first declared path.
    pub const fn new(declared: &'static [&'static str], observed: &'static [&'static str]) -> Self {
        Self {
            attribute: declared[0],
            declared,
            observed,
            mode: ValueMode::Exact,
            defaults: &[],
        }
    }

    pub const fn named(mut self, attribute: &'static str) -> Self {
        self.attribute = attribute;
        self
    }

    pub const fn mode(mut self, mode: ValueMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn loose(self) -> Self {
        self.mode(ValueMode::Loose)
    }

    pub const fn defaults(mut self, defaults: &'static [ProviderDefault]) -> Self {
        self.defaults = defaults;
        self
    }

    /// Runs the check; `None` when both sides normalize equal. Provider defaults only
    /// count as unset for equality; a difference shows the value that was found.
    pub fn evaluate(&self, declared: &AttributeBag, observed: &AttributeBag) -> Option<AttributeDifference> {
        let declared_raw = lookup(declared, self.declared, self.observed);
        let observed_raw = lookup(observed, self.observed, self.declared);

        if self.normalized(declared_raw) == self.normalized(observed_raw) {
            return None;
        }

        Some(AttributeDifference {
            attribute: self.attribute.to_string(),
            declared: normalize::stringify(declared_raw.and_then(|v| self.shaped(v)).as_ref()),
            observed: normalize::stringify(observed_raw.and_then(|v| self.shaped(v)).as_ref()),
        })
    }

    fn normalized(&self, value: Option<&Value>) -> Option<Value> {
        let defaults: Vec<Value> = self.defaults.iter().map(|d| d.to_value()).collect();
        let value = normalize::unset_or_default(value, &defaults)?;
        self.shaped(&value)
    }

    fn shaped(&self, value: &Value) -> Option<Value> {
        let shaped = match self.mode {
            ValueMode::Exact => normalize::sorted(value),
            ValueMode::Loose => normalize::loose_scalar(value),
            ValueMode::Document => normalize::document(value),
            ValueMode::Principal => normalize::principal(value),
            ValueMode::Tags => normalize::tags(value),
            ValueMode::ArnName => normalize::arn_name(value),
            ValueMode::Set => normalize::set(value),
        };
        // A serialized "{}" or "[]" only becomes empty after decoding.
        (!is_unset(&shaped)).then_some(shaped)
    }
}

/// First path that yields a set value, own vocabulary before the other side's.
fn lookup<'a>(bag: &'a AttributeBag, own: &[&str], other: &[&str]) -> Option<&'a Value> {
    own.iter()
        .chain(other.iter())
        .filter_map(|path| get_path(bag, path))
        .find(|value| !is_unset(value))
}

pub trait Comparator: Send + Sync {
    fn compare(&self, declared: &AttributeBag, observed: &AttributeBag) -> Vec<AttributeDifference>;
}

/// Comparator driven by an ordered list of field checks. Differences come out in
/// check order.
#[derive(Debug, Clone, Copy)]
pub struct FieldComparator {
    checks: &'static [FieldCheck],
}

impl FieldComparator {
    pub const fn new(checks: &'static [FieldCheck]) -> Self {
        Self { checks }
    }
}

impl Comparator for FieldComparator {
    fn compare(&self, declared: &AttributeBag, observed: &AttributeBag) -> Vec<AttributeDifference> {
        self.checks
            .iter()
            .filter_map(|check| check.evaluate(declared, observed))
            .collect()
    }
}

impl<F> Comparator for F
where
    F: Fn(&AttributeBag, &AttributeBag) -> Vec<AttributeDifference> + Send + Sync,
{
    fn compare(&self, declared: &AttributeBag, observed: &AttributeBag) -> Vec<AttributeDifference> {
        self(declared, observed)
    }
}

struct Registration {
    matcher: KindMatch,
    comparator: Box<dyn Comparator>,
}

/// Ordered (matcher, comparator) pairs, first match wins.
#[derive(Default)]
pub struct ComparatorRegistry {
    registrations: Vec<Registration>,
}

impl fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.registrations.iter().map(|r| r.matcher))
            .finish()
    }
}

impl ComparatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the AWS comparator table.
    pub fn aws() -> Self {
        let mut registry = Self::new();
        for (matcher, checks) in aws::comparators() {
            registry.register(matcher, FieldComparator::new(checks));
        }
        registry
    }

    pub fn register(&mut self, matcher: KindMatch, comparator: impl Comparator + 'static) -> &mut Self {
        self.registrations.push(Registration {
            matcher,
            comparator: Box::new(comparator),
        });
        self
    }

    pub fn comparator_for(&self, kind: &ResourceKind) -> Option<&dyn Comparator> {
        self.registrations
            .iter()
            .find(|r| r.matcher.matches(kind.as_str()))
            .map(|r| r.comparator.as_ref())
    }

    pub fn is_registered(&self, kind: &ResourceKind) -> bool {
        self.comparator_for(kind).is_some()
    }

    /// Differences between the two bags. An unregistered kind yields none; callers
    /// check [`Self::is_registered`] to tell that apart from a clean match.
    pub fn compare(
        &self,
        kind: &ResourceKind,
        declared: &AttributeBag,
        observed: &AttributeBag,
    ) -> Vec<AttributeDifference> {
        self.comparator_for(kind)
            .map(|comparator| comparator.compare(declared, observed))
            .unwrap_or_default()
    }
}
