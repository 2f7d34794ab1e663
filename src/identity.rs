//! Identity resolution shared by the declared and observed sides.
//!
//! Both the reconciler (declared bags) and every provider (observed bags) key resources
//! through the same [`IdentityResolver`]. If the two sides ever derived keys differently,
//! resources would silently fall into "missing" instead of "matched".

mod aws;

use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kinds::KindMatch;
use crate::resource::{AttributeBag, ResourceKind, get_field, is_unset};

static ARN_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^arn:[A-Za-z0-9-]+:\S+$").expect("ARN pattern compiles"));

/// Separator between the kind tag and the ordered fields of a composite key.
pub const COMPOSITE_DELIMITER: char = '|';

pub fn is_arn(value: &str) -> bool {
    ARN_GRAMMAR.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for IdentityKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IdentityKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Which strategy produced a key. `Fallback` keys can never match an observed bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    Arn,
    Id,
    Composite,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub key: IdentityKey,
    pub source: KeySource,
}

/// Which vocabulary a bag is written in. Decides alias lookup order for composite fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Declared,
    Observed,
}

/// Where a declared instance sits in the desired-state document.
#[derive(Debug, Clone, Copy)]
pub struct Fallback<'a> {
    /// Module address, e.g. `module.orders`. `None` for the root module.
    pub module: Option<&'a str>,
    pub logical_name: &'a str,
    pub index: usize,
}

impl<'a> Fallback<'a> {
    pub fn new(logical_name: &'a str, index: usize) -> Self {
        Self {
            module: None,
            logical_name,
            index,
        }
    }

    pub fn in_module(mut self, module: Option<&'a str>) -> Self {
        self.module = module;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransform {
    Verbatim,
    /// `arn:aws:lambda:<region>:<account>:function:<name>[:<qualifier>]` → `<name>`.
    FunctionName,
}

impl KeyTransform {
    fn apply(self, value: String) -> String {
        match self {
            KeyTransform::Verbatim => value,
            KeyTransform::FunctionName => function_name_from_arn(&value)
                .map(str::to_string)
                .unwrap_or(value),
        }
    }
}

pub(crate) fn function_name_from_arn(value: &str) -> Option<&str> {
    if !is_arn(value) {
        return None;
    }
    let (_, rest) = value.split_once(":function:")?;
    rest.split(':').next().filter(|name| !name.is_empty())
}

/// One component of a composite key, named in both vocabularies.
#[derive(Debug, Clone, Copy)]
pub struct KeyField {
    pub declared: &'static [&'static str],
    pub observed: &'static [&'static str],
    pub transform: KeyTransform,
}

impl KeyField {
    pub const fn new(declared: &'static [&'static str], observed: &'static [&'static str]) -> Self {
        Self {
            declared,
            observed,
            transform: KeyTransform::Verbatim,
        }
    }

    pub const fn with_transform(mut self, transform: KeyTransform) -> Self {
        self.transform = transform;
        self
    }

    fn read(&self, bag: &AttributeBag, provenance: Provenance) -> Option<String> {
        let (own, other) = match provenance {
            Provenance::Declared => (self.declared, self.observed),
            Provenance::Observed => (self.observed, self.declared),
        };
        own.iter()
            .chain(other.iter())
            .find_map(|name| get_field(bag, name).and_then(key_component))
            .map(|value| self.transform.apply(value))
    }
}

#[derive(Debug, Clone)]
pub enum IdentityStrategy {
    /// ARN fields first (value must match the ARN grammar), then opaque ID fields.
    Simple {
        arn: &'static [&'static str],
        id: &'static [&'static str],
    },
    /// Ordered fields joined as `<kind>|<v1>|<v2>|…`. All fields are required.
    Composite { fields: &'static [KeyField] },
}

impl IdentityStrategy {
    pub const DEFAULT: IdentityStrategy = IdentityStrategy::Simple {
        arn: &["arn"],
        id: &["id", "instance_id", "resource_id"],
    };
}

#[derive(Debug, Clone)]
struct IdentityRule {
    matcher: KindMatch,
    strategy: IdentityStrategy,
}

/// Maps kinds to identity strategies, first match wins. Kinds without a rule use
/// [`IdentityStrategy::DEFAULT`], so resolution is total.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    rules: Vec<IdentityRule>,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver preloaded with the AWS kind table.
    pub fn aws() -> Self {
        let mut resolver = Self::new();
        for (matcher, strategy) in aws::rules() {
            resolver.register(matcher, strategy);
        }
        resolver
    }

    pub fn register(&mut self, matcher: KindMatch, strategy: IdentityStrategy) -> &mut Self {
        self.rules.push(IdentityRule { matcher, strategy });
        self
    }

    pub fn strategy_for(&self, kind: &ResourceKind) -> &IdentityStrategy {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(kind.as_str()))
            .map(|rule| &rule.strategy)
            .unwrap_or(&IdentityStrategy::DEFAULT)
    }

    pub fn has_rule(&self, kind: &ResourceKind) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.matcher.matches(kind.as_str()))
    }

    /// Key for a declared instance. Never fails: bags without a usable identity get the
    /// document-local fallback key, which surfaces later as "missing".
    pub fn resolve(
        &self,
        kind: &ResourceKind,
        bag: &AttributeBag,
        fallback: Fallback<'_>,
    ) -> ResolvedKey {
        self.try_resolve(kind, bag, Provenance::Declared)
            .unwrap_or_else(|| ResolvedKey {
                key: fallback_key(kind, fallback),
                source: KeySource::Fallback,
            })
    }

    /// Key for a live record. `None` means the record cannot be matched to anything.
    pub fn resolve_observed(&self, kind: &ResourceKind, bag: &AttributeBag) -> Option<ResolvedKey> {
        self.try_resolve(kind, bag, Provenance::Observed)
    }

    pub fn try_resolve(
        &self,
        kind: &ResourceKind,
        bag: &AttributeBag,
        provenance: Provenance,
    ) -> Option<ResolvedKey> {
        match self.strategy_for(kind) {
            IdentityStrategy::Simple { arn, id } => resolve_simple(bag, arn, id),
            IdentityStrategy::Composite { fields } => {
                resolve_composite(kind, bag, fields, provenance)
            }
        }
    }
}

/// `{kind}.{name}_{index}`, prefixed with the module address outside the root module
/// so identically named blocks in sibling modules stay distinct.
pub fn fallback_key(kind: &ResourceKind, fallback: Fallback<'_>) -> IdentityKey {
    let local = format!("{}.{}_{}", kind, fallback.logical_name, fallback.index);
    match fallback.module {
        Some(module) => IdentityKey(format!("{module}.{local}")),
        None => IdentityKey(local),
    }
}

fn resolve_simple(
    bag: &AttributeBag,
    arn_fields: &[&str],
    id_fields: &[&str],
) -> Option<ResolvedKey> {
    let arn = arn_fields.iter().find_map(|name| {
        get_field(bag, name)
            .and_then(Value::as_str)
            .filter(|value| is_arn(value))
    });
    if let Some(arn) = arn {
        return Some(ResolvedKey {
            key: IdentityKey::new(arn),
            source: KeySource::Arn,
        });
    }

    id_fields
        .iter()
        .find_map(|name| get_field(bag, name).and_then(key_component))
        .map(|id| ResolvedKey {
            key: IdentityKey(id),
            source: KeySource::Id,
        })
}

fn resolve_composite(
    kind: &ResourceKind,
    bag: &AttributeBag,
    fields: &[KeyField],
    provenance: Provenance,
) -> Option<ResolvedKey> {
    let mut key = kind.as_str().to_string();
    for field in fields {
        let value = field.read(bag, provenance)?;
        key.push(COMPOSITE_DELIMITER);
        key.push_str(&value);
    }
    Some(ResolvedKey {
        key: IdentityKey(key),
        source: KeySource::Composite,
    })
}

fn key_component(value: &Value) -> Option<String> {
    if is_unset(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> AttributeBag {
        value.as_object().cloned().unwrap()
    }

    fn fallback() -> Fallback<'static> {
        Fallback::new("main", 0)
    }

    #[test]
    fn test_arn_grammar() {
        assert!(is_arn("arn:aws:sqs:eu-west-2:123456789012:orders"));
        assert!(is_arn("arn:aws-us-gov:iam::123456789012:role/x"));
        assert!(is_arn("arn:x:q1"));
        assert!(!is_arn("arn:"));
        assert!(!is_arn("arn::q1"));
        assert!(!is_arn("https://sqs.eu-west-2.amazonaws.com/1/orders"));
        assert!(!is_arn("arn:aws:has space"));
    }

    #[test]
    fn test_default_strategy_prefers_arn_over_id() {
        let resolver = IdentityResolver::new();
        let kind = ResourceKind::from("aws_unregistered");
        let attrs = bag(json!({"id": "abc", "ARN": "arn:aws:svc:eu-west-2:1:thing/abc"}));

        let resolved = resolver.resolve(&kind, &attrs, fallback());
        assert_eq!(resolved.key.as_str(), "arn:aws:svc:eu-west-2:1:thing/abc");
        assert_eq!(resolved.source, KeySource::Arn);
    }

    #[test]
    fn test_default_strategy_ignores_non_arn_arn_field() {
        let resolver = IdentityResolver::new();
        let kind = ResourceKind::from("aws_unregistered");
        let attrs = bag(json!({"arn": "not-an-arn", "resource_id": "r-1"}));

        let resolved = resolver.resolve(&kind, &attrs, fallback());
        assert_eq!(resolved.key.as_str(), "r-1");
        assert_eq!(resolved.source, KeySource::Id);
    }

    #[test]
    fn test_fallback_key_shape() {
        let resolver = IdentityResolver::new();
        let kind = ResourceKind::from("aws_unregistered");
        let attrs = bag(json!({"arn": null, "id": ""}));

        let resolved = resolver.resolve(&kind, &attrs, Fallback::new("this", 2));
        assert_eq!(resolved.key.as_str(), "aws_unregistered.this_2");
        assert_eq!(resolved.source, KeySource::Fallback);
    }

    #[test]
    fn test_fallback_key_is_module_qualified() {
        let resolver = IdentityResolver::aws();
        let kind = ResourceKind::from("aws_sqs_queue");
        let attrs = bag(json!({"visibility_timeout_seconds": 30}));

        let orders = resolver.resolve(
            &kind,
            &attrs,
            Fallback::new("this", 0).in_module(Some("module.orders")),
        );
        let refunds = resolver.resolve(
            &kind,
            &attrs,
            Fallback::new("this", 0).in_module(Some("module.refunds")),
        );

        assert_eq!(orders.key.as_str(), "module.orders.aws_sqs_queue.this_0");
        assert_eq!(refunds.key.as_str(), "module.refunds.aws_sqs_queue.this_0");
    }

    #[test]
    fn test_observed_side_never_falls_back() {
        let resolver = IdentityResolver::aws();
        let kind = ResourceKind::from("aws_sqs_queue");
        assert!(resolver.resolve_observed(&kind, &bag(json!({}))).is_none());
    }

    #[test]
    fn test_composite_reads_both_vocabularies() {
        let resolver = IdentityResolver::aws();
        let kind = ResourceKind::from("aws_api_gateway_method");

        let declared = bag(json!({
            "rest_api_id": "a1b2c3", "resource_id": "res9", "http_method": "GET"
        }));
        let observed = bag(json!({
            "restApiId": "a1b2c3", "resourceId": "res9", "httpMethod": "GET",
            "authorizationType": "NONE"
        }));

        let declared_key = resolver.resolve(&kind, &declared, fallback());
        let observed_key = resolver.resolve_observed(&kind, &observed).unwrap();
        assert_eq!(declared_key, observed_key);
        assert_eq!(
            declared_key.key.as_str(),
            "aws_api_gateway_method|a1b2c3|res9|GET"
        );
        assert_eq!(declared_key.source, KeySource::Composite);
    }

    #[test]
    fn test_composite_missing_field_falls_back_whole() {
        let resolver = IdentityResolver::aws();
        let kind = ResourceKind::from("aws_api_gateway_method");
        let declared = bag(json!({"rest_api_id": "a1b2c3", "http_method": "GET"}));

        let resolved = resolver.resolve(&kind, &declared, fallback());
        assert_eq!(resolved.source, KeySource::Fallback);
        assert_eq!(resolved.key.as_str(), "aws_api_gateway_method.main_0");
    }

    #[test]
    fn test_composite_empty_list_is_absent() {
        let resolver = IdentityResolver::aws();
        let kind = ResourceKind::from("aws_iam_role_policy_attachment");
        let declared = bag(json!({"role": [], "policy_arn": "arn:aws:iam::aws:policy/ReadOnlyAccess"}));

        let resolved = resolver.resolve(&kind, &declared, fallback());
        assert_eq!(resolved.source, KeySource::Fallback);
    }

    #[test]
    fn test_composite_keys_distinguish_siblings() {
        let resolver = IdentityResolver::aws();
        let kind = ResourceKind::from("aws_api_gateway_method");
        let get = bag(json!({"rest_api_id": "api", "resource_id": "r", "http_method": "GET"}));
        let post = bag(json!({"rest_api_id": "api", "resource_id": "r", "http_method": "POST"}));

        let fb = Fallback::new("this", 0);
        assert_ne!(
            resolver.resolve(&kind, &get, fb).key,
            resolver.resolve(&kind, &post, fb).key
        );
    }

    #[test]
    fn test_function_name_transform() {
        assert_eq!(
            function_name_from_arn("arn:aws:lambda:eu-west-2:1:function:ingest"),
            Some("ingest")
        );
        assert_eq!(
            function_name_from_arn("arn:aws:lambda:eu-west-2:1:function:ingest:live"),
            Some("ingest")
        );
        assert_eq!(function_name_from_arn("ingest"), None);
        assert_eq!(
            KeyTransform::FunctionName.apply("ingest".to_string()),
            "ingest"
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let mut resolver = IdentityResolver::new();
        resolver
            .register(
                KindMatch::Exact("aws_thing_child"),
                IdentityStrategy::Simple {
                    arn: &[],
                    id: &["child_id"],
                },
            )
            .register(
                KindMatch::Prefix("aws_thing"),
                IdentityStrategy::Simple {
                    arn: &[],
                    id: &["thing_id"],
                },
            );

        let attrs = bag(json!({"child_id": "c", "thing_id": "t"}));
        let child = resolver.resolve(&ResourceKind::from("aws_thing_child"), &attrs, fallback());
        let parent = resolver.resolve(&ResourceKind::from("aws_thing"), &attrs, fallback());
        assert_eq!(child.key.as_str(), "c");
        assert_eq!(parent.key.as_str(), "t");
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let resolver = IdentityResolver::new();
        let attrs = bag(json!({"id": 42}));
        let resolved = resolver.resolve(&ResourceKind::from("aws_unregistered"), &attrs, fallback());
        assert_eq!(resolved.key.as_str(), "42");
    }
}
