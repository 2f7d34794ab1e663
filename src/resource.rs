use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::IdentityKey;
use crate::kinds;

/// Field name to value, in either the declared or the observed vocabulary.
pub type AttributeBag = serde_json::Map<String, Value>;

/// Live resources of every known kind, keyed by the shared identity scheme.
pub type ObservedResourceMap = HashMap<IdentityKey, AttributeBag>;

/// Terraform resource type tag, e.g. `aws_sqs_queue`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKind(String);

impl ResourceKind {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_meta(&self) -> bool {
        kinds::is_meta(&self.0)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKind {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for ResourceKind {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceMode {
    #[default]
    Managed,
    Data,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredInstance {
    /// `count` index or `for_each` key, when the block expands to several instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_key: Option<Value>,
    pub attributes: AttributeBag,
}

impl DeclaredInstance {
    pub fn new(attributes: AttributeBag) -> Self {
        Self {
            index_key: None,
            attributes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredResource {
    pub kind: ResourceKind,
    pub name: String,
    #[serde(default)]
    pub mode: ResourceMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub instances: Vec<DeclaredInstance>,
}

impl DeclaredResource {
    pub fn new(kind: impl Into<ResourceKind>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            mode: ResourceMode::Managed,
            module: None,
            instances: Vec::new(),
        }
    }

    pub fn with_instance(mut self, attributes: AttributeBag) -> Self {
        self.instances.push(DeclaredInstance::new(attributes));
        self
    }

    /// Terraform address of the block, e.g. `module.app.data.aws_region.current`.
    pub fn address(&self) -> String {
        let mut address = String::new();
        if let Some(module) = &self.module {
            address.push_str(module);
            address.push('.');
        }
        if self.mode == ResourceMode::Data {
            address.push_str("data.");
        }
        address.push_str(self.kind.as_str());
        address.push('.');
        address.push_str(&self.name);
        address
    }
}

/// Looks a field up by exact name first, then case-insensitively.
pub fn get_field<'a>(bag: &'a AttributeBag, name: &str) -> Option<&'a Value> {
    bag.get(name).or_else(|| {
        bag.iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// Walks a dotted path through nested maps and lists. Numeric segments index lists;
/// the first segment uses [`get_field`] lookup, deeper segments are exact.
pub fn get_path<'a>(bag: &'a AttributeBag, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = get_field(bag, segments.next()?)?;

    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// `null`, `""`, `[]` and `{}` all mean "not set".
pub fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
