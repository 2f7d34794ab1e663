//! Value normalization used by field checks. Every function here is total: malformed
//! input degrades to a raw comparison instead of failing.

use serde_json::{Map, Value};

use crate::identity::is_arn;
use crate::resource::is_unset;

/// Keys that wrap a bare principal in IAM statements, e.g. `{"Service": "events.amazonaws.com"}`.
const PRINCIPAL_WRAPPERS: &[&str] = &["Service", "AWS", "Federated", "CanonicalUser"];

/// Rebuilds a value with every object's keys in sorted order.
pub fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), sorted(&map[key.as_str()]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Compact JSON with sorted keys.
pub fn canonical_json(value: &Value) -> String {
    sorted(value).to_string()
}

/// How a value is shown in an attribute difference.
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => canonical_json(other),
    }
}

/// Scalar text used by loose comparison: numbers compare by value regardless of
/// int/float/string representation, booleans and `"true"`/`"false"` agree. Integers
/// are compared exactly; only non-integral values go through `f64`.
pub fn loose_scalar(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Number(n) => Value::String(match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => format_number(f),
            _ => n.to_string(),
        }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
                Value::String(trimmed.to_ascii_lowercase())
            } else if let Ok(i) = trimmed.parse::<i64>() {
                Value::String(i.to_string())
            } else if let Ok(u) = trimmed.parse::<u64>() {
                Value::String(u.to_string())
            } else if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    Value::String(format_number(n))
                } else {
                    Value::String(s.clone())
                }
            } else {
                Value::String(s.clone())
            }
        }
        other => Value::String(canonical_json(other)),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Decodes a JSON document given either as a serialized string or as a structure.
/// Strings that fail to parse stay strings and are compared raw.
pub fn document(value: &Value) -> Value {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => sorted(&parsed),
            Err(_) => value.clone(),
        },
        other => sorted(other),
    }
}

/// Unwraps `{"Service": x}` style principals (and one-element lists) to the bare value.
pub fn principal(value: &Value) -> Value {
    match value {
        Value::Object(map) if map.len() == 1 => match map.iter().next() {
            Some((key, inner)) if PRINCIPAL_WRAPPERS.contains(&key.as_str()) => principal(inner),
            _ => sorted(value),
        },
        Value::Array(items) if items.len() == 1 => principal(&items[0]),
        other => sorted(other),
    }
}

/// Tags as a flat `{key: value}` map, accepting either a map or a
/// `[{"Key": k, "Value": v}]` list (`key`/`value` and `Name`/`Value` pairs too).
pub fn tags(value: &Value) -> Value {
    let mut out = Map::new();
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                out.insert(key.clone(), tag_value(inner));
            }
        }
        Value::Array(items) => {
            for item in items {
                let Value::Object(entry) = item else {
                    continue;
                };
                let key = ["Key", "key", "Name", "name"]
                    .iter()
                    .find_map(|k| entry.get(*k).and_then(Value::as_str));
                let inner = ["Value", "value"].iter().find_map(|k| entry.get(*k));
                if let (Some(key), Some(inner)) = (key, inner) {
                    out.insert(key.to_string(), tag_value(inner));
                }
            }
        }
        other => return other.clone(),
    }
    sorted(&Value::Object(out))
}

fn tag_value(value: &Value) -> Value {
    match value {
        Value::String(_) => value.clone(),
        other => loose_scalar(other),
    }
}

/// Last resource segment of an ARN (`.../service/name` → `name`); non-ARNs pass through.
pub fn arn_name(value: &Value) -> Value {
    match value.as_str() {
        Some(s) if is_arn(s) => {
            let resource = s.splitn(6, ':').nth(5).unwrap_or(s);
            let name = resource.rsplit('/').next().unwrap_or(resource);
            Value::String(name.to_string())
        }
        _ => value.clone(),
    }
}

/// Unordered, de-duplicated list. A lone scalar is a one-element set.
pub fn set(value: &Value) -> Value {
    let items: Vec<Value> = match value {
        Value::Array(items) => items.iter().map(sorted).collect(),
        other => vec![sorted(other)],
    };
    let mut keyed: Vec<(String, Value)> = items
        .into_iter()
        .map(|item| (canonical_json(&item), item))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);
    Value::Array(keyed.into_iter().map(|(_, item)| item).collect())
}

/// Treats `null`, `""`, `[]`, `{}` and any listed provider default as "not set".
/// A one-element list matches a default equal to its element.
pub fn unset_or_default(value: Option<&Value>, defaults: &[Value]) -> Option<Value> {
    let value = value?;
    if is_unset(value) {
        return None;
    }
    let scalar = match value {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    };
    let loose = loose_scalar(scalar);
    if defaults.iter().any(|default| loose_scalar(default) == loose) {
        return None;
    }
    Some(value.clone())
}
