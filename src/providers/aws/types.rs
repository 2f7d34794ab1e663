use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::AwsError;
use crate::resource::{AttributeBag, ResourceKind};

/// Point-in-time export of live AWS resources, in the provider's native field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub resources: Vec<InventoryRecord>,
}

impl InventorySnapshot {
    pub fn parse(contents: &str) -> Result<Self, AwsError> {
        serde_json::from_str(contents).map_err(|e| AwsError::Parse {
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub attributes: AttributeBag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryLocation {
    Local(PathBuf),
    Http(String),
    /// Read straight from the AWS APIs with the default credential chain.
    Live,
}

impl InventoryLocation {
    pub fn parse(location: &str) -> Result<Self, AwsError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(AwsError::UnsupportedLocation {
                location: String::new(),
            });
        }
        if location.eq_ignore_ascii_case("live") {
            return Ok(Self::Live);
        }
        if location.starts_with("http://") || location.starts_with("https://") {
            return Ok(Self::Http(location.to_string()));
        }
        if let Some(path) = location.strip_prefix("local://") {
            return Ok(Self::Local(PathBuf::from(path)));
        }
        if location.contains("://") {
            return Err(AwsError::UnsupportedLocation {
                location: crate::http::display_url(location),
            });
        }
        Ok(Self::Local(PathBuf::from(location)))
    }
}
