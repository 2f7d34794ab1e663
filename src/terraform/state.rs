//! Terraform state parser for drift detection.
//!
//! Parses tfstate v4 documents into declared resources, keeping declaration and
//! instance order.

use serde::Deserialize;
use serde_json::Value;

use super::StateError;
use crate::resource::{AttributeBag, DeclaredInstance, DeclaredResource, ResourceKind, ResourceMode};

pub const SUPPORTED_STATE_VERSION: u64 = 4;

#[derive(Debug, Deserialize)]
struct RawState {
    #[serde(default)]
    terraform_version: Option<String>,
    #[serde(default)]
    serial: Option<u64>,
    #[serde(default)]
    lineage: Option<String>,
    #[serde(default)]
    resources: Vec<RawResource>,
}

#[derive(Debug, Deserialize)]
struct RawResource {
    #[serde(default)]
    module: Option<String>,
    #[serde(default)]
    mode: ResourceMode,
    #[serde(rename = "type")]
    kind: ResourceKind,
    name: String,
    #[serde(default)]
    instances: Vec<RawInstance>,
}

#[derive(Debug, Deserialize)]
struct RawInstance {
    #[serde(default)]
    index_key: Option<Value>,
    #[serde(default)]
    attributes: Option<AttributeBag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TerraformState {
    pub version: u64,
    pub terraform_version: Option<String>,
    pub serial: Option<u64>,
    pub lineage: Option<String>,
    pub resources: Vec<DeclaredResource>,
}

impl TerraformState {
    pub fn parse(contents: &str) -> Result<Self, StateError> {
        let document: Value = serde_json::from_str(contents).map_err(|e| StateError::Parse {
            message: format!("invalid JSON: {}", e),
        })?;

        let Some(root) = document.as_object() else {
            return Err(StateError::Parse {
                message: "state root must be a JSON object".to_string(),
            });
        };

        let version = root
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| StateError::Parse {
                message: "missing numeric 'version' field".to_string(),
            })?;
        if version != SUPPORTED_STATE_VERSION {
            return Err(StateError::UnsupportedVersion { found: version });
        }

        let raw: RawState = serde_json::from_value(document).map_err(|e| StateError::Parse {
            message: e.to_string(),
        })?;

        let resources = raw
            .resources
            .into_iter()
            .map(|resource| DeclaredResource {
                kind: resource.kind,
                name: resource.name,
                mode: resource.mode,
                module: resource.module,
                instances: resource
                    .instances
                    .into_iter()
                    .map(|instance| DeclaredInstance {
                        index_key: instance.index_key,
                        attributes: instance.attributes.unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            version,
            terraform_version: raw.terraform_version,
            serial: raw.serial,
            lineage: raw.lineage,
            resources,
        })
    }

    pub fn resource_block_count(&self) -> usize {
        self.resources.len()
    }

    pub fn instance_count(&self) -> usize {
        self.resources.iter().map(|r| r.instances.len()).sum()
    }
}
