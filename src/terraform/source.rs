use std::fmt;
use std::path::PathBuf;

use tracing::info;

use super::StateError;
use crate::http::{self, HttpSettings};
use crate::providers::aws::sdk;

/// Where the desired-state document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateLocation {
    Local(PathBuf),
    /// Terraform HTTP backend or presigned object URL.
    Http(String),
    /// Object in an S3 backend bucket, read with the default AWS credential chain.
    S3 { bucket: String, key: String },
}

impl StateLocation {
    pub fn parse(location: &str) -> Result<Self, StateError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(StateError::EmptyLocation);
        }

        if let Some(path) = location.strip_prefix("local://") {
            return Ok(Self::Local(PathBuf::from(path)));
        }
        if location.starts_with("http://") || location.starts_with("https://") {
            return Ok(Self::Http(location.to_string()));
        }
        if let Some(object) = location.strip_prefix("s3://") {
            return match object.split_once('/') {
                Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => Ok(Self::S3 {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                }),
                _ => Err(StateError::InvalidS3Location {
                    location: location.to_string(),
                }),
            };
        }
        if let Some((scheme, _)) = location.split_once("://") {
            return Err(StateError::UnsupportedScheme {
                scheme: scheme.to_string(),
                hint: "expected local://, a plain path, http://, https:// or s3://".to_string(),
            });
        }

        Ok(Self::Local(PathBuf::from(location)))
    }

    /// `region` is only used to build the S3 client; the bucket's own region is not looked up.
    pub async fn read(&self, settings: &HttpSettings, region: &str) -> Result<String, StateError> {
        match self {
            Self::Local(path) => {
                info!(path = %path.display(), "reading state file");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| StateError::Read {
                        path: path.clone(),
                        source,
                    })
            }
            Self::Http(url) => {
                info!(url = %http::display_url(url), "fetching state");
                let client = http::build_client(settings)?;
                Ok(http::get_text(&client, url, settings).await?)
            }
            Self::S3 { bucket, key } => {
                info!(bucket = %bucket, key = %key, "downloading state");
                let client = aws_sdk_s3::Client::new(&sdk::load_config(region).await);
                let failed = |message: String| StateError::S3 {
                    location: self.to_string(),
                    message,
                };

                let object = client
                    .get_object()
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(|err| failed(sdk::error_message(&err)))?;
                let bytes = object
                    .body
                    .collect()
                    .await
                    .map_err(|err| failed(sdk::error_message(&err)))?
                    .into_bytes();
                String::from_utf8(bytes.to_vec()).map_err(|err| failed(err.to_string()))
            }
        }
    }
}

impl fmt::Display for StateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(&http::display_url(url)),
            Self::S3 { bucket, key } => write!(f, "s3://{bucket}/{key}"),
        }
    }
}
