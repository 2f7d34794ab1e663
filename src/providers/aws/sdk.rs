use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_sts::error::DisplayErrorContext;

/// Credentials come from the default chain; the region is always the one being checked.
pub async fn load_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

/// Full error chain of an SDK failure on one line.
pub fn error_message<E: std::error::Error>(err: &E) -> String {
    DisplayErrorContext(err).to_string()
}
