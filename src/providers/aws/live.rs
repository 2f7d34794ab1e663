//! Live inventory read straight from AWS APIs for the core kinds: SQS queues and their
//! policies, Lambda functions and permissions, IAM roles with their inline and attached
//! policies, CloudWatch log groups and S3 buckets.
//!
//! Records carry the APIs' own field names, so they key and compare exactly like an
//! exported snapshot would.

use std::collections::HashMap;

use aws_config::SdkConfig;
use aws_sdk_cloudwatchlogs::types::LogGroup;
use aws_sdk_iam::types::{AttachedPolicy, Role};
use aws_sdk_lambda::types::FunctionConfiguration;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::DateTimeFormat;
use aws_sdk_sqs::types::QueueAttributeName;
use chrono::Utc;
use percent_encoding::percent_decode_str;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::sdk::{error_message, load_config};
use super::{AwsError, InventoryRecord, InventorySnapshot};
use crate::kinds;
use crate::resource::AttributeBag;

fn sdk_error<E: std::error::Error>(service: &'static str) -> impl FnOnce(E) -> AwsError {
    move |err| AwsError::Sdk {
        service,
        message: error_message(&err),
    }
}

#[derive(Debug, Clone)]
pub struct LiveInventory {
    region: String,
    sts: aws_sdk_sts::Client,
    sqs: aws_sdk_sqs::Client,
    lambda: aws_sdk_lambda::Client,
    iam: aws_sdk_iam::Client,
    logs: aws_sdk_cloudwatchlogs::Client,
    s3: aws_sdk_s3::Client,
}

impl LiveInventory {
    pub fn new(config: &SdkConfig, region: &str) -> Self {
        Self {
            region: region.to_string(),
            sts: aws_sdk_sts::Client::new(config),
            sqs: aws_sdk_sqs::Client::new(config),
            lambda: aws_sdk_lambda::Client::new(config),
            iam: aws_sdk_iam::Client::new(config),
            logs: aws_sdk_cloudwatchlogs::Client::new(config),
            s3: aws_sdk_s3::Client::new(config),
        }
    }

    pub async fn connect(region: &str) -> Self {
        Self::new(&load_config(region).await, region)
    }

    /// Lists every supported service concurrently. Any API failure fails the whole
    /// snapshot; a partial inventory would report present resources as missing.
    pub async fn snapshot(&self) -> Result<InventorySnapshot, AwsError> {
        info!(region = %self.region, "collecting live inventory");

        let (account_id, queues, functions, roles, log_groups, buckets) = tokio::try_join!(
            self.account_id(),
            self.queues(),
            self.functions(),
            self.roles(),
            self.log_groups(),
            self.buckets(),
        )?;

        let mut resources = Vec::new();
        for records in [queues, functions, roles, log_groups, buckets] {
            resources.extend(records);
        }
        info!(records = resources.len(), "live inventory collected");

        Ok(InventorySnapshot {
            region: self.region.clone(),
            account_id,
            generated_at: Some(Utc::now().to_rfc3339()),
            resources,
        })
    }

    async fn account_id(&self) -> Result<Option<String>, AwsError> {
        let identity = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(sdk_error("sts"))?;
        Ok(identity.account().map(str::to_string))
    }

    async fn queues(&self) -> Result<Vec<InventoryRecord>, AwsError> {
        let urls: Vec<String> = self
            .sqs
            .list_queues()
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(sdk_error("sqs"))?;

        let mut records = Vec::with_capacity(urls.len());
        for url in &urls {
            let attributes = self
                .sqs
                .get_queue_attributes()
                .queue_url(url)
                .attribute_names(QueueAttributeName::All)
                .send()
                .await
                .map_err(sdk_error("sqs"))?;
            let tags = self
                .sqs
                .list_queue_tags()
                .queue_url(url)
                .send()
                .await
                .map_err(sdk_error("sqs"))?;

            let attributes = attributes
                .attributes()
                .into_iter()
                .flatten()
                .map(|(name, value)| (name.as_str().to_string(), value.clone()));
            records.extend(queue_records(url, attributes, tags.tags()));
        }

        debug!(queues = urls.len(), "sqs listed");
        Ok(records)
    }

    async fn functions(&self) -> Result<Vec<InventoryRecord>, AwsError> {
        let functions: Vec<FunctionConfiguration> = self
            .lambda
            .list_functions()
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(sdk_error("lambda"))?;

        let mut records = Vec::with_capacity(functions.len());
        for function in &functions {
            records.push(function_record(function));

            let Some(name) = function.function_name() else {
                continue;
            };
            match self.lambda.get_policy().function_name(name).send().await {
                Ok(output) => records.extend(output.policy().map(permission_records).unwrap_or_default()),
                // No resource policy means no permissions.
                Err(err) if err.as_service_error().is_some_and(|e| e.is_resource_not_found_exception()) => {}
                Err(err) => return Err(sdk_error("lambda")(err)),
            }
        }

        debug!(functions = functions.len(), "lambda listed");
        Ok(records)
    }

    async fn roles(&self) -> Result<Vec<InventoryRecord>, AwsError> {
        let roles: Vec<Role> = self
            .iam
            .list_roles()
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(sdk_error("iam"))?;

        let mut records = Vec::with_capacity(roles.len());
        for role in &roles {
            let name = role.role_name();

            let tags = self
                .iam
                .list_role_tags()
                .role_name(name)
                .send()
                .await
                .map_err(sdk_error("iam"))?;
            let tags: AttributeBag = tags
                .tags()
                .iter()
                .map(|tag| (tag.key().to_string(), json!(tag.value())))
                .collect();
            records.push(role_record(role, tags));

            let inline: Vec<String> = self
                .iam
                .list_role_policies()
                .role_name(name)
                .into_paginator()
                .items()
                .send()
                .collect::<Result<Vec<_>, _>>()
                .await
                .map_err(sdk_error("iam"))?;
            for policy_name in &inline {
                let policy = self
                    .iam
                    .get_role_policy()
                    .role_name(name)
                    .policy_name(policy_name)
                    .send()
                    .await
                    .map_err(sdk_error("iam"))?;
                records.push(inline_policy_record(name, policy_name, policy.policy_document()));
            }

            let attached: Vec<AttachedPolicy> = self
                .iam
                .list_attached_role_policies()
                .role_name(name)
                .into_paginator()
                .items()
                .send()
                .collect::<Result<Vec<_>, _>>()
                .await
                .map_err(sdk_error("iam"))?;
            records.extend(
                attached
                    .iter()
                    .map(|policy| attachment_record(name, policy.policy_name(), policy.policy_arn())),
            );
        }

        debug!(roles = roles.len(), "iam listed");
        Ok(records)
    }

    async fn log_groups(&self) -> Result<Vec<InventoryRecord>, AwsError> {
        let groups: Vec<LogGroup> = self
            .logs
            .describe_log_groups()
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(sdk_error("logs"))?;

        debug!(log_groups = groups.len(), "cloudwatch logs listed");
        Ok(groups.iter().map(log_group_record).collect())
    }

    /// Bucket listing is global; only buckets located in the checked region are kept.
    async fn buckets(&self) -> Result<Vec<InventoryRecord>, AwsError> {
        let listed = self.s3.list_buckets().send().await.map_err(sdk_error("s3"))?;

        let mut records = Vec::new();
        for bucket in listed.buckets() {
            let Some(name) = bucket.name() else {
                continue;
            };
            let location = self
                .s3
                .get_bucket_location()
                .bucket(name)
                .send()
                .await
                .map_err(sdk_error("s3"))?;
            let constraint = location.location_constraint().map(|c| c.as_str());
            if !bucket_in_region(constraint, &self.region) {
                continue;
            }

            let tags: AttributeBag = match self.s3.get_bucket_tagging().bucket(name).send().await {
                Ok(output) => output
                    .tag_set()
                    .iter()
                    .map(|tag| (tag.key().to_string(), json!(tag.value())))
                    .collect(),
                Err(err) if err.code() == Some("NoSuchTagSet") => AttributeBag::new(),
                Err(err) => return Err(sdk_error("s3")(err)),
            };
            let created = bucket
                .creation_date()
                .and_then(|date| date.fmt(DateTimeFormat::DateTime).ok());
            records.push(bucket_record(name, created.as_deref(), tags));
        }

        debug!(buckets = records.len(), "s3 listed");
        Ok(records)
    }
}

fn record(kind: &str, attributes: AttributeBag) -> InventoryRecord {
    InventoryRecord {
        kind: kind.into(),
        attributes,
    }
}

fn insert(bag: &mut AttributeBag, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        bag.insert(field.to_string(), json!(value));
    }
}

/// IAM returns policy documents URL-encoded.
pub(crate) fn decode_policy(raw: &str) -> Value {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    serde_json::from_str(&decoded).unwrap_or_else(|_| Value::String(decoded.into_owned()))
}

/// The queue itself, plus its access policy when one is attached.
pub(crate) fn queue_records(
    url: &str,
    attributes: impl IntoIterator<Item = (String, String)>,
    tags: Option<&HashMap<String, String>>,
) -> Vec<InventoryRecord> {
    let mut bag: AttributeBag = attributes
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect();
    bag.insert("QueueUrl".to_string(), json!(url));
    if let Some(tags) = tags.filter(|tags| !tags.is_empty()) {
        bag.insert("Tags".to_string(), json!(tags));
    }

    let mut records = Vec::with_capacity(2);
    if let Some(policy) = bag.get("Policy").cloned() {
        let mut policy_bag = AttributeBag::new();
        policy_bag.insert("QueueUrl".to_string(), json!(url));
        policy_bag.insert("Policy".to_string(), policy);
        records.push(record(kinds::SQS_QUEUE_POLICY, policy_bag));
    }
    records.insert(0, record(kinds::SQS_QUEUE, bag));
    records
}

pub(crate) fn function_record(function: &FunctionConfiguration) -> InventoryRecord {
    let mut bag = AttributeBag::new();
    insert(&mut bag, "FunctionName", function.function_name());
    insert(&mut bag, "FunctionArn", function.function_arn());
    insert(&mut bag, "Runtime", function.runtime().map(|runtime| runtime.as_str()));
    insert(&mut bag, "Handler", function.handler());
    insert(&mut bag, "Role", function.role());
    insert(&mut bag, "Description", function.description());
    insert(&mut bag, "PackageType", function.package_type().map(|package| package.as_str()));
    if let Some(memory) = function.memory_size() {
        bag.insert("MemorySize".to_string(), json!(memory));
    }
    if let Some(timeout) = function.timeout() {
        bag.insert("Timeout".to_string(), json!(timeout));
    }
    let architectures: Vec<&str> = function.architectures().iter().map(|a| a.as_str()).collect();
    if !architectures.is_empty() {
        bag.insert("Architectures".to_string(), json!(architectures));
    }
    if let Some(variables) = function.environment().and_then(|env| env.variables()) {
        bag.insert("Environment".to_string(), json!({ "Variables": variables }));
    }
    record(kinds::LAMBDA_FUNCTION, bag)
}

/// One permission record per statement of a function's resource policy.
pub(crate) fn permission_records(policy: &str) -> Vec<InventoryRecord> {
    let document: Value = match serde_json::from_str(policy) {
        Ok(document) => document,
        Err(err) => {
            warn!(error = %err, "unreadable lambda resource policy; skipped");
            return Vec::new();
        }
    };
    let statements = match document.get("Statement") {
        Some(Value::Array(statements)) => statements.clone(),
        Some(statement @ Value::Object(_)) => vec![statement.clone()],
        _ => Vec::new(),
    };
    statements
        .into_iter()
        .filter_map(|statement| match statement {
            Value::Object(bag) => Some(record(kinds::LAMBDA_PERMISSION, bag)),
            _ => None,
        })
        .collect()
}

pub(crate) fn role_record(role: &Role, tags: AttributeBag) -> InventoryRecord {
    let mut bag = AttributeBag::new();
    bag.insert("RoleName".to_string(), json!(role.role_name()));
    bag.insert("Arn".to_string(), json!(role.arn()));
    bag.insert("Path".to_string(), json!(role.path()));
    insert(&mut bag, "Description", role.description());
    if let Some(duration) = role.max_session_duration() {
        bag.insert("MaxSessionDuration".to_string(), json!(duration));
    }
    if let Some(document) = role.assume_role_policy_document() {
        bag.insert("AssumeRolePolicyDocument".to_string(), decode_policy(document));
    }
    if let Some(boundary) = role
        .permissions_boundary()
        .and_then(|boundary| boundary.permissions_boundary_arn())
    {
        bag.insert(
            "PermissionsBoundary".to_string(),
            json!({ "PermissionsBoundaryArn": boundary }),
        );
    }
    if !tags.is_empty() {
        bag.insert("Tags".to_string(), Value::Object(tags));
    }
    record(kinds::IAM_ROLE, bag)
}

pub(crate) fn inline_policy_record(role: &str, name: &str, document: &str) -> InventoryRecord {
    let mut bag = AttributeBag::new();
    bag.insert("RoleName".to_string(), json!(role));
    bag.insert("PolicyName".to_string(), json!(name));
    bag.insert("PolicyDocument".to_string(), decode_policy(document));
    record(kinds::IAM_ROLE_POLICY, bag)
}

pub(crate) fn attachment_record(role: &str, name: Option<&str>, arn: Option<&str>) -> InventoryRecord {
    let mut bag = AttributeBag::new();
    bag.insert("RoleName".to_string(), json!(role));
    insert(&mut bag, "PolicyName", name);
    insert(&mut bag, "PolicyArn", arn);
    record(kinds::IAM_ROLE_POLICY_ATTACHMENT, bag)
}

pub(crate) fn log_group_record(group: &LogGroup) -> InventoryRecord {
    let mut bag = AttributeBag::new();
    insert(&mut bag, "logGroupName", group.log_group_name());
    insert(&mut bag, "arn", group.arn());
    insert(&mut bag, "kmsKeyId", group.kms_key_id());
    if let Some(retention) = group.retention_in_days() {
        bag.insert("retentionInDays".to_string(), json!(retention));
    }
    record(kinds::CLOUDWATCH_LOG_GROUP, bag)
}

pub(crate) fn bucket_record(name: &str, created: Option<&str>, tags: AttributeBag) -> InventoryRecord {
    let mut bag = AttributeBag::new();
    bag.insert("Name".to_string(), json!(name));
    insert(&mut bag, "CreationDate", created);
    if !tags.is_empty() {
        bag.insert("Tags".to_string(), Value::Object(tags));
    }
    record(kinds::S3_BUCKET, bag)
}

/// An empty constraint means us-east-1; the legacy `EU` constraint means eu-west-1.
pub(crate) fn bucket_in_region(constraint: Option<&str>, region: &str) -> bool {
    match constraint.filter(|constraint| !constraint.is_empty()) {
        None => region == "us-east-1",
        Some("EU") => region == "eu-west-1",
        Some(constraint) => constraint == region,
    }
}
