//! Resource kind tags known to the identity and comparator tables.

pub const INSTANCE: &str = "aws_instance";
pub const VPC: &str = "aws_vpc";
pub const SUBNET: &str = "aws_subnet";
pub const SECURITY_GROUP: &str = "aws_security_group";
pub const INTERNET_GATEWAY: &str = "aws_internet_gateway";
pub const ROUTE_TABLE: &str = "aws_route_table";
pub const ROUTE_TABLE_ASSOCIATION: &str = "aws_route_table_association";

pub const S3_BUCKET: &str = "aws_s3_bucket";
pub const DYNAMODB_TABLE: &str = "aws_dynamodb_table";
pub const DB_INSTANCE: &str = "aws_db_instance";

pub const SQS_QUEUE: &str = "aws_sqs_queue";
pub const SQS_QUEUE_POLICY: &str = "aws_sqs_queue_policy";

pub const LAMBDA_FUNCTION: &str = "aws_lambda_function";
pub const LAMBDA_PERMISSION: &str = "aws_lambda_permission";

pub const IAM_ROLE: &str = "aws_iam_role";
pub const IAM_ROLE_POLICY: &str = "aws_iam_role_policy";
pub const IAM_ROLE_POLICY_ATTACHMENT: &str = "aws_iam_role_policy_attachment";
pub const IAM_POLICY: &str = "aws_iam_policy";
pub const IAM_OIDC_PROVIDER: &str = "aws_iam_openid_connect_provider";

pub const EVENT_BUS: &str = "aws_cloudwatch_event_bus";
pub const EVENT_RULE: &str = "aws_cloudwatch_event_rule";
pub const EVENT_TARGET: &str = "aws_cloudwatch_event_target";

pub const ECS_CLUSTER: &str = "aws_ecs_cluster";
pub const ECS_SERVICE: &str = "aws_ecs_service";
pub const ECS_TASK_DEFINITION: &str = "aws_ecs_task_definition";

pub const APIGW_REST_API: &str = "aws_api_gateway_rest_api";
pub const APIGW_RESOURCE: &str = "aws_api_gateway_resource";
pub const APIGW_METHOD: &str = "aws_api_gateway_method";
pub const APIGW_INTEGRATION: &str = "aws_api_gateway_integration";
pub const APIGW_DEPLOYMENT: &str = "aws_api_gateway_deployment";
pub const APIGW_STAGE: &str = "aws_api_gateway_stage";

pub const CLOUDWATCH_DASHBOARD: &str = "aws_cloudwatch_dashboard";
pub const CLOUDWATCH_METRIC_ALARM: &str = "aws_cloudwatch_metric_alarm";
pub const CLOUDWATCH_LOG_GROUP: &str = "aws_cloudwatch_log_group";

pub const REGION: &str = "aws_region";
pub const CALLER_IDENTITY: &str = "aws_caller_identity";

/// Read-only account/environment metadata. Never reported as drift.
pub const META_KINDS: &[&str] = &[REGION, CALLER_IDENTITY];

/// Name placeholder used when a module author had nothing better to call a block.
pub const PLACEHOLDER_NAME: &str = "this";

pub fn is_meta(kind: &str) -> bool {
    META_KINDS.contains(&kind)
}

/// Selects the kinds a rule applies to. Rule tables are scanned in order, so
/// more specific prefixes must be registered before shorter ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindMatch {
    Exact(&'static str),
    Prefix(&'static str),
}

impl KindMatch {
    pub fn matches(&self, kind: &str) -> bool {
        match self {
            KindMatch::Exact(tag) => kind == *tag,
            KindMatch::Prefix(prefix) => kind.starts_with(prefix),
        }
    }
}
