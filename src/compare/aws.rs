use super::{FieldCheck, ProviderDefault, ValueMode};
use crate::kinds::{self, KindMatch};

const NO: &[ProviderDefault] = &[ProviderDefault::Bool(false)];
const ZERO: &[ProviderDefault] = &[ProviderDefault::Int(0)];

const TAGS: FieldCheck = FieldCheck::new(&["tags"], &["Tags"]).mode(ValueMode::Tags);

const INSTANCE: &[FieldCheck] = &[
    FieldCheck::new(&["instance_type"], &["InstanceType"]),
    FieldCheck::new(&["ami"], &["ImageId"]),
    FieldCheck::new(&["subnet_id"], &["SubnetId"]),
    FieldCheck::new(&["key_name"], &["KeyName"]),
    FieldCheck::new(&["private_ip"], &["PrivateIpAddress"]),
    TAGS,
];

const VPC: &[FieldCheck] = &[
    FieldCheck::new(&["cidr_block"], &["CidrBlock"]),
    FieldCheck::new(&["instance_tenancy"], &["InstanceTenancy"]).defaults(&[ProviderDefault::Str("default")]),
    TAGS,
];

const SUBNET: &[FieldCheck] = &[
    FieldCheck::new(&["cidr_block"], &["CidrBlock"]),
    FieldCheck::new(&["vpc_id"], &["VpcId"]),
    FieldCheck::new(&["availability_zone"], &["AvailabilityZone"]),
    FieldCheck::new(&["map_public_ip_on_launch"], &["MapPublicIpOnLaunch"])
        .loose()
        .defaults(NO),
    TAGS,
];

const SECURITY_GROUP: &[FieldCheck] = &[
    FieldCheck::new(&["name"], &["GroupName"]),
    FieldCheck::new(&["description"], &["Description"]),
    FieldCheck::new(&["vpc_id"], &["VpcId"]),
    TAGS,
];

const INTERNET_GATEWAY: &[FieldCheck] = &[
    FieldCheck::new(&["vpc_id"], &["Attachments.0.VpcId"]),
    TAGS,
];

const ROUTE_TABLE: &[FieldCheck] = &[FieldCheck::new(&["vpc_id"], &["VpcId"]), TAGS];

const ROUTE_TABLE_ASSOCIATION: &[FieldCheck] = &[
    FieldCheck::new(&["route_table_id"], &["RouteTableId"]),
    FieldCheck::new(&["subnet_id"], &["SubnetId"]),
    FieldCheck::new(&["gateway_id"], &["GatewayId"]),
];

const S3_BUCKET: &[FieldCheck] = &[FieldCheck::new(&["bucket"], &["Name"]), TAGS];

const DYNAMODB_TABLE: &[FieldCheck] = &[
    FieldCheck::new(&["billing_mode"], &["BillingModeSummary.BillingMode"])
        .defaults(&[ProviderDefault::Str("PROVISIONED")]),
    FieldCheck::new(&["hash_key"], &["KeySchema.0.AttributeName"]),
    FieldCheck::new(&["read_capacity"], &["ProvisionedThroughput.ReadCapacityUnits"])
        .loose()
        .defaults(ZERO),
    FieldCheck::new(&["write_capacity"], &["ProvisionedThroughput.WriteCapacityUnits"])
        .loose()
        .defaults(ZERO),
    FieldCheck::new(&["stream_enabled"], &["StreamSpecification.StreamEnabled"])
        .loose()
        .defaults(NO),
];

const DB_INSTANCE: &[FieldCheck] = &[
    FieldCheck::new(&["engine"], &["Engine"]),
    FieldCheck::new(&["engine_version"], &["EngineVersion"]),
    FieldCheck::new(&["instance_class"], &["DBInstanceClass"]),
    FieldCheck::new(&["allocated_storage"], &["AllocatedStorage"]).loose(),
    FieldCheck::new(&["multi_az"], &["MultiAZ"]).loose().defaults(NO),
    FieldCheck::new(&["publicly_accessible"], &["PubliclyAccessible"])
        .loose()
        .defaults(NO),
    FieldCheck::new(&["storage_encrypted"], &["StorageEncrypted"])
        .loose()
        .defaults(NO),
];

// The queue name is part of the ARN key, so it is not compared again.
const SQS_QUEUE: &[FieldCheck] = &[
    FieldCheck::new(&["visibility_timeout_seconds"], &["VisibilityTimeout"]).loose(),
    FieldCheck::new(&["message_retention_seconds"], &["MessageRetentionPeriod"]).loose(),
    FieldCheck::new(&["max_message_size"], &["MaximumMessageSize"]).loose(),
    FieldCheck::new(&["delay_seconds"], &["DelaySeconds"]).loose().defaults(ZERO),
    FieldCheck::new(&["receive_wait_time_seconds"], &["ReceiveMessageWaitTimeSeconds"])
        .loose()
        .defaults(ZERO),
    FieldCheck::new(&["fifo_queue"], &["FifoQueue"]).loose().defaults(NO),
    FieldCheck::new(&["content_based_deduplication"], &["ContentBasedDeduplication"])
        .loose()
        .defaults(NO),
    FieldCheck::new(&["redrive_policy"], &["RedrivePolicy"]).mode(ValueMode::Document),
    FieldCheck::new(&["kms_master_key_id"], &["KmsMasterKeyId"]),
    TAGS,
];

const SQS_QUEUE_POLICY: &[FieldCheck] =
    &[FieldCheck::new(&["policy"], &["Policy"]).mode(ValueMode::Document)];

const LAMBDA_FUNCTION: &[FieldCheck] = &[
    FieldCheck::new(&["runtime"], &["Runtime"]),
    FieldCheck::new(&["handler"], &["Handler"]),
    FieldCheck::new(&["memory_size"], &["MemorySize"]).loose(),
    FieldCheck::new(&["timeout"], &["Timeout"]).loose(),
    FieldCheck::new(&["role"], &["Role"]),
    FieldCheck::new(&["description"], &["Description"]),
    FieldCheck::new(&["package_type"], &["PackageType"]).defaults(&[ProviderDefault::Str("Zip")]),
    FieldCheck::new(&["architectures"], &["Architectures"])
        .mode(ValueMode::Set)
        .defaults(&[ProviderDefault::Str("x86_64")]),
    FieldCheck::new(&["environment.0.variables"], &["Environment.Variables"])
        .named("environment")
        .mode(ValueMode::Document),
];

const LAMBDA_PERMISSION: &[FieldCheck] = &[
    FieldCheck::new(&["action"], &["Action"]),
    FieldCheck::new(&["principal"], &["Principal"]).mode(ValueMode::Principal),
    FieldCheck::new(&["source_arn"], &["Condition.ArnLike.AWS:SourceArn"]),
];

const IAM_ROLE: &[FieldCheck] = &[
    FieldCheck::new(&["assume_role_policy"], &["AssumeRolePolicyDocument"]).mode(ValueMode::Document),
    FieldCheck::new(&["description"], &["Description"]),
    FieldCheck::new(&["max_session_duration"], &["MaxSessionDuration"])
        .loose()
        .defaults(&[ProviderDefault::Int(3600)]),
    FieldCheck::new(&["path"], &["Path"]).defaults(&[ProviderDefault::Str("/")]),
    FieldCheck::new(&["permissions_boundary"], &["PermissionsBoundary.PermissionsBoundaryArn"]),
    TAGS,
];

const IAM_ROLE_POLICY: &[FieldCheck] =
    &[FieldCheck::new(&["policy"], &["PolicyDocument"]).mode(ValueMode::Document)];

const IAM_ROLE_POLICY_ATTACHMENT: &[FieldCheck] = &[FieldCheck::new(&["policy_arn"], &["PolicyArn"])];

const IAM_POLICY: &[FieldCheck] = &[
    FieldCheck::new(&["policy"], &["PolicyDocument"]).mode(ValueMode::Document),
    FieldCheck::new(&["description"], &["Description"]),
    FieldCheck::new(&["path"], &["Path"]).defaults(&[ProviderDefault::Str("/")]),
    TAGS,
];

const IAM_OIDC_PROVIDER: &[FieldCheck] = &[
    FieldCheck::new(&["client_id_list"], &["ClientIDList"]).mode(ValueMode::Set),
    FieldCheck::new(&["thumbprint_list"], &["ThumbprintList"]).mode(ValueMode::Set),
    TAGS,
];

const EVENT_BUS: &[FieldCheck] = &[FieldCheck::new(&["name"], &["Name"]), TAGS];

const EVENT_RULE: &[FieldCheck] = &[
    FieldCheck::new(&["description"], &["Description"]),
    FieldCheck::new(&["event_pattern"], &["EventPattern"]).mode(ValueMode::Document),
    FieldCheck::new(&["schedule_expression"], &["ScheduleExpression"]),
    FieldCheck::new(&["state"], &["State"]).defaults(&[ProviderDefault::Str("ENABLED")]),
    FieldCheck::new(&["event_bus_name"], &["EventBusName"]).defaults(&[ProviderDefault::Str("default")]),
];

const EVENT_TARGET: &[FieldCheck] = &[
    FieldCheck::new(&["arn"], &["Arn"]),
    FieldCheck::new(&["input"], &["Input"]).mode(ValueMode::Document),
    FieldCheck::new(&["role_arn"], &["RoleArn"]),
];

const ECS_CLUSTER: &[FieldCheck] = &[
    FieldCheck::new(&["name"], &["clusterName"]),
    FieldCheck::new(&["tags"], &["tags"]).mode(ValueMode::Tags),
];

const ECS_SERVICE: &[FieldCheck] = &[
    FieldCheck::new(&["desired_count"], &["desiredCount"]).loose(),
    FieldCheck::new(&["launch_type"], &["launchType"]),
    FieldCheck::new(&["task_definition"], &["taskDefinition"]).mode(ValueMode::ArnName),
    FieldCheck::new(&["cluster"], &["clusterArn"]).mode(ValueMode::ArnName),
];

const ECS_TASK_DEFINITION: &[FieldCheck] = &[
    FieldCheck::new(&["family"], &["family"]),
    FieldCheck::new(&["cpu"], &["cpu"]).loose(),
    FieldCheck::new(&["memory"], &["memory"]).loose(),
    FieldCheck::new(&["network_mode"], &["networkMode"]),
    FieldCheck::new(&["requires_compatibilities"], &["requiresCompatibilities"]).mode(ValueMode::Set),
    FieldCheck::new(&["execution_role_arn"], &["executionRoleArn"]),
    FieldCheck::new(&["task_role_arn"], &["taskRoleArn"]),
];

const APIGW_REST_API: &[FieldCheck] = &[
    FieldCheck::new(&["name"], &["name"]),
    FieldCheck::new(&["description"], &["description"]),
    FieldCheck::new(&["endpoint_configuration.0.types"], &["endpointConfiguration.types"])
        .named("endpoint_configuration")
        .mode(ValueMode::Set),
    FieldCheck::new(&["tags"], &["tags"]).mode(ValueMode::Tags),
];

const APIGW_RESOURCE: &[FieldCheck] = &[
    FieldCheck::new(&["path_part"], &["pathPart"]),
    FieldCheck::new(&["parent_id"], &["parentId"]),
];

const APIGW_METHOD: &[FieldCheck] = &[
    FieldCheck::new(&["authorization"], &["authorizationType"]),
    FieldCheck::new(&["authorizer_id"], &["authorizerId"]),
    FieldCheck::new(&["api_key_required"], &["apiKeyRequired"])
        .loose()
        .defaults(NO),
];

const APIGW_INTEGRATION: &[FieldCheck] = &[
    FieldCheck::new(&["type"], &["type"]),
    FieldCheck::new(&["integration_http_method"], &["httpMethod"]),
    FieldCheck::new(&["uri"], &["uri"]),
    FieldCheck::new(&["passthrough_behavior"], &["passthroughBehavior"]),
];

const APIGW_DEPLOYMENT: &[FieldCheck] = &[FieldCheck::new(&["description"], &["description"])];

const APIGW_STAGE: &[FieldCheck] = &[
    FieldCheck::new(&["deployment_id"], &["deploymentId"]),
    FieldCheck::new(&["description"], &["description"]),
    FieldCheck::new(&["xray_tracing_enabled"], &["tracingEnabled"])
        .loose()
        .defaults(NO),
    FieldCheck::new(&["variables"], &["variables"]).mode(ValueMode::Document),
];

const CLOUDWATCH_DASHBOARD: &[FieldCheck] =
    &[FieldCheck::new(&["dashboard_body"], &["DashboardBody"]).mode(ValueMode::Document)];

const CLOUDWATCH_METRIC_ALARM: &[FieldCheck] = &[
    FieldCheck::new(&["alarm_name"], &["AlarmName"]),
    FieldCheck::new(&["comparison_operator"], &["ComparisonOperator"]),
    FieldCheck::new(&["evaluation_periods"], &["EvaluationPeriods"]).loose(),
    FieldCheck::new(&["metric_name"], &["MetricName"]),
    FieldCheck::new(&["namespace"], &["Namespace"]),
    FieldCheck::new(&["period"], &["Period"]).loose(),
    FieldCheck::new(&["statistic"], &["Statistic"]),
    FieldCheck::new(&["threshold"], &["Threshold"]).loose(),
    FieldCheck::new(&["dimensions"], &["Dimensions"]).mode(ValueMode::Tags),
    FieldCheck::new(&["alarm_actions"], &["AlarmActions"]).mode(ValueMode::Set),
    FieldCheck::new(&["treat_missing_data"], &["TreatMissingData"])
        .defaults(&[ProviderDefault::Str("missing")]),
];

const CLOUDWATCH_LOG_GROUP: &[FieldCheck] = &[
    FieldCheck::new(&["retention_in_days"], &["retentionInDays"])
        .loose()
        .defaults(ZERO),
    FieldCheck::new(&["kms_key_id"], &["kmsKeyId"]),
];

/// Comparator table in dispatch order. Prefix families list their longer tags first.
pub(super) fn comparators() -> Vec<(KindMatch, &'static [FieldCheck])> {
    use KindMatch::{Exact, Prefix};

    vec![
        (Exact(kinds::INSTANCE), INSTANCE),
        (Exact(kinds::VPC), VPC),
        (Exact(kinds::SUBNET), SUBNET),
        (Exact(kinds::SECURITY_GROUP), SECURITY_GROUP),
        (Exact(kinds::INTERNET_GATEWAY), INTERNET_GATEWAY),
        (Prefix(kinds::ROUTE_TABLE_ASSOCIATION), ROUTE_TABLE_ASSOCIATION),
        (Prefix(kinds::ROUTE_TABLE), ROUTE_TABLE),
        (Exact(kinds::S3_BUCKET), S3_BUCKET),
        (Exact(kinds::DYNAMODB_TABLE), DYNAMODB_TABLE),
        (Exact(kinds::DB_INSTANCE), DB_INSTANCE),
        (Prefix(kinds::SQS_QUEUE_POLICY), SQS_QUEUE_POLICY),
        (Prefix(kinds::SQS_QUEUE), SQS_QUEUE),
        (Exact(kinds::LAMBDA_FUNCTION), LAMBDA_FUNCTION),
        (Exact(kinds::LAMBDA_PERMISSION), LAMBDA_PERMISSION),
        (Prefix(kinds::IAM_ROLE_POLICY_ATTACHMENT), IAM_ROLE_POLICY_ATTACHMENT),
        (Prefix(kinds::IAM_ROLE_POLICY), IAM_ROLE_POLICY),
        (Prefix(kinds::IAM_ROLE), IAM_ROLE),
        (Exact(kinds::IAM_POLICY), IAM_POLICY),
        (Exact(kinds::IAM_OIDC_PROVIDER), IAM_OIDC_PROVIDER),
        (Exact(kinds::EVENT_BUS), EVENT_BUS),
        (Exact(kinds::EVENT_RULE), EVENT_RULE),
        (Exact(kinds::EVENT_TARGET), EVENT_TARGET),
        (Exact(kinds::ECS_CLUSTER), ECS_CLUSTER),
        (Exact(kinds::ECS_SERVICE), ECS_SERVICE),
        (Exact(kinds::ECS_TASK_DEFINITION), ECS_TASK_DEFINITION),
        (Exact(kinds::APIGW_REST_API), APIGW_REST_API),
        (Exact(kinds::APIGW_RESOURCE), APIGW_RESOURCE),
        (Exact(kinds::APIGW_METHOD), APIGW_METHOD),
        (Exact(kinds::APIGW_INTEGRATION), APIGW_INTEGRATION),
        (Exact(kinds::APIGW_DEPLOYMENT), APIGW_DEPLOYMENT),
        (Exact(kinds::APIGW_STAGE), APIGW_STAGE),
        (Exact(kinds::CLOUDWATCH_DASHBOARD), CLOUDWATCH_DASHBOARD),
        (Exact(kinds::CLOUDWATCH_METRIC_ALARM), CLOUDWATCH_METRIC_ALARM),
        (Exact(kinds::CLOUDWATCH_LOG_GROUP), CLOUDWATCH_LOG_GROUP),
    ]
}
