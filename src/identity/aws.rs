use super::{IdentityStrategy, KeyField, KeyTransform};
use crate::kinds::{self, KindMatch};

const fn arn_keyed(arn: &'static [&'static str], id: &'static [&'static str]) -> IdentityStrategy {
    IdentityStrategy::Simple { arn, id }
}

const fn id_keyed(id: &'static [&'static str]) -> IdentityStrategy {
    IdentityStrategy::Simple { arn: &[], id }
}

const REST_API_ID: KeyField = KeyField::new(&["rest_api_id"], &["restApiId"]);
const RESOURCE_ID: KeyField = KeyField::new(&["resource_id"], &["resourceId"]);

const LAMBDA_PERMISSION: &[KeyField] = &[
    KeyField::new(&["function_name"], &["FunctionName", "Resource"])
        .with_transform(KeyTransform::FunctionName),
    KeyField::new(&["statement_id"], &["Sid"]),
];

const IAM_ROLE_POLICY: &[KeyField] = &[
    KeyField::new(&["role"], &["RoleName"]),
    KeyField::new(&["name"], &["PolicyName"]),
];

const IAM_ROLE_POLICY_ATTACHMENT: &[KeyField] = &[
    KeyField::new(&["role"], &["RoleName"]),
    KeyField::new(&["policy_arn"], &["PolicyArn"]),
];

const EVENT_TARGET: &[KeyField] = &[
    KeyField::new(&["event_bus_name"], &["EventBusName"]),
    KeyField::new(&["rule"], &["Rule"]),
    KeyField::new(&["target_id"], &["Id"]),
];

const APIGW_RESOURCE: &[KeyField] = &[REST_API_ID, KeyField::new(&["id"], &["id", "resourceId"])];
const APIGW_METHOD: &[KeyField] = &[
    REST_API_ID,
    RESOURCE_ID,
    KeyField::new(&["http_method"], &["httpMethod"]),
];
// Live integrations carry the backend verb in `httpMethod`; the method they hang off is
// reported as `resourceMethod`.
const APIGW_INTEGRATION: &[KeyField] = &[
    REST_API_ID,
    RESOURCE_ID,
    KeyField::new(&["http_method"], &["resourceMethod"]),
];
const APIGW_DEPLOYMENT: &[KeyField] = &[REST_API_ID, KeyField::new(&["id"], &["id"])];
const APIGW_STAGE: &[KeyField] = &[REST_API_ID, KeyField::new(&["stage_name"], &["stageName"])];

pub(super) fn rules() -> Vec<(KindMatch, IdentityStrategy)> {
    use KindMatch::Exact;

    vec![
        // EC2 networking and compute are keyed by their opaque IDs.
        (Exact(kinds::INSTANCE), id_keyed(&["id", "InstanceId"])),
        (Exact(kinds::VPC), id_keyed(&["id", "VpcId"])),
        (Exact(kinds::SUBNET), id_keyed(&["id", "SubnetId"])),
        (Exact(kinds::SECURITY_GROUP), id_keyed(&["id", "GroupId"])),
        (Exact(kinds::INTERNET_GATEWAY), id_keyed(&["id", "InternetGatewayId"])),
        (Exact(kinds::ROUTE_TABLE), id_keyed(&["id", "RouteTableId"])),
        (
            Exact(kinds::ROUTE_TABLE_ASSOCIATION),
            id_keyed(&["id", "RouteTableAssociationId"]),
        ),
        (Exact(kinds::S3_BUCKET), id_keyed(&["id", "bucket", "Name"])),
        (Exact(kinds::DYNAMODB_TABLE), arn_keyed(&["arn", "TableArn"], &["id", "TableName"])),
        (Exact(kinds::DB_INSTANCE), arn_keyed(&["arn", "DBInstanceArn"], &["identifier", "DBInstanceIdentifier"])),
        (Exact(kinds::SQS_QUEUE), arn_keyed(&["arn", "QueueArn"], &["id", "QueueUrl"])),
        (Exact(kinds::SQS_QUEUE_POLICY), id_keyed(&["queue_url", "QueueUrl"])),
        (Exact(kinds::LAMBDA_FUNCTION), arn_keyed(&["arn", "FunctionArn"], &["id", "FunctionName"])),
        (Exact(kinds::LAMBDA_PERMISSION), IdentityStrategy::Composite { fields: LAMBDA_PERMISSION }),
        (Exact(kinds::IAM_ROLE), arn_keyed(&["arn"], &["id", "RoleName"])),
        (Exact(kinds::IAM_ROLE_POLICY), IdentityStrategy::Composite { fields: IAM_ROLE_POLICY }),
        (
            Exact(kinds::IAM_ROLE_POLICY_ATTACHMENT),
            IdentityStrategy::Composite { fields: IAM_ROLE_POLICY_ATTACHMENT },
        ),
        (Exact(kinds::IAM_POLICY), arn_keyed(&["arn"], &[])),
        (Exact(kinds::IAM_OIDC_PROVIDER), arn_keyed(&["arn", "OpenIDConnectProviderArn"], &[])),
        (Exact(kinds::EVENT_BUS), arn_keyed(&["arn"], &["id", "Name"])),
        (Exact(kinds::EVENT_RULE), arn_keyed(&["arn"], &[])),
        (Exact(kinds::EVENT_TARGET), IdentityStrategy::Composite { fields: EVENT_TARGET }),
        (Exact(kinds::ECS_CLUSTER), arn_keyed(&["arn", "clusterArn"], &[])),
        (Exact(kinds::ECS_SERVICE), arn_keyed(&["arn", "id", "serviceArn"], &[])),
        (Exact(kinds::ECS_TASK_DEFINITION), arn_keyed(&["arn", "taskDefinitionArn"], &[])),
        (Exact(kinds::APIGW_REST_API), id_keyed(&["id"])),
        (Exact(kinds::APIGW_RESOURCE), IdentityStrategy::Composite { fields: APIGW_RESOURCE }),
        (Exact(kinds::APIGW_METHOD), IdentityStrategy::Composite { fields: APIGW_METHOD }),
        (Exact(kinds::APIGW_INTEGRATION), IdentityStrategy::Composite { fields: APIGW_INTEGRATION }),
        (Exact(kinds::APIGW_DEPLOYMENT), IdentityStrategy::Composite { fields: APIGW_DEPLOYMENT }),
        (Exact(kinds::APIGW_STAGE), IdentityStrategy::Composite { fields: APIGW_STAGE }),
        (Exact(kinds::CLOUDWATCH_DASHBOARD), arn_keyed(&["dashboard_arn", "DashboardArn"], &[])),
        (Exact(kinds::CLOUDWATCH_METRIC_ALARM), arn_keyed(&["arn", "AlarmArn"], &["alarm_name", "AlarmName"])),
        (Exact(kinds::CLOUDWATCH_LOG_GROUP), id_keyed(&["id", "logGroupName"])),
    ]
}
