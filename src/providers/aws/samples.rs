//! One realistic declared/live pair per supported kind, shared by the identity and
//! comparator table tests.

use serde_json::{Value, json};

use crate::identity::KeySource;
use crate::kinds;

pub(crate) struct Sample {
    pub kind: &'static str,
    pub declared: Value,
    pub observed: Value,
    pub source: KeySource,
}

fn sample(kind: &'static str, source: KeySource, declared: Value, observed: Value) -> Sample {
    Sample {
        kind,
        declared,
        observed,
        source,
    }
}

pub(crate) fn samples() -> Vec<Sample> {
    use KeySource::{Arn, Composite, Id};

    vec![
        sample(
            kinds::INSTANCE,
            Id,
            json!({
                "id": "i-0abc123", "arn": "arn:aws:ec2:eu-west-2:123456789012:instance/i-0abc123",
                "instance_type": "t3.micro", "ami": "ami-0f1e2d3c", "subnet_id": "subnet-0a1",
                "key_name": "ops", "private_ip": "10.0.1.10", "tags": {"Name": "bastion"}
            }),
            json!({
                "InstanceId": "i-0abc123", "InstanceType": "t3.micro", "ImageId": "ami-0f1e2d3c",
                "SubnetId": "subnet-0a1", "KeyName": "ops", "PrivateIpAddress": "10.0.1.10",
                "State": {"Name": "running"}, "Tags": [{"Key": "Name", "Value": "bastion"}]
            }),
        ),
        sample(
            kinds::VPC,
            Id,
            json!({
                "id": "vpc-0a1", "arn": "arn:aws:ec2:eu-west-2:123456789012:vpc/vpc-0a1",
                "cidr_block": "10.0.0.0/16", "instance_tenancy": "default", "tags": {"Name": "main"}
            }),
            json!({
                "VpcId": "vpc-0a1", "CidrBlock": "10.0.0.0/16", "IsDefault": false,
                "Tags": [{"Key": "Name", "Value": "main"}]
            }),
        ),
        sample(
            kinds::SUBNET,
            Id,
            json!({
                "id": "subnet-0a1", "vpc_id": "vpc-0a1", "cidr_block": "10.0.1.0/24",
                "availability_zone": "eu-west-2a", "map_public_ip_on_launch": false,
                "tags": {"Name": "private-a"}
            }),
            json!({
                "SubnetId": "subnet-0a1", "VpcId": "vpc-0a1", "CidrBlock": "10.0.1.0/24",
                "AvailabilityZone": "eu-west-2a", "MapPublicIpOnLaunch": false,
                "Tags": [{"Key": "Name", "Value": "private-a"}]
            }),
        ),
        sample(
            kinds::SECURITY_GROUP,
            Id,
            json!({
                "id": "sg-0a1", "name": "web", "description": "web tier", "vpc_id": "vpc-0a1",
                "tags": {}
            }),
            json!({"GroupId": "sg-0a1", "GroupName": "web", "Description": "web tier", "VpcId": "vpc-0a1"}),
        ),
        sample(
            kinds::INTERNET_GATEWAY,
            Id,
            json!({"id": "igw-0a1", "vpc_id": "vpc-0a1", "tags": {"Name": "main"}}),
            json!({
                "InternetGatewayId": "igw-0a1",
                "Attachments": [{"State": "available", "VpcId": "vpc-0a1"}],
                "Tags": [{"Key": "Name", "Value": "main"}]
            }),
        ),
        sample(
            kinds::ROUTE_TABLE,
            Id,
            json!({"id": "rtb-0a1", "vpc_id": "vpc-0a1", "tags": {"Name": "private"}}),
            json!({
                "RouteTableId": "rtb-0a1", "VpcId": "vpc-0a1",
                "Routes": [{"DestinationCidrBlock": "10.0.0.0/16", "GatewayId": "local"}],
                "Tags": [{"Key": "Name", "Value": "private"}]
            }),
        ),
        sample(
            kinds::ROUTE_TABLE_ASSOCIATION,
            Id,
            json!({"id": "rtbassoc-0a1", "route_table_id": "rtb-0a1", "subnet_id": "subnet-0a1"}),
            json!({
                "RouteTableAssociationId": "rtbassoc-0a1", "RouteTableId": "rtb-0a1",
                "SubnetId": "subnet-0a1", "Main": false
            }),
        ),
        sample(
            kinds::S3_BUCKET,
            Id,
            json!({
                "id": "tfdrift-artifacts", "bucket": "tfdrift-artifacts",
                "arn": "arn:aws:s3:::tfdrift-artifacts", "tags": {"env": "prod"}
            }),
            json!({
                "Name": "tfdrift-artifacts", "CreationDate": "2024-01-01T00:00:00Z",
                "Tags": [{"Key": "env", "Value": "prod"}]
            }),
        ),
        sample(
            kinds::DYNAMODB_TABLE,
            Arn,
            json!({
                "arn": "arn:aws:dynamodb:eu-west-2:123456789012:table/orders", "id": "orders",
                "name": "orders", "billing_mode": "PAY_PER_REQUEST", "hash_key": "order_id",
                "read_capacity": 0, "write_capacity": 0, "stream_enabled": false
            }),
            json!({
                "TableArn": "arn:aws:dynamodb:eu-west-2:123456789012:table/orders",
                "TableName": "orders",
                "BillingModeSummary": {"BillingMode": "PAY_PER_REQUEST"},
                "KeySchema": [{"AttributeName": "order_id", "KeyType": "HASH"}],
                "ProvisionedThroughput": {"ReadCapacityUnits": 0, "WriteCapacityUnits": 0}
            }),
        ),
        sample(
            kinds::DB_INSTANCE,
            Arn,
            json!({
                "arn": "arn:aws:rds:eu-west-2:123456789012:db:orders", "identifier": "orders",
                "engine": "postgres", "engine_version": "16.3", "instance_class": "db.t4g.micro",
                "allocated_storage": 20, "multi_az": false, "publicly_accessible": false,
                "storage_encrypted": true
            }),
            json!({
                "DBInstanceArn": "arn:aws:rds:eu-west-2:123456789012:db:orders",
                "DBInstanceIdentifier": "orders", "Engine": "postgres", "EngineVersion": "16.3",
                "DBInstanceClass": "db.t4g.micro", "AllocatedStorage": 20, "MultiAZ": false,
                "PubliclyAccessible": false, "StorageEncrypted": true
            }),
        ),
        sample(
            kinds::SQS_QUEUE,
            Arn,
            json!({
                "arn": "arn:aws:sqs:eu-west-2:123456789012:orders",
                "id": "https://sqs.eu-west-2.amazonaws.com/123456789012/orders", "name": "orders",
                "visibility_timeout_seconds": 30, "message_retention_seconds": 345600,
                "delay_seconds": 0, "fifo_queue": false, "tags": {"env": "prod"},
                "redrive_policy": "{\"maxReceiveCount\":5,\"deadLetterTargetArn\":\"arn:aws:sqs:eu-west-2:123456789012:orders-dlq\"}"
            }),
            json!({
                "QueueArn": "arn:aws:sqs:eu-west-2:123456789012:orders",
                "QueueUrl": "https://sqs.eu-west-2.amazonaws.com/123456789012/orders",
                "VisibilityTimeout": "30", "MessageRetentionPeriod": "345600", "DelaySeconds": "0",
                "Tags": {"env": "prod"},
                "RedrivePolicy": "{\"deadLetterTargetArn\":\"arn:aws:sqs:eu-west-2:123456789012:orders-dlq\",\"maxReceiveCount\":5}"
            }),
        ),
        sample(
            kinds::SQS_QUEUE_POLICY,
            Id,
            json!({
                "id": "https://sqs.eu-west-2.amazonaws.com/123456789012/orders",
                "queue_url": "https://sqs.eu-west-2.amazonaws.com/123456789012/orders",
                "policy": "{\"Version\":\"2012-10-17\",\"Statement\":[{\"Effect\":\"Allow\",\"Principal\":{\"Service\":\"events.amazonaws.com\"},\"Action\":\"sqs:SendMessage\",\"Resource\":\"arn:aws:sqs:eu-west-2:123456789012:orders\"}]}"
            }),
            json!({
                "QueueUrl": "https://sqs.eu-west-2.amazonaws.com/123456789012/orders",
                "Policy": {
                    "Statement": [{
                        "Action": "sqs:SendMessage", "Effect": "Allow",
                        "Principal": {"Service": "events.amazonaws.com"},
                        "Resource": "arn:aws:sqs:eu-west-2:123456789012:orders"
                    }],
                    "Version": "2012-10-17"
                }
            }),
        ),
        sample(
            kinds::LAMBDA_FUNCTION,
            Arn,
            json!({
                "arn": "arn:aws:lambda:eu-west-2:123456789012:function:ingest",
                "function_name": "ingest", "runtime": "python3.12", "handler": "app.handler",
                "memory_size": 256, "timeout": 30, "role": "arn:aws:iam::123456789012:role/ingest",
                "architectures": ["x86_64"], "package_type": "Zip",
                "environment": [{"variables": {"STAGE": "prod"}}]
            }),
            json!({
                "FunctionArn": "arn:aws:lambda:eu-west-2:123456789012:function:ingest",
                "FunctionName": "ingest", "Runtime": "python3.12", "Handler": "app.handler",
                "MemorySize": 256, "Timeout": 30, "Role": "arn:aws:iam::123456789012:role/ingest",
                "Environment": {"Variables": {"STAGE": "prod"}}
            }),
        ),
        sample(
            kinds::LAMBDA_PERMISSION,
            Composite,
            json!({
                "function_name": "ingest", "statement_id": "AllowEvents",
                "action": "lambda:InvokeFunction", "principal": "events.amazonaws.com",
                "source_arn": "arn:aws:events:eu-west-2:123456789012:rule/nightly"
            }),
            json!({
                "Sid": "AllowEvents", "Action": "lambda:InvokeFunction",
                "Principal": {"Service": "events.amazonaws.com"},
                "Resource": "arn:aws:lambda:eu-west-2:123456789012:function:ingest",
                "Condition": {"ArnLike": {"AWS:SourceArn": "arn:aws:events:eu-west-2:123456789012:rule/nightly"}}
            }),
        ),
        sample(
            kinds::IAM_ROLE,
            Arn,
            json!({
                "arn": "arn:aws:iam::123456789012:role/app", "name": "app", "id": "app", "path": "/",
                "max_session_duration": 3600,
                "assume_role_policy": "{\"Version\":\"2012-10-17\",\"Statement\":[{\"Effect\":\"Allow\",\"Principal\":{\"Service\":\"lambda.amazonaws.com\"},\"Action\":\"sts:AssumeRole\"}]}",
                "tags": {"team": "payments"}
            }),
            json!({
                "Arn": "arn:aws:iam::123456789012:role/app", "RoleName": "app", "Path": "/",
                "AssumeRolePolicyDocument": {
                    "Statement": [{"Action": "sts:AssumeRole", "Effect": "Allow", "Principal": {"Service": "lambda.amazonaws.com"}}],
                    "Version": "2012-10-17"
                },
                "Tags": [{"Key": "team", "Value": "payments"}]
            }),
        ),
        sample(
            kinds::IAM_ROLE_POLICY,
            Composite,
            json!({
                "id": "app:sqs-access", "role": "app", "name": "sqs-access",
                "policy": "{\"Version\":\"2012-10-17\",\"Statement\":[{\"Effect\":\"Allow\",\"Action\":\"sqs:*\",\"Resource\":\"*\"}]}"
            }),
            json!({
                "RoleName": "app", "PolicyName": "sqs-access",
                "PolicyDocument": {
                    "Statement": [{"Action": "sqs:*", "Effect": "Allow", "Resource": "*"}],
                    "Version": "2012-10-17"
                }
            }),
        ),
        sample(
            kinds::IAM_ROLE_POLICY_ATTACHMENT,
            Composite,
            json!({"id": "app-2024", "role": "app", "policy_arn": "arn:aws:iam::aws:policy/ReadOnlyAccess"}),
            json!({
                "RoleName": "app", "PolicyName": "ReadOnlyAccess",
                "PolicyArn": "arn:aws:iam::aws:policy/ReadOnlyAccess"
            }),
        ),
        sample(
            kinds::IAM_POLICY,
            Arn,
            json!({
                "arn": "arn:aws:iam::123456789012:policy/ci-deploy", "name": "ci-deploy", "path": "/",
                "description": "CI deploy",
                "policy": "{\"Version\":\"2012-10-17\",\"Statement\":[{\"Effect\":\"Allow\",\"Action\":\"lambda:UpdateFunctionCode\",\"Resource\":\"*\"}]}",
                "tags": {"team": "platform"}
            }),
            json!({
                "Arn": "arn:aws:iam::123456789012:policy/ci-deploy", "PolicyName": "ci-deploy",
                "Path": "/", "Description": "CI deploy",
                "PolicyDocument": {
                    "Statement": [{"Action": "lambda:UpdateFunctionCode", "Effect": "Allow", "Resource": "*"}],
                    "Version": "2012-10-17"
                },
                "Tags": [{"Key": "team", "Value": "platform"}]
            }),
        ),
        sample(
            kinds::IAM_OIDC_PROVIDER,
            Arn,
            json!({
                "arn": "arn:aws:iam::123456789012:oidc-provider/token.actions.githubusercontent.com",
                "url": "https://token.actions.githubusercontent.com",
                "client_id_list": ["sts.amazonaws.com"],
                "thumbprint_list": ["6938fd4d98bab03faadb97b34396831e3780aea1"],
                "tags": {}
            }),
            json!({
                "OpenIDConnectProviderArn": "arn:aws:iam::123456789012:oidc-provider/token.actions.githubusercontent.com",
                "Url": "token.actions.githubusercontent.com",
                "ClientIDList": ["sts.amazonaws.com"],
                "ThumbprintList": ["6938fd4d98bab03faadb97b34396831e3780aea1"]
            }),
        ),
        sample(
            kinds::EVENT_BUS,
            Arn,
            json!({
                "arn": "arn:aws:events:eu-west-2:123456789012:event-bus/orders", "id": "orders",
                "name": "orders", "tags": {"team": "payments"}
            }),
            json!({
                "Arn": "arn:aws:events:eu-west-2:123456789012:event-bus/orders", "Name": "orders",
                "Tags": [{"Key": "team", "Value": "payments"}]
            }),
        ),
        sample(
            kinds::EVENT_RULE,
            Arn,
            json!({
                "arn": "arn:aws:events:eu-west-2:123456789012:rule/orders/new-order",
                "name": "new-order", "event_bus_name": "orders", "description": "New orders",
                "event_pattern": "{\"source\":[\"orders\"],\"detail-type\":[\"OrderPlaced\"]}",
                "state": "ENABLED"
            }),
            json!({
                "Arn": "arn:aws:events:eu-west-2:123456789012:rule/orders/new-order",
                "Name": "new-order", "EventBusName": "orders", "Description": "New orders",
                "EventPattern": "{\"detail-type\": [\"OrderPlaced\"], \"source\": [\"orders\"]}",
                "State": "ENABLED"
            }),
        ),
        sample(
            kinds::EVENT_TARGET,
            Composite,
            json!({
                "event_bus_name": "orders", "rule": "new-order", "target_id": "to-sqs",
                "arn": "arn:aws:sqs:eu-west-2:123456789012:orders"
            }),
            json!({
                "EventBusName": "orders", "Rule": "new-order", "Id": "to-sqs",
                "Arn": "arn:aws:sqs:eu-west-2:123456789012:orders"
            }),
        ),
        sample(
            kinds::ECS_CLUSTER,
            Arn,
            json!({
                "arn": "arn:aws:ecs:eu-west-2:123456789012:cluster/main", "name": "main",
                "tags": {"env": "prod"}
            }),
            json!({
                "clusterArn": "arn:aws:ecs:eu-west-2:123456789012:cluster/main", "clusterName": "main",
                "status": "ACTIVE", "tags": [{"key": "env", "value": "prod"}]
            }),
        ),
        sample(
            kinds::ECS_SERVICE,
            Arn,
            json!({
                "id": "arn:aws:ecs:eu-west-2:123456789012:service/main/api", "name": "api",
                "desired_count": 2, "launch_type": "FARGATE", "task_definition": "api:7",
                "cluster": "arn:aws:ecs:eu-west-2:123456789012:cluster/main"
            }),
            json!({
                "serviceArn": "arn:aws:ecs:eu-west-2:123456789012:service/main/api",
                "serviceName": "api", "desiredCount": 2, "launchType": "FARGATE",
                "taskDefinition": "arn:aws:ecs:eu-west-2:123456789012:task-definition/api:7",
                "clusterArn": "arn:aws:ecs:eu-west-2:123456789012:cluster/main"
            }),
        ),
        sample(
            kinds::ECS_TASK_DEFINITION,
            Arn,
            json!({
                "arn": "arn:aws:ecs:eu-west-2:123456789012:task-definition/api:7", "family": "api",
                "revision": 7, "cpu": "256", "memory": "512", "network_mode": "awsvpc",
                "requires_compatibilities": ["FARGATE"],
                "execution_role_arn": "arn:aws:iam::123456789012:role/ecs-exec",
                "task_role_arn": "arn:aws:iam::123456789012:role/api"
            }),
            json!({
                "taskDefinitionArn": "arn:aws:ecs:eu-west-2:123456789012:task-definition/api:7",
                "family": "api", "revision": 7, "cpu": "256", "memory": "512",
                "networkMode": "awsvpc", "requiresCompatibilities": ["FARGATE"],
                "executionRoleArn": "arn:aws:iam::123456789012:role/ecs-exec",
                "taskRoleArn": "arn:aws:iam::123456789012:role/api"
            }),
        ),
        sample(
            kinds::APIGW_REST_API,
            Id,
            json!({
                "id": "a1b2c3", "name": "orders-api", "description": "Orders",
                "endpoint_configuration": [{"types": ["REGIONAL"]}], "tags": {"env": "prod"}
            }),
            json!({
                "id": "a1b2c3", "name": "orders-api", "description": "Orders",
                "endpointConfiguration": {"types": ["REGIONAL"]}, "tags": {"env": "prod"}
            }),
        ),
        sample(
            kinds::APIGW_RESOURCE,
            Composite,
            json!({
                "id": "r3s0", "rest_api_id": "a1b2c3", "parent_id": "r00t", "path_part": "orders",
                "path": "/orders"
            }),
            json!({
                "id": "r3s0", "restApiId": "a1b2c3", "parentId": "r00t", "pathPart": "orders",
                "path": "/orders"
            }),
        ),
        sample(
            kinds::APIGW_METHOD,
            Composite,
            json!({
                "rest_api_id": "a1b2c3", "resource_id": "r3s0", "http_method": "POST",
                "authorization": "NONE", "api_key_required": false
            }),
            json!({
                "restApiId": "a1b2c3", "resourceId": "r3s0", "httpMethod": "POST",
                "authorizationType": "NONE", "apiKeyRequired": false
            }),
        ),
        sample(
            kinds::APIGW_INTEGRATION,
            Composite,
            json!({
                "rest_api_id": "a1b2c3", "resource_id": "r3s0", "http_method": "POST",
                "type": "AWS_PROXY", "integration_http_method": "POST",
                "passthrough_behavior": "WHEN_NO_MATCH",
                "uri": "arn:aws:apigateway:eu-west-2:lambda:path/2015-03-31/functions/arn:aws:lambda:eu-west-2:123456789012:function:ingest/invocations"
            }),
            json!({
                "restApiId": "a1b2c3", "resourceId": "r3s0", "resourceMethod": "POST",
                "type": "AWS_PROXY", "httpMethod": "POST", "passthroughBehavior": "WHEN_NO_MATCH",
                "uri": "arn:aws:apigateway:eu-west-2:lambda:path/2015-03-31/functions/arn:aws:lambda:eu-west-2:123456789012:function:ingest/invocations"
            }),
        ),
        sample(
            kinds::APIGW_DEPLOYMENT,
            Composite,
            json!({"id": "d3pl0y", "rest_api_id": "a1b2c3", "description": "release 42"}),
            json!({
                "id": "d3pl0y", "restApiId": "a1b2c3", "description": "release 42",
                "createdDate": "2026-10-01T00:00:00Z"
            }),
        ),
        sample(
            kinds::APIGW_STAGE,
            Composite,
            json!({
                "rest_api_id": "a1b2c3", "stage_name": "prod", "deployment_id": "d3pl0y",
                "description": "Production", "xray_tracing_enabled": true,
                "variables": {"lambdaAlias": "live"}
            }),
            json!({
                "restApiId": "a1b2c3", "stageName": "prod", "deploymentId": "d3pl0y",
                "description": "Production", "tracingEnabled": true,
                "variables": {"lambdaAlias": "live"}
            }),
        ),
        sample(
            kinds::CLOUDWATCH_DASHBOARD,
            Arn,
            json!({
                "dashboard_arn": "arn:aws:cloudwatch::123456789012:dashboard/ops",
                "dashboard_name": "ops",
                "dashboard_body": "{\"widgets\":[{\"type\":\"text\",\"properties\":{\"markdown\":\"ops\"}}]}"
            }),
            json!({
                "DashboardArn": "arn:aws:cloudwatch::123456789012:dashboard/ops",
                "DashboardName": "ops",
                "DashboardBody": "{\"widgets\": [{\"properties\": {\"markdown\": \"ops\"}, \"type\": \"text\"}]}"
            }),
        ),
        sample(
            kinds::CLOUDWATCH_METRIC_ALARM,
            Arn,
            json!({
                "arn": "arn:aws:cloudwatch:eu-west-2:123456789012:alarm:dlq-depth",
                "alarm_name": "dlq-depth", "comparison_operator": "GreaterThanThreshold",
                "evaluation_periods": 1, "metric_name": "ApproximateNumberOfMessagesVisible",
                "namespace": "AWS/SQS", "period": 300, "statistic": "Sum", "threshold": 0,
                "dimensions": {"QueueName": "orders-dlq"}, "treat_missing_data": "missing"
            }),
            json!({
                "AlarmArn": "arn:aws:cloudwatch:eu-west-2:123456789012:alarm:dlq-depth",
                "AlarmName": "dlq-depth", "ComparisonOperator": "GreaterThanThreshold",
                "EvaluationPeriods": 1, "MetricName": "ApproximateNumberOfMessagesVisible",
                "Namespace": "AWS/SQS", "Period": 300, "Statistic": "Sum", "Threshold": 0.0,
                "Dimensions": [{"Name": "QueueName", "Value": "orders-dlq"}]
            }),
        ),
        sample(
            kinds::CLOUDWATCH_LOG_GROUP,
            Id,
            json!({
                "id": "/aws/lambda/ingest", "name": "/aws/lambda/ingest", "retention_in_days": 14,
                "kms_key_id": ""
            }),
            json!({
                "logGroupName": "/aws/lambda/ingest", "retentionInDays": 14,
                "arn": "arn:aws:logs:eu-west-2:123456789012:log-group:/aws/lambda/ingest:*"
            }),
        ),
    ]
}
