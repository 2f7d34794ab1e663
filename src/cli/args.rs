use clap::{Parser, Subcommand};

use crate::config::DEFAULT_REGION;
use crate::http::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECONDS};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: ProviderCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    Aws {
        #[command(subcommand)]
        command: AwsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AwsCommand {
    /// Compare a Terraform state against live AWS resources
    Detect(DetectArgs),
    /// List supported resource kinds and how they are keyed
    Kinds,
}

#[derive(clap::Args, Debug)]
pub struct DetectArgs {
    /// State location: path, local://path, http(s):// URL, or s3://bucket/key
    #[arg(long, env = "STATE_FILE_PATH")]
    pub state: String,

    /// Inventory location: snapshot path, local://path, http(s):// URL, or `live` to query AWS APIs
    #[arg(long, env = "TFDRIFT_INVENTORY")]
    pub inventory: String,

    /// Bearer token for HTTP locations
    #[arg(long, env = "TFDRIFT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    #[arg(long, env = "MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    #[arg(long, env = "TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, env = "TFDRIFT_OUTPUT", value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}
