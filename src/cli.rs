mod args;

pub use args::{AwsCommand, Cli, DetectArgs, ProviderCommand};
