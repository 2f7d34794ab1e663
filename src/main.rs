use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use tfdrift::cli::{AwsCommand, Cli, ProviderCommand};
use tfdrift::compare::ComparatorRegistry;
use tfdrift::config::{self, DetectConfig};
use tfdrift::identity::IdentityResolver;
use tfdrift::{output, providers};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter(&cli.log_level)?)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        ProviderCommand::Aws { command } => match command {
            AwsCommand::Detect(args) => {
                let config = DetectConfig::from_args(&args)?;
                tracing::debug!(?config, "configuration loaded");

                let report = tfdrift::detect_drift(&config).await?;
                println!("{}", output::render(&report, config.output)?);

                Ok(ExitCode::from(output::exit_code(&report)))
            }
            AwsCommand::Kinds => {
                let provider = providers::get_provider("aws")?;
                println!(
                    "{}",
                    output::render_kinds(
                        &provider.resource_kinds(),
                        &IdentityResolver::aws(),
                        &ComparatorRegistry::aws()
                    )
                );
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}
