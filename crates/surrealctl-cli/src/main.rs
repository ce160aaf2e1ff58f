use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use surrealctl_config::PartialConfiguration;
use tracing_subscriber::EnvFilter;

use crate::{
    commands::Context,
    config::{Cli, Commands},
    logger::Logger,
};

mod commands;
mod config;
mod logger;

pub const DEFAULT_STATE_DIR: &str = ".";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let context = Context::new(cli.dir, cli.surreal_bin);
    tracing::debug!("Using {context:?}");

    let reports = match command {
        Commands::Init => commands::init(&context).await?,
        Commands::Start { force } => commands::start(&context, force).await?,
        Commands::Stop => commands::stop(&context).await?,
        Commands::Configure {
            data_dir,
            username,
            password,
        } => commands::configure(
            &context,
            PartialConfiguration {
                data_dir,
                username,
                password,
            },
        )?,
        Commands::Status => commands::status(&context).await?,
    };

    let mut logger = Logger::default();
    for report in &reports {
        logger.report(report);
    }

    Ok(commands::exit_code(&reports))
}
