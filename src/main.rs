use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gift_recommender::{
    cli::{self, Cli, Commands},
    config::Config,
    services::HttpAnalysisClient,
    workflow::WorkflowSession,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "gift_recommender=debug"
    } else {
        "gift_recommender=info"
    };

    // Logs go to stderr so rendered results stay clean on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?.with_api_url(cli.api_url);
    tracing::debug!(api_url = %config.analysis_api_url, "Configuration loaded");

    let client = HttpAnalysisClient::from_config(&config)
        .context("Failed to initialize analysis client")?;
    let session = WorkflowSession::new(Arc::new(client));

    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Analyze {
            user,
            friend,
            files,
            json,
        } => cli::run_analyze(&session, user, friend, &files, json, &mut stdout).await,
        Commands::Session => {
            let input = BufReader::new(tokio::io::stdin());
            cli::run_session(&session, input, &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
