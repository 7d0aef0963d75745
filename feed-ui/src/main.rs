use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use feed_core::FeedService;
use feed_http::HttpFeedService;
use feed_ui::{
    app::{self, CalculateArgs},
    config::{AppConfig, ConfigFile, Overrides},
    logging,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Fish feed calculator.
///
/// Collects pond parameters, asks the feed calculation service for a feed
/// composition, and can place a simulated supply order for the result.
#[derive(Debug, Parser)]
struct Cli {
    /// Base address of the feed calculation service.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or EnvFilter directive (`RUST_LOG` takes precedence).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive form (the default).
    Interactive,
    /// Print the species offered by the service.
    Species,
    /// Run one calculation and print the result.
    Calculate(CalculateArgs),
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let file = cli
        .config
        .as_deref()
        .map(ConfigFile::load)
        .transpose()
        .context("failed to load configuration")?;
    let config = AppConfig::resolve(
        file,
        Overrides {
            base_url: cli.base_url,
            log_level: cli.log_level,
            log_file: cli.log_file,
        },
    );

    logging::init_logging(config.log_level.as_deref());
    if let Some(path) = &config.log_file {
        logging::enable_file_logging(path)?;
    }

    debug!(base_url = %config.service.base_url, "connecting to feed service");
    let service: Arc<dyn FeedService> = Arc::new(
        HttpFeedService::new(&config.service).context("invalid service configuration")?,
    );

    let mut stdout = std::io::stdout();
    let succeeded = match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            app::run_interactive(service).await?;
            true
        }
        Command::Species => app::run_species(service, &mut stdout).await?,
        Command::Calculate(args) => app::run_calculate(service, &args, &mut stdout).await?,
    };

    info!(succeeded, "done");
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
