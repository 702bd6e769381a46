//! relocheck - Gradle build cache relocation check
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use relocheck::cli::{Cli, Commands, LogFormat};
use relocheck::config::ConfigManager;
use relocheck::error::{RelocheckError, RelocheckResult};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(RelocheckError::RelocationMismatch(_)) => {
            // Discrepancies were already printed step by step
            eprintln!(
                "{} Relocated build does not match expectations",
                style("Error:").red().bold()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RelocheckResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("relocheck=warn"),
        1 => EnvFilter::new("relocheck=info"),
        _ => EnvFilter::new("relocheck=debug"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    match cli.log_format {
        LogFormat::Text => subscriber.without_time().init(),
        LogFormat::Json => subscriber.json().init(),
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    match cli.command {
        Commands::Run(args) => relocheck::cli::commands::run(args, &config).await,
        Commands::Verify(args) => relocheck::cli::commands::verify(args, &config).await,
        Commands::InitScript(args) => relocheck::cli::commands::init_script(args, &config).await,
        Commands::Expectations(args) => {
            relocheck::cli::commands::expectations(args, &config).await
        }
    }
}
