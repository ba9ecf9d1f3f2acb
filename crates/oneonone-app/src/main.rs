// oneonone entry point.
//
// 1. Parse arguments
// 2. Initialize tracing (log to file, stdout is for command output)
// 3. Load config, copying defaults on first run
// 4. Run the command

use anyhow::Context;
use clap::Parser;
use oneonone_app::cli::{self, Cli};
use oneonone_core::config;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;
    info!(command = ?cli.command, "oneonone starting");

    let config = config::load_config(&cli.config_dir).context("failed to load configuration")?;
    info!(
        timezone = %config.league.timezone,
        access_level = %config.provider.access_level,
        "config loaded"
    );

    if let Err(e) = cli::run(cli, config).await {
        error!("command failed: {e:#}");
        return Err(e);
    }
    Ok(())
}

/// Initialize tracing to log to a file under `logs/`.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("oneonone.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("oneonone=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
