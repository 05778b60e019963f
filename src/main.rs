//! Gingermarket - a swipeable terminal feed for prediction markets.
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file in the
//! platform data directory.

use anyhow::Context;
use gingermarket::config::{LoggingConfig, log_dir};
use gingermarket::{App, Config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load_or_default().context("failed to load configuration")?;

    // Initialize logging
    let _guard = init_logging(&config.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting gingermarket");

    // Run the application
    let mut app = App::new(config)
        .await
        .context("failed to start the terminal UI")?;
    app.run().await?;

    Ok(())
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, &config.file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(guard)
}
