//! Round Damage Info - replay host
//!
//! Reads host events as newline-delimited JSON from stdin and writes the
//! console, center-screen and chat output for each player to stdout.
//! Logs go to stderr.
//!
//! Game rules resolve `RULES_RESOLVE_DELAY_MS` after each map start (1000 by
//! default). Damage read before that is announced but never accounted, so a
//! piped file replay should run with `RULES_RESOLVE_DELAY_MS=0`.

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use round_damage_info::app::{run_event_stream, AppState};
use round_damage_info::config::{load_settings, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    let settings = load_settings(&config.settings_path)?;

    info!("Starting Round Damage Info replay");
    info!(path = %config.settings_path.display(), "Settings loaded");

    let mut state = AppState::new(config, settings, Box::new(std::io::stdout()));
    let input = BufReader::new(tokio::io::stdin());

    tokio::select! {
        result = run_event_stream(&mut state, input) => {
            let stats = result?;
            info!(events = stats.events, skipped = stats.skipped, "Event stream finished");
        }
        _ = shutdown_signal() => {}
    }

    info!("Shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, stopping replay");
        }
        _ = terminate => {
            info!("Received terminate signal, stopping replay");
        }
    }
}
