//! Main entry point for the mock Chargify server

use mock_chargify::config::MockConfig;
use mock_chargify::error::MockResult;
use mock_chargify::server::MockChargifyServer;
use mock_chargify::state::AppState;
use std::fmt::Display;
use std::process;
use tokio::signal;
use tracing::error;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Main entry point
#[tokio::main]
async fn main() {
    // A missing .env is fine; the variables may come from the environment.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run().await {
        error!("Mock server failed: {}", e);
        process::exit(1);
    }
}

async fn run() -> MockResult<()> {
    info!("Starting mock Chargify server");

    let config = MockConfig::from_env()?;
    info!("Configuration loaded: {:?}", config);

    let bind_address = config.bind_address();
    let state = AppState::new(config)?;
    let server = MockChargifyServer::bind(state, &bind_address).await?;

    shutdown_signal().await;
    server.shutdown().await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing subscriber
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_chargify=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = wait_for(signal::ctrl_c(), "Ctrl+C");

    #[cfg(unix)]
    let terminate = wait_for(
        async {
            let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            if stream.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
            Ok::<(), std::io::Error>(())
        },
        "SIGTERM",
    );

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Resolve once `signal` fires; never resolve if its handler cannot be installed
async fn wait_for<E: Display>(signal: impl Future<Output = Result<(), E>>, name: &str) {
    match signal.await {
        Ok(()) => info!("Received {}, initiating graceful shutdown", name),
        Err(e) => {
            error!("Failed to install {} handler: {}", name, e);
            std::future::pending::<()>().await;
        }
    }
}
