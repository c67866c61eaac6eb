//! # Squad1 API Server
//!
//! Serves the landing page, the mock support API and the Nugget token relay.
//!
//! ## Usage
//!
//! ```bash
//! SQUAD1_DB_PATH=./db.json NUGGET_BASIC_AUTH_TOKEN=... cargo run -p squad1-api
//! ```

use squad1_api::{
    app::{build_router, AppState},
    config::Config,
    nugget::NuggetClient,
};
use squad1_shared::store::{JsonFileStore, MemoryStore, Store};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squad1_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Squad1 API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let now = chrono::Utc::now();
    let store: Arc<dyn Store> = match &config.store.db_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using JSON file store");
            Arc::new(JsonFileStore::open(path, now).await?)
        }
        None => {
            tracing::info!("Using in-memory store with generated fixtures");
            Arc::new(MemoryStore::with_fixtures(now))
        }
    };

    let stats = store.stats().await?;
    tracing::info!(
        users = stats.users,
        orders = stats.orders,
        tickets = stats.tickets,
        "Dataset loaded"
    );

    let tokens = NuggetClient::new(&config.nugget)?;
    let addr = config.bind_address();
    tracing::info!(mode = ?config.chat.mode, domain = %config.nugget.domain, "Chat configured");

    let app = build_router(AppState::new(store, Arc::new(tokens), config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
