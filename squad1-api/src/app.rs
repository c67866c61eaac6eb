/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use squad1_api::{app::AppState, config::Config, nugget::NuggetClient};
/// use squad1_shared::store::MemoryStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let tokens = NuggetClient::new(&config.nugget)?;
/// let store = MemoryStore::with_fixtures(chrono::Utc::now());
/// let state = AppState::new(Arc::new(store), Arc::new(tokens), config);
/// let app = squad1_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, nugget::TokenIssuer};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use squad1_shared::store::Store;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Dataset repository
    pub store: Arc<dyn Store>,

    /// Chat access-token source
    pub tokens: Arc<dyn TokenIssuer>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, tokens: Arc<dyn TokenIssuer>, config: Config) -> Self {
        Self {
            store,
            tokens,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                        # Landing page
/// ├── GET  /assets/app.js           # Tracker and scripted chat
/// ├── GET  /assets/chat-widget.js   # Nugget widget loader
/// ├── GET  /health                  # Health check
/// └── /api/
///     ├── GET  /users?id=
///     ├── GET  /users/orders?id=
///     ├── GET  /sellers?id=
///     ├── GET  /shipments?id=
///     ├── GET  /orders?id=
///     ├── POST /orders/status
///     ├── GET  /tickets?id=|order_id=|user_id=
///     ├── POST /tickets
///     ├── POST /tickets/resolve
///     ├── GET  /track?id=
///     ├── POST /chat
///     ├── GET  /widget-config
///     └── POST /get-nugget-token
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Compression (tower-http CompressionLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let page_routes = Router::new()
        .route("/", get(routes::pages::landing_page))
        .route("/assets/app.js", get(routes::pages::app_script))
        .route("/assets/chat-widget.js", get(routes::pages::chat_widget_script))
        .route("/health", get(routes::health::health_check));

    let api_routes = Router::new()
        .route("/users", get(routes::users::get_user))
        .route("/users/orders", get(routes::users::list_user_orders))
        .route("/sellers", get(routes::sellers::get_seller))
        .route("/shipments", get(routes::shipments::get_shipment))
        .route("/orders", get(routes::orders::get_order))
        .route("/orders/status", post(routes::orders::update_order_status))
        .route(
            "/tickets",
            get(routes::tickets::get_tickets).post(routes::tickets::create_ticket),
        )
        .route("/tickets/resolve", post(routes::tickets::resolve_ticket))
        .route("/track", get(routes::tracker::track_order))
        .route("/chat", post(routes::chat::chat))
        .route("/widget-config", get(routes::pages::widget_config))
        .route("/get-nugget-token", post(routes::token::get_nugget_token));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(page_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
