/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": "memory",
///   "orders": 50,
///   "tickets": 5
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the store cannot be read
    pub status: String,

    /// Application version
    pub version: String,

    /// Store backend
    pub store: String,

    /// Number of orders, absent when degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<usize>,

    /// Number of tickets, absent when degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<usize>,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, stats) = match state.store.stats().await {
        Ok(stats) => ("healthy", Some(stats)),
        Err(e) => {
            tracing::error!(error = %e, "Store unavailable");
            ("degraded", None)
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store.kind().to_string(),
        orders: stats.as_ref().map(|s| s.orders),
        tickets: stats.as_ref().map(|s| s.tickets),
    })
}
