/// Manual tracker endpoint
///
/// `GET /api/track?id=ord_123` returns the card the landing page renders for
/// an order. `id` resolves the same way as `GET /api/orders`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::IdQuery,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use squad1_shared::tracker::TrackerStatus;

/// Builds the tracker card for the resolved order
///
/// # Errors
///
/// - 400 Bad Request: `id` missing or blank
/// - 404 Not Found: Nothing matched
pub async fn track_order(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<TrackerStatus>> {
    let Query(query) = query?;
    let id = query.require("Order")?;

    let lookup = state
        .store
        .find_order(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    let assessed = lookup.assess(Utc::now());
    if assessed != lookup.order.accountability {
        tracing::warn!(
            order_id = %lookup.order.id,
            stored = lookup.order.accountability.as_str(),
            assessed = assessed.as_str(),
            "Stored accountability disagrees with order timeline"
        );
    }

    Ok(Json(TrackerStatus::for_order(&lookup.order)))
}
