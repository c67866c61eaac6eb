/// User lookup endpoints
///
/// # Endpoints
///
/// - `GET /api/users?id=u_7` - User record
/// - `GET /api/users/orders?id=u_7` - Every order placed by the user
///
/// # Errors
///
/// - 400 Bad Request: `id` missing or blank
/// - 404 Not Found: Unknown user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::IdQuery,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use squad1_shared::models::{Order, User};

/// Returns the user with exactly this id
pub async fn get_user(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<User>> {
    let Query(query) = query?;
    let id = query.require("User")?;

    let user = state.store.user(id).await?.ok_or_else(|| {
        tracing::debug!(user_id = %id, "User not found");
        ApiError::NotFound("User not found".to_string())
    })?;

    Ok(Json(user))
}

/// Lists a user's orders
///
/// An existing user without orders yields an empty list.
pub async fn list_user_orders(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Order>>> {
    let Query(query) = query?;
    let id = query.require("User")?;

    if state.store.user(id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let orders = state.store.orders_for_user(id).await?;
    tracing::debug!(user_id = %id, count = orders.len(), "Listed user orders");

    Ok(Json(orders))
}
