/// Seller lookup endpoint
///
/// `GET /api/sellers?id=s2`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::IdQuery,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use squad1_shared::models::Seller;

/// Returns the seller with exactly this id
pub async fn get_seller(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<Seller>> {
    let Query(query) = query?;
    let id = query.require("Seller")?;

    state
        .store
        .seller(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Seller not found".to_string()))
}
