/// Shipment lookup endpoint
///
/// `GET /api/shipments?id=shp_1042`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::IdQuery,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use squad1_shared::models::Shipment;

/// Returns the shipment with exactly this id
pub async fn get_shipment(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<Shipment>> {
    let Query(query) = query?;
    let id = query.require("Shipment")?;

    state
        .store
        .shipment(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Shipment not found".to_string()))
}
