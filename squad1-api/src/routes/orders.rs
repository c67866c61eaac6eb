/// Order endpoints
///
/// # Endpoints
///
/// - `GET /api/orders?id=` - Resolve an order and embed its shipment
/// - `POST /api/orders/status` - Update an order's status
///
/// # Resolution
///
/// `id` may be a full order id, a fragment of one, or a user id; see
/// `squad1_shared::lookup`. An exact id always wins over a fragment.
///
/// # Example Response
///
/// ```json
/// {
///   "id": "ord_123",
///   "user_id": "u_23",
///   "seller_id": "s3",
///   "shipment_id": "shp_1023",
///   "product_name": "Gucci Belt",
///   "status": "AUTHENTICATING",
///   "accountability": "SQUAD1",
///   "pickup_deadline": "2026-01-16T08:00:00Z",
///   "pickup_actual_time": "2026-01-16T13:00:00Z",
///   "shipment_details": {
///     "id": "shp_1023",
///     "order_id": "ord_123",
///     "partner_name": "FastLogistics",
///     "partner_phone": "+19999999",
///     "is_dispatched": false
///   }
/// }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::IdQuery,
};
use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use squad1_shared::models::{Order, OrderStatus, Shipment};
use validator::Validate;

/// Order with its shipment embedded
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,

    /// Shipment pointing at this order, `null` when there is none
    pub shipment_details: Option<Shipment>,
}

/// Status update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// Exact order id
    #[validate(length(min = 1, message = "Order ID required"))]
    pub order_id: String,

    /// New status
    pub status: OrderStatus,
}

/// Resolves an order reference
///
/// # Errors
///
/// - 400 Bad Request: `id` missing or blank
/// - 404 Not Found: Nothing matched
pub async fn get_order(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Json<OrderDetails>> {
    let Query(query) = query?;
    let id = query.require("Order")?;

    let lookup = state.store.find_order(id).await?.ok_or_else(|| {
        tracing::debug!(query = %id, "Order not found");
        ApiError::NotFound("Order not found".to_string())
    })?;

    tracing::debug!(
        query = %id,
        order_id = %lookup.order.id,
        matched = lookup.kind.as_str(),
        "Resolved order"
    );

    Ok(Json(OrderDetails {
        order: lookup.order,
        shipment_details: lookup.shipment,
    }))
}

/// Updates the status of the order with exactly `order_id`
///
/// # Errors
///
/// - 400 Bad Request: Malformed body or unknown status
/// - 422 Unprocessable Entity: Empty order id
/// - 404 Not Found: No order with that id
pub async fn update_order_status(
    State(state): State<AppState>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> ApiResult<Json<Order>> {
    let Json(req) = payload?;
    req.validate()?;

    let order_id = req.order_id.trim();
    let order = state
        .store
        .update_order_status(order_id, req.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");

    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use squad1_shared::fixtures;

    #[test]
    fn test_order_details_flattened() {
        let db = fixtures::generate(Utc::now());
        let details = OrderDetails {
            order: db.order_exact("ord_101").unwrap().clone(),
            shipment_details: None,
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], "ord_101");
        assert_eq!(json["status"], "PICKUP_PENDING");
        assert!(json["shipment_details"].is_null());
    }

    #[test]
    fn test_status_request_validation() {
        let req: UpdateStatusRequest =
            serde_json::from_str(r#"{"order_id": "", "status": "SHIPPED"}"#).unwrap();
        assert!(req.validate().is_err());

        let bad: Result<UpdateStatusRequest, _> =
            serde_json::from_str(r#"{"order_id": "ord_1", "status": "LOST"}"#);
        assert!(bad.is_err());
    }
}
