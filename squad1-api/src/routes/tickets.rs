/// Support ticket endpoints
///
/// # Endpoints
///
/// - `GET /api/tickets?id=tkt_31` - Single ticket
/// - `GET /api/tickets?order_id=ord_131` / `?user_id=u_31` - Filtered list
/// - `POST /api/tickets` - Open a ticket for an order
/// - `POST /api/tickets/resolve` - Resolve a ticket
///
/// # Create Request
///
/// ```json
/// { "order_id": "ord_131", "issue_type": "SHIPPING_DELAY", "callback_in_hours": 2 }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use squad1_shared::{
    lookup::{normalize_query, MatchKind},
    models::{CreateTicket, IssueType, Ticket, TicketFilter},
};
use validator::Validate;

/// Ticket query parameters
#[derive(Debug, Default, Deserialize)]
pub struct TicketQuery {
    pub id: Option<String>,
    pub order_id: Option<String>,
    pub user_id: Option<String>,
}

/// Either one ticket or a list
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TicketsResponse {
    One(Ticket),
    Many(Vec<Ticket>),
}

/// Open ticket request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    /// Exact order id
    #[validate(length(min = 1, message = "Order ID required"))]
    pub order_id: String,

    /// Reason for the escalation
    pub issue_type: IssueType,

    /// Schedule a callback this many hours from now
    #[validate(range(min = 0, max = 168, message = "Callback must be within a week"))]
    pub callback_in_hours: Option<i64>,
}

/// Resolve ticket request
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveTicketRequest {
    #[validate(length(min = 1, message = "Ticket ID required"))]
    pub id: String,
}

/// Looks up one ticket by id, or lists tickets by order and/or user
///
/// # Errors
///
/// - 400 Bad Request: None of `id`, `order_id`, `user_id` given
/// - 404 Not Found: Unknown ticket id
pub async fn get_tickets(
    State(state): State<AppState>,
    query: Result<Query<TicketQuery>, QueryRejection>,
) -> ApiResult<Json<TicketsResponse>> {
    let Query(query) = query?;
    if let Some(id) = normalize_query(query.id.as_deref()) {
        let ticket = state
            .store
            .ticket(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;
        return Ok(Json(TicketsResponse::One(ticket)));
    }

    let filter = TicketFilter {
        order_id: normalize_query(query.order_id.as_deref()).map(str::to_string),
        user_id: normalize_query(query.user_id.as_deref()).map(str::to_string),
    };
    if filter.order_id.is_none() && filter.user_id.is_none() {
        return Err(ApiError::BadRequest(
            "Ticket ID, order ID or user ID required".to_string(),
        ));
    }

    let tickets = state.store.tickets(&filter).await?;
    Ok(Json(TicketsResponse::Many(tickets)))
}

/// Opens a ticket for the order with exactly `order_id`
///
/// # Errors
///
/// - 400 Bad Request: Malformed body or unknown issue type
/// - 422 Unprocessable Entity: Empty order id or callback out of range
/// - 404 Not Found: No order with that id
pub async fn create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<CreateTicketRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    let Json(req) = payload?;
    req.validate()?;

    let order_id = req.order_id.trim();
    let order = match state.store.find_order(order_id).await? {
        Some(lookup) if lookup.kind == MatchKind::Exact => lookup.order,
        _ => return Err(ApiError::NotFound("Order not found".to_string())),
    };

    let ticket = state
        .store
        .create_ticket(CreateTicket {
            order_id: order.id,
            user_id: order.user_id,
            issue_type: req.issue_type,
            callback_scheduled_for: req
                .callback_in_hours
                .map(|h| Utc::now() + Duration::hours(h)),
        })
        .await?;

    tracing::info!(
        ticket_id = %ticket.id,
        order_id = %ticket.order_id,
        issue_type = %ticket.issue_type,
        "Ticket opened"
    );

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Marks a ticket resolved
///
/// # Errors
///
/// - 404 Not Found: Unknown ticket id
pub async fn resolve_ticket(
    State(state): State<AppState>,
    payload: Result<Json<ResolveTicketRequest>, JsonRejection>,
) -> ApiResult<Json<Ticket>> {
    let Json(req) = payload?;
    req.validate()?;

    let ticket = state
        .store
        .resolve_ticket(req.id.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;

    tracing::info!(ticket_id = %ticket.id, "Ticket resolved");

    Ok(Json(ticket))
}
