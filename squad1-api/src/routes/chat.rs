/// Scripted assistant endpoint
///
/// `POST /api/chat` with `{"message": "where is ord_123?"}`. Used by the
/// landing page when `CHAT_MODE=scripted`.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use squad1_shared::assistant::{self, Reply};
use validator::Validate;

/// Chat message from the buyer
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

/// Answers one chat message
///
/// Escalations about a known order open a ticket; its id is returned in
/// `ticket_id`.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<Reply>> {
    let Json(req) = payload?;
    req.validate()?;

    let reply = assistant::respond(state.store.as_ref(), &req.message, Utc::now()).await?;

    tracing::debug!(
        order_id = reply.order_id.as_deref().unwrap_or(""),
        ticket_id = reply.ticket_id.as_deref().unwrap_or(""),
        "Assistant replied"
    );

    Ok(Json(reply))
}
