/// Nugget access-token relay
///
/// # Endpoint
///
/// ```text
/// POST /api/get-nugget-token
/// ```
///
/// # Request
///
/// ```json
/// { "userId": "u_7" }
/// ```
///
/// # Response
///
/// ```json
/// { "accessToken": "eyJ..." }
/// ```
///
/// The vendor credential stays on the server. Upstream rejections are passed
/// through with their status code and `"Failed to authenticate"`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    nugget::TokenPayload,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use squad1_shared::lookup::normalize_query;

/// Token request from the widget loader
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Token relayed to the browser
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Exchanges a visitor id for a Nugget access token
///
/// Known users get their name as display name; anyone else is a guest.
///
/// # Errors
///
/// - 400 Bad Request: Malformed body or missing `userId`
/// - Upstream status: Nugget rejected the request
/// - 500 Internal Server Error: Nugget answered without a token
/// - 502 Bad Gateway: Nugget unreachable
pub async fn get_nugget_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(req) = payload?;

    let uid = normalize_query(req.user_id.as_deref())
        .ok_or_else(|| ApiError::BadRequest("User ID is required".to_string()))?;

    let user = state.store.user(uid).await?;
    let token_payload = TokenPayload::new(
        uid,
        state.config.nugget.client_id,
        user.as_ref().map(|u| u.name.as_str()),
    );

    let access_token = state.tokens.issue_token(&token_payload).await?;

    tracing::info!(uid = %uid, known_user = user.is_some(), "Issued Nugget access token");

    Ok(Json(TokenResponse { access_token }))
}
