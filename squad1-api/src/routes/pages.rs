/// Landing page, browser assets and widget configuration
///
/// # Endpoints
///
/// - `GET /` - Landing page
/// - `GET /assets/app.js` - Tracker and scripted chat
/// - `GET /assets/chat-widget.js` - Nugget widget loader
/// - `GET /api/widget-config` - Settings read by the loader

use crate::{app::AppState, config::ChatMode};
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const APP_JS: &str = include_str!("../../assets/app.js");
const CHAT_WIDGET_JS: &str = include_str!("../../assets/chat-widget.js");

/// Widget settings exposed to the browser
///
/// Contains nothing secret; the credential stays in `NuggetConfig`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub mode: ChatMode,
    pub domain: String,
    pub script_url: String,
    pub container_id: String,
    pub container_timeout_ms: u64,
}

pub async fn landing_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn app_script() -> impl IntoResponse {
    javascript(APP_JS)
}

pub async fn chat_widget_script() -> impl IntoResponse {
    javascript(CHAT_WIDGET_JS)
}

fn javascript(body: &'static str) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
}

/// Returns the chat mode and vendor widget settings
pub async fn widget_config(State(state): State<AppState>) -> Json<WidgetConfig> {
    let config = &state.config;

    Json(WidgetConfig {
        mode: config.chat.mode,
        domain: config.nugget.domain.clone(),
        script_url: config.nugget.script_url(),
        container_id: config.chat.container_id.clone(),
        container_timeout_ms: config.chat.container_timeout_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_queues_until_vendor_loads() {
        for command in ["init:", "open:", "close:", "toggle:"] {
            assert!(CHAT_WIDGET_JS.contains(command), "stub lacks {}", command);
        }
        assert!(CHAT_WIDGET_JS.contains("if (stub.loaded) stub._processQueue();"));
    }

    #[test]
    fn test_loader_flushes_vendor_installed_on_stub() {
        let flush = CHAT_WIDGET_JS
            .split("function flush(stub)")
            .nth(1)
            .and_then(|rest| rest.split("function injectScript").next())
            .unwrap();

        let same_object = flush.find("vendor === stub").unwrap();
        let process = flush.find("stub._processQueue()").unwrap();
        assert!(process > same_object);
        assert!(!flush.contains("vendor === stub) return"));
    }

    #[test]
    fn test_loader_injects_script_once() {
        assert!(CHAT_WIDGET_JS.contains("d.getElementById(SCRIPT_ID)"));
        assert!(CHAT_WIDGET_JS.contains("var SCRIPT_ID = 'nugget-script';"));
    }
}
