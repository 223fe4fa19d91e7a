// Gemini Handler
use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::de::IgnoredAny;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::proxy::error::RelayError;
use crate::proxy::mappers::gemini::{wrap_request, OutboundPayload};
use crate::state::AppState;

/// POST /api/gemini-proxy
///
/// 一次入站请求最多对应一次上游请求; 成功时原样返回上游 JSON。
pub async fn handle_generate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, RelayError> {
    let Some(api_key) = state.config.api_key() else {
        error!("Gemini API key is not configured on the server.");
        return Err(RelayError::MissingCredential);
    };

    let payload = wrap_request(&body).inspect_err(|e| {
        warn!("Rejected relay request: {}", e);
    })?;

    let shape = match &payload {
        OutboundPayload::Built(_) => "prompt",
        OutboundPayload::Passthrough(_) => "passthrough",
    };
    let outbound = payload.into_bytes().map_err(|e| {
        error!("Failed to serialize Gemini payload: {}", e);
        RelayError::Transport(e.to_string())
    })?;

    debug!("Relaying {} request ({} bytes)", shape, outbound.len());

    let response = state
        .upstream
        .generate_content(api_key, outbound)
        .await
        .map_err(|e| {
            error!(kind = e.kind, "Error proxying Gemini API request: {}", e.message);
            RelayError::Transport(e.to_string())
        })?;

    if !response.status.is_success() {
        let error_text = String::from_utf8_lossy(&response.body).into_owned();
        error!(
            "Gemini API direct error {}: {}",
            response.status.as_u16(),
            error_text
        );
        return Err(RelayError::Upstream {
            status: response.status,
            body: error_text,
        });
    }

    // 只校验是合法 JSON, 返回上游原始字节
    if let Err(e) = serde_json::from_slice::<IgnoredAny>(&response.body) {
        error!("Gemini API returned invalid JSON: {}", e);
        return Err(RelayError::Transport(e.to_string()));
    }

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response())
}

/// GET /
pub async fn handle_root() -> &'static str {
    "Gemini relay is running!"
}
