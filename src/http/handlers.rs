//! Axum HTTP handlers for the web server
//!
//! Provides the `/mcp` endpoint for each supported HTTP method, the liveness
//! probe and the not-found fallback.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::mcp::rpc::{json_rpc_error, ErrorCode, McpResponse};
use crate::session::{resolve_session_id, SESSION_HEADER};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn mcp_post(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let response = state.server.handle_body(&body).await;
    envelope_response(&response, Some(resolve_session_id(&headers)))
}

pub async fn mcp_delete(headers: HeaderMap) -> Response {
    let response = McpResponse::empty(StatusCode::OK, Value::Null);
    envelope_response(&response, Some(resolve_session_id(&headers)))
}

pub async fn mcp_get() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method Not Allowed" })),
    )
        .into_response()
}

pub async fn not_found() -> Response {
    let response = json_rpc_error(
        StatusCode::NOT_FOUND,
        ErrorCode::InvalidRequest,
        Value::Null,
        "Path Not Found",
    );
    envelope_response(&response, None)
}

fn envelope_response(response: &McpResponse, session_id: Option<String>) -> Response {
    let mut http_response = (
        response.http_status(),
        [(header::CONTENT_TYPE, "application/json")],
        response.to_json_string(),
    )
        .into_response();

    if let Some(value) = session_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
        http_response
            .headers_mut()
            .insert(HeaderName::from_static(SESSION_HEADER), value);
    }

    http_response
}
