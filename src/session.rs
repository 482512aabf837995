use axum::http::HeaderMap;
use uuid::Uuid;

pub const SESSION_HEADER: &str = "mcp-session-id";

/// Returns the client's session id, or a fresh one when the header is absent
/// or blank.
pub fn resolve_session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate_session_id)
}

pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}
