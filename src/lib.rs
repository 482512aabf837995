use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod session;

use mcp::server::McpServer;

/// Largest accepted `POST /mcp` body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub server: Arc<McpServer>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(server: McpServer) -> Self {
        Self {
            server: Arc::new(server),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/mcp",
            post(http::handlers::mcp_post)
                .delete(http::handlers::mcp_delete)
                .get(http::handlers::mcp_get)
                .fallback(http::handlers::not_found),
        )
        .route("/health", get(http::handlers::health))
        .fallback(http::handlers::not_found)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
