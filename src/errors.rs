use axum::http::StatusCode;
use thiserror::Error;

use crate::mcp::rpc::ErrorCode;

/// Failure reported by a tool handler. The detail is logged but never sent to
/// the client.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Failed(String),
    #[error("tool handler panicked")]
    Panicked,
}

impl ToolError {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Terminal outcome of a single dispatched request that did not succeed.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Parse error: Invalid JSON")]
    Parse,
    #[error("Method not found: {0}")]
    UnknownMethod(String),
    #[error("Missing or invalid 'name' parameter")]
    InvalidToolName,
    #[error("Method not supported: {0}")]
    ToolNotFound(String),
    #[error("Tool handler not initialized: {0}")]
    HandlerMissing(String),
    #[error("Tool execution failed: {name}")]
    ToolFailed {
        name: String,
        #[source]
        source: ToolError,
    },
}

impl DispatchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse => ErrorCode::ParseError,
            Self::UnknownMethod(_) | Self::ToolNotFound(_) => ErrorCode::MethodNotFound,
            Self::InvalidToolName => ErrorCode::InvalidParams,
            Self::HandlerMissing(_) | Self::ToolFailed { .. } => ErrorCode::InternalError,
        }
    }

    /// Only transport-level failures leave the 2xx range; JSON-RPC level errors
    /// are still a delivered answer.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Parse => StatusCode::BAD_REQUEST,
            _ => StatusCode::OK,
        }
    }
}
