//! The central Model Context Protocol engine
//!
//! Routes decoded requests to `initialize`, `notifications/initialized`,
//! `tools/list` and `tools/call`, and turns every outcome into a response
//! envelope with its HTTP status.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Map, Value};
use tracing::{error, info};

use crate::domain::tools::ToolRegistry;
use crate::errors::{DispatchError, ToolError};
use crate::mcp::rpc::{dispatch_error_response, parse_request, McpRequest, McpResponse};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const DEFAULT_SERVER_NAME: &str = env!("CARGO_PKG_NAME");
pub const DEFAULT_SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub instructions: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            version: DEFAULT_SERVER_VERSION.to_string(),
            instructions: String::new(),
        }
    }
}

pub struct McpServer {
    info: ServerInfo,
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(info: ServerInfo, registry: Arc<ToolRegistry>) -> Self {
        Self { info, registry }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub async fn handle_body(&self, body: &[u8]) -> McpResponse {
        self.handle(parse_request(body)).await
    }

    pub async fn handle(&self, request: McpRequest) -> McpResponse {
        let McpRequest { method, id, params } = request;
        let audit_params = redact_audit_params(&params);

        let outcome = match method.as_str() {
            "" => Err(DispatchError::Parse),
            "initialize" => Ok(McpResponse::result(
                StatusCode::OK,
                id.clone(),
                self.initialize_result(),
            )),
            "notifications/initialized" => Ok(McpResponse::empty(StatusCode::ACCEPTED, id.clone())),
            "tools/list" => Ok(McpResponse::result(
                StatusCode::OK,
                id.clone(),
                self.tools_list_result(),
            )),
            "tools/call" => self
                .call_tool(&params)
                .await
                .map(|result| McpResponse::result(StatusCode::OK, id.clone(), result)),
            other => Err(DispatchError::UnknownMethod(other.to_string())),
        };

        let response = match outcome {
            Ok(response) => response,
            Err(err) => dispatch_error_response(id, &err),
        };

        info!(
            method = %method,
            params = %audit_params,
            status = response.http_status().as_u16(),
            outcome = if response.error().is_some() { "failure" } else { "success" },
            "mcp action audited"
        );

        response
    }

    fn initialize_result(&self) -> Value {
        let mut result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "experimental": {},
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": self.info.name,
                "version": self.info.version
            }
        });

        if !self.info.instructions.is_empty() {
            result["instructions"] = Value::String(self.info.instructions.clone());
        }

        result
    }

    fn tools_list_result(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .list_all()
            .iter()
            .map(|tool| tool.to_json())
            .collect();

        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, DispatchError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or(DispatchError::InvalidToolName)?;
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let tool = self
            .registry
            .lookup(name)
            .ok_or_else(|| DispatchError::ToolNotFound(name.to_string()))?;
        let handler = tool
            .handler
            .ok_or_else(|| DispatchError::HandlerMissing(name.to_string()))?;

        // A panicking handler surfaces as a join error instead of unwinding
        // through the dispatcher.
        let joined = tokio::spawn(async move { handler.call(arguments).await }).await;
        let value = match joined {
            Ok(Ok(value)) => value,
            Ok(Err(source)) => return Err(tool_failed(name, source)),
            Err(_) => return Err(tool_failed(name, ToolError::Panicked)),
        };

        Ok(json!({
            "content": [
                {
                    "type": "text",
                    "text": value.to_string()
                }
            ]
        }))
    }
}

fn tool_failed(name: &str, source: ToolError) -> DispatchError {
    error!(tool = %name, error = %source, "tool handler failed");
    DispatchError::ToolFailed {
        name: name.to_string(),
        source,
    }
}

pub fn redact_audit_params(params: &Value) -> Value {
    redact_audit_value(params)
}

pub fn redact_audit_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| {
                    if is_sensitive_key(key) {
                        (key.clone(), Value::String("[REDACTED]".to_string()))
                    } else {
                        (key.clone(), redact_audit_value(item))
                    }
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_audit_value).collect()),
        _ => value.clone(),
    }
}

pub fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.trim().to_ascii_lowercase();
    matches!(
        normalized.as_str(),
        "authorization" | "api_key" | "apikey" | "passphrase" | "psk" | "wpa_key" | "pin"
    ) || normalized.contains("token")
        || normalized.contains("secret")
        || normalized.contains("password")
        || normalized.contains("credential")
}
