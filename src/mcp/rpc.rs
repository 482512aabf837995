//! JSON-RPC envelopes and the error response builder
//!
//! Request ids are kept as raw JSON values so a numeric id is echoed as a
//! number and a string id as a string.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::errors::DispatchError;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
    InternalError = -32603,
    ServerError = -32000,
}

impl ErrorCode {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// One decoded request. An empty `method` marks a body that could not be
/// parsed into a usable request.
#[derive(Debug, Clone, PartialEq)]
pub struct McpRequest {
    pub method: String,
    pub id: Value,
    pub params: Value,
}

impl McpRequest {
    pub fn unparsable() -> Self {
        Self {
            method: String::new(),
            id: Value::Null,
            params: Value::Null,
        }
    }

    pub fn is_unparsable(&self) -> bool {
        self.method.is_empty()
    }
}

pub fn parse_request(body: &[u8]) -> McpRequest {
    let Ok(Value::Object(mut object)) = serde_json::from_slice::<Value>(body) else {
        return McpRequest::unparsable();
    };

    let id = object.remove("id").unwrap_or(Value::Null);
    let method = match object.remove("method") {
        Some(Value::String(method)) => method,
        _ => String::new(),
    };

    McpRequest {
        method,
        id,
        params: object.remove("params").unwrap_or(Value::Null),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

/// One response. At most one of `result` and `error` is set; the
/// constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McpResponse {
    id: Value,
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
    #[serde(skip)]
    http_status: StatusCode,
}

impl McpResponse {
    /// Acknowledgement carrying neither result nor error.
    pub fn empty(http_status: StatusCode, id: Value) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION,
            result: None,
            error: None,
            http_status,
        }
    }

    pub fn result(http_status: StatusCode, id: Value, result: Value) -> Self {
        Self {
            result: Some(result),
            ..Self::empty(http_status, id)
        }
    }

    pub fn id(&self) -> &Value {
        &self.id
    }

    pub fn result_value(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&RpcError> {
        self.error.as_ref()
    }

    pub fn http_status(&self) -> StatusCode {
        self.http_status
    }

    pub fn to_json_string(&self) -> String {
        // Only strings, integers and JSON values: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub fn json_rpc_error(
    http_status: StatusCode,
    code: ErrorCode,
    id: Value,
    message: impl Into<String>,
) -> McpResponse {
    McpResponse {
        error: Some(RpcError {
            code: code.code(),
            message: message.into(),
        }),
        ..McpResponse::empty(http_status, id)
    }
}

pub fn dispatch_error_response(id: Value, err: &DispatchError) -> McpResponse {
    json_rpc_error(err.http_status(), err.code(), id, err.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_codes_match_json_rpc_values() {
        assert_eq!(ErrorCode::ParseError.code(), -32700);
        assert_eq!(ErrorCode::InvalidRequest.code(), -32600);
        assert_eq!(ErrorCode::MethodNotFound.code(), -32601);
        assert_eq!(ErrorCode::InvalidParams.code(), -32602);
        assert_eq!(ErrorCode::InternalError.code(), -32603);
        assert_eq!(ErrorCode::ServerError.code(), -32000);
    }

    #[test]
    fn parse_keeps_id_types() {
        let numeric = parse_request(br#"{"jsonrpc":"2.0","id":42,"method":"ping"}"#);
        assert_eq!(numeric.id, json!(42));
        assert_eq!(numeric.method, "ping");
        assert_eq!(numeric.params, Value::Null);

        let text = parse_request(br#"{"id":"42","method":"ping","params":{"a":1}}"#);
        assert_eq!(text.id, json!("42"));
        assert_eq!(text.params, json!({"a": 1}));

        let missing = parse_request(br#"{"method":"ping"}"#);
        assert_eq!(missing.id, Value::Null);
    }

    #[test]
    fn malformed_bodies_become_the_sentinel() {
        for body in [
            &b"{not json"[..],
            &b""[..],
            &b"[1,2]"[..],
            &br#"{"id":1}"#[..],
            &br#"{"id":1,"method":7}"#[..],
            &br#"{"id":1,"method":""}"#[..],
        ] {
            assert!(parse_request(body).is_unparsable(), "body {body:?}");
        }

        assert_eq!(parse_request(b"{not json").id, Value::Null);
        assert_eq!(parse_request(br#"{"id":9}"#).id, json!(9));
    }

    #[test]
    fn serializes_error_without_result() {
        let response = json_rpc_error(
            StatusCode::BAD_REQUEST,
            ErrorCode::ParseError,
            Value::Null,
            "Parse error: Invalid JSON",
        );

        assert_eq!(response.http_status(), StatusCode::BAD_REQUEST);
        assert!(response.result_value().is_none());
        assert_eq!(
            response.to_json_string(),
            r#"{"id":null,"jsonrpc":"2.0","error":{"code":-32700,"message":"Parse error: Invalid JSON"}}"#
        );
    }

    #[test]
    fn serializes_result_and_empty_envelopes() {
        let response = McpResponse::result(StatusCode::OK, json!(7), json!({"ok": true}));
        assert_eq!(
            response.to_json_string(),
            r#"{"id":7,"jsonrpc":"2.0","result":{"ok":true}}"#
        );

        let ack = McpResponse::empty(StatusCode::ACCEPTED, json!("abc"));
        assert_eq!(ack.to_json_string(), r#"{"id":"abc","jsonrpc":"2.0"}"#);
    }

    #[test]
    fn dispatch_errors_map_through_builder() {
        let response = dispatch_error_response(
            json!(3),
            &DispatchError::ToolNotFound("fan".to_string()),
        );
        let error = response.error().expect("error set");

        assert_eq!(response.http_status(), StatusCode::OK);
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Method not supported: fan");
        assert_eq!(response.id(), &json!(3));
    }
}
