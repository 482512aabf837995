//! Sample tools registered by the server binary

use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::domain::{
    schema::Schema,
    tools::{Tool, ToolRegistry},
};

pub const ECHO_TOOL: &str = "echo";
pub const SYSTEM_TIME_TOOL: &str = "system_time";

pub fn echo_tool() -> Tool {
    Tool::new(
        ECHO_TOOL,
        "Return the supplied arguments unchanged",
        Schema::object().description("Any JSON object"),
    )
    .handler_fn(|args| Ok(args))
}

pub fn system_time_tool() -> Tool {
    Tool::new(
        SYSTEM_TIME_TOOL,
        "Report the current UTC time of the device",
        Schema::object().additional_properties(false),
    )
    .output_schema(
        Schema::object()
            .required_property("utc", Schema::string().format("date-time"))
            .required_property("unix_seconds", Schema::integer()),
    )
    .handler_fn(|_| {
        let now = Utc::now();
        Ok(json!({
            "utc": now.to_rfc3339_opts(SecondsFormat::Secs, true),
            "unix_seconds": now.timestamp(),
        }))
    })
}

pub fn register_builtin_tools(registry: &ToolRegistry) {
    registry.register(echo_tool());
    registry.register(system_time_tool());
}
