//! Tools advertised over MCP and the registry that binds them to handlers
//!
//! A tool is a name, a description, declarative input/output schemas and an
//! optional handler. The registry is shared between the dispatcher and
//! whoever registers tools, so every access goes through a lock.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::info;

use crate::domain::schema::Schema;
use crate::errors::ToolError;

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: Value) -> Result<Value, ToolError>;
}

/// Adapts a plain closure into a [`ToolHandler`].
pub struct FnHandler<F>(F);

#[async_trait]
impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(Value) -> Result<Value, ToolError> + Send + Sync,
{
    async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        (self.0)(arguments)
    }
}

pub fn handler_fn<F>(f: F) -> Arc<dyn ToolHandler>
where
    F: Fn(Value) -> Result<Value, ToolError> + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}

#[derive(Clone)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Schema,
    pub output_schema: Option<Schema>,
    pub handler: Option<Arc<dyn ToolHandler>>,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Schema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            output_schema: None,
            handler: None,
        }
    }

    pub fn output_schema(mut self, schema: Schema) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn handler(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn handler_fn<F>(self, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        self.handler(handler_fn(f))
    }

    /// The `tools/list` entry for this tool.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(self.name.clone()));
        object.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        object.insert("inputSchema".to_string(), self.input_schema.to_json());
        if let Some(output_schema) = &self.output_schema {
            object.insert("outputSchema".to_string(), output_schema.to_json());
        }
        Value::Object(object)
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .field("output_schema", &self.output_schema)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Name-keyed tool table. Listing order is by name.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the tool, replacing any previous entry with the same name.
    pub fn register(&self, tool: Tool) {
        let name = tool.name.clone();
        let replaced = self
            .tools
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), tool)
            .is_some();

        info!(tool = %name, replaced, "tool registered");
    }

    pub fn lookup(&self, name: &str) -> Option<Tool> {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn list_all(&self) -> Vec<Tool> {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn probe(name: &str, description: &str) -> Tool {
        Tool::new(name, description, Schema::object())
    }

    #[test]
    fn register_replaces_entry_with_same_name() {
        let registry = ToolRegistry::new();
        registry.register(probe("led", "first"));
        registry.register(probe("buzzer", "beep"));
        registry.register(probe("led", "second"));

        assert_eq!(registry.len(), 2);
        let led = registry.lookup("led").expect("led registered");
        assert_eq!(led.description, "second");
    }

    #[test]
    fn lookup_misses_unknown_name() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn list_all_is_sorted_by_name() {
        let registry = ToolRegistry::new();
        registry.register(probe("zeta", ""));
        registry.register(probe("alpha", ""));
        registry.register(probe("mid", ""));

        let names: Vec<String> = registry.list_all().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn to_json_omits_absent_output_schema() {
        let bare = probe("led", "Toggle the LED").to_json();
        assert_eq!(
            bare,
            json!({
                "name": "led",
                "description": "Toggle the LED",
                "inputSchema": {"type": "object"}
            })
        );

        let with_output = probe("led", "Toggle the LED")
            .output_schema(Schema::boolean())
            .to_json();
        assert_eq!(with_output["outputSchema"], json!({"type": "boolean"}));
    }

    #[tokio::test]
    async fn closure_handler_is_invoked_with_arguments() {
        let tool = probe("double", "").handler_fn(|args| {
            let n = args["n"]
                .as_i64()
                .ok_or_else(|| ToolError::invalid_arguments("n must be an integer"))?;
            Ok(json!(n * 2))
        });
        let handler = tool.handler.expect("handler bound");

        assert_eq!(handler.call(json!({"n": 21})).await.expect("call"), json!(42));
        assert!(matches!(
            handler.call(json!({})).await,
            Err(ToolError::InvalidArguments(_))
        ));
    }

    #[test]
    fn shared_handler_survives_registry_clones() {
        let handler = handler_fn(|args| Ok(args));
        let registry = ToolRegistry::new();
        registry.register(probe("a", "").handler(handler.clone()));
        registry.register(probe("b", "").handler(handler.clone()));

        // one held here, one per registry entry
        assert_eq!(Arc::strong_count(&handler), 3);
        assert!(registry.lookup("a").and_then(|t| t.handler).is_some());
    }
}
