//! Declarative JSON-Schema-like descriptions of tool inputs and outputs
//!
//! Schemas are advertised to clients through `tools/list` only; nothing in the
//! server validates call arguments against them.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    #[default]
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

/// One node of a schema tree. Children are owned, so cloning copies the whole
/// subtree and no two nodes can share or cycle back to a child.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    schema_type: SchemaType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    additional_properties: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    one_of: Vec<Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    any_of: Vec<Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    all_of: Vec<Schema>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    format: String,
    #[serde(rename = "default", default, skip_serializing_if = "String::is_empty")]
    default_value: String,
}

impl Schema {
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            ..Self::default()
        }
    }

    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    pub fn array(items: Schema) -> Self {
        Self::new(SchemaType::Array).items(items)
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    pub fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    pub fn null() -> Self {
        Self::new(SchemaType::Null)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Adds or replaces an optional property.
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Adds or replaces a property and marks it as required.
    pub fn required_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }

    pub fn additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = Some(allowed);
        self
    }

    pub fn items(mut self, items: Schema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn one_of(mut self, schemas: impl IntoIterator<Item = Schema>) -> Self {
        self.one_of = schemas.into_iter().collect();
        self
    }

    pub fn any_of(mut self, schemas: impl IntoIterator<Item = Schema>) -> Self {
        self.any_of = schemas.into_iter().collect();
        self
    }

    pub fn all_of(mut self, schemas: impl IntoIterator<Item = Schema>) -> Self {
        self.all_of = schemas.into_iter().collect();
        self
    }

    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn properties(&self) -> &BTreeMap<String, Schema> {
        &self.properties
    }

    pub fn to_json(&self) -> Value {
        // A derived Serialize over strings, maps and vectors cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
