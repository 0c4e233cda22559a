//! Tool descriptor data model.
//!
//! A descriptor is a plain immutable value: name, description, parameter
//! schema, and an async invocation capability. Descriptors are built by the
//! registration table at startup and never change afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ToolFailure;

/// JSON object type used for call arguments and schema fragments.
pub type JsonObject = serde_json::Map<String, Value>;

/// Invocation capability implemented by every tool.
#[async_trait]
pub trait ToolInvoke: Send + Sync {
    /// Run the tool with the full argument map of the call.
    async fn invoke(&self, args: JsonObject) -> Result<Value, ToolFailure>;
}

/// Parameter schema declared by a tool.
///
/// `properties` maps parameter names to JSON-Schema fragments (type,
/// description, possibly nested objects), `required` lists the names a call
/// must carry. Dispatch enforces presence of required keys only; value
/// shapes are the tool's concern.
#[derive(Debug, Clone)]
pub struct ParameterSchema {
    pub properties: JsonObject,
    pub required: Vec<String>,
}

impl ParameterSchema {
    /// Build a schema from a `json!` properties object and required names.
    ///
    /// A non-object `properties` value is treated as empty, which the
    /// loader then rejects for any schema that still lists required names.
    pub fn object(properties: Value, required: &[&str]) -> Self {
        let properties = match properties {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        };

        Self {
            properties,
            required: required.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Render as a full JSON-Schema object for protocol listings.
    pub fn to_json_object(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert(
            "properties".to_string(),
            Value::Object(self.properties.clone()),
        );
        schema.insert(
            "required".to_string(),
            Value::Array(
                self.required
                    .iter()
                    .map(|name| Value::String(name.clone()))
                    .collect(),
            ),
        );
        schema
    }
}

/// A named, schema-described callable unit wrapping one external API
/// operation.
#[derive(Clone)]
pub struct ToolDescriptor {
    /// Unique name as exposed to clients.
    pub name: &'static str,

    /// Human-readable description shown in listings.
    pub description: &'static str,

    /// Declared parameter schema.
    pub schema: ParameterSchema,

    /// The invocation capability.
    pub handler: Arc<dyn ToolInvoke>,

    /// Source location tag, used for grouping and load errors.
    pub source: &'static str,
}

impl ToolDescriptor {
    /// Create a descriptor. The source tag is attached by the loader.
    pub fn new(
        name: &'static str,
        description: &'static str,
        schema: ParameterSchema,
        handler: Arc<dyn ToolInvoke>,
    ) -> Self {
        Self {
            name,
            description,
            schema,
            handler,
            source: "",
        }
    }

    /// Attach the source location tag.
    pub fn with_source(mut self, source: &'static str) -> Self {
        self.source = source;
        self
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("required", &self.schema.required)
            .finish_non_exhaustive()
    }
}

/// A single tool call in flight. Created per request, dropped after the
/// response.
#[derive(Debug, Clone)]
pub struct InboundCall {
    pub tool_name: String,
    pub arguments: JsonObject,
}

/// One block of tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    /// The text payload of this block.
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// The success shape for a dispatched call: an ordered sequence of content
/// blocks. The dispatcher emits exactly one text block per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub content: Vec<ContentBlock>,
}

impl ResponseEnvelope {
    /// Wrap a tool result as a single pretty-printed text block.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        let text = serde_json::to_string_pretty(value)?;
        Ok(Self {
            content: vec![ContentBlock::Text { text }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NullTool;

    #[async_trait]
    impl ToolInvoke for NullTool {
        async fn invoke(&self, _args: JsonObject) -> Result<Value, ToolFailure> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn test_schema_serializes_as_object_schema() {
        let schema = ParameterSchema::object(
            json!({
                "property_id": {
                    "type": "string",
                    "description": "The ID of the property to retrieve."
                }
            }),
            &["property_id"],
        );

        let rendered = Value::Object(schema.to_json_object());
        assert_eq!(rendered["type"], "object");
        assert_eq!(rendered["properties"]["property_id"]["type"], "string");
        assert_eq!(rendered["required"], json!(["property_id"]));
    }

    #[test]
    fn test_schema_with_no_required_keeps_empty_list() {
        let schema = ParameterSchema::object(json!({ "page": { "type": "integer" } }), &[]);
        let rendered = Value::Object(schema.to_json_object());
        assert_eq!(rendered["required"], json!([]));
    }

    #[test]
    fn test_non_object_properties_become_empty() {
        let schema = ParameterSchema::object(json!("not a map"), &[]);
        assert!(schema.properties.is_empty());
    }

    #[test]
    fn test_envelope_wraps_pretty_printed_value() {
        let value = json!({ "id": "abc", "name": "Villa" });
        let envelope = ResponseEnvelope::from_value(&value).unwrap();

        assert_eq!(envelope.content.len(), 1);
        assert_eq!(
            envelope.content[0].text(),
            serde_json::to_string_pretty(&value).unwrap()
        );
    }

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = ResponseEnvelope::from_value(&json!(null)).unwrap();
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire["content"][0]["type"], "text");
        assert_eq!(wire["content"][0]["text"], "null");
    }

    #[test]
    fn test_descriptor_invokes_handler() {
        let descriptor = ToolDescriptor::new(
            "null_tool",
            "does nothing",
            ParameterSchema::object(json!({}), &[]),
            Arc::new(NullTool),
        )
        .with_source("tests/null");

        assert_eq!(descriptor.source, "tests/null");

        let result = tokio_test::block_on(descriptor.handler.invoke(JsonObject::new()));
        assert_eq!(result.unwrap(), Value::Null);
    }
}
