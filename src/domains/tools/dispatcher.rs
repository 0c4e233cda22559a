//! Request dispatcher: resolves a named call to a descriptor, validates
//! the arguments against the declared schema, invokes the tool, and
//! packages the result into the protocol's response envelope.

use std::sync::Arc;

use tracing::warn;

use super::descriptor::{InboundCall, ResponseEnvelope};
use super::error::ProtocolError;
use super::registry::ToolRegistry;

/// Dispatches inbound calls against the registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatch a single inbound call.
    ///
    /// Hard failures (unknown tool, missing required parameter, a failure
    /// escaping the invocation) come back as [`ProtocolError`]. A `{error}`
    /// payload produced by the tool itself is an ordinary success: most API
    /// failures surface to the caller as a successful response whose
    /// payload happens to be an error object.
    pub async fn dispatch(&self, call: InboundCall) -> Result<ResponseEnvelope, ProtocolError> {
        let tool = match self.registry.find_by_name(&call.tool_name) {
            Some(tool) => tool,
            None => {
                warn!("Unknown tool requested: {}", call.tool_name);
                return Err(ProtocolError::MethodNotFound(call.tool_name));
            }
        };

        // Presence check only; value shapes are the tool's concern. Fails
        // on the first missing name rather than aggregating.
        for required in &tool.schema.required {
            if !call.arguments.contains_key(required) {
                return Err(ProtocolError::InvalidParams(required.clone()));
            }
        }

        let result = tool
            .handler
            .invoke(call.arguments)
            .await
            .map_err(|failure| ProtocolError::Internal(failure.to_string()))?;

        ResponseEnvelope::from_value(&result)
            .map_err(|err| ProtocolError::Internal(err.to_string()))
    }
}
