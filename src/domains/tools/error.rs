//! Tool-layer error types.

use thiserror::Error;

/// Hard errors produced by the dispatch layer.
///
/// These map onto JSON-RPC error codes and always surface as protocol-level
/// error responses. Failures inside a wrapped API call never reach this
/// type: the wrapper converts them into `{error}` payloads that travel back
/// as ordinary tool output.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// No registered tool matches the requested name.
    #[error("Unknown tool: {0}")]
    MethodNotFound(String),

    /// A required parameter is missing from the call arguments.
    #[error("Missing required parameter: {0}")]
    InvalidParams(String),

    /// A failure escaped the tool invocation itself.
    #[error("API error: {0}")]
    Internal(String),
}

impl ProtocolError {
    /// The JSON-RPC error code for this error.
    pub const fn json_rpc_code(&self) -> i32 {
        match self {
            Self::MethodNotFound(_) => -32601,
            Self::InvalidParams(_) => -32602,
            Self::Internal(_) => -32603,
        }
    }
}

/// Failure signalled by a tool invocation.
///
/// Wrappers swallow their own API errors into soft `{error}` payloads, so
/// an `Err` out of `invoke` means the tool hit something it could not
/// handle; the dispatcher surfaces it as [`ProtocolError::Internal`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ToolFailure(pub String);

impl ToolFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors raised while loading the registration table.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A descriptor lists a required parameter its properties do not declare.
    #[error(
        "invalid tool descriptor at {location}: required parameter '{field}' is not declared in properties"
    )]
    UndeclaredParameter {
        location: &'static str,
        field: String,
    },
}
