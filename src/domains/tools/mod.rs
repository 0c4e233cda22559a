//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per API area)
//! - `descriptor.rs` - Tool descriptors, parameter schemas, and the invoke trait
//! - `loader.rs` - Static registration table and startup validation
//! - `registry.rs` - Ordered tool registry with name lookup
//! - `dispatcher.rs` - Argument checking and tool invocation
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create the tool in `definitions/directstay/` (struct + `descriptor()`)
//! 2. Export it in the area's `mod.rs`
//! 3. Add one row to `TOOL_REGISTRATIONS` in `loader.rs`
//!
//! **No need to modify `server.rs`!** Listing and dispatch read the registry.

pub mod definitions;
pub mod descriptor;
pub mod dispatcher;
mod error;
pub mod loader;
mod registry;

pub use descriptor::{
    ContentBlock, InboundCall, JsonObject, ParameterSchema, ResponseEnvelope, ToolDescriptor,
    ToolInvoke,
};
pub use dispatcher::Dispatcher;
pub use error::{LoaderError, ProtocolError, ToolFailure};
pub use loader::load_tools;
pub use registry::ToolRegistry;
