//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations:
//! - **STDIO**: Standard input/output (default for MCP)
//! - **SSE**: HTTP server pushing responses over Server-Sent Events,
//!   with JSON-RPC requests arriving over POST
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the MCP server handler. STDIO serves a single
//! session; SSE serves any number of concurrent sessions.

mod config;
mod error;
mod service;

pub mod rpc;
pub mod sse;
pub mod stdio;

pub use config::{SseConfig, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
