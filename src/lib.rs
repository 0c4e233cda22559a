//! MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that exposes
//! the DirectStay vacation rental platform API as tools, with a modular
//! architecture organized by domains.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **cli**: Command-line argument parsing and maintenance subcommands
//! - **core**: Core infrastructure including configuration, the main server,
//!   and the transport layer
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tools backed by the DirectStay API
//!
//! # Example
//!
//! ```rust,no_run
//! use ds_mcp_server::core::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env(false);
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, McpServer, TransportService};
