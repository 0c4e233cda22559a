//! Command-line interface.
//!
//! The server needs no arguments for its default STDIO mode; `--sse`
//! switches to the push transport and `tools` prints the registered tool
//! set without starting a transport.

use clap::{Parser, Subcommand};

use crate::domains::tools::ToolRegistry;

/// MCP server for the DirectStay vacation rental platform.
#[derive(Debug, Parser)]
#[command(name = "ds-mcp-server", version, about)]
pub struct Cli {
    /// Serve over SSE instead of STDIO.
    #[arg(long)]
    pub sse: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Maintenance subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the registered tools and exit.
    Tools,
}

/// Print the registered tools grouped by their registration source.
pub fn run_tools_command(registry: &ToolRegistry) {
    let mut sources: Vec<&'static str> = Vec::new();
    for tool in registry.list() {
        if !sources.contains(&tool.source) {
            sources.push(tool.source);
        }
    }

    println!("{} tools registered", registry.len());

    for source in sources {
        println!("\n[{}]", source);
        for tool in registry.list().iter().filter(|tool| tool.source == source) {
            println!("  {} - {}", tool.name, tool.description);
            for (name, schema) in &tool.schema.properties {
                let required = if tool.schema.required.iter().any(|r| r == name) {
                    "required"
                } else {
                    "optional"
                };
                let description = schema
                    .get("description")
                    .and_then(|d| d.as_str())
                    .unwrap_or("");
                println!("      {} ({}): {}", name, required, description);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_stdio() {
        let cli = Cli::parse_from(["ds-mcp-server"]);
        assert!(!cli.sse);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_sse_flag() {
        let cli = Cli::parse_from(["ds-mcp-server", "--sse"]);
        assert!(cli.sse);
    }

    #[test]
    fn test_tools_subcommand() {
        let cli = Cli::parse_from(["ds-mcp-server", "tools"]);
        assert!(matches!(cli.command, Some(Commands::Tools)));
    }
}
