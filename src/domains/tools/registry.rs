//! Tool registry: the in-memory collection of loaded descriptors.
//!
//! Built once at startup from the loader's output, read-only for the life
//! of the process. Both transports answer listings and resolve calls
//! through this one collection.

use super::descriptor::ToolDescriptor;

/// Ordered collection of tool descriptors.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// Create a registry over an already-loaded descriptor sequence.
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    /// All descriptors, in load order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Find the first descriptor with the given name.
    ///
    /// Exact, case-sensitive match. With duplicate names the earliest
    /// registration wins.
    pub fn find_by_name(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// True when no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
