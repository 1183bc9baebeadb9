//! Tool Registry
//!
//! Ordered mapping from tool name to [`Tool`]. Populated once at startup
//! and read-only afterwards.

use std::collections::HashMap;

use thiserror::Error;

use super::Tool;

/// Registry construction errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    #[error("tool already registered: {0}")]
    DuplicateTool(String),
}

/// Registered tools in registration order.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTool`] if the name is taken. The
    /// registry is left unchanged in that case.
    pub fn register(&mut self, tool: Tool) -> Result<(), RegistryError> {
        if self.index.contains_key(tool.name()) {
            return Err(RegistryError::DuplicateTool(tool.name().to_string()));
        }
        self.index.insert(tool.name(), self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Whether a tool with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Tool names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(Tool::name).collect()
    }

    /// Iterate tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::super::ToolError;
    use super::*;
    use rmcp::schemars::{self, JsonSchema};

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Empty {}

    fn noop(name: &'static str) -> Tool {
        Tool::new(name, "No-op.", |_: Empty| async {
            Ok::<Value, ToolError>(json!(null))
        })
    }

    #[test]
    fn register_preserves_order() {
        let mut registry = ToolRegistry::new();
        for name in ["b", "a", "c"] {
            registry.register(noop(name)).unwrap();
        }
        assert_eq!(registry.names(), vec!["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn duplicate_is_rejected_without_mutation() {
        let mut registry = ToolRegistry::new();
        registry.register(noop("a")).unwrap();

        let err = registry.register(noop("a")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTool("a".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(noop("a")).unwrap();

        assert!(registry.contains("a"));
        assert_eq!(registry.get("a").map(Tool::name), Some("a"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }
}
