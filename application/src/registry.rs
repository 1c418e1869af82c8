//! Tool Registry
//!
//! The [`ToolRegistry`] is the process-wide catalogue of tools: each entry
//! pairs a [`ToolDefinition`] with the [`ToolHandler`] that executes it.
//!
//! # Lifecycle
//!
//! Created once in the composition root and shared by `Arc`. Tools are
//! added by static registration at startup or by
//! [`RegisterToolUseCase`](crate::use_cases::register_tool::RegisterToolUseCase)
//! at runtime, and are never removed.
//!
//! # Locking
//!
//! Registration takes the write lock. A cycle takes a [`ToolSet`] snapshot
//! under the read lock when it starts and never touches the registry again,
//! so registration can race with running cycles safely.
//!
//! ```ignore
//! let registry = Arc::new(ToolRegistry::new());
//! registry.register(calculator_definition(), Arc::new(CalculatorTool))?;
//!
//! let tools = registry.toolset(&["calculator"])?;
//! let system_prompt = ToolUsePromptTemplate::system_prompt(tools.definitions());
//! ```

use crate::ports::tool_handler::ToolHandler;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use toolcall_domain::{DomainError, ToolDefinition};

/// Errors raised by registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid tool definition: {0}")]
    InvalidDefinition(#[from] DomainError),

    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Unknown tool: '{0}'")]
    UnknownTool(String),
}

/// A definition paired with its executable handler.
#[derive(Clone)]
pub struct RegisteredTool {
    pub definition: Arc<ToolDefinition>,
    pub handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    pub fn new(definition: ToolDefinition, handler: Arc<dyn ToolHandler>) -> Self {
        Self {
            definition: Arc::new(definition),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

impl std::fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable set of tools bound to one cycle.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    tools: Vec<RegisteredTool>,
}

impl ToolSet {
    pub fn new(tools: Vec<RegisteredTool>) -> Self {
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// The only tool in the set, if there is exactly one.
    pub fn single(&self) -> Option<&RegisteredTool> {
        match self.tools.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().map(|t| t.definition.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[derive(Default)]
struct RegistryState {
    /// Names in registration order
    order: Vec<String>,
    tools: HashMap<String, RegisteredTool>,
}

/// Process-wide tool registry guarded by a read/write lock.
#[derive(Default)]
pub struct ToolRegistry {
    state: RwLock<RegistryState>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// The definition is validated first; a name that is already taken is
    /// rejected and the existing entry is left untouched.
    pub fn register(
        &self,
        definition: ToolDefinition,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), RegistryError> {
        definition.validate()?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.tools.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateTool(definition.name));
        }

        let name = definition.name.clone();
        tracing::debug!(tool = %name, params = definition.parameters.len(), "Registered tool");
        state
            .tools
            .insert(name.clone(), RegisteredTool::new(definition, handler));
        state.order.push(name);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<RegisteredTool> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.tools.contains_key(name)
    }

    /// All definitions, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .order
            .iter()
            .filter_map(|name| state.tools.get(name))
            .map(|t| t.definition.as_ref().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the named tools, in the order given.
    pub fn toolset<S: AsRef<str>>(&self, names: &[S]) -> Result<ToolSet, RegistryError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                state
                    .tools
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ToolSet::new)
    }

    /// Snapshot every registered tool, in registration order.
    pub fn all(&self) -> ToolSet {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        ToolSet::new(
            state
                .order
                .iter()
                .filter_map(|name| state.tools.get(name).cloned())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::tool_handler::HandlerError;
    use async_trait::async_trait;
    use toolcall_domain::{ToolArguments, ToolParameter};

    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        async fn call(&self, _arguments: &ToolArguments) -> Result<String, HandlerError> {
            Ok("echo".to_string())
        }
    }

    fn definition(name: &str) -> ToolDefinition {
        ToolDefinition::new(name, format!("{} tool", name))
            .with_parameter(ToolParameter::string("text", "Text"))
    }

    #[test]
    fn test_register_and_get() {
        let registry = ToolRegistry::new();
        registry.register(definition("echo"), Arc::new(Echo)).unwrap();

        assert!(registry.contains("echo"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("echo").unwrap().name(), "echo");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let registry = ToolRegistry::new();
        registry.register(definition("echo"), Arc::new(Echo)).unwrap();
        let err = registry
            .register(
                ToolDefinition::new("echo", "different description"),
                Arc::new(Echo),
            )
            .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateTool("echo".to_string()));
        assert_eq!(registry.get("echo").unwrap().definition.description, "echo tool");
    }

    #[test]
    fn test_invalid_definition_rejected() {
        let registry = ToolRegistry::new();
        let err = registry
            .register(ToolDefinition::new("", "nameless"), Arc::new(Echo))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidDefinition(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_definitions_in_registration_order() {
        let registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(definition(name), Arc::new(Echo)).unwrap();
        }
        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        let all = registry.all();
        assert_eq!(all.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_toolset_snapshot() {
        let registry = ToolRegistry::new();
        registry.register(definition("a"), Arc::new(Echo)).unwrap();
        registry.register(definition("b"), Arc::new(Echo)).unwrap();

        let set = registry.toolset(&["b"]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.single().unwrap().name(), "b");

        // Later registrations do not affect an existing snapshot
        registry.register(definition("c"), Arc::new(Echo)).unwrap();
        assert_eq!(set.len(), 1);

        let err = registry.toolset(&["a", "nope"]).unwrap_err();
        assert_eq!(err, RegistryError::UnknownTool("nope".to_string()));
    }

    #[test]
    fn test_single_requires_exactly_one() {
        let registry = ToolRegistry::new();
        registry.register(definition("a"), Arc::new(Echo)).unwrap();
        registry.register(definition("b"), Arc::new(Echo)).unwrap();
        assert!(registry.all().single().is_none());
        assert!(ToolSet::default().single().is_none());
    }
}
