//! Register Tool use case.
//!
//! Builds a [`ToolDefinition`] from operator input, compiles the supplied
//! source into a handler through the [`ToolCompilerPort`], and adds the pair
//! to the [`ToolRegistry`]. Every failure is reported at registration time;
//! nothing is half-registered.

use crate::ports::tool_compiler::{CompileError, ToolCompilerPort};
use crate::registry::{RegistryError, ToolRegistry};
use std::sync::Arc;
use thiserror::Error;
use toolcall_domain::{DomainError, ParamType, ToolDefinition, ToolParameter};
use tracing::info;

#[derive(Error, Debug)]
pub enum RegisterToolError {
    #[error("Invalid tool definition: {0}")]
    InvalidDefinition(#[from] DomainError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One parameter row as typed by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    /// Type name as text (`integer`, `int`, `string`, `str`)
    pub param_type: String,
    pub description: String,
}

impl ParameterSpec {
    pub fn new(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.param_type.trim().is_empty()
            && self.description.trim().is_empty()
    }

    fn to_parameter(&self) -> Result<ToolParameter, DomainError> {
        let param_type: ParamType = self.param_type.parse()?;
        Ok(ToolParameter::new(
            self.name.trim(),
            param_type,
            self.description.trim(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct RegisterToolInput {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
    pub source: String,
}

impl RegisterToolInput {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Vec<ParameterSpec>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            source: source.into(),
        }
    }

    /// Build and validate the definition. Blank parameter rows are skipped.
    pub fn definition(&self) -> Result<ToolDefinition, DomainError> {
        let parameters = self
            .parameters
            .iter()
            .filter(|p| !p.is_blank())
            .map(ParameterSpec::to_parameter)
            .collect::<Result<Vec<_>, _>>()?;

        let definition = ToolDefinition::new(self.name.trim(), self.description.trim())
            .with_parameters(parameters);
        definition.validate()?;
        Ok(definition)
    }
}

/// Use case for registering a tool from source text at runtime.
pub struct RegisterToolUseCase {
    registry: Arc<ToolRegistry>,
    compiler: Arc<dyn ToolCompilerPort>,
}

impl RegisterToolUseCase {
    pub fn new(registry: Arc<ToolRegistry>, compiler: Arc<dyn ToolCompilerPort>) -> Self {
        Self { registry, compiler }
    }

    /// Register the tool and return its definition.
    pub fn execute(&self, input: RegisterToolInput) -> Result<ToolDefinition, RegisterToolError> {
        let definition = input.definition()?;

        // Skip compiling when the name is already taken.
        if self.registry.contains(&definition.name) {
            return Err(RegistryError::DuplicateTool(definition.name).into());
        }

        let handler = self.compiler.compile(&definition, &input.source)?;
        self.registry.register(definition.clone(), handler)?;

        info!(
            tool = %definition.name,
            language = self.compiler.language(),
            params = definition.parameters.len(),
            "Registered dynamic tool"
        );
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::tool_handler::{HandlerError, ToolHandler};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use toolcall_domain::ToolArguments;

    struct Constant(String);

    #[async_trait]
    impl ToolHandler for Constant {
        async fn call(&self, _arguments: &ToolArguments) -> Result<String, HandlerError> {
            Ok(self.0.clone())
        }
    }

    /// Accepts any source that mentions the tool name.
    struct MockCompiler {
        compiled: AtomicUsize,
    }

    impl MockCompiler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                compiled: AtomicUsize::new(0),
            })
        }
    }

    impl ToolCompilerPort for MockCompiler {
        fn language(&self) -> &str {
            "mock"
        }

        fn compile(
            &self,
            definition: &ToolDefinition,
            source: &str,
        ) -> Result<Arc<dyn ToolHandler>, CompileError> {
            self.compiled.fetch_add(1, Ordering::SeqCst);
            if source.contains("syntax error") {
                return Err(CompileError::Compile("unexpected symbol".to_string()));
            }
            if !source.contains(&definition.name) {
                return Err(CompileError::UnresolvedCallable(definition.name.clone()));
            }
            Ok(Arc::new(Constant(source.to_string())))
        }
    }

    fn reverse_input(source: &str) -> RegisterToolInput {
        RegisterToolInput::new(
            "reverse",
            "Reverse a string",
            vec![
                ParameterSpec::new("text", "str", "Text to reverse"),
                ParameterSpec::new("", "", ""),
                ParameterSpec::new("times", "Integer", "Repetitions"),
            ],
            source,
        )
    }

    #[tokio::test]
    async fn test_register_compiles_and_stores() {
        let registry = Arc::new(ToolRegistry::new());
        let use_case = RegisterToolUseCase::new(registry.clone(), MockCompiler::new());

        let definition = use_case.execute(reverse_input("function reverse() end")).unwrap();

        assert_eq!(definition.parameter_names().collect::<Vec<_>>(), vec!["text", "times"]);
        assert_eq!(definition.parameters[0].param_type, ParamType::String);
        assert_eq!(definition.parameters[1].param_type, ParamType::Integer);

        let tool = registry.get("reverse").unwrap();
        let output = tool.handler.call(&ToolArguments::new()).await.unwrap();
        assert_eq!(output, "function reverse() end");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let registry = Arc::new(ToolRegistry::new());
        let compiler = MockCompiler::new();
        let use_case = RegisterToolUseCase::new(registry.clone(), compiler.clone());
        let input = RegisterToolInput::new(
            "f",
            "f",
            vec![ParameterSpec::new("x", "float", "")],
            "f",
        );

        let err = use_case.execute(input).unwrap_err();
        assert!(matches!(
            err,
            RegisterToolError::InvalidDefinition(DomainError::UnknownParamType(ref t)) if t == "float"
        ));
        assert_eq!(compiler.compiled.load(Ordering::SeqCst), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let input = RegisterToolInput::new(
            "f",
            "f",
            vec![
                ParameterSpec::new("x", "int", ""),
                ParameterSpec::new("x", "str", ""),
            ],
            "f",
        );
        assert!(matches!(
            input.definition(),
            Err(DomainError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_compile_errors_surface() {
        let registry = Arc::new(ToolRegistry::new());
        let use_case = RegisterToolUseCase::new(registry.clone(), MockCompiler::new());

        let err = use_case.execute(reverse_input("syntax error")).unwrap_err();
        assert!(matches!(err, RegisterToolError::Compile(CompileError::Compile(_))));

        let err = use_case.execute(reverse_input("function other() end")).unwrap_err();
        assert!(matches!(
            err,
            RegisterToolError::Compile(CompileError::UnresolvedCallable(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_name_not_compiled() {
        let registry = Arc::new(ToolRegistry::new());
        let compiler = MockCompiler::new();
        let use_case = RegisterToolUseCase::new(registry.clone(), compiler.clone());

        use_case.execute(reverse_input("reverse")).unwrap();
        let err = use_case.execute(reverse_input("reverse v2")).unwrap_err();

        assert!(matches!(
            err,
            RegisterToolError::Registry(RegistryError::DuplicateTool(ref n)) if n == "reverse"
        ));
        assert_eq!(compiler.compiled.load(Ordering::SeqCst), 1);
    }
}
