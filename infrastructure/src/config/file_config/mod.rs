//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod execution;
mod logging;
mod model;
mod providers;
mod sandbox;
mod tools;

pub use execution::FileExecutionConfig;
pub use logging::FileLoggingConfig;
pub use model::FileModelConfig;
pub use providers::{FileAnthropicConfig, FileProvidersConfig};
pub use sandbox::FileSandboxConfig;
pub use tools::{FileScriptToolConfig, FileScriptToolParameter, FileToolsConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use toolcall_application::ExecutionParams;

/// A configuration value that loads but cannot be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("model.max_tokens must be greater than zero")]
    ZeroMaxTokens,

    #[error("sandbox.{0} must be greater than zero")]
    ZeroSandboxLimit(&'static str),

    #[error("tools.script: '{0}' is declared more than once")]
    DuplicateScriptTool(String),

    #[error("tools.script: entry {0} has an empty name")]
    UnnamedScriptTool(usize),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model selection and token bound
    pub model: FileModelConfig,
    /// Timeouts
    pub execution: FileExecutionConfig,
    /// Provider credentials and endpoints
    pub providers: FileProvidersConfig,
    /// Limits for script tools
    pub sandbox: FileSandboxConfig,
    /// Structured conversation log
    pub logging: FileLoggingConfig,
    /// Script tools registered at startup
    pub tools: FileToolsConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.model.max_tokens == 0 {
            issues.push(ConfigValidationError::ZeroMaxTokens);
        }
        if self.sandbox.memory_limit_bytes == 0 {
            issues.push(ConfigValidationError::ZeroSandboxLimit("memory_limit_bytes"));
        }
        if self.sandbox.instruction_limit == 0 {
            issues.push(ConfigValidationError::ZeroSandboxLimit("instruction_limit"));
        }

        let mut seen = HashSet::new();
        for (index, tool) in self.tools.script.iter().enumerate() {
            if tool.name.trim().is_empty() {
                issues.push(ConfigValidationError::UnnamedScriptTool(index));
            } else if !seen.insert(tool.name.as_str()) {
                issues.push(ConfigValidationError::DuplicateScriptTool(tool.name.clone()));
            }
        }

        issues
    }

    /// Execution parameters for a cycle.
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_model(self.model.model())
            .with_max_tokens(self.model.max_tokens)
            .with_request_timeout(self.execution.request_timeout())
            .with_cycle_timeout(self.execution.cycle_timeout())
    }
}
