//! Tools configuration from TOML (`[tools]` section)
//!
//! Script tools listed here are registered at startup, alongside the
//! built-in calculator.
//!
//! ```toml
//! [[tools.script]]
//! name = "reverse"
//! description = "Reverse a string"
//! source = "tools/reverse.lua"
//! parameters = [
//!     { name = "text", type = "string", description = "Text to reverse" },
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toolcall_application::{ParameterSpec, RegisterToolInput};

/// One parameter of a script tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileScriptToolParameter {
    pub name: String,
    /// Parameter type: "integer"/"int" or "string"/"str"
    #[serde(rename = "type", default = "default_string_type")]
    pub param_type: String,
    #[serde(default)]
    pub description: String,
}

fn default_string_type() -> String {
    "string".to_string()
}

/// A script tool declared in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileScriptToolConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<FileScriptToolParameter>,
    /// Script file; relative paths resolve against the working directory
    pub source: PathBuf,
}

impl FileScriptToolConfig {
    /// Read the script and build the registration input.
    pub fn to_register_input(&self, base_dir: &Path) -> std::io::Result<RegisterToolInput> {
        let path = if self.source.is_absolute() {
            self.source.clone()
        } else {
            base_dir.join(&self.source)
        };
        let source = std::fs::read_to_string(&path)?;

        let parameters = self
            .parameters
            .iter()
            .map(|p| ParameterSpec::new(&p.name, &p.param_type, &p.description))
            .collect();

        Ok(RegisterToolInput::new(
            &self.name,
            &self.description,
            parameters,
            source,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    pub script: Vec<FileScriptToolConfig>,
}
