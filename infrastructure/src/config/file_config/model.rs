//! Model configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};
use toolcall_domain::Model;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model identifier; unset means the built-in default
    pub name: Option<String>,
    /// Token bound for each completion request
    pub max_tokens: u32,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: None,
            max_tokens: 1024,
        }
    }
}

impl FileModelConfig {
    pub fn model(&self) -> Model {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Model::from)
            .unwrap_or_default()
    }
}
