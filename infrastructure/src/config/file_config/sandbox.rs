//! Script sandbox limits from TOML (`[sandbox]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSandboxConfig {
    /// Heap limit per script VM
    pub memory_limit_bytes: usize,
    /// VM instructions allowed per tool call
    pub instruction_limit: u64,
}

impl Default for FileSandboxConfig {
    fn default() -> Self {
        Self {
            memory_limit_bytes: 16 * 1024 * 1024,
            instruction_limit: 10_000_000,
        }
    }
}

#[cfg(feature = "scripting")]
impl FileSandboxConfig {
    pub fn limits(&self) -> crate::scripting::SandboxLimits {
        crate::scripting::SandboxLimits {
            memory_limit_bytes: self.memory_limit_bytes,
            instruction_limit: self.instruction_limit,
        }
    }
}

#[cfg(all(test, feature = "scripting"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sandbox_defaults() {
        assert_eq!(
            FileSandboxConfig::default().limits(),
            crate::scripting::SandboxLimits::default()
        );
    }
}
