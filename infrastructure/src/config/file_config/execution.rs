//! Execution configuration from TOML (`[execution]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts in whole seconds; `0` disables the limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Limit for a single model request
    pub request_timeout_secs: u64,
    /// Limit for a whole cycle, both requests and tool execution included
    pub cycle_timeout_secs: u64,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 120,
            cycle_timeout_secs: 300,
        }
    }
}

impl FileExecutionConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        seconds(self.request_timeout_secs)
    }

    pub fn cycle_timeout(&self) -> Option<Duration> {
        seconds(self.cycle_timeout_secs)
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
