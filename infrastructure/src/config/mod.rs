//! Configuration file loading for toolcall
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `TOOLCALL_<SECTION>__<KEY>` (e.g. `TOOLCALL_MODEL__MAX_TOKENS`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./toolcall.toml` or `./.toolcall.toml`
//! 4. Global: `~/.config/toolcall/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnthropicConfig, FileConfig, FileExecutionConfig,
    FileLoggingConfig, FileModelConfig, FileProvidersConfig, FileSandboxConfig,
    FileScriptToolConfig, FileScriptToolParameter, FileToolsConfig,
};
pub use loader::ConfigLoader;
