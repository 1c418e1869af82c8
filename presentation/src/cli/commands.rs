//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use toolcall_application::ParameterSpec;

/// Output format for cycle results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Whole transcript: model output, tool calls, results and continuation
    Full,
    /// Only the text the model produced after the tool results
    Answer,
    /// JSON output
    Json,
}

/// CLI arguments for toolcall
#[derive(Parser, Debug)]
#[command(name = "toolcall")]
#[command(author, version, about = "Let a language model call tools through a tagged text protocol")]
#[command(long_about = r#"
toolcall answers a question in two model calls. The first call sees the
tool descriptions and may emit a <function_calls> block; toolcall runs the
requested tools and the second call continues from their results.

Configuration files are loaded from (in priority order):
1. TOOLCALL_* environment variables (e.g. TOOLCALL_MODEL__MAX_TOKENS=2048)
2. --config <path>     Explicit config file
3. ./toolcall.toml     Project-level config
4. ~/.config/toolcall/config.toml   Global config

Example:
  toolcall calc "What is 1984135 times 9343116?"
  toolcall custom --name reverse --description "Reverse a string" \
      --param text:string:"Text to reverse" --source reverse.lua "Reverse 'stressed'"
  toolcall prompt calculator
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Model to use (overrides the config file)
    #[arg(short, long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Print without colours
    #[arg(long, global = true)]
    pub raw: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a question with the built-in calculator available
    Calc {
        /// The question
        query: String,
    },

    /// Register a Lua tool from a file, then ask a question with it
    Custom {
        /// Tool name; the script must define a global function with this name
        #[arg(long)]
        name: String,

        /// What the tool does, as shown to the model
        #[arg(long, default_value = "")]
        description: String,

        /// Parameter as name:type:description (type is integer/int or string/str)
        #[arg(long = "param", value_name = "NAME:TYPE:DESC", value_parser = parse_param_spec)]
        params: Vec<ParameterSpec>,

        /// Lua source file
        #[arg(long, value_name = "FILE")]
        source: PathBuf,

        /// The question
        query: String,
    },

    /// List registered tools
    Tools,

    /// Print the system prompt for the given tools (all tools when none given)
    Prompt {
        /// Tool names
        tools: Vec<String>,
    },
}

/// Parse `name:type:description`. The description may itself contain `:`
/// and may be omitted; the type is checked at registration.
pub fn parse_param_spec(s: &str) -> Result<ParameterSpec, String> {
    let mut parts = s.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    let param_type = parts.next().map(str::trim).unwrap_or_default();
    let description = parts.next().map(str::trim).unwrap_or_default();

    if name.is_empty() || param_type.is_empty() {
        return Err(format!(
            "expected NAME:TYPE[:DESCRIPTION], got '{}'",
            s
        ));
    }
    Ok(ParameterSpec::new(name, param_type, description))
}
