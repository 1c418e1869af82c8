//! CLI entrypoint for toolcall
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolcall_application::{
    ConversationLogger, ExecutionParams, NoConversationLogger, RunToolCycleInput,
    RunToolCycleUseCase, ToolRegistry, ToolSet,
};
use toolcall_domain::{Model, ToolUsePromptTemplate};
use toolcall_infrastructure::tools::CALCULATOR;
use toolcall_infrastructure::{
    AnthropicGateway, ConfigLoader, FileConfig, JsonlConversationLogger, register_builtin_tools,
};
use toolcall_presentation::{Cli, Command, ConsoleFormatter, OutputFormat};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.raw {
        ConsoleFormatter::disable_color();
    }

    // API keys may live in a .env file next to the project
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from {}", path.display());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("{}", ConsoleFormatter::format_error(&issue.to_string()));
        }
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    let mut execution = config.execution_params();
    if let Some(model) = &cli.model {
        execution = execution.with_model(Model::from(model.as_str()));
    }

    // === Dependency Injection ===
    let registry = Arc::new(ToolRegistry::new());
    register_builtin_tools(&registry)?;
    register_script_tools(&config, &registry)?;

    match &cli.command {
        Command::Tools => {
            print!("{}", ConsoleFormatter::format_tools(&registry.definitions()));
        }
        Command::Prompt { tools } => {
            let set = if tools.is_empty() {
                registry.all()
            } else {
                registry.toolset(tools)?
            };
            println!("{}", ToolUsePromptTemplate::system_prompt(set.definitions()));
        }
        Command::Calc { query } => {
            let tools = registry.toolset(&[CALCULATOR])?;
            run_cycle(&cli, &config, execution, tools, query).await?;
        }
        Command::Custom {
            name,
            description,
            params,
            source,
            query,
        } => {
            register_custom_tool(&config, &registry, name, description, params, source)?;
            let tools = registry.toolset(&[name])?;
            run_cycle(&cli, &config, execution, tools, query).await?;
        }
    }

    Ok(())
}

async fn run_cycle(
    cli: &Cli,
    config: &FileConfig,
    execution: ExecutionParams,
    tools: ToolSet,
    query: &str,
) -> Result<()> {
    let gateway = Arc::new(AnthropicGateway::from_config(&config.providers.anthropic)?);

    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
    }

    let use_case = RunToolCycleUseCase::new(gateway)
        .with_conversation_logger(conversation_logger(config))
        .with_cancellation(token);

    info!("Running cycle with model {}", execution.model);
    let output = use_case
        .execute(RunToolCycleInput::new(query, tools, execution))
        .await?;

    let rendered = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&output),
        OutputFormat::Answer => ConsoleFormatter::format_answer(&output),
        OutputFormat::Json => format!("{}\n", ConsoleFormatter::format_json(query, &output)),
    };
    print!("{}", rendered);
    Ok(())
}

fn conversation_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let Some(path) = &config.logging.conversation_log else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::open(path) {
        Ok(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Could not open conversation log {}: {}", path.display(), e);
            Arc::new(NoConversationLogger)
        }
    }
}

#[cfg(feature = "scripting")]
fn register_script_tools(config: &FileConfig, registry: &Arc<ToolRegistry>) -> Result<()> {
    use toolcall_application::RegisterToolUseCase;
    use toolcall_infrastructure::LuaToolCompiler;

    if config.tools.script.is_empty() {
        return Ok(());
    }

    let compiler = Arc::new(LuaToolCompiler::new(config.sandbox.limits()));
    let use_case = RegisterToolUseCase::new(Arc::clone(registry), compiler);
    let base_dir = std::env::current_dir().context("Failed to read the working directory")?;

    for tool in &config.tools.script {
        let input = tool
            .to_register_input(&base_dir)
            .with_context(|| format!("Failed to read source of tool '{}'", tool.name))?;
        use_case
            .execute(input)
            .with_context(|| format!("Failed to register tool '{}'", tool.name))?;
    }
    Ok(())
}

#[cfg(not(feature = "scripting"))]
fn register_script_tools(config: &FileConfig, _registry: &Arc<ToolRegistry>) -> Result<()> {
    if !config.tools.script.is_empty() {
        warn!(
            "Ignoring {} script tool(s): built without the `scripting` feature",
            config.tools.script.len()
        );
    }
    Ok(())
}

#[cfg(feature = "scripting")]
fn register_custom_tool(
    config: &FileConfig,
    registry: &Arc<ToolRegistry>,
    name: &str,
    description: &str,
    params: &[toolcall_application::ParameterSpec],
    source: &Path,
) -> Result<()> {
    use toolcall_application::{RegisterToolInput, RegisterToolUseCase};
    use toolcall_infrastructure::LuaToolCompiler;

    let code = std::fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let compiler = Arc::new(LuaToolCompiler::new(config.sandbox.limits()));
    RegisterToolUseCase::new(Arc::clone(registry), compiler).execute(RegisterToolInput::new(
        name,
        description,
        params.to_vec(),
        code,
    ))?;
    Ok(())
}

#[cfg(not(feature = "scripting"))]
fn register_custom_tool(
    _config: &FileConfig,
    _registry: &Arc<ToolRegistry>,
    name: &str,
    _description: &str,
    _params: &[toolcall_application::ParameterSpec],
    _source: &Path,
) -> Result<()> {
    bail!(
        "Cannot register '{}': built without the `scripting` feature",
        name
    )
}
