use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser};
use tracing::{debug, info};

use tool_badge::config::{self, BadgeConfig};
use tool_badge::invocation::{self, ToolInvocation};
use tool_badge::logging::{self, LogTarget};
use tool_badge::{preview, ui};

#[derive(Parser, Debug)]
#[command(
    name = "tool-badge",
    about = "Render status badges for chat tool invocations",
    long_about = None,
)]
struct Args {
    /// JSON file of invocations (array, object, or JSON Lines). Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Print one badge per line instead of opening the preview
    #[arg(long)]
    plain: bool,

    /// Use ASCII glyphs
    #[arg(long)]
    ascii: bool,

    /// Config file path
    #[arg(long, env = "TOOL_BADGE_CONFIG")]
    config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Append logs to this file (the preview never logs to the screen)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    init: bool,

    /// Generate shell completions and print to stdout (bash, zsh, fish, elvish)
    #[arg(long, value_name = "SHELL")]
    completions: Option<String>,
}

/// Shown when stdin is a terminal and no file was given.
const DEMO_INVOCATIONS: &str = r#"[
  {"toolName": "str_replace_editor", "state": "call", "args": {"command": "view", "path": "/App.jsx"}, "toolCallId": "demo-1"},
  {"toolName": "str_replace_editor", "state": "result", "args": {"command": "create"}, "result": "File created", "toolCallId": "demo-2"},
  {"toolName": "file_manager", "state": "call", "args": {"command": "rename", "path": "/old.jsx", "new_path": "/new.jsx"}, "toolCallId": "demo-3"},
  {"toolName": "file_manager", "state": "result", "args": {"command": "frobnicate", "path": "/x.jsx"}, "toolCallId": "demo-4"},
  {"toolName": "mystery_tool", "state": "partial-call", "args": {}, "toolCallId": "demo-5"}
]"#;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // ── --completions ─────────────────────────────────────────────────────────
    if let Some(shell_name) = &args.completions {
        return generate_completions(shell_name);
    }

    let config_path = args.config.clone().unwrap_or_else(config::config_path);

    // ── --init ────────────────────────────────────────────────────────────────
    if args.init {
        let path = BadgeConfig::write_default_if_missing(&config_path)?;
        println!("Config written to: {}", path.display());
        return Ok(());
    }

    logging::init(
        args.verbose,
        LogTarget::choose(args.log_file.as_deref(), !args.plain),
    )?;

    let mut cfg = BadgeConfig::load(&config_path)?;
    cfg.ascii |= args.ascii;
    debug!(path = %config_path.display(), ?cfg, "config loaded");

    let invocations = load_invocations(&args)?;
    info!(count = invocations.len(), "loaded invocations");

    if args.plain {
        for inv in &invocations {
            println!("{}", ui::plain_badge(inv, cfg.ascii));
        }
        return Ok(());
    }

    preview::run(invocations, cfg).await
}

fn load_invocations(args: &Args) -> Result<Vec<ToolInvocation>> {
    if args.input.is_none() && std::io::stdin().is_terminal() {
        debug!("no input given, using demo invocations");
        return invocation::parse_invocations(DEMO_INVOCATIONS);
    }
    let raw = invocation::read_input(args.input.as_deref())?;
    invocation::parse_invocations(&raw)
}

fn generate_completions(shell_name: &str) -> Result<()> {
    use clap_complete::{Shell, generate};

    let shell: Shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "elvish" => Shell::Elvish,
        _ => bail!("Unknown shell: {shell_name} (supported: bash, zsh, fish, elvish)"),
    };

    let mut cmd = Args::command();
    generate(shell, &mut cmd, "tool-badge", &mut std::io::stdout());
    Ok(())
}
