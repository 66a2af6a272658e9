//! Tool invocation snapshots as the chat host emits them.
//!
//! The host sends a JSON object per invocation (`toolName`, `state`, `args`,
//! `result`, `toolCallId`). Only the fields the badge needs are typed; every
//! other key is dropped on the floor.
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::message;

// ── Lifecycle state ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvocationState {
    /// Arguments are still streaming in
    PartialCall,
    /// Arguments complete, tool is executing
    Call,
    /// Tool returned
    Result,
}

impl InvocationState {
    pub fn is_complete(self) -> bool {
        self == InvocationState::Result
    }

    /// Next lifecycle stage. `Result` is terminal.
    pub fn advance(self) -> Self {
        match self {
            InvocationState::PartialCall => InvocationState::Call,
            InvocationState::Call | InvocationState::Result => InvocationState::Result,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InvocationState::PartialCall => "partial-call",
            InvocationState::Call => "call",
            InvocationState::Result => "result",
        }
    }
}

// ── Arguments ─────────────────────────────────────────────────────────────────

/// The argument keys the badge reads. Anything else the tool was given
/// (`old_str`, `insert_line`, ...) is ignored.
///
/// Values stay raw JSON: the message text depends on whether a key was
/// missing, `null`, falsy or structured, not just on its string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolArgs {
    #[serde(default, deserialize_with = "present")]
    pub command: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub path: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub new_path: Option<Value>,
}

impl ToolArgs {
    pub fn command(command: &str) -> Self {
        Self {
            command: Some(Value::from(command)),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(Value::from(path));
        self
    }

    pub fn with_new_path(mut self, new_path: &str) -> Self {
        self.new_path = Some(Value::from(new_path));
        self
    }

    /// The command, when it is a string. Anything else matches no template.
    pub fn command_str(&self) -> Option<&str> {
        self.command.as_ref().and_then(Value::as_str)
    }
}

/// `None` only for a missing key; an explicit `null` is kept as `Value::Null`.
fn present<'de, D>(de: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(de).map(Some)
}

fn args_or_default<'de, D>(de: D) -> std::result::Result<ToolArgs, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        v @ Value::Object(_) => ToolArgs::deserialize(v).map_err(serde::de::Error::custom)?,
        _ => ToolArgs::default(),
    })
}

// ── Invocation ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    pub tool_name: String,
    pub state: InvocationState,
    #[serde(default, deserialize_with = "args_or_default")]
    pub args: ToolArgs,
    /// Opaque tool output. Only its presence matters to consumers.
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub tool_call_id: String,
}

impl ToolInvocation {
    pub fn new(tool_name: &str, state: InvocationState, args: ToolArgs) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            state,
            args,
            result: None,
            tool_call_id: String::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.tool_call_id = id.to_string();
        self
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Status text for the current state.
    pub fn message(&self) -> String {
        message::tool_message(&self.tool_name, &self.args, self.is_complete())
    }

    /// Move one lifecycle step forward.
    pub fn advance(&mut self) {
        self.state = self.state.advance();
    }
}

// ── Input parsing ─────────────────────────────────────────────────────────────

/// Parse invocations from a JSON array, a single JSON object, or JSON Lines.
///
/// Unparseable JSON Lines records are skipped with a warning; an input that
/// yields nothing at all is an error.
pub fn parse_invocations(raw: &str) -> Result<Vec<ToolInvocation>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("No tool invocations in input");
    }

    if trimmed.starts_with('[') {
        let list: Vec<ToolInvocation> =
            serde_json::from_str(trimmed).context("Failed to parse invocation array")?;
        if list.is_empty() {
            bail!("No tool invocations in input");
        }
        debug!(count = list.len(), "parsed invocation array");
        return Ok(list);
    }

    if let Ok(single) = serde_json::from_str::<ToolInvocation>(trimmed) {
        debug!(tool = %single.tool_name, "parsed single invocation");
        return Ok(vec![single]);
    }

    let mut out = Vec::new();
    for (i, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ToolInvocation>(line) {
            Ok(inv) => out.push(inv),
            Err(e) => warn!(line = i + 1, error = %e, "skipping malformed invocation"),
        }
    }
    if out.is_empty() {
        bail!("No valid tool invocations in input");
    }
    debug!(count = out.len(), "parsed invocation lines");
    Ok(out)
}

/// Read raw input from a file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read invocations from {}", p.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read invocations from stdin")?;
            Ok(buf)
        }
    }
}
