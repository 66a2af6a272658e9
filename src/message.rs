//! Status text for a tool invocation.
//!
//! Two-level lookup: the tool name picks a family, the `command` argument
//! picks a phrasing pair inside that family, and the completion flag picks
//! one side of the pair. Every input maps to some text.
use serde_json::{Number, Value};

use crate::invocation::ToolArgs;

/// Stand-in for a missing or falsy `path` in the editor and file manager.
const DEFAULT_PATH: &str = "file";

/// What the host renders for a missing key interpolated into text.
const ABSENT: &str = "undefined";

// ── Families ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFamily {
    /// `str_replace_editor`: single-file edits
    Editor,
    /// `file_manager`: rename/delete, possibly two paths
    FileManager,
    /// Anything else; named after the tool itself
    Other,
}

impl ToolFamily {
    pub fn from_tool_name(tool_name: &str) -> Self {
        match tool_name {
            "str_replace_editor" => ToolFamily::Editor,
            "file_manager" => ToolFamily::FileManager,
            _ => ToolFamily::Other,
        }
    }
}

/// (in progress, complete)
type Phrasing = (&'static str, &'static str);

fn pick(phrasing: Phrasing, is_complete: bool) -> &'static str {
    if is_complete { phrasing.1 } else { phrasing.0 }
}

// ── Editor family ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorCommand {
    View,
    Create,
    StrReplace,
    Insert,
    UndoEdit,
    Unknown,
}

impl EditorCommand {
    fn parse(command: Option<&str>) -> Self {
        match command {
            Some("view") => EditorCommand::View,
            Some("create") => EditorCommand::Create,
            Some("str_replace") => EditorCommand::StrReplace,
            Some("insert") => EditorCommand::Insert,
            Some("undo_edit") => EditorCommand::UndoEdit,
            _ => EditorCommand::Unknown,
        }
    }

    /// Verb phrase placed in front of the path.
    fn phrasing(self) -> Phrasing {
        match self {
            EditorCommand::View => ("Viewing", "Viewed"),
            EditorCommand::Create => ("Creating", "Created"),
            EditorCommand::StrReplace => ("Editing", "Edited"),
            EditorCommand::Insert => ("Inserting into", "Inserted into"),
            EditorCommand::UndoEdit => ("Undoing changes to", "Undid changes to"),
            EditorCommand::Unknown => ("Modifying", "Modified"),
        }
    }
}

fn editor_message(args: &ToolArgs, is_complete: bool) -> String {
    let verb = pick(EditorCommand::parse(args.command_str()).phrasing(), is_complete);
    format!("{verb} {}", primary_path(args))
}

// ── File manager family ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileCommand {
    Rename,
    Delete,
    Unknown,
}

impl FileCommand {
    fn parse(command: Option<&str>) -> Self {
        match command {
            Some("rename") => FileCommand::Rename,
            Some("delete") => FileCommand::Delete,
            _ => FileCommand::Unknown,
        }
    }
}

fn file_manager_message(args: &ToolArgs, is_complete: bool) -> String {
    let path = primary_path(args);
    match FileCommand::parse(args.command_str()) {
        FileCommand::Rename => {
            let verb = pick(("Renaming", "Renamed"), is_complete);
            // new_path gets no fallback; an absent one shows up as-is
            let new_path = host_text(args.new_path.as_ref());
            format!("{verb} {path} to {new_path}")
        }
        FileCommand::Delete => {
            let verb = pick(("Deleting", "Deleted"), is_complete);
            format!("{verb} {path}")
        }
        FileCommand::Unknown => {
            pick(("Running operation...", "Completed operation"), is_complete).to_string()
        }
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

fn primary_path(args: &ToolArgs) -> String {
    match args.path.as_ref() {
        Some(v) if is_truthy(v) => host_text(Some(v)),
        _ => DEFAULT_PATH.to_string(),
    }
}

// ── Host value rendering ──────────────────────────────────────────────────────

/// Text the host's string interpolation gives for an argument value.
fn host_text(value: Option<&Value>) -> String {
    match value {
        None => ABSENT.to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                // holes and nulls join as empty
                Value::Null => String::new(),
                other => host_text(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Integral floats print without a fraction, and -0 prints as 0.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 { "0".to_string() } else { format!("{f:.0}") }
        }
        _ => n.to_string(),
    }
}

/// Empty strings, zero, `false` and `null` are falsy; everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Resolve the badge text for a tool call.
///
/// Unknown tools ignore `command` entirely and are described by name.
pub fn tool_message(tool_name: &str, args: &ToolArgs, is_complete: bool) -> String {
    match ToolFamily::from_tool_name(tool_name) {
        ToolFamily::Editor => editor_message(args, is_complete),
        ToolFamily::FileManager => file_manager_message(args, is_complete),
        ToolFamily::Other => {
            if is_complete {
                format!("Completed {tool_name}")
            } else {
                format!("Running {tool_name}...")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDITOR: &str = "str_replace_editor";
    const FILES: &str = "file_manager";

    fn msg(tool: &str, args: ToolArgs, complete: bool) -> String {
        tool_message(tool, &args, complete)
    }

    #[test]
    fn test_family_dispatch() {
        assert_eq!(ToolFamily::from_tool_name(EDITOR), ToolFamily::Editor);
        assert_eq!(ToolFamily::from_tool_name(FILES), ToolFamily::FileManager);
        assert_eq!(ToolFamily::from_tool_name("bash"), ToolFamily::Other);
        assert_eq!(ToolFamily::from_tool_name(""), ToolFamily::Other);
        // exact match only
        assert_eq!(ToolFamily::from_tool_name("Str_Replace_Editor"), ToolFamily::Other);
    }

    #[test]
    fn test_editor_commands() {
        let cases = [
            ("view", "/App.jsx", "Viewing /App.jsx", "Viewed /App.jsx"),
            ("create", "/components/Button.jsx", "Creating /components/Button.jsx", "Created /components/Button.jsx"),
            ("str_replace", "/App.jsx", "Editing /App.jsx", "Edited /App.jsx"),
            ("insert", "/components/Form.jsx", "Inserting into /components/Form.jsx", "Inserted into /components/Form.jsx"),
            ("undo_edit", "/App.jsx", "Undoing changes to /App.jsx", "Undid changes to /App.jsx"),
        ];
        for (command, path, running, done) in cases {
            let args = ToolArgs::command(command).with_path(path);
            assert_eq!(msg(EDITOR, args.clone(), false), running, "{command} running");
            assert_eq!(msg(EDITOR, args, true), done, "{command} done");
        }
    }

    #[test]
    fn test_editor_unknown_command() {
        let args = ToolArgs::command("unknown_command").with_path("/test.jsx");
        assert_eq!(msg(EDITOR, args.clone(), false), "Modifying /test.jsx");
        assert_eq!(msg(EDITOR, args, true), "Modified /test.jsx");
    }

    #[test]
    fn test_editor_missing_command() {
        let args = ToolArgs::default().with_path("/test.jsx");
        assert_eq!(msg(EDITOR, args, false), "Modifying /test.jsx");
    }

    #[test]
    fn test_editor_missing_path_falls_back_to_file() {
        assert_eq!(msg(EDITOR, ToolArgs::command("create"), false), "Creating file");
        assert_eq!(msg(EDITOR, ToolArgs::command("create"), true), "Created file");
        assert_eq!(msg(EDITOR, ToolArgs::command("undo_edit"), true), "Undid changes to file");
        assert_eq!(msg(EDITOR, ToolArgs::default(), false), "Modifying file");
    }

    #[test]
    fn test_editor_empty_path_falls_back_to_file() {
        let args = ToolArgs::command("view").with_path("");
        assert_eq!(msg(EDITOR, args, false), "Viewing file");
    }

    #[test]
    fn test_file_manager_rename() {
        let args = ToolArgs::command("rename").with_path("/old.jsx").with_new_path("/new.jsx");
        assert_eq!(msg(FILES, args.clone(), false), "Renaming /old.jsx to /new.jsx");
        assert_eq!(msg(FILES, args, true), "Renamed /old.jsx to /new.jsx");
    }

    #[test]
    fn test_file_manager_rename_without_new_path() {
        let args = ToolArgs::command("rename").with_path("/old.jsx");
        assert_eq!(msg(FILES, args.clone(), false), "Renaming /old.jsx to undefined");
        assert_eq!(msg(FILES, args, true), "Renamed /old.jsx to undefined");
    }

    #[test]
    fn test_file_manager_rename_without_any_path() {
        let args = ToolArgs::command("rename").with_new_path("/new.jsx");
        assert_eq!(msg(FILES, args, false), "Renaming file to /new.jsx");
    }

    #[test]
    fn test_file_manager_delete() {
        let args = ToolArgs::command("delete").with_path("/components/Old.jsx");
        assert_eq!(msg(FILES, args.clone(), false), "Deleting /components/Old.jsx");
        assert_eq!(msg(FILES, args, true), "Deleted /components/Old.jsx");
    }

    #[test]
    fn test_file_manager_unknown_command_ignores_path() {
        let args = ToolArgs::command("frobnicate").with_path("/x.jsx");
        assert_eq!(msg(FILES, args.clone(), false), "Running operation...");
        assert_eq!(msg(FILES, args, true), "Completed operation");
        assert_eq!(msg(FILES, ToolArgs::default(), true), "Completed operation");
    }

    #[test]
    fn test_unknown_tool_ignores_command() {
        assert_eq!(msg("mystery_tool", ToolArgs::default(), false), "Running mystery_tool...");
        assert_eq!(msg("mystery_tool", ToolArgs::default(), true), "Completed mystery_tool");
        let args = ToolArgs::command("view").with_path("/App.jsx");
        assert_eq!(msg("unknown_tool", args.clone(), false), "Running unknown_tool...");
        assert_eq!(msg("unknown_tool", args, true), "Completed unknown_tool");
    }

    #[test]
    fn test_never_empty() {
        for tool in [EDITOR, FILES, "other", ""] {
            for complete in [false, true] {
                assert!(!msg(tool, ToolArgs::default(), complete).is_empty());
            }
        }
    }

    #[test]
    fn test_host_text() {
        use serde_json::json;
        assert_eq!(host_text(None), "undefined");
        assert_eq!(host_text(Some(&json!(null))), "null");
        assert_eq!(host_text(Some(&json!(false))), "false");
        assert_eq!(host_text(Some(&json!(12))), "12");
        assert_eq!(host_text(Some(&json!(1.0))), "1");
        assert_eq!(host_text(Some(&json!(-0.0))), "0");
        assert_eq!(host_text(Some(&json!(2.5))), "2.5");
        assert_eq!(host_text(Some(&json!({"a": 1}))), "[object Object]");
        assert_eq!(host_text(Some(&json!(["/a", null, 3, ["x", "y"]]))), "/a,,3,x,y");
        assert_eq!(host_text(Some(&json!([]))), "");
    }

    #[test]
    fn test_truthiness() {
        use serde_json::json;
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy}");
        }
        for truthy in [json!(true), json!(-1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy}");
        }
    }

    #[test]
    fn test_file_manager_rename_null_new_path() {
        let mut args = ToolArgs::command("rename").with_path("/a.jsx");
        args.new_path = Some(Value::Null);
        assert_eq!(msg(FILES, args, false), "Renaming /a.jsx to null");
    }

    #[test]
    fn test_editor_falsy_path_falls_back_to_file() {
        let mut args = ToolArgs::command("view");
        for falsy in [Value::Bool(false), Value::from(0), Value::Null] {
            args.path = Some(falsy);
            assert_eq!(msg(EDITOR, args.clone(), false), "Viewing file");
        }
    }
}
