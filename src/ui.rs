/// Glyph helpers shared between the badge widget and plain-stdout output.
use crate::invocation::ToolInvocation;

// ── Status glyphs ─────────────────────────────────────────────────────────────

pub const SPINNER_GLYPHS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
pub const ASCII_SPINNER_GLYPHS: &[&str] = &["|", "/", "-", "\\"];

pub const DONE_GLYPH: &str = "●";
pub const ASCII_DONE_GLYPH: &str = "*";

pub fn spinner_glyph(tick: u32, ascii: bool) -> &'static str {
    let frames = if ascii { ASCII_SPINNER_GLYPHS } else { SPINNER_GLYPHS };
    frames[(tick as usize) % frames.len()]
}

pub fn done_glyph(ascii: bool) -> &'static str {
    if ascii { ASCII_DONE_GLYPH } else { DONE_GLYPH }
}

/// Busy spinner frame while in progress, done marker once the tool returned.
pub fn status_glyph(invocation: &ToolInvocation, tick: u32, ascii: bool) -> &'static str {
    if invocation.is_complete() {
        done_glyph(ascii)
    } else {
        spinner_glyph(tick, ascii)
    }
}

// ── Plain output ──────────────────────────────────────────────────────────────

/// One-line badge for non-TUI output, e.g. "⠋ Viewing /App.jsx".
pub fn plain_badge(invocation: &ToolInvocation, ascii: bool) -> String {
    format!("{} {}", status_glyph(invocation, 0, ascii), invocation.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::{InvocationState, ToolArgs};

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_glyph(0, false), "⠋");
        assert_eq!(spinner_glyph(SPINNER_GLYPHS.len() as u32, false), "⠋");
        assert_eq!(spinner_glyph(1, false), "⠙");
        assert_eq!(spinner_glyph(5, true), "/");
    }

    #[test]
    fn test_plain_badge() {
        let running = ToolInvocation::new(
            "str_replace_editor",
            InvocationState::Call,
            ToolArgs::command("view").with_path("/App.jsx"),
        );
        assert_eq!(plain_badge(&running, false), "⠋ Viewing /App.jsx");

        let done = ToolInvocation::new("str_replace_editor", InvocationState::Result, ToolArgs::command("create"));
        assert_eq!(plain_badge(&done, false), "● Created file");
        assert_eq!(plain_badge(&done, true), "* Created file");
    }

    #[test]
    fn test_partial_call_and_call_share_glyph() {
        let args = ToolArgs::command("create").with_path("/App.jsx");
        let partial = ToolInvocation::new("str_replace_editor", InvocationState::PartialCall, args.clone());
        let call = ToolInvocation::new("str_replace_editor", InvocationState::Call, args);
        for tick in 0..12 {
            assert_eq!(status_glyph(&partial, tick, false), status_glyph(&call, tick, false));
        }
    }
}
