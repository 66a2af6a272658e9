//! Ratatui widget for a single tool invocation.
//!
//! ```text
//! ╭──────────────────────╮
//! │ ⠋ Viewing /App.jsx   │
//! ╰──────────────────────╯
//! ```
//!
//! The widget holds no state. Spinner animation comes from the tick the
//! caller passes in, so equal inputs always paint equal buffers.
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::BadgeConfig;
use crate::invocation::ToolInvocation;
use crate::ui::status_glyph;

// ── Palette ───────────────────────────────────────────────────────────────────

const BADGE_BG: Color = Color::Rgb(23, 23, 23);
const BADGE_BORDER: Color = Color::Rgb(64, 64, 64);
const MESSAGE_FG: Color = Color::Rgb(212, 212, 212);
const SPINNER_FG: Color = Color::Rgb(37, 99, 235);
const DONE_FG: Color = Color::Rgb(16, 185, 129);

// ── Widget ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ToolInvocationBadge<'a> {
    invocation: &'a ToolInvocation,
    tick: u32,
    border: bool,
    ascii: bool,
}

impl<'a> ToolInvocationBadge<'a> {
    pub fn new(invocation: &'a ToolInvocation) -> Self {
        Self {
            invocation,
            tick: 0,
            border: true,
            ascii: false,
        }
    }

    pub fn from_config(invocation: &'a ToolInvocation, config: &BadgeConfig) -> Self {
        Self::new(invocation).border(config.border).ascii(config.ascii)
    }

    /// Animation frame counter; only affects the spinner.
    pub fn with_tick(mut self, tick: u32) -> Self {
        self.tick = tick;
        self
    }

    pub fn border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    pub fn is_loading(&self) -> bool {
        !self.invocation.is_complete()
    }

    pub fn message(&self) -> String {
        self.invocation.message()
    }

    fn icon(&self) -> Span<'static> {
        let glyph = status_glyph(self.invocation, self.tick, self.ascii);
        let style = if self.is_loading() {
            Style::default().fg(SPINNER_FG).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DONE_FG)
        };
        Span::styled(glyph, style)
    }

    /// Icon and message without chrome, for embedding in lists and paragraphs.
    pub fn line(&self) -> Line<'static> {
        Line::from(vec![
            self.icon(),
            Span::raw(" "),
            Span::styled(self.message(), Style::default().fg(MESSAGE_FG)),
        ])
    }

    /// Line that fits in `max_width` columns, eliding the message tail with "…".
    fn fitted_line(&self, max_width: u16) -> Line<'static> {
        let icon = self.icon();
        let room = (max_width as usize).saturating_sub(icon.content.width() + 1);
        Line::from(vec![
            icon,
            Span::raw(" "),
            Span::styled(
                truncate_to_width(&self.message(), room),
                Style::default().fg(MESSAGE_FG),
            ),
        ])
    }

    /// Columns needed to show the badge without truncation.
    pub fn width(&self) -> u16 {
        let chrome = if self.border { 4 } else { 0 };
        (self.line().width() + chrome).min(u16::MAX as usize) as u16
    }

    pub fn height(&self) -> u16 {
        if self.border { 3 } else { 1 }
    }

    fn block(&self) -> Block<'static> {
        let block = if self.border {
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BADGE_BORDER))
                .padding(Padding::horizontal(1))
        } else {
            Block::default()
        };
        block.style(Style::default().bg(BADGE_BG))
    }
}

impl Widget for &ToolInvocationBadge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let line = self.fitted_line(inner.width);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}

impl Widget for ToolInvocationBadge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self).render(area, buf);
    }
}

// ── Utilities ─────────────────────────────────────────────────────────────────

/// Cut `text` to at most `max` display columns, ending in "…" when cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1; // room for the ellipsis
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
