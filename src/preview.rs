/// Interactive preview: every invocation drawn as a badge, spinner animated.
///
/// Architecture mirrors a chat host in miniature:
///   ticker:     drives the spinner frame (the widget itself keeps no clock)
///   key events: Space advances in-progress invocations one lifecycle step,
///               q / Esc / Ctrl-C quit
use std::io;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tracing::{debug, info};

use crate::badge::ToolInvocationBadge;
use crate::config::BadgeConfig;
use crate::invocation::ToolInvocation;

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PreviewState {
    pub invocations: Vec<ToolInvocation>,
    pub spinner_tick: u32,
}

impl PreviewState {
    pub fn new(invocations: Vec<ToolInvocation>) -> Self {
        Self {
            invocations,
            spinner_tick: 0,
        }
    }

    pub fn any_loading(&self) -> bool {
        self.invocations.iter().any(|i| !i.is_complete())
    }

    /// Step every unfinished invocation forward; returns how many moved.
    pub fn advance_all(&mut self) -> usize {
        let mut moved = 0;
        for inv in self.invocations.iter_mut().filter(|i| !i.is_complete()) {
            inv.advance();
            moved += 1;
            debug!(id = %inv.tool_call_id, state = inv.state.as_str(), "advanced invocation");
        }
        moved
    }
}

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Advance,
    Ignore,
}

pub fn key_action(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(' ') => KeyAction::Advance,
        _ => KeyAction::Ignore,
    }
}

/// What the loop does after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Quit,
    Redraw,
    Idle,
}

/// Apply one terminal event to the preview state.
pub fn handle_event(state: &mut PreviewState, ev: Event) -> Flow {
    match ev {
        Event::Key(key) => match key_action(key) {
            KeyAction::Quit => Flow::Quit,
            KeyAction::Advance => {
                state.advance_all();
                Flow::Redraw
            }
            KeyAction::Ignore => Flow::Idle,
        },
        // badge slots depend on the frame size
        Event::Resize(_, _) => Flow::Redraw,
        _ => Flow::Idle,
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, state: &PreviewState, config: &BadgeConfig) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(Color::Rgb(8, 8, 14))),
        area,
    );
    if area.height == 0 {
        return;
    }

    let done = state.invocations.iter().filter(|i| i.is_complete()).count();
    let header = Line::from(vec![
        Span::styled(" tool-badge", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {done}/{} complete", state.invocations.len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("  Space", Style::default().fg(Color::Rgb(200, 160, 30))),
        Span::styled(" advance  ", Style::default().fg(Color::Rgb(80, 75, 50))),
        Span::styled("q", Style::default().fg(Color::Rgb(200, 160, 30))),
        Span::styled(" quit", Style::default().fg(Color::Rgb(80, 75, 50))),
    ]);
    f.render_widget(Paragraph::new(header), Rect { height: 1, ..area });

    let mut y = area.y + 2;
    let bottom = area.y + area.height;
    for inv in &state.invocations {
        let badge = ToolInvocationBadge::from_config(inv, config).with_tick(state.spinner_tick);
        let height = badge.height();
        if y + height > bottom {
            break;
        }
        let slot = Rect {
            x: area.x + 2,
            y,
            width: badge.width().min(area.width.saturating_sub(2)),
            height,
        };
        f.render_widget(&badge, slot);
        y += height;
    }
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}

// ── Run loop ──────────────────────────────────────────────────────────────────

pub async fn run(invocations: Vec<ToolInvocation>, config: BadgeConfig) -> Result<()> {
    // Restore the terminal even if something panics mid-draw
    let orig_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        orig_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, PreviewState::new(invocations), &config).await;
    restore_terminal(&mut terminal);
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state: PreviewState,
    config: &BadgeConfig,
) -> Result<()> {
    info!(count = state.invocations.len(), "preview started");
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(config.tick_interval());

    terminal.draw(|f| draw(f, &state, config))?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if state.any_loading() {
                    state.spinner_tick = state.spinner_tick.wrapping_add(1);
                    terminal.draw(|f| draw(f, &state, config))?;
                }
            }

            maybe_ev = events.next() => {
                let Some(ev) = maybe_ev else { break };
                match handle_event(&mut state, ev?) {
                    Flow::Quit => break,
                    Flow::Redraw => {
                        terminal.draw(|f| draw(f, &state, config))?;
                    }
                    Flow::Idle => {}
                }
            }
        }
    }

    info!("preview closed");
    Ok(())
}
