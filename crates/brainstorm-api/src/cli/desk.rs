//! Full-screen brainstorming desk.
//!
//! A ratatui shell around the same round logic as `chat`. Each round runs
//! on a spawned task that sends [`RoundEvent`]s back over a channel, so the
//! screen keeps redrawing while the personas think. Input is locked until
//! the round finishes.
//!
//! Layout:
//! - Header: hypothesis and backend
//! - Body: conversation (scrollable)
//! - Input line
//! - Footer: key hints
//!
//! Keybindings: Enter send, Esc/Ctrl+C quit, Up/Down/PgUp/PgDn scroll.
//! Typing `exit` also quits.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::ExecutableCommand;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::{Mutex, mpsc};

use brainstorm_core::brainstorm::session::BrainstormSession;
use brainstorm_types::error::BrainstormError;
use brainstorm_types::persona::PersonaId;
use brainstorm_types::transcript::HUMAN_LABEL;
use brainstorm_types::turn::{PersonaReply, format_timestamp};

use crate::cli::chat::loop_runner::ask_hypothesis;
use crate::state::ConcreteBrainstormService;

// ---------------------------------------------------------------------------
// Round task
// ---------------------------------------------------------------------------

/// Progress of a round, sent from the worker task to the UI.
#[derive(Debug)]
pub enum RoundEvent {
    Thinking(PersonaId),
    Reply(PersonaReply),
    Failed { persona: PersonaId, message: String },
    Finished,
}

/// Record the human message and run the round on a background task.
fn spawn_round(
    service: Arc<ConcreteBrainstormService>,
    session: Arc<Mutex<BrainstormSession>>,
    message: String,
    tx: mpsc::UnboundedSender<RoundEvent>,
) {
    tokio::spawn(async move {
        let mut session = session.lock().await;
        session.push_human(&message);

        while let Some(persona) = session.next_persona() {
            let _ = tx.send(RoundEvent::Thinking(persona));
            match service.take_turn(&mut session).await {
                Ok(reply) => {
                    if tx.send(RoundEvent::Reply(reply)).is_err() {
                        return;
                    }
                }
                Err(BrainstormError::RoundComplete) => break,
                Err(e) => {
                    let _ = tx.send(RoundEvent::Failed {
                        persona,
                        message: e.to_string(),
                    });
                    break;
                }
            }
        }

        let _ = tx.send(RoundEvent::Finished);
    });
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum EntryKind {
    Notice,
    Human,
    Persona(PersonaId),
    Error,
}

#[derive(Debug, Clone)]
struct Entry {
    kind: EntryKind,
    text: String,
    time: Option<String>,
}

/// Everything the screen shows.
struct DeskState {
    hypothesis: String,
    backend: String,
    entries: Vec<Entry>,
    input: String,
    busy: bool,
    thinking: Option<PersonaId>,
    /// Lines scrolled up from the bottom (0 = follow newest).
    scroll_back: u16,
    quit: bool,
}

impl DeskState {
    fn new(hypothesis: String, backend: String) -> Self {
        let entries = vec![
            notice(format!("💭 Group Chat: Brainstorming '{hypothesis}'")),
            notice("📝 Use @Alpha, @Beta, @Gamma to mention specific agents. They can mention each other and @You too!"),
            notice("🔄 Flow: You message → Alpha responds → Beta responds → Gamma responds"),
        ];
        Self {
            hypothesis,
            backend,
            entries,
            input: String::new(),
            busy: false,
            thinking: None,
            scroll_back: 0,
            quit: false,
        }
    }

    /// Take the typed line. Returns a message to send, if any.
    fn submit(&mut self) -> Option<String> {
        if self.busy {
            return None;
        }
        let message = self.input.trim().to_string();
        self.input.clear();
        if message.is_empty() {
            return None;
        }
        if message.eq_ignore_ascii_case("exit") {
            self.entries.push(notice("👋 Left the chat"));
            self.quit = true;
            return None;
        }

        self.entries.push(Entry {
            kind: EntryKind::Human,
            text: message.clone(),
            time: Some(format_timestamp(chrono::Utc::now())),
        });
        self.busy = true;
        self.scroll_back = 0;
        Some(message)
    }

    fn apply(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::Thinking(persona) => self.thinking = Some(persona),
            RoundEvent::Reply(reply) => {
                self.entries.push(Entry {
                    kind: EntryKind::Persona(reply.persona),
                    time: Some(reply.timestamp()),
                    text: reply.text,
                });
                self.scroll_back = 0;
            }
            RoundEvent::Failed { persona, message } => {
                self.entries.push(Entry {
                    kind: EntryKind::Error,
                    text: format!("Error: {} could not respond: {message}", persona.display_name()),
                    time: None,
                });
            }
            RoundEvent::Finished => {
                self.busy = false;
                self.thinking = None;
                self.entries.push(notice("──────────"));
            }
        }
    }
}

fn notice(text: impl Into<String>) -> Entry {
    Entry {
        kind: EntryKind::Notice,
        text: text.into(),
        time: None,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run the desk until the user quits.
pub async fn run_desk(
    service: Arc<ConcreteBrainstormService>,
    hypothesis: Option<String>,
) -> Result<()> {
    let hypothesis = match hypothesis.filter(|h| !h.trim().is_empty()) {
        Some(h) => h,
        None => ask_hypothesis()?,
    };

    let session = Arc::new(Mutex::new(BrainstormSession::new(Some(hypothesis.clone()))));
    let mut state = DeskState::new(hypothesis, service.responder().describe());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut guard = TerminalGuard::enter()?;

    let result = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| {
            run_tui_loop(&mut terminal, &mut state, |message| {
                spawn_round(Arc::clone(&service), Arc::clone(&session), message, tx.clone());
            }, &mut rx)
        });

    settle(result, guard.restore())
}

// ---------------------------------------------------------------------------
// Terminal setup
// ---------------------------------------------------------------------------

/// Raw mode plus the alternate screen, undone on drop.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on, dropping the guard restores the terminal.
        let guard = Self { active: true };
        io::stdout().execute(EnterAlternateScreen)?;
        Ok(guard)
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let raw = disable_raw_mode();
        let screen = io::stdout().execute(LeaveAlternateScreen).map(|_| ());
        raw.and(screen)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// The loop's own error wins over a failure to restore the terminal.
fn settle(run: Result<()>, restored: io::Result<()>) -> Result<()> {
    match (run, restored) {
        (Err(e), Err(restore_err)) => {
            tracing::warn!(error = %restore_err, "failed to restore terminal");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => restored.map_err(Into::into),
    }
}

// ---------------------------------------------------------------------------
// TUI loop
// ---------------------------------------------------------------------------

fn run_tui_loop<F>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut DeskState,
    mut send: F,
    rx: &mut mpsc::UnboundedReceiver<RoundEvent>,
) -> Result<()>
where
    F: FnMut(String),
{
    loop {
        while let Ok(event) = rx.try_recv() {
            state.apply(event);
        }

        terminal.draw(|frame| draw(frame, state))?;

        if state.quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(message) = handle_key(key, state) {
                    send(message);
                }
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Key handling
// ---------------------------------------------------------------------------

fn handle_key(key: KeyEvent, state: &mut DeskState) -> Option<String> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.quit = true;
            None
        }
        KeyCode::Esc => {
            state.quit = true;
            None
        }
        KeyCode::Enter => state.submit(),
        KeyCode::Backspace => {
            if !state.busy {
                state.input.pop();
            }
            None
        }
        KeyCode::Char(c) => {
            if !state.busy {
                state.input.push(c);
            }
            None
        }
        KeyCode::Up => {
            state.scroll_back = state.scroll_back.saturating_add(1);
            None
        }
        KeyCode::Down => {
            state.scroll_back = state.scroll_back.saturating_sub(1);
            None
        }
        KeyCode::PageUp => {
            state.scroll_back = state.scroll_back.saturating_add(10);
            None
        }
        KeyCode::PageDown => {
            state.scroll_back = state.scroll_back.saturating_sub(10);
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &DeskState) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // conversation
            Constraint::Length(3), // input
            Constraint::Length(1), // footer
        ])
        .split(area);

    draw_header(frame, main_layout[0], state);
    draw_conversation(frame, main_layout[1], state);
    draw_input(frame, main_layout[2], state);
    draw_footer(frame, main_layout[3]);
}

fn persona_color(persona: PersonaId) -> Color {
    match persona {
        PersonaId::Alpha => Color::Yellow,
        PersonaId::Beta => Color::Cyan,
        PersonaId::Gamma => Color::Magenta,
    }
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DeskState) {
    let title = format!(" 🧠 Brainstorm  |  {}  |  {} ", state.hypothesis, state.backend);
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, area);
}

fn conversation_lines(state: &DeskState) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for entry in &state.entries {
        match &entry.kind {
            EntryKind::Notice => {
                lines.push(Line::from(Span::styled(
                    entry.text.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            EntryKind::Error => {
                lines.push(Line::from(Span::styled(
                    entry.text.clone(),
                    Style::default().fg(Color::Red),
                )));
            }
            EntryKind::Human | EntryKind::Persona(_) => {
                let (label, color) = match entry.kind {
                    EntryKind::Persona(p) => (p.display_name(), persona_color(p)),
                    _ => (HUMAN_LABEL, Color::Green),
                };
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("💬 {label}"),
                    Style::default().fg(color).bold(),
                )));
                for text_line in entry.text.lines() {
                    lines.push(Line::from(text_line.to_string()));
                }
                if let Some(ref time) = entry.time {
                    lines.push(Line::from(Span::styled(
                        format!("[{time}]"),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }
    }

    if let Some(persona) = state.thinking {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} is thinking...", persona.display_name()),
            Style::default().fg(persona_color(persona)).italic(),
        )));
    }

    lines
}

/// Rows the lines occupy once wrapped to `width` columns.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn draw_conversation(frame: &mut Frame, area: Rect, state: &DeskState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Conversation ");
    let inner = block.inner(area);

    let lines = conversation_lines(state);
    let total = wrapped_height(&lines, inner.width);
    let bottom = total.saturating_sub(inner.height);
    let offset = bottom.saturating_sub(state.scroll_back);

    let body = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(block);
    frame.render_widget(body, area);
}

fn draw_input(frame: &mut Frame, area: Rect, state: &DeskState) {
    let (title, style) = match (state.busy, state.thinking) {
        (true, Some(p)) => (
            format!(" Waiting for {}... ", p.display_name()),
            Style::default().fg(Color::DarkGray),
        ),
        (true, None) => (" Waiting... ".to_string(), Style::default().fg(Color::DarkGray)),
        (false, _) => (" 💬 You ".to_string(), Style::default().fg(Color::Green)),
    };

    let input = Paragraph::new(format!("{}_", state.input))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(title),
        );
    frame.render_widget(input, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let help = " Enter send | Esc quit | ↑/↓ PgUp/PgDn scroll | type 'exit' to leave ";
    let footer = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}
