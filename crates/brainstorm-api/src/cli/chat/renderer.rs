//! Terminal rendering of persona replies.
//!
//! Replies are rendered as markdown with `termimad`, under a heading in the
//! persona's accent color and followed by the wall-clock timestamp.

use console::{Style, style};
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use brainstorm_types::persona::PersonaId;
use brainstorm_types::transcript::{Speaker, Transcript};
use brainstorm_types::turn::{PersonaReply, format_timestamp};

/// Markdown renderer for replies.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code.set_fg(Color::Yellow);
        skin.bold.set_fg(Color::White);
        Self { skin }
    }

    /// Render markdown text for the terminal.
    pub fn render_final(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print a persona reply with heading and timestamp.
    pub fn print_reply(&self, reply: &PersonaReply) {
        println!();
        println!("  💬 {}", accent(reply.persona).apply_to(reply.agent()).bold());
        println!("{}", indent(&self.render_final(&reply.text)));
        println!("  {}", style(format!("[{}]", reply.timestamp())).dim());
    }

    /// Print the timestamp acknowledging a human message.
    pub fn print_human_ack(&self, at: chrono::DateTime<chrono::Utc>) {
        println!("  {}", style(format!("[{}]", format_timestamp(at))).dim());
    }

    /// Print the whole transcript (for `/history`).
    pub fn print_history(&self, transcript: &Transcript) {
        println!();
        if let Some(h) = transcript.hypothesis() {
            println!("  {} {}", style("Hypothesis:").bold(), h);
        }
        if transcript.lines().is_empty() {
            println!("  {}", style("No messages yet.").dim());
        }
        for line in transcript.lines() {
            let label = match line.speaker {
                Speaker::Human => style(line.speaker.label()).green().bold().to_string(),
                Speaker::Persona(id) => accent(id).apply_to(line.speaker.label()).bold().to_string(),
            };
            println!(
                "  {} {} {}",
                style(format!("[{}]", format_timestamp(line.spoken_at))).dim(),
                label,
                preview(&line.text, 100)
            );
        }
        println!();
    }

    /// Print a failed turn.
    pub fn print_error(&self, persona: Option<PersonaId>, message: &str) {
        let who = persona.map(|p| p.display_name()).unwrap_or("brainstorm");
        eprintln!(
            "\n  {} {} could not respond: {}",
            style("!").red().bold(),
            who,
            message
        );
    }
}

/// Accent color per persona.
pub fn accent(persona: PersonaId) -> Style {
    match persona {
        PersonaId::Alpha => Style::new().yellow(),
        PersonaId::Beta => Style::new().cyan(),
        PersonaId::Gamma => Style::new().magenta(),
    }
}

fn indent(text: &str) -> String {
    text.trim_end()
        .lines()
        .map(|l| format!("  {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First `max` characters of `text` on one line, with an ellipsis when cut.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("short\nline", 100), "short line");
    }

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        let text = "🧠".repeat(50);
        let out = preview(&text, 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\nb\n"), "  a\n  b");
    }
}
