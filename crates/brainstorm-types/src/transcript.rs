//! Conversation transcript types.
//!
//! A transcript is the optional hypothesis header plus an append-only list
//! of speaker-tagged lines. Its rendered form is the context handed to
//! every persona call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::persona::PersonaId;

/// Label used for the human participant.
pub const HUMAN_LABEL: &str = "You";

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "persona", rename_all = "lowercase")]
pub enum Speaker {
    Human,
    Persona(PersonaId),
}

impl Speaker {
    /// Label printed before the line text ("You" or the persona display name).
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Human => HUMAN_LABEL,
            Speaker::Persona(id) => id.display_name(),
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single line of the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub speaker: Speaker,
    pub text: String,
    pub spoken_at: DateTime<Utc>,
}

/// Ordered log of the conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    hypothesis: Option<String>,
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    /// Start a transcript, optionally headed by a hypothesis.
    ///
    /// Blank hypotheses are treated as absent.
    pub fn new(hypothesis: Option<String>) -> Self {
        Self {
            hypothesis: hypothesis.filter(|h| !h.trim().is_empty()),
            lines: Vec::new(),
        }
    }

    pub fn hypothesis(&self) -> Option<&str> {
        self.hypothesis.as_deref()
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    /// Number of spoken lines (the hypothesis header is not counted).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when there is neither a hypothesis nor any spoken line.
    pub fn is_empty(&self) -> bool {
        self.hypothesis.is_none() && self.lines.is_empty()
    }

    /// Append a line from the human participant.
    pub fn push_human(&mut self, text: impl Into<String>) {
        self.push(Speaker::Human, text.into());
    }

    /// Append a line spoken by a persona. Returns when it was recorded.
    pub fn push_persona(&mut self, persona: PersonaId, text: impl Into<String>) -> DateTime<Utc> {
        self.push(Speaker::Persona(persona), text.into())
    }

    fn push(&mut self, speaker: Speaker, text: String) -> DateTime<Utc> {
        let spoken_at = Utc::now();
        self.lines.push(TranscriptLine {
            speaker,
            text,
            spoken_at,
        });
        spoken_at
    }

    /// Render the transcript as LLM context.
    ///
    /// Format: `Hypothesis: <h>` (when set) followed by one
    /// `<label>: <text>` line per entry, joined with newlines.
    pub fn render(&self) -> String {
        let mut out: Vec<String> = Vec::with_capacity(self.lines.len() + 1);
        if let Some(ref h) = self.hypothesis {
            out.push(format!("Hypothesis: {h}"));
        }
        for line in &self.lines {
            out.push(format!("{}: {}", line.speaker.label(), line.text));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_hypothesis() {
        let mut t = Transcript::new(Some("Cold fusion works".to_string()));
        t.push_human("Convince me.");
        t.push_persona(PersonaId::Alpha, "Thermodynamics called.");
        assert_eq!(
            t.render(),
            "Hypothesis: Cold fusion works\nYou: Convince me.\nAlpha 🔬: Thermodynamics called."
        );
    }

    #[test]
    fn test_blank_hypothesis_is_absent() {
        let t = Transcript::new(Some("   ".to_string()));
        assert!(t.hypothesis().is_none());
        assert!(t.is_empty());
        assert_eq!(t.render(), "");
    }

    #[test]
    fn test_len_excludes_hypothesis() {
        let mut t = Transcript::new(Some("x".to_string()));
        assert_eq!(t.len(), 0);
        assert!(!t.is_empty());
        t.push_human("hi");
        assert_eq!(t.len(), 1);
        assert_eq!(t.lines()[0].speaker, Speaker::Human);
    }

    #[test]
    fn test_speaker_serde() {
        let json = serde_json::to_string(&Speaker::Persona(PersonaId::Beta)).unwrap();
        assert_eq!(json, r#"{"kind":"persona","persona":"beta"}"#);
        let human = serde_json::to_string(&Speaker::Human).unwrap();
        assert_eq!(human, r#"{"kind":"human"}"#);
    }
}
