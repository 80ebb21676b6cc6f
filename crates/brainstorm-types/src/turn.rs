//! Turn-level types shared by the sequencer, the service, and front ends.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::persona::PersonaId;

/// Format used for the short wall-clock timestamps shown next to messages.
pub const TIMESTAMP_FORMAT: &str = "%I:%M %p";

/// Where the sequencer stands after a persona has spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPosition {
    /// Index (0..3) of the persona that just spoke.
    pub index: usize,
    /// `index + 1`, reported to web clients as the position reached.
    pub next_agent_index: usize,
    /// True once the third persona of the round has spoken.
    pub round_complete: bool,
}

/// One persona reply, as handed to front ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaReply {
    pub persona: PersonaId,
    pub text: String,
    pub spoken_at: DateTime<Utc>,
    pub position: TurnPosition,
}

impl PersonaReply {
    /// Display name of the persona that produced this reply.
    pub fn agent(&self) -> &'static str {
        self.persona.display_name()
    }

    /// Local wall-clock time of the reply, e.g. "03:41 PM".
    pub fn timestamp(&self) -> String {
        format_timestamp(self.spoken_at)
    }
}

/// Format a UTC instant as a short local wall-clock time.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// A front-end submission: what the human sent along with this turn.
///
/// Mirrors the web request body; terminal front ends fill only `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub hypothesis: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reset: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = format_timestamp(Utc::now());
        // "hh:mm AM" / "hh:mm PM"
        assert_eq!(ts.len(), 8);
        assert!(ts.ends_with("AM") || ts.ends_with("PM"));
    }

    #[test]
    fn test_submission_defaults() {
        let sub: Submission = serde_json::from_str("{}").unwrap();
        assert!(sub.hypothesis.is_none());
        assert!(sub.message.is_none());
        assert!(!sub.reset);
    }

    #[test]
    fn test_reply_agent_name() {
        let reply = PersonaReply {
            persona: PersonaId::Gamma,
            text: "Like the river...".to_string(),
            spoken_at: Utc::now(),
            position: TurnPosition {
                index: 2,
                next_agent_index: 3,
                round_complete: true,
            },
        };
        assert_eq!(reply.agent(), "Gamma 🧠");
    }
}
