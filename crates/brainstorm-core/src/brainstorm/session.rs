//! One brainstorming conversation: transcript plus turn sequencer.

use brainstorm_types::persona::PersonaId;
use brainstorm_types::transcript::Transcript;
use brainstorm_types::turn::Submission;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::sequencer::TurnSequencer;

/// State of a single conversation.
///
/// Terminal and desktop front ends own one of these directly; the web
/// server keeps them in a [`super::store::SessionStore`].
#[derive(Debug, Clone)]
pub struct BrainstormSession {
    id: Uuid,
    transcript: Transcript,
    sequencer: TurnSequencer,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl Default for BrainstormSession {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BrainstormSession {
    /// Start a session, optionally headed by a hypothesis.
    pub fn new(hypothesis: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4(), hypothesis)
    }

    pub(crate) fn with_id(id: Uuid, hypothesis: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            transcript: Transcript::new(hypothesis),
            sequencer: TurnSequencer::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn sequencer(&self) -> &TurnSequencer {
        &self.sequencer
    }

    pub(crate) fn sequencer_mut(&mut self) -> &mut TurnSequencer {
        &mut self.sequencer
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// Persona due next, if the round is still open.
    pub fn next_persona(&self) -> Option<PersonaId> {
        self.sequencer.current()
    }

    /// Whether a persona still has to speak in the current round.
    pub fn has_pending_turn(&self) -> bool {
        self.sequencer.current().is_some()
    }

    /// Replace the transcript with a fresh one and restart the round.
    pub fn reset(&mut self, hypothesis: Option<String>) {
        self.transcript = Transcript::new(hypothesis);
        self.sequencer.reset();
        self.touch();
    }

    /// Append a human message and restart the round at Alpha.
    ///
    /// Blank messages are ignored; returns whether the message was recorded.
    pub fn push_human(&mut self, message: &str) -> bool {
        let message = message.trim();
        if message.is_empty() {
            return false;
        }
        self.transcript.push_human(message);
        self.sequencer.human_spoke();
        self.touch();
        true
    }

    /// Apply what the human sent before the next persona turn.
    ///
    /// A reset (or a hypothesis arriving on an empty transcript) replaces
    /// the transcript; a non-empty message is then appended.
    pub fn apply_submission(&mut self, submission: Submission) {
        let hypothesis = submission
            .hypothesis
            .filter(|h| !h.trim().is_empty());

        if submission.reset || (hypothesis.is_some() && self.transcript.is_empty()) {
            self.reset(hypothesis);
        }

        if let Some(message) = submission.message.as_deref() {
            self.push_human(message);
        }
    }
}
