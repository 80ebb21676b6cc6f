//! Brainstorm service: runs persona turns against a session.
//!
//! Every front end goes through `BrainstormService`. The terminal and
//! desktop shells call `take_turn` until the round closes; the web handler
//! calls `submit` once per request.

use brainstorm_types::error::BrainstormError;
use brainstorm_types::turn::{PersonaReply, Submission};
use tracing::{debug, warn};

use super::responder::Responder;
use super::session::BrainstormSession;
use crate::persona::registry::persona;

/// Drives persona turns. Generic over the responder so tests need no network.
pub struct BrainstormService<R: Responder> {
    responder: R,
}

impl<R: Responder> BrainstormService<R> {
    pub fn new(responder: R) -> Self {
        Self { responder }
    }

    pub fn responder(&self) -> &R {
        &self.responder
    }

    /// Let the persona that is due speak once.
    ///
    /// On failure the transcript and sequencer are left untouched, so the
    /// same persona is asked again next time.
    pub async fn take_turn(
        &self,
        session: &mut BrainstormSession,
    ) -> Result<PersonaReply, BrainstormError> {
        let Some(id) = session.next_persona() else {
            return Err(BrainstormError::RoundComplete);
        };
        let speaker = persona(id);

        let text = match self.responder.respond(speaker, session.transcript()).await {
            Ok(text) => text,
            Err(e) => {
                warn!(session_id = %session.id(), persona = %id, error = %e, "persona turn failed");
                return Err(e.into());
            }
        };

        let spoken_at = session.transcript_mut().push_persona(id, text.clone());
        let position = session
            .sequencer_mut()
            .advance()
            .ok_or(BrainstormError::RoundComplete)?;
        session.touch();

        debug!(
            session_id = %session.id(),
            persona = %id,
            round_complete = position.round_complete,
            "turn taken"
        );

        Ok(PersonaReply {
            persona: id,
            text,
            spoken_at,
            position,
        })
    }

    /// Apply a submission (reset, hypothesis, message) and take one turn.
    pub async fn submit(
        &self,
        session: &mut BrainstormSession,
        submission: Submission,
    ) -> Result<PersonaReply, BrainstormError> {
        session.apply_submission(submission);
        self.take_turn(session).await
    }
}
