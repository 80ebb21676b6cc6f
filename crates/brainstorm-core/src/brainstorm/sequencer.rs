//! Turn sequencer.
//!
//! Walks the personas 0 -> 1 -> 2 once per round. A human message (or a
//! hypothesis reset) opens a new round at index 0; after the third reply
//! the round is closed until the next human message.

use brainstorm_types::persona::{PersonaId, PERSONA_COUNT};
use brainstorm_types::turn::TurnPosition;

/// Tracks which persona speaks next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSequencer {
    index: usize,
    round_open: bool,
}

impl Default for TurnSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnSequencer {
    /// A fresh sequencer has an open round at index 0.
    pub fn new() -> Self {
        Self {
            index: 0,
            round_open: true,
        }
    }

    /// Current index in `{0, 1, 2}`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether a persona is still due to speak in this round.
    pub fn is_round_open(&self) -> bool {
        self.round_open
    }

    /// Persona due next, or `None` once all three have spoken.
    pub fn current(&self) -> Option<PersonaId> {
        if self.round_open {
            PersonaId::from_index(self.index)
        } else {
            None
        }
    }

    /// A human message was appended: restart the round at persona 0.
    pub fn human_spoke(&mut self) {
        self.index = 0;
        self.round_open = true;
    }

    /// The conversation was reset (new hypothesis).
    pub fn reset(&mut self) {
        self.human_spoke();
    }

    /// Record that the current persona has spoken and move on.
    ///
    /// Returns `None` (and changes nothing) when the round is already closed.
    pub fn advance(&mut self) -> Option<TurnPosition> {
        if !self.round_open {
            return None;
        }

        let spoke = self.index;
        let round_complete = spoke + 1 >= PERSONA_COUNT;
        self.index = (spoke + 1) % PERSONA_COUNT;
        if round_complete {
            self.round_open = false;
        }

        Some(TurnPosition {
            index: spoke,
            next_agent_index: spoke + 1,
            round_complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sequencer_starts_with_alpha() {
        let seq = TurnSequencer::new();
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.current(), Some(PersonaId::Alpha));
    }

    #[test]
    fn test_cycles_once_per_human_message() {
        let mut seq = TurnSequencer::new();
        seq.human_spoke();

        let order: Vec<usize> = (0..3).map(|_| seq.advance().unwrap().index).collect();
        assert_eq!(order, vec![0, 1, 2]);

        // Index wrapped back to 0, but nobody speaks until the human does.
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.current(), None);
        assert_eq!(seq.advance(), None);
    }

    #[test]
    fn test_human_message_resets_from_any_position() {
        for steps in 0..=3 {
            let mut seq = TurnSequencer::new();
            for _ in 0..steps {
                seq.advance();
            }
            seq.human_spoke();
            assert_eq!(seq.index(), 0);
            assert_eq!(seq.current(), Some(PersonaId::Alpha));
        }
    }

    #[test]
    fn test_third_turn_completes_round() {
        let mut seq = TurnSequencer::new();
        let first = seq.advance().unwrap();
        let second = seq.advance().unwrap();
        let third = seq.advance().unwrap();

        assert!(!first.round_complete);
        assert!(!second.round_complete);
        assert!(third.round_complete);
        assert_eq!(
            [first.next_agent_index, second.next_agent_index, third.next_agent_index],
            [1, 2, 3]
        );
    }

    #[test]
    fn test_closed_round_advance_is_noop() {
        let mut seq = TurnSequencer::new();
        for _ in 0..3 {
            seq.advance();
        }
        let before = seq.clone();
        assert_eq!(seq.advance(), None);
        assert_eq!(seq, before);
    }
}
