//! Persona identity types.
//!
//! The three personas always speak in the same order: Alpha, Beta, Gamma.
//! `PersonaId` carries that order; the full directive records live in
//! `brainstorm-core`'s persona registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of personas taking part in every round.
pub const PERSONA_COUNT: usize = 3;

/// Identifier of one of the three fixed personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaId {
    /// The humorous skeptic.
    Alpha,
    /// The serious advocate.
    Beta,
    /// The zen synthesizer.
    Gamma,
}

impl PersonaId {
    /// All personas in speaking order.
    pub const ALL: [PersonaId; PERSONA_COUNT] = [PersonaId::Alpha, PersonaId::Beta, PersonaId::Gamma];

    /// Position of this persona in the speaking order (0-based).
    pub fn index(self) -> usize {
        match self {
            PersonaId::Alpha => 0,
            PersonaId::Beta => 1,
            PersonaId::Gamma => 2,
        }
    }

    /// Persona at the given position in the speaking order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Name shown in transcripts and front ends (e.g. "Alpha 🔬").
    pub fn display_name(self) -> &'static str {
        match self {
            PersonaId::Alpha => "Alpha 🔬",
            PersonaId::Beta => "Beta ⚡",
            PersonaId::Gamma => "Gamma 🧠",
        }
    }

    /// Handle used for @-mentions (e.g. "@Alpha").
    pub fn mention(self) -> &'static str {
        match self {
            PersonaId::Alpha => "@Alpha",
            PersonaId::Beta => "@Beta",
            PersonaId::Gamma => "@Gamma",
        }
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonaId::Alpha => write!(f, "alpha"),
            PersonaId::Beta => write!(f, "beta"),
            PersonaId::Gamma => write!(f, "gamma"),
        }
    }
}

impl FromStr for PersonaId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alpha" => Ok(PersonaId::Alpha),
            "beta" => Ok(PersonaId::Beta),
            "gamma" => Ok(PersonaId::Gamma),
            other => Err(format!("invalid persona: '{other}'")),
        }
    }
}

/// Immutable persona record: who speaks, and how.
///
/// Static configuration; there is no mutation and no lifecycle beyond
/// process start.
#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub id: PersonaId,
    /// Role line handed to the model (e.g. "Alpha (The Humorous Skeptic)").
    pub role: &'static str,
    /// What the persona is trying to achieve in the discussion.
    pub goal: &'static str,
    /// Response-style directive.
    pub style: &'static str,
    /// Fixed reply used when running without a model (demo mode).
    pub demo_reply: &'static str,
}

impl Persona {
    /// Name shown in transcripts and front ends.
    pub fn display_name(&self) -> &'static str {
        self.id.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, id) in PersonaId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(PersonaId::from_index(i), Some(*id));
        }
        assert_eq!(PersonaId::from_index(PERSONA_COUNT), None);
    }

    #[test]
    fn test_persona_id_parse() {
        assert_eq!("Beta".parse::<PersonaId>().unwrap(), PersonaId::Beta);
        assert!("delta".parse::<PersonaId>().is_err());
    }

    #[test]
    fn test_persona_id_serde() {
        let json = serde_json::to_string(&PersonaId::Gamma).unwrap();
        assert_eq!(json, "\"gamma\"");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(PersonaId::Alpha.display_name(), "Alpha 🔬");
        assert_eq!(PersonaId::Beta.display_name(), "Beta ⚡");
        assert_eq!(PersonaId::Gamma.display_name(), "Gamma 🧠");
    }
}
