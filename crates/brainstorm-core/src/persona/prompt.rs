//! Prompt assembly for persona turns.
//!
//! A persona turn is a two-message exchange: the system prompt carries the
//! persona's role, goal and style; the user message carries the rendered
//! transcript and the conversation instructions.

use brainstorm_types::persona::Persona;

/// How long persona replies should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyLength {
    /// Terminal and desktop shells: room for a fuller answer.
    #[default]
    Conversational,
    /// Web display: keep it tight.
    Compact,
}

impl ReplyLength {
    fn instruction(self) -> &'static str {
        match self {
            ReplyLength::Conversational => {
                "Keep it conversational but intellectually substantive (3-4 sentences max)"
            }
            ReplyLength::Compact => {
                "Keep it conversational but intellectually substantive (2-3 sentences max for web display)"
            }
        }
    }
}

/// Build the system prompt for a persona.
pub fn build_system_prompt(persona: &Persona) -> String {
    format!(
        "You are {role}.\n\nGoal: {goal}\n\n{style}",
        role = persona.role,
        goal = persona.goal,
        style = persona.style,
    )
}

/// Build the per-turn task prompt from the rendered transcript.
pub fn build_task_prompt(transcript: &str, length: ReplyLength) -> String {
    format!(
        "Conversation history: {transcript}\n\n\
         Instructions:\n\
         - Provide a scientifically rigorous response based on your role\n\
         - Use first principles thinking and expertise across all sciences\n\
         - You can mention other agents with @Alpha, @Beta, @Gamma or the human with @You\n\
         - If someone mentioned you specifically with @, acknowledge and respond to them\n\
         - {length}\n\
         - Agents can challenge each other directly!",
        length = length.instruction(),
    )
}
