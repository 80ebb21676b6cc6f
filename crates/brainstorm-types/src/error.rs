use thiserror::Error;

use crate::llm::LlmError;

/// Errors from taking a persona turn.
#[derive(Debug, Error)]
pub enum BrainstormError {
    /// All three personas have replied; a human message must open the next round.
    #[error("All agents have responded. Send a new message to continue.")]
    RoundComplete,

    /// The model call for the current persona failed.
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(String),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_complete_display() {
        let err = BrainstormError::RoundComplete;
        assert_eq!(
            err.to_string(),
            "All agents have responded. Send a new message to continue."
        );
    }

    #[test]
    fn test_llm_error_is_transparent() {
        let err: BrainstormError = LlmError::AuthenticationFailed.into();
        assert_eq!(err.to_string(), "authentication failed");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Missing("AZURE_OPENAI_API_KEY".to_string());
        assert_eq!(err.to_string(), "AZURE_OPENAI_API_KEY is not set");
        let err = ConfigError::Invalid {
            key: "PORT".to_string(),
            message: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for PORT: not a number");
    }
}
