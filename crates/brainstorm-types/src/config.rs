//! Application configuration types for Brainstormers.
//!
//! `BrainstormConfig` represents the optional `config.toml` plus environment
//! overrides. Every field has a default so an empty file (or no file at all)
//! yields a usable configuration.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderKind;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrainstormConfig {
    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

/// Model endpoint and sampling parameters.
///
/// The API key is never part of this struct; it is resolved separately
/// from the environment (see [`ProviderKind::api_key_var`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Endpoint base URL. Required for Azure; OpenAI defaults to the public API.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Azure API version query parameter.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Model name (the deployment name on Azure).
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f64,
}

fn default_api_version() -> String {
    "2024-08-01-preview".to_string()
}

fn default_model() -> String {
    "gpt-5-chat".to_string()
}

fn default_temperature() -> f64 {
    1.0
}

fn default_max_tokens() -> u32 {
    16_384
}

fn default_top_p() -> f64 {
    1.0
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_base: None,
            api_version: default_api_version(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

/// Shared-secret password gate.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Empty or absent means no password is required.
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = match self.password.as_deref() {
            Some(p) if !p.is_empty() => "Some(***)",
            _ => "None",
        };
        write!(f, "AuthSettings {{ password: {shown} }}")
    }
}

/// Web server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Sessions idle longer than this are dropped.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    /// How often the idle-session sweep runs.
    #[serde(default = "default_prune_interval_secs")]
    pub prune_interval_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_session_idle_secs() -> u64 {
    3_600
}

fn default_prune_interval_secs() -> u64 {
    300
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_secs: default_session_idle_secs(),
            prune_interval_secs: default_prune_interval_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = BrainstormConfig::default();
        assert_eq!(config.llm.provider, ProviderKind::Azure);
        assert_eq!(config.llm.model, "gpt-5-chat");
        assert_eq!(config.llm.api_version, "2024-08-01-preview");
        assert_eq!(config.llm.max_tokens, 16_384);
        assert!((config.llm.temperature - 1.0).abs() < f64::EPSILON);
        assert!((config.llm.top_p - 1.0).abs() < f64::EPSILON);
        assert!(config.auth.password.is_none());
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_deserialize_empty_toml() {
        let config: BrainstormConfig = toml::from_str("").unwrap();
        assert_eq!(config.llm.model, "gpt-5-chat");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let toml_str = r#"
[llm]
provider = "openai"
model = "gpt-4o"
temperature = 0.4

[server]
port = 9000
"#;
        let config: BrainstormConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.provider, ProviderKind::OpenAi);
        assert_eq!(config.llm.model, "gpt-4o");
        assert!((config.llm.temperature - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.llm.max_tokens, 16_384);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.session_idle_secs, 3_600);
    }

    #[test]
    fn test_auth_debug_redacts_password() {
        let auth = AuthSettings {
            password: Some("hunter2".to_string()),
        };
        let shown = format!("{auth:?}");
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("***"));
    }
}
