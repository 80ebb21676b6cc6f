//! API key resolution from the environment.

use brainstorm_types::llm::ProviderKind;
use secrecy::SecretString;

/// Read the API key for `kind` from the process environment.
pub fn api_key_from_env(kind: ProviderKind) -> Option<SecretString> {
    api_key_with(kind, |key| std::env::var(key).ok())
}

/// Read the API key for `kind` via `lookup`. Blank values count as missing.
pub fn api_key_with<F>(kind: ProviderKind, lookup: F) -> Option<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(kind.api_key_var())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}

/// Whether a variable name looks like it holds a secret.
pub fn is_secret_var(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("key") || lower.contains("password") || lower.contains("secret")
}

/// Value as shown in diagnostics: secrets are hidden entirely.
pub fn display_value(name: &str, value: &str) -> String {
    if is_secret_var(name) {
        "***hidden***".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn reads_provider_specific_var() {
        let lookup = |key: &str| match key {
            "AZURE_OPENAI_API_KEY" => Some(" az-key ".to_string()),
            "OPENAI_API_KEY" => Some("oa-key".to_string()),
            _ => None,
        };
        let azure = api_key_with(ProviderKind::Azure, lookup).unwrap();
        assert_eq!(azure.expose_secret(), "az-key");
        let openai = api_key_with(ProviderKind::OpenAi, lookup).unwrap();
        assert_eq!(openai.expose_secret(), "oa-key");
    }

    #[test]
    fn blank_key_is_missing() {
        assert!(api_key_with(ProviderKind::Azure, |_| Some("  ".to_string())).is_none());
        assert!(api_key_with(ProviderKind::Azure, |_| None).is_none());
    }

    #[test]
    fn secrets_are_hidden() {
        assert_eq!(display_value("AZURE_OPENAI_API_KEY", "abc"), "***hidden***");
        assert_eq!(display_value("APP_PASSWORD", "abc"), "***hidden***");
        assert_eq!(display_value("AZURE_MODEL_NAME", "gpt-5-chat"), "gpt-5-chat");
    }
}
