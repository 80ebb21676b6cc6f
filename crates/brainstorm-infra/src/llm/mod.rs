//! LLM provider implementations.
//!
//! [`create_provider`] builds the right provider from [`LlmSettings`] and a
//! resolved API key; [`test_provider_connection`] sends a minimal request to
//! verify the endpoint and key.

pub mod openai_compat;

use secrecy::SecretString;

use brainstorm_core::llm::box_provider::BoxLlmProvider;
use brainstorm_types::config::LlmSettings;
use brainstorm_types::llm::{CompletionRequest, LlmError, Message, MessageRole, ProviderKind};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{azure_defaults, openai_defaults};

/// Create a [`BoxLlmProvider`] from the configured settings.
///
/// # Errors
///
/// `InvalidRequest` if the Azure provider has no API base configured.
pub fn create_provider(
    settings: &LlmSettings,
    api_key: SecretString,
) -> Result<BoxLlmProvider, LlmError> {
    let config = match settings.provider {
        ProviderKind::Azure => {
            let base = settings
                .api_base
                .as_deref()
                .filter(|b| !b.trim().is_empty())
                .ok_or_else(|| LlmError::InvalidRequest("AZURE_API_BASE is not set".to_string()))?;
            azure_defaults(api_key, base, &settings.api_version, &settings.model)
        }
        ProviderKind::OpenAi => openai_defaults(api_key, settings.api_base.as_deref(), &settings.model),
    };

    tracing::debug!(provider = %settings.provider, model = %settings.model, "created LLM provider");
    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(config)))
}

/// Test provider connectivity by sending a minimal completion request.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(), // Provider uses its configured default
        messages: vec![Message {
            role: MessageRole::User,
            content: "Hello".to_string(),
        }],
        system: None,
        max_tokens: 10,
        temperature: None,
        top_p: None,
    };
    provider.complete(&request).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_azure() {
        let settings = LlmSettings {
            api_base: Some("https://res.openai.azure.com".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&settings, SecretString::from("k")).unwrap();
        assert_eq!(provider.name(), "azure");
        assert_eq!(provider.model(), "gpt-5-chat");
    }

    #[test]
    fn test_create_provider_azure_without_base_fails() {
        let settings = LlmSettings::default();
        let err = create_provider(&settings, SecretString::from("k")).err().unwrap();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }

    #[test]
    fn test_create_provider_openai() {
        let settings = LlmSettings {
            provider: ProviderKind::OpenAi,
            model: "gpt-4o-mini".to_string(),
            ..Default::default()
        };
        let provider = create_provider(&settings, SecretString::from("sk")).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }
}
