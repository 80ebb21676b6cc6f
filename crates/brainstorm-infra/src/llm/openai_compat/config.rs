//! Endpoint configuration for the chat-completions provider.

use async_openai::config::{AzureConfig, OpenAIConfig};
use async_openai::Client;
use secrecy::{ExposeSecret, SecretString};

/// Default base URL for the public OpenAI API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Which endpoint flavor to talk to, with its connection details.
pub enum Endpoint {
    /// Azure OpenAI: requests go to `{api_base}/openai/deployments/{deployment}`.
    Azure {
        api_base: String,
        api_version: String,
        deployment: String,
    },
    /// Any OpenAI-compatible server.
    OpenAi { base_url: String },
}

/// Configuration for an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Provider name used in logs and spans ("azure", "openai").
    pub provider_name: String,
    pub endpoint: Endpoint,
    pub api_key: SecretString,
    /// Model name; on Azure this doubles as the deployment name.
    pub model: String,
}

/// Azure OpenAI defaults: the model name is the deployment id.
pub fn azure_defaults(
    api_key: SecretString,
    api_base: &str,
    api_version: &str,
    model: &str,
) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "azure".into(),
        endpoint: Endpoint::Azure {
            api_base: api_base.trim_end_matches('/').into(),
            api_version: api_version.into(),
            deployment: model.into(),
        },
        api_key,
        model: model.into(),
    }
}

/// OpenAI defaults, with an optional base URL override.
pub fn openai_defaults(api_key: SecretString, base_url: Option<&str>, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        endpoint: Endpoint::OpenAi {
            base_url: base_url
                .map(|b| b.trim_end_matches('/'))
                .filter(|b| !b.is_empty())
                .unwrap_or(OPENAI_BASE_URL)
                .into(),
        },
        api_key,
        model: model.into(),
    }
}

/// The async-openai client for either endpoint flavor.
#[derive(Clone)]
pub(crate) enum ChatClient {
    Azure(Client<AzureConfig>),
    OpenAi(Client<OpenAIConfig>),
}

impl ChatClient {
    pub(crate) fn from_config(config: &OpenAiCompatConfig) -> Self {
        let key = config.api_key.expose_secret();
        match &config.endpoint {
            Endpoint::Azure {
                api_base,
                api_version,
                deployment,
            } => {
                let azure = AzureConfig::new()
                    .with_api_base(api_base)
                    .with_api_version(api_version)
                    .with_deployment_id(deployment)
                    .with_api_key(key);
                ChatClient::Azure(Client::with_config(azure))
            }
            Endpoint::OpenAi { base_url } => {
                let openai = OpenAIConfig::new().with_api_key(key).with_api_base(base_url);
                ChatClient::OpenAi(Client::with_config(openai))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn azure_defaults_use_model_as_deployment() {
        let config = azure_defaults(
            SecretString::from("k"),
            "https://res.openai.azure.com/",
            "2024-08-01-preview",
            "gpt-5-chat",
        );
        assert_eq!(config.provider_name, "azure");
        match config.endpoint {
            Endpoint::Azure {
                api_base,
                api_version,
                deployment,
            } => {
                assert_eq!(api_base, "https://res.openai.azure.com");
                assert_eq!(api_version, "2024-08-01-preview");
                assert_eq!(deployment, "gpt-5-chat");
            }
            Endpoint::OpenAi { .. } => panic!("expected azure endpoint"),
        }
    }

    #[test]
    fn openai_defaults_fall_back_to_public_api() {
        let config = openai_defaults(SecretString::from("k"), None, "gpt-4o");
        match config.endpoint {
            Endpoint::OpenAi { base_url } => assert_eq!(base_url, OPENAI_BASE_URL),
            Endpoint::Azure { .. } => panic!("expected openai endpoint"),
        }

        let config = openai_defaults(SecretString::from("k"), Some("http://localhost:8000/v1/"), "m");
        match config.endpoint {
            Endpoint::OpenAi { base_url } => assert_eq!(base_url, "http://localhost:8000/v1"),
            Endpoint::Azure { .. } => panic!("expected openai endpoint"),
        }
    }
}
