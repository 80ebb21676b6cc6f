//! Application state wiring the brainstorm service to its backend.
//!
//! `AppState` is shared by the CLI front ends and the HTTP handlers. The
//! service is pinned to [`PersonaBackend`], which picks between the model
//! and demo replies at startup.

use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;

use brainstorm_core::auth::PasswordGate;
use brainstorm_core::brainstorm::responder::{
    LlmResponder, PersonaBackend, SamplingParams, ScriptedResponder,
};
use brainstorm_core::brainstorm::service::BrainstormService;
use brainstorm_core::brainstorm::store::SessionStore;
use brainstorm_core::persona::prompt::ReplyLength;
use brainstorm_infra::config::validate_llm_settings;
use brainstorm_infra::llm::create_provider;
use brainstorm_infra::secret::api_key_from_env;
use brainstorm_types::config::{BrainstormConfig, LlmSettings};

/// Concrete service type used by every front end.
pub type ConcreteBrainstormService = BrainstormService<PersonaBackend>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BrainstormConfig>,
    pub service: Arc<ConcreteBrainstormService>,
    pub sessions: Arc<SessionStore>,
    pub gate: PasswordGate,
}

impl AppState {
    pub fn new(config: BrainstormConfig, backend: PersonaBackend) -> Self {
        let gate = PasswordGate::new(config.auth.password.as_deref());
        Self {
            config: Arc::new(config),
            service: Arc::new(BrainstormService::new(backend)),
            sessions: Arc::new(SessionStore::new()),
            gate,
        }
    }
}

/// How the backend may obtain a missing API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrompt {
    /// Ask on the terminal (hidden input) when stdin/stdout are interactive.
    IfInteractive,
    /// Never ask; a missing key is a startup error.
    Never,
}

/// Build the persona backend: demo replies, or the configured model.
pub fn build_backend(
    settings: &LlmSettings,
    demo: bool,
    length: ReplyLength,
    prompt: KeyPrompt,
) -> anyhow::Result<PersonaBackend> {
    if demo {
        tracing::info!("demo mode: personas use fixed replies");
        return Ok(PersonaBackend::Scripted(ScriptedResponder));
    }

    validate_llm_settings(settings)?;
    let api_key = resolve_api_key(settings, prompt)?;
    let provider = create_provider(settings, api_key)?;

    let params = SamplingParams {
        model: settings.model.clone(),
        temperature: settings.temperature,
        max_tokens: settings.max_tokens,
        top_p: settings.top_p,
    };
    Ok(PersonaBackend::Llm(LlmResponder::new(provider, params, length)))
}

fn resolve_api_key(settings: &LlmSettings, prompt: KeyPrompt) -> anyhow::Result<SecretString> {
    let var = settings.provider.api_key_var();
    if let Some(key) = api_key_from_env(settings.provider) {
        return Ok(key);
    }

    if prompt == KeyPrompt::Never || !console::user_attended() {
        anyhow::bail!(
            "{var} is required. Set it in the environment (or your deployment platform's settings), \
             or run with --demo."
        );
    }

    let key = dialoguer::Password::new()
        .with_prompt(format!("{var} not set. Enter API key"))
        .interact()
        .context("failed to read API key")?;
    let key = key.trim().to_string();
    if key.is_empty() {
        anyhow::bail!("{var} is required");
    }
    Ok(SecretString::from(key))
}
