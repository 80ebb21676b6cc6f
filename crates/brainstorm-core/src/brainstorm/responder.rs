//! Persona responders: the seam between the turn logic and the model.

use std::future::Future;

use brainstorm_types::llm::{CompletionRequest, LlmError, Message, MessageRole};
use brainstorm_types::persona::Persona;
use brainstorm_types::transcript::Transcript;
use tracing::{Instrument, debug, info_span};

use crate::llm::box_provider::BoxLlmProvider;
use crate::persona::prompt::{ReplyLength, build_system_prompt, build_task_prompt};

/// Produces one persona's reply to the conversation so far.
pub trait Responder: Send + Sync {
    fn respond(
        &self,
        persona: &Persona,
        transcript: &Transcript,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// Sampling parameters applied to every persona call.
#[derive(Debug, Clone)]
pub struct SamplingParams {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

/// Responder backed by a chat-completion provider.
pub struct LlmResponder {
    provider: BoxLlmProvider,
    params: SamplingParams,
    length: ReplyLength,
}

impl LlmResponder {
    pub fn new(provider: BoxLlmProvider, params: SamplingParams, length: ReplyLength) -> Self {
        Self {
            provider,
            params,
            length,
        }
    }

    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    fn build_request(&self, persona: &Persona, transcript: &Transcript) -> CompletionRequest {
        CompletionRequest {
            model: self.params.model.clone(),
            messages: vec![Message {
                role: MessageRole::User,
                content: build_task_prompt(&transcript.render(), self.length),
            }],
            system: Some(build_system_prompt(persona)),
            max_tokens: self.params.max_tokens,
            temperature: Some(self.params.temperature),
            top_p: Some(self.params.top_p),
        }
    }
}

impl Responder for LlmResponder {
    async fn respond(&self, persona: &Persona, transcript: &Transcript) -> Result<String, LlmError> {
        let request = self.build_request(persona, transcript);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.top_p = ?request.top_p,
            brainstorm.persona = %persona.id,
        );

        let response = self.provider.complete(&request).instrument(span).await?;
        debug!(
            persona = %persona.id,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "persona replied"
        );
        Ok(response.content.trim().to_string())
    }
}

/// Responder that returns each persona's fixed demo line. No network.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedResponder;

impl Responder for ScriptedResponder {
    async fn respond(&self, persona: &Persona, _transcript: &Transcript) -> Result<String, LlmError> {
        Ok(persona.demo_reply.to_string())
    }
}

/// Runtime choice between the model and demo mode.
pub enum PersonaBackend {
    Llm(LlmResponder),
    Scripted(ScriptedResponder),
}

impl PersonaBackend {
    pub fn is_demo(&self) -> bool {
        matches!(self, PersonaBackend::Scripted(_))
    }

    /// Short description for banners and logs.
    pub fn describe(&self) -> String {
        match self {
            PersonaBackend::Llm(r) => format!("{} / {}", r.provider.name(), r.params.model),
            PersonaBackend::Scripted(_) => "demo mode".to_string(),
        }
    }
}

impl Responder for PersonaBackend {
    async fn respond(&self, persona: &Persona, transcript: &Transcript) -> Result<String, LlmError> {
        match self {
            PersonaBackend::Llm(r) => r.respond(persona, transcript).await,
            PersonaBackend::Scripted(r) => r.respond(persona, transcript).await,
        }
    }
}
