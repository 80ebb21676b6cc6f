//! LlmProvider trait definition.
//!
//! This is the core abstraction that all LLM providers implement.
//! Uses RPITIT for `complete`; `BoxLlmProvider` erases the concrete type.

use brainstorm_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Azure OpenAI, OpenAI-compatible, ...).
///
/// Implementations live in brainstorm-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "azure", "openai").
    fn name(&self) -> &str;

    /// Model requests default to when `CompletionRequest::model` is empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
