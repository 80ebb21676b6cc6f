//! Infrastructure layer for Brainstormers.
//!
//! Implements the provider trait defined in `brainstorm-core` on top of
//! `async-openai` (Azure OpenAI and OpenAI-compatible endpoints), and loads
//! configuration from `config.toml` plus environment overrides.

pub mod config;
pub mod llm;
pub mod secret;
