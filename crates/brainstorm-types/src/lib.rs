//! Shared domain types for Brainstormers.
//!
//! This crate contains the core domain types used across the workspace:
//! personas, transcripts, turn replies, LLM request/response shapes,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod persona;
pub mod transcript;
pub mod turn;
