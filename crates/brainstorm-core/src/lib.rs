//! Business logic and provider trait definitions for Brainstormers.
//!
//! This crate defines the "ports" (the `LlmProvider` trait) that the
//! infrastructure layer implements, plus everything the three front ends
//! share: the persona registry, the turn sequencer, per-session state, and
//! the password gate. It depends only on `brainstorm-types` -- never on
//! `brainstorm-infra` or any network crate.

pub mod auth;
pub mod brainstorm;
pub mod llm;
pub mod persona;
