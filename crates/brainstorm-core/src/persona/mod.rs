//! The three fixed personas and the prompts built from them.

pub mod prompt;
pub mod registry;
