//! Observability for Brainstormers: subscriber setup and OTel export.

pub mod tracing_setup;
