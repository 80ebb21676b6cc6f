//! HTTP request handlers.

pub mod brainstorm;
