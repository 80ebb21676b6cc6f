//! HTTP API for the web client.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
