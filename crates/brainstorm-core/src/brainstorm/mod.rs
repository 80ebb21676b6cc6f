//! Round-robin brainstorming: turn sequencing, per-session state, the
//! persona responder seam, and the service that ties them together.
//!
//! Entry point for front ends: [`service::BrainstormService`].

pub mod responder;
pub mod sequencer;
pub mod service;
pub mod session;
pub mod store;
