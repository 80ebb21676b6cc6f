//! Line-based terminal brainstorming.
//!
//! Entry point: `loop_runner::run_chat_loop`. Each human message triggers a
//! full round (Alpha, Beta, Gamma), rendered as markdown with timestamps.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
