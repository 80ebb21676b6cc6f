//! CLI definitions for the `brainstorm` binary.
//!
//! Three front ends share one core: `chat` (line-based terminal), `desk`
//! (full-screen terminal shell), and `serve` (HTTP API for the web client).

pub mod chat;
pub mod check;
pub mod desk;
pub mod login;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Brainstorm a hypothesis with three AI personas: a skeptic, an advocate, and a synthesizer.
#[derive(Parser)]
#[command(name = "brainstorm", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use fixed demo replies instead of calling a model.
    #[arg(long, global = true)]
    pub demo: bool,

    /// Path to a config.toml (defaults to ~/.brainstormers/config.toml).
    #[arg(long, global = true, env = "BRAINSTORM_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans as OpenTelemetry JSON on stdout.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Chat with the personas in this terminal.
    Chat {
        /// Starting hypothesis (prompted for when omitted).
        hypothesis: Option<String>,
    },

    /// Open the full-screen brainstorming desk.
    Desk {
        /// Starting hypothesis (prompted for when omitted).
        hypothesis: Option<String>,
    },

    /// Start the HTTP server for the web client.
    Serve {
        /// Port to listen on (overrides PORT and config).
        #[arg(long)]
        port: Option<u16>,

        /// Host address to bind to.
        #[arg(long)]
        host: Option<String>,
    },

    /// Check deployment readiness: environment, configuration, connectivity.
    Check {
        /// Also send a minimal request to the model endpoint.
        #[arg(long)]
        ping: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Default log filter for the chosen verbosity. `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,brainstorm=debug",
            _ => "trace",
        }
    }
}
