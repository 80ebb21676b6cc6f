//! Brainstormers entry point.
//!
//! Binary name: `brainstorm`
//!
//! Parses CLI arguments, loads configuration, builds the persona backend,
//! then hands off to the terminal chat, the desk, or the HTTP server.

mod cli;
mod http;
mod state;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;
use tokio_util::sync::CancellationToken;

use brainstorm_core::auth::PasswordGate;
use brainstorm_core::brainstorm::service::BrainstormService;
use brainstorm_core::brainstorm::store::SessionStore;
use brainstorm_core::persona::prompt::ReplyLength;

use cli::{Cli, Commands};
use state::{AppState, KeyPrompt, build_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or logging
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "brainstorm", &mut std::io::stdout());
        return Ok(());
    }

    brainstorm_observe::tracing_setup::init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let config = brainstorm_infra::config::load_config(cli.config.as_deref()).await;
    tracing::debug!(?config, "configuration loaded");

    let result = run(cli, config).await;

    brainstorm_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli, mut config: brainstorm_types::config::BrainstormConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Chat { hypothesis } => {
            cli::login::authenticate(&PasswordGate::new(config.auth.password.as_deref()))?;
            let backend = build_backend(
                &config.llm,
                cli.demo,
                ReplyLength::Conversational,
                KeyPrompt::IfInteractive,
            )?;
            let service = BrainstormService::new(backend);
            cli::chat::loop_runner::run_chat_loop(&service, hypothesis).await?;
        }

        Commands::Desk { hypothesis } => {
            cli::login::authenticate(&PasswordGate::new(config.auth.password.as_deref()))?;
            let backend = build_backend(
                &config.llm,
                cli.demo,
                ReplyLength::Conversational,
                KeyPrompt::IfInteractive,
            )?;
            let service = Arc::new(BrainstormService::new(backend));
            cli::desk::run_desk(service, hypothesis).await?;
        }

        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }

            let backend = build_backend(&config.llm, cli.demo, ReplyLength::Compact, KeyPrompt::Never)?;
            let backend_label = backend.describe();
            let state = AppState::new(config, backend);

            let cancel = CancellationToken::new();
            let pruner = spawn_session_pruner(
                Arc::clone(&state.sessions),
                Duration::from_secs(state.config.server.prune_interval_secs.max(1)),
                Duration::from_secs(state.config.server.session_idle_secs),
                cancel.clone(),
            );

            let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            println!(
                "  {} Brainstormers listening on {} ({})",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan(),
                backend_label
            );
            if state.gate.is_required() {
                println!("  {} Password required", console::style("🔒").bold());
            }
            println!("  {}", console::style("Press Ctrl+C to stop").dim());
            tracing::info!(%addr, backend = %backend_label, "server started");

            let router = http::router::build_router(state);

            let served = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await;

            cancel.cancel();
            let _ = pruner.await;
            served?;

            println!("\n  Server stopped.");
        }

        Commands::Check { ping } => {
            let ready = cli::check::run_check(&config, ping).await?;
            if !ready {
                anyhow::bail!("not ready: required settings are missing or unreachable");
            }
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

/// Periodically drop sessions that have been idle too long.
fn spawn_session_pruner(
    sessions: Arc<SessionStore>,
    every: Duration,
    max_idle: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let removed = sessions.prune_idle(max_idle);
                    if removed > 0 {
                        tracing::info!(removed, remaining = sessions.len(), "pruned idle sessions");
                    }
                }
            }
        }
        tracing::debug!("session pruner stopped");
    })
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
