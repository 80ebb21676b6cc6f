//! Main chat loop orchestration.
//!
//! Asks for the hypothesis, prints the banner, then alternates between the
//! human and a full persona round until the user leaves.

use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use console::style;

use brainstorm_core::brainstorm::session::BrainstormSession;
use brainstorm_types::error::BrainstormError;

use crate::state::ConcreteBrainstormService;

use super::banner::{print_round_separator, print_title, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Run the interactive chat.
pub async fn run_chat_loop(
    service: &ConcreteBrainstormService,
    hypothesis: Option<String>,
) -> anyhow::Result<()> {
    print_title();

    let hypothesis = match hypothesis.filter(|h| !h.trim().is_empty()) {
        Some(h) => h,
        None => ask_hypothesis()?,
    };

    let mut session = BrainstormSession::new(Some(hypothesis.clone()));
    tracing::info!(session_id = %session.id(), "chat session started");

    print_welcome_banner(&hypothesis, &service.responder().describe());

    let renderer = ChatRenderer::new();
    let prompt = format!("  {} ", style("💬 You:").green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).context("failed to initialize input")?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("👋 Left the chat").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Type 'exit' or press Ctrl+D to leave.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::History => renderer.print_history(session.transcript()),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("👋 Left the chat").dim());
                            break;
                        }
                        ChatCommand::Unknown(name) => println!(
                            "\n  {} Unknown command: {}. Type /help for available commands.\n",
                            style("?").yellow().bold(),
                            style(name).dim()
                        ),
                    }
                    continue;
                }

                session.push_human(&text);
                renderer.print_human_ack(Utc::now());
                run_round(service, &mut session, &renderer).await;
                print_round_separator();
            }
        }
    }

    chat_input.flush();
    Ok(())
}

/// Let every persona due in this round speak, stopping at the first failure.
async fn run_round(
    service: &ConcreteBrainstormService,
    session: &mut BrainstormSession,
    renderer: &ChatRenderer,
) {
    while let Some(persona) = session.next_persona() {
        let spinner = indicatif::ProgressBar::new_spinner();
        if let Ok(template) =
            indicatif::ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}")
        {
            spinner.set_style(template);
        }
        spinner.set_message(format!("{} is thinking...", persona.display_name()));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let outcome = service.take_turn(session).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(reply) => renderer.print_reply(&reply),
            Err(BrainstormError::RoundComplete) => break,
            Err(e) => {
                renderer.print_error(Some(persona), &e.to_string());
                break;
            }
        }
    }
}

/// Prompt for the starting hypothesis.
pub fn ask_hypothesis() -> anyhow::Result<String> {
    if !console::user_attended() {
        anyhow::bail!("no hypothesis given; pass one as an argument when not running interactively");
    }
    let hypothesis = dialoguer::Input::<String>::new()
        .with_prompt("  📝 Topic/Hypothesis")
        .interact_text()
        .context("failed to read hypothesis")?;
    Ok(hypothesis.trim().to_string())
}
