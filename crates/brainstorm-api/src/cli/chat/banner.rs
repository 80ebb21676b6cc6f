//! Welcome banner for chat sessions.

use console::style;

const RULE: &str = "==================================================";

/// Print the opening title before the hypothesis is known.
pub fn print_title() {
    println!();
    println!("  {}", style(RULE).dim());
    println!("  {}", style("🧠 BRAINSTORM GROUP CHAT").cyan().bold());
    println!("  {}", style(RULE).dim());
}

/// Print the banner once the hypothesis is set.
pub fn print_welcome_banner(hypothesis: &str, backend: &str) {
    println!();
    println!("  {}", style(RULE).dim());
    println!(
        "  💭 Group Chat: Brainstorming '{}'",
        style(hypothesis).cyan().bold()
    );
    println!("  {}", style(RULE).dim());
    println!(
        "  {}  {}",
        style("Personas:").bold(),
        style("Alpha 🔬 (skeptic) · Beta ⚡ (advocate) · Gamma 🧠 (synthesizer)").dim()
    );
    println!("  {}  {}", style("Backend:").bold(), style(backend).dim());
    println!();
    println!(
        "  {}",
        style("📝 Use @Alpha, @Beta, @Gamma to mention specific agents. They can mention each other and @You too!").dim()
    );
    println!(
        "  {}",
        style("🔄 Flow: You message → Alpha responds → Beta responds → Gamma responds").dim()
    );
    println!(
        "  {}",
        style("Type /help for commands, 'exit' or Ctrl+D to leave").dim()
    );
    println!();
}

/// Separator printed after each round.
pub fn print_round_separator() {
    println!("  {}", style(RULE).dim());
}
