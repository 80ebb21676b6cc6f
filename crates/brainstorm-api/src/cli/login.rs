//! Password check for the terminal front ends.

use console::style;

use brainstorm_core::auth::PasswordGate;

/// Ask for the shared password when one is configured.
///
/// Non-interactive sessions cannot answer the prompt, so they are refused
/// outright when a password is set.
pub fn authenticate(gate: &PasswordGate) -> anyhow::Result<()> {
    if !gate.is_required() {
        return Ok(());
    }

    if !console::user_attended() {
        anyhow::bail!(
            "APP_PASSWORD is set but this terminal is not interactive. \
             Unset APP_PASSWORD, or use `brainstorm serve` where the web client sends the password."
        );
    }

    println!();
    println!("  {} {}", style("🔐").bold(), style("Authentication Required").bold());
    let password = dialoguer::Password::new()
        .with_prompt("  Enter password")
        .allow_empty_password(true)
        .interact()?;

    if gate.check(Some(&password)) {
        println!("  {} Access granted!", style("✓").green().bold());
        Ok(())
    } else {
        anyhow::bail!("Access denied")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_gate_skips_prompt() {
        assert!(authenticate(&PasswordGate::open()).is_ok());
    }
}
