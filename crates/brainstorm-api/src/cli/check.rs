//! `brainstorm check`: deployment readiness report.
//!
//! Lists required and optional environment variables (secrets hidden),
//! the resolved configuration, and optionally pings the model endpoint.

use console::style;

use brainstorm_infra::config::validate_llm_settings;
use brainstorm_infra::llm::{create_provider, test_provider_connection};
use brainstorm_infra::secret::{api_key_from_env, display_value};
use brainstorm_types::config::BrainstormConfig;
use brainstorm_types::llm::ProviderKind;

/// One row of the environment report.
#[derive(Debug, PartialEq, Eq)]
pub struct VarStatus {
    pub name: &'static str,
    pub shown: Option<String>,
}

/// Variables that must be set for the configured provider.
pub fn required_vars(provider: ProviderKind) -> Vec<&'static str> {
    match provider {
        ProviderKind::Azure => vec!["AZURE_OPENAI_API_KEY", "AZURE_API_BASE", "AZURE_API_VERSION"],
        ProviderKind::OpenAi => vec!["OPENAI_API_KEY"],
    }
}

/// Variables with usable defaults.
pub const OPTIONAL_VARS: &[&str] = &[
    "APP_PASSWORD",
    "AZURE_MODEL_NAME",
    "TEMPERATURE",
    "MAX_TOKENS",
    "TOP_P",
    "PORT",
    "BRAINSTORM_PROVIDER",
];

/// Look up each variable and hide secret values.
pub fn inspect_vars<F>(names: &[&'static str], lookup: F) -> Vec<VarStatus>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .map(|&name| VarStatus {
            name,
            shown: lookup(name)
                .filter(|v| !v.is_empty())
                .map(|v| display_value(name, &v)),
        })
        .collect()
}

/// Run the readiness check. Returns whether everything required is in place.
pub async fn run_check(config: &BrainstormConfig, ping: bool) -> anyhow::Result<bool> {
    let env = |key: &str| std::env::var(key).ok();
    let mut ready = true;

    println!();
    println!("  {} {}", style("📋").bold(), style("Environment variables").bold());
    for status in inspect_vars(&required_vars(config.llm.provider), env) {
        match status.shown {
            Some(value) => println!("  {} {}: {}", style("✓").green(), status.name, value),
            None => {
                println!("  {} {}: {}", style("✗").red(), status.name, style("not set").red());
                ready = false;
            }
        }
    }

    println!();
    println!("  {} {}", style("📋").bold(), style("Optional").bold());
    for status in inspect_vars(OPTIONAL_VARS, env) {
        match status.shown {
            Some(value) => println!("  {} {}: {}", style("✓").green(), status.name, value),
            None => println!(
                "  {} {}: {}",
                style("ℹ").cyan(),
                status.name,
                style("not set (using defaults)").dim()
            ),
        }
    }

    println!();
    println!("  {} {}", style("⚙").bold(), style("Resolved configuration").bold());
    let llm = &config.llm;
    println!("  {}  {}", style("Provider:").bold(), llm.provider);
    println!(
        "  {}  {}",
        style("Endpoint:").bold(),
        llm.api_base.as_deref().unwrap_or("(default)")
    );
    println!("  {}  {}", style("Model:").bold(), llm.model);
    if llm.provider == ProviderKind::Azure {
        println!("  {}  {}", style("API version:").bold(), llm.api_version);
    }
    println!(
        "  {}  temperature {} · top_p {} · max_tokens {}",
        style("Sampling:").bold(),
        llm.temperature,
        llm.top_p,
        llm.max_tokens
    );
    println!(
        "  {}  {}",
        style("Password gate:").bold(),
        if config.auth.password.is_some() { "enabled" } else { "disabled" }
    );
    println!("  {}  {}:{}", style("Listen:").bold(), config.server.host, config.server.port);

    if let Err(e) = validate_llm_settings(llm) {
        println!("  {} {e}", style("✗").red());
        ready = false;
    }

    if ping {
        println!();
        ready &= ping_endpoint(config).await;
    }

    println!();
    if ready {
        println!("  {} Ready to deploy.", style("✓").green().bold());
    } else {
        println!("  {} Not ready: fix the items marked ✗ above.", style("✗").red().bold());
    }
    println!();

    Ok(ready)
}

async fn ping_endpoint(config: &BrainstormConfig) -> bool {
    let Some(key) = api_key_from_env(config.llm.provider) else {
        println!(
            "  {} Skipping ping: {} is not set",
            style("✗").red(),
            config.llm.provider.api_key_var()
        );
        return false;
    };

    let provider = match create_provider(&config.llm, key) {
        Ok(p) => p,
        Err(e) => {
            println!("  {} Could not build client: {e}", style("✗").red());
            return false;
        }
    };

    let spinner = indicatif::ProgressBar::new_spinner();
    if let Ok(template) = indicatif::ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(format!("Pinging {} / {}...", provider.name(), provider.model()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = test_provider_connection(&provider).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            println!("  {} Model endpoint responded", style("✓").green());
            true
        }
        Err(e) => {
            println!("  {} Model endpoint failed: {e}", style("✗").red());
            false
        }
    }
}
