//! Configuration loader for Brainstormers.
//!
//! Reads an optional `config.toml` (by default `~/.brainstormers/config.toml`)
//! into [`BrainstormConfig`], then applies environment overrides. Missing or
//! malformed files fall back to defaults; unparsable environment values log
//! a warning and keep whatever was there before.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use brainstorm_types::config::{BrainstormConfig, LlmSettings};
use brainstorm_types::error::ConfigError;
use brainstorm_types::llm::ProviderKind;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "BRAINSTORM_CONFIG";

/// Variables read by [`apply_env_overrides`], in application order.
pub const OVERRIDE_VARS: &[&str] = &[
    "BRAINSTORM_PROVIDER",
    "AZURE_API_BASE",
    "OPENAI_BASE_URL",
    "AZURE_API_VERSION",
    "AZURE_MODEL_NAME",
    "TEMPERATURE",
    "MAX_TOKENS",
    "TOP_P",
    "APP_PASSWORD",
    "PORT",
];

/// Resolve the data directory.
///
/// Checks `BRAINSTORM_DATA_DIR` first, then `~/.brainstormers`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BRAINSTORM_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".brainstormers");
    }

    PathBuf::from(".brainstormers")
}

/// Config file to read: the explicit path if given, else `{data_dir}/config.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => resolve_data_dir().join("config.toml"),
    }
}

/// Load configuration from a TOML file.
///
/// - Missing file: defaults.
/// - Unreadable or unparsable file: warning, defaults.
pub async fn load_config_file(path: &Path) -> BrainstormConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return BrainstormConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return BrainstormConfig::default();
        }
    };

    match toml::from_str::<BrainstormConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            BrainstormConfig::default()
        }
    }
}

/// Load the file (if any) and apply process environment overrides.
pub async fn load_config(explicit: Option<&Path>) -> BrainstormConfig {
    let path = resolve_config_path(explicit);
    let mut config = load_config_file(&path).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values count as unset.
pub fn apply_env_overrides<F>(config: &mut BrainstormConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("BRAINSTORM_PROVIDER") {
        set_parsed(&mut config.llm.provider, "BRAINSTORM_PROVIDER", &v);
    }

    let base_var = match config.llm.provider {
        ProviderKind::Azure => "AZURE_API_BASE",
        ProviderKind::OpenAi => "OPENAI_BASE_URL",
    };
    if let Some(v) = get(base_var) {
        config.llm.api_base = Some(v.trim().to_string());
    }
    if let Some(v) = get("AZURE_API_VERSION") {
        config.llm.api_version = v.trim().to_string();
    }
    if let Some(v) = get("AZURE_MODEL_NAME") {
        config.llm.model = v.trim().to_string();
    }
    if let Some(v) = get("TEMPERATURE") {
        set_parsed(&mut config.llm.temperature, "TEMPERATURE", &v);
    }
    if let Some(v) = get("MAX_TOKENS") {
        set_parsed(&mut config.llm.max_tokens, "MAX_TOKENS", &v);
    }
    if let Some(v) = get("TOP_P") {
        set_parsed(&mut config.llm.top_p, "TOP_P", &v);
    }
    if let Some(v) = lookup("APP_PASSWORD") {
        config.auth.password = Some(v).filter(|p| !p.is_empty());
    }
    if let Some(v) = get("PORT") {
        set_parsed(&mut config.server.port, "PORT", &v);
    }
}

fn set_parsed<T: FromStr>(slot: &mut T, key: &str, raw: &str) {
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(key, value = raw, "ignoring unparsable environment value"),
    }
}

/// Check that the endpoint settings are complete enough to build a client.
pub fn validate_llm_settings(settings: &LlmSettings) -> Result<(), ConfigError> {
    if settings.provider == ProviderKind::Azure
        && settings.api_base.as_deref().is_none_or(|b| b.trim().is_empty())
    {
        return Err(ConfigError::Missing("AZURE_API_BASE".to_string()));
    }
    if settings.model.trim().is_empty() {
        return Err(ConfigError::Missing("AZURE_MODEL_NAME".to_string()));
    }
    if !(0.0..=2.0).contains(&settings.temperature) {
        return Err(ConfigError::Invalid {
            key: "TEMPERATURE".to_string(),
            message: format!("{} is outside 0.0..=2.0", settings.temperature),
        });
    }
    if !(0.0..=1.0).contains(&settings.top_p) {
        return Err(ConfigError::Invalid {
            key: "TOP_P".to_string(),
            message: format!("{} is outside 0.0..=1.0", settings.top_p),
        });
    }
    Ok(())
}
