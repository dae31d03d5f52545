use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default upper bound for one outbound chat message, in characters.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 4096;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty());
    let telegram_api_url = or_default("SKIDKI_TELEGRAM_API_URL", "https://api.telegram.org");
    let log_level = or_default("SKIDKI_LOG_LEVEL", "info");
    let merchants_path = lookup("SKIDKI_MERCHANTS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let poll_timeout_secs = parse_u64("SKIDKI_POLL_TIMEOUT_SECS", "30")?;
    let max_message_len = parse_usize(
        "SKIDKI_MAX_MESSAGE_LEN",
        &DEFAULT_MAX_MESSAGE_LEN.to_string(),
    )?;
    if max_message_len == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SKIDKI_MAX_MESSAGE_LEN".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        telegram_bot_token,
        telegram_api_url,
        log_level,
        merchants_path,
        poll_timeout_secs,
        max_message_len,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
