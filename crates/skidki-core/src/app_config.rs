use std::path::PathBuf;

/// Runtime configuration for the bot and the CLI commands.
#[derive(Clone)]
pub struct AppConfig {
    /// Bot API credential. Only the `run` command requires it.
    pub telegram_bot_token: Option<String>,
    pub telegram_api_url: String,
    pub log_level: String,
    /// Optional YAML override for the built-in merchant list.
    pub merchants_path: Option<PathBuf>,
    /// Long-poll timeout passed to `getUpdates`.
    pub poll_timeout_secs: u64,
    pub max_message_len: usize,
}

impl AppConfig {
    /// Returns the bot token or a [`crate::ConfigError::MissingEnvVar`] naming it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when `TELEGRAM_BOT_TOKEN` was not set.
    pub fn require_bot_token(&self) -> Result<&str, crate::ConfigError> {
        self.telegram_bot_token
            .as_deref()
            .ok_or_else(|| crate::ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "[redacted]"),
            )
            .field("telegram_api_url", &self.telegram_api_url)
            .field("log_level", &self.log_level)
            .field("merchants_path", &self.merchants_path)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("max_message_len", &self.max_message_len)
            .finish()
    }
}
