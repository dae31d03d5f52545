//! Long-polling loop for the `run` command.
//!
//! Updates are handled one at a time in arrival order. A failure while
//! handling one update is logged and the loop moves on; a failed
//! `getUpdates` call is followed by a short pause before polling again.

use std::time::Duration;

use skidki_core::{AppConfig, MerchantRegistry};
use skidki_scraper::PageClient;

use crate::controller::Controller;
use crate::session::SessionStore;
use crate::telegram::{TelegramClient, Update};

const POLL_ERROR_PAUSE: Duration = Duration::from_secs(3);

/// Runs the bot until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the token is missing or rejected by `getMe`, or a
/// client cannot be built.
/// Errors after startup are logged, never returned.
pub(crate) async fn run_bot(config: &AppConfig, merchants: MerchantRegistry) -> anyhow::Result<()> {
    let token = config.require_bot_token()?;
    let telegram = TelegramClient::with_base_url(
        token,
        config.poll_timeout_secs,
        &config.telegram_api_url,
    )?;
    let me = telegram.get_me().await?;
    let pages = PageClient::new()?;
    let mut controller = Controller::new(telegram, pages, merchants, config.max_message_len);
    if let Some(username) = me.username {
        tracing::info!(bot = %username, "authenticated with Telegram");
        controller = controller.with_bot_username(username);
    }
    let mut sessions = SessionStore::default();
    let mut offset: Option<i64> = None;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!(
        poll_timeout_secs = config.poll_timeout_secs,
        "bot started, polling for updates"
    );

    loop {
        let polled = tokio::select! {
            result = controller.transport().get_updates(offset) => result,
            _ = &mut shutdown => break,
        };

        let updates = match polled {
            Ok(updates) => updates,
            Err(err) => {
                tracing::warn!(error = %err, "getUpdates failed; retrying after pause");
                tokio::time::sleep(POLL_ERROR_PAUSE).await;
                continue;
            }
        };

        offset = next_offset(offset, &updates);

        for update in updates {
            let update_id = update.update_id;
            if let Err(err) = controller.handle_update(&mut sessions, update).await {
                tracing::error!(update_id, error = %err, "failed to handle update");
            }
        }
    }

    tracing::info!("received shutdown signal, stopping bot");
    Ok(())
}

/// Offset for the next `getUpdates` call: one past the highest id seen.
///
/// Advancing before the batch is handled means a failing update is never
/// delivered twice.
fn next_offset(current: Option<i64>, updates: &[Update]) -> Option<i64> {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .map_or(current, |next| Some(current.map_or(next, |c| c.max(next))))
}
