//! Conversation controller: turns updates into menu screens and reports.
//!
//! Every screen change deletes the bot messages tracked in the user's
//! session and records the ids of the new ones. Page fetch failures are
//! reported to the user and never end the conversation.

use skidki_core::{MerchantRegistry, MerchantSource};
use skidki_scraper::{extract_sections, render_section_report, PageClient};

use crate::menu::{
    back_menu, fetch_error_text, section_menu, store_menu, CallbackAction, ACTION_PROMPT,
    NO_PRODUCTS, NO_SECTIONS, SECTION_PROMPT, STORE_PROMPT,
};
use crate::session::{CleanupReport, Session, SessionStore};
use crate::telegram::{CallbackQuery, InlineKeyboardMarkup, TelegramClient, TelegramError, Update};

/// Outbound side of the chat platform.
///
/// The controller runs on a single task, so the returned futures need not
/// be `Send`.
#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    /// Sends a message and returns its id.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<i64, TelegramError>;

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), TelegramError>;

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TelegramError>;
}

impl ChatTransport for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<i64, TelegramError> {
        let message = TelegramClient::send_message(self, chat_id, text, keyboard).await?;
        Ok(message.message_id)
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), TelegramError> {
        TelegramClient::delete_message(self, chat_id, message_id).await
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TelegramError> {
        self.answer_callback_query(callback_id).await
    }
}

pub struct Controller<T> {
    transport: T,
    pages: PageClient,
    merchants: MerchantRegistry,
    max_message_len: usize,
    /// Own username, used to tell `/start@us` from `/start@other_bot`.
    bot_username: Option<String>,
}

impl<T: ChatTransport> Controller<T> {
    pub fn new(
        transport: T,
        pages: PageClient,
        merchants: MerchantRegistry,
        max_message_len: usize,
    ) -> Self {
        Self {
            transport,
            pages,
            merchants,
            max_message_len,
            bot_username: None,
        }
    }

    /// Restricts addressed commands to `/start@{username}`. Without it only
    /// the bare `/start` is accepted.
    #[must_use]
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Dispatches one update.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when a message cannot be sent. Fetch failures
    /// and failed deletions are handled here and never surface.
    pub async fn handle_update(
        &self,
        sessions: &mut SessionStore,
        update: Update,
    ) -> Result<(), TelegramError> {
        if let Some(query) = update.callback_query {
            return self.handle_callback(sessions, query).await;
        }

        if let Some(message) = update.message {
            if is_start_command(message.text.as_deref(), self.bot_username.as_deref()) {
                let user_id = message.from.as_ref().map_or(message.chat.id, |u| u.id);
                tracing::info!(user_id, chat_id = message.chat.id, "start command");
                return self.start(sessions.session_mut(user_id), message.chat.id).await;
            }
        }

        Ok(())
    }

    async fn handle_callback(
        &self,
        sessions: &mut SessionStore,
        query: CallbackQuery,
    ) -> Result<(), TelegramError> {
        if let Err(err) = self.transport.answer_callback(&query.id).await {
            tracing::warn!(callback_id = %query.id, error = %err, "failed to answer callback");
        }

        let Some(chat_id) = query.message.as_ref().map(|m| m.chat.id) else {
            tracing::debug!(callback_id = %query.id, "callback without message; ignoring");
            return Ok(());
        };
        let data = query.data.as_deref().unwrap_or_default();
        let session = sessions.session_mut(query.from.id);

        match CallbackAction::parse(data, &self.merchants) {
            Some(CallbackAction::SelectStore(merchant)) => {
                self.select_store(session, chat_id, merchant).await
            }
            Some(CallbackAction::SelectSection {
                merchant,
                section_id,
            }) => {
                self.select_section(session, chat_id, merchant, section_id)
                    .await
            }
            Some(CallbackAction::BackToStores) => self.start(session, chat_id).await,
            None => {
                tracing::debug!(data, "ignoring unknown callback token");
                Ok(())
            }
        }
    }

    async fn start(&self, session: &mut Session, chat_id: i64) -> Result<(), TelegramError> {
        self.clear_bot_messages(session, chat_id).await;

        let menu = store_menu(&self.merchants);
        let id = self
            .transport
            .send_message(chat_id, STORE_PROMPT, Some(&menu))
            .await?;
        session.bot_messages = vec![id];
        Ok(())
    }

    async fn select_store(
        &self,
        session: &mut Session,
        chat_id: i64,
        merchant: &MerchantSource,
    ) -> Result<(), TelegramError> {
        let html = match self.pages.fetch_page(&merchant.url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(merchant = %merchant.key, error = %err, "merchant page fetch failed");
                return self.send_tracked(session, chat_id, &fetch_error_text(&err), None).await;
            }
        };

        let sections = extract_sections(&html);
        if sections.is_empty() {
            tracing::info!(merchant = %merchant.key, "no sections on merchant page");
            return self.reply_with_back_menu(session, chat_id, NO_SECTIONS).await;
        }

        self.clear_bot_messages(session, chat_id).await;
        let menu = section_menu(merchant, &sections);
        let id = self
            .transport
            .send_message(chat_id, SECTION_PROMPT, Some(&menu))
            .await?;

        session.bot_messages = vec![id];
        session.sections = sections;
        session.merchant = Some(merchant.key.clone());
        Ok(())
    }

    async fn select_section(
        &self,
        session: &mut Session,
        chat_id: i64,
        merchant: &MerchantSource,
        section_id: &str,
    ) -> Result<(), TelegramError> {
        let html = match self.pages.fetch_page(&merchant.url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(merchant = %merchant.key, section_id, error = %err, "merchant page fetch failed");
                return self.send_tracked(session, chat_id, &fetch_error_text(&err), None).await;
            }
        };

        // Stored names belong to the merchant picked last; a stale button
        // from another store falls back to the raw id.
        let section_name = if session.merchant.as_deref() == Some(merchant.key.as_str()) {
            session.sections.name_or_id(section_id)
        } else {
            section_id
        }
        .to_owned();
        let Some(chunks) =
            render_section_report(&html, section_id, &section_name, self.max_message_len)
        else {
            tracing::info!(merchant = %merchant.key, section_id, "no products in section");
            return self.reply_with_back_menu(session, chat_id, NO_PRODUCTS).await;
        };

        tracing::info!(
            merchant = %merchant.key,
            section_id,
            chunks = chunks.len(),
            "sending section report"
        );

        self.clear_bot_messages(session, chat_id).await;
        for chunk in chunks.iter().filter(|c| !c.trim().is_empty()) {
            self.send_tracked(session, chat_id, chunk, None).await?;
        }
        self.send_tracked(session, chat_id, ACTION_PROMPT, Some(&back_menu()))
            .await
    }

    /// Deletes every tracked bot message. Failures are logged and reported,
    /// never propagated; the tracked list is always emptied.
    async fn clear_bot_messages(&self, session: &mut Session, chat_id: i64) -> CleanupReport {
        let mut report = CleanupReport::default();
        for message_id in std::mem::take(&mut session.bot_messages) {
            match self.transport.delete_message(chat_id, message_id).await {
                Ok(()) => report.deleted += 1,
                Err(err) => {
                    tracing::warn!(chat_id, message_id, error = %err, "failed to delete bot message");
                    report.failed.push(message_id);
                }
            }
        }
        if !report.is_clean() {
            tracing::debug!(
                chat_id,
                deleted = report.deleted,
                failed = ?report.failed,
                "bot message cleanup incomplete"
            );
        }
        report
    }

    async fn reply_with_back_menu(
        &self,
        session: &mut Session,
        chat_id: i64,
        text: &str,
    ) -> Result<(), TelegramError> {
        self.send_tracked(session, chat_id, text, None).await?;
        self.send_tracked(session, chat_id, ACTION_PROMPT, Some(&back_menu()))
            .await
    }

    async fn send_tracked(
        &self,
        session: &mut Session,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), TelegramError> {
        let id = self.transport.send_message(chat_id, text, keyboard).await?;
        session.bot_messages.push(id);
        Ok(())
    }
}

/// `/start`, optionally with arguments. The addressed form `/start@name`
/// counts only when `name` is this bot (usernames are case-insensitive).
fn is_start_command(text: Option<&str>, bot_username: Option<&str>) -> bool {
    let Some(command) = text.and_then(|t| t.split_whitespace().next()) else {
        return false;
    };
    match command.split_once('@') {
        None => command == "/start",
        Some((name, target)) => {
            name == "/start" && bot_username.is_some_and(|own| own.eq_ignore_ascii_case(target))
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
