//! Per-user conversation state.

use std::collections::HashMap;

use skidki_core::SectionMap;

/// State kept for one Telegram user between updates.
#[derive(Debug, Default)]
pub struct Session {
    /// Ids of bot messages to delete on the next screen change.
    pub bot_messages: Vec<i64>,
    /// Sections from the last store selection, used for report headers.
    pub sections: SectionMap,
    /// Key of the last selected merchant.
    pub merchant: Option<String>,
}

/// Sessions keyed by Telegram user id.
///
/// Owned by the polling loop, which handles one update at a time, so no
/// locking is involved.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<i64, Session>,
}

impl SessionStore {
    pub fn session_mut(&mut self, user_id: i64) -> &mut Session {
        self.sessions.entry(user_id).or_default()
    }

    #[cfg(test)]
    pub fn get(&self, user_id: i64) -> Option<&Session> {
        self.sessions.get(&user_id)
    }
}

/// Outcome of a best-effort message cleanup. Callers may ignore it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: usize,
    /// Message ids whose deletion failed.
    pub failed: Vec<i64>,
}

impl CleanupReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
