//! Menu texts, inline keyboards and callback-token parsing.

use skidki_core::{MerchantRegistry, MerchantSource, SectionMap, BACK_TO_STORES_TOKEN};
use skidki_scraper::ScraperError;

use crate::telegram::{InlineKeyboardButton, InlineKeyboardMarkup};

pub const STORE_PROMPT: &str = "Выберите магазин для получения скидок:";
pub const SECTION_PROMPT: &str = "Выберите раздел:";
pub const ACTION_PROMPT: &str = "Выберите действие:";
pub const BACK_BUTTON: &str = "Вернуться к выбору магазина";
pub const NO_SECTIONS: &str = "Разделы не найдены.";
pub const NO_PRODUCTS: &str = "Товары не найдены.";

/// Telegram rejects `callback_data` longer than this many bytes.
const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// What a pressed button asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum CallbackAction<'a> {
    SelectStore(&'a MerchantSource),
    SelectSection {
        merchant: &'a MerchantSource,
        section_id: &'a str,
    },
    BackToStores,
}

impl<'a> CallbackAction<'a> {
    /// Decodes `{key}`, `{key}_{section_id}` or the back token.
    ///
    /// Section tokens split on the first `_`, so section ids may contain
    /// underscores. Unknown merchants and empty section ids give `None`.
    #[must_use]
    pub fn parse(data: &'a str, merchants: &'a MerchantRegistry) -> Option<Self> {
        if data == BACK_TO_STORES_TOKEN {
            return Some(Self::BackToStores);
        }
        if let Some(merchant) = merchants.get(data) {
            return Some(Self::SelectStore(merchant));
        }
        let (key, section_id) = data.split_once('_')?;
        if section_id.is_empty() {
            return None;
        }
        merchants
            .get(key)
            .map(|merchant| Self::SelectSection {
                merchant,
                section_id,
            })
    }
}

#[must_use]
pub fn section_token(merchant: &MerchantSource, section_id: &str) -> String {
    format!("{}_{section_id}", merchant.key)
}

#[must_use]
pub fn store_menu(merchants: &MerchantRegistry) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(
        merchants
            .iter()
            .map(|m| InlineKeyboardButton::new(&m.label, &m.key))
            .collect(),
    )
}

/// One button per section, then the back button.
///
/// Sections whose token would exceed Telegram's callback size limit are
/// left out, since a single oversized button makes the whole send fail.
#[must_use]
pub fn section_menu(merchant: &MerchantSource, sections: &SectionMap) -> InlineKeyboardMarkup {
    let mut buttons: Vec<InlineKeyboardButton> = sections
        .iter()
        .filter_map(|section| {
            let token = section_token(merchant, &section.id);
            if token.len() > MAX_CALLBACK_DATA_BYTES {
                tracing::warn!(
                    merchant = %merchant.key,
                    section_id = %section.id,
                    "section token too long for a callback button; skipping"
                );
                return None;
            }
            Some(InlineKeyboardButton::new(&section.display_name, token))
        })
        .collect();
    buttons.push(back_button());
    InlineKeyboardMarkup::single_column(buttons)
}

#[must_use]
pub fn back_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(vec![back_button()])
}

#[must_use]
pub fn fetch_error_text(err: &ScraperError) -> String {
    format!("Ошибка при запросе данных: {err}")
}

fn back_button() -> InlineKeyboardButton {
    InlineKeyboardButton::new(BACK_BUTTON, BACK_TO_STORES_TOKEN)
}
