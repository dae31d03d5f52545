use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Callback token that returns the user to the store menu.
///
/// Merchant keys may never collide with it.
pub const BACK_TO_STORES_TOKEN: &str = "back_to_store_selection";

/// A retail chain whose discount page is scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantSource {
    /// Callback token for store selection, e.g. `"magnit"`.
    pub key: String,
    /// Button text shown in the store menu.
    pub label: String,
    pub url: String,
}

impl MerchantSource {
    fn new(key: &str, label: &str, url: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// The built-in merchant set, in menu order.
#[must_use]
pub fn default_merchants() -> MerchantRegistry {
    MerchantRegistry {
        merchants: vec![
            MerchantSource::new(
                "pyaterochka",
                "5ка",
                "https://proshoper.ru/actions/pyaterochka/krasnodar/",
            ),
            MerchantSource::new(
                "magnit",
                "Магнит",
                "https://proshoper.ru/actions/magnit-magazin/krasnodar/",
            ),
        ],
    }
}

/// Ordered, validated set of merchants. Immutable after startup.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantRegistry {
    pub merchants: Vec<MerchantSource>,
}

impl MerchantRegistry {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MerchantSource> {
        self.merchants.iter().find(|m| m.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MerchantSource> {
        self.merchants.iter()
    }
}

/// Load and validate a merchant list from a YAML file.
///
/// Expected shape:
///
/// ```yaml
/// merchants:
///   - key: magnit
///     label: Магнит
///     url: https://proshoper.ru/actions/magnit-magazin/krasnodar/
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_merchants(path: &Path) -> Result<MerchantRegistry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::MerchantsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_merchants(&content)
}

fn parse_merchants(content: &str) -> Result<MerchantRegistry, ConfigError> {
    let registry: MerchantRegistry = serde_yaml::from_str(content)?;
    validate_merchants(&registry)?;
    Ok(registry)
}

fn validate_merchants(registry: &MerchantRegistry) -> Result<(), ConfigError> {
    if registry.merchants.is_empty() {
        return Err(ConfigError::Validation(
            "at least one merchant must be configured".to_string(),
        ));
    }

    let mut seen_keys = HashSet::new();

    for merchant in &registry.merchants {
        if merchant.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "merchant key must be non-empty".to_string(),
            ));
        }

        // Section tokens are `{key}_{section_id}` split on the first underscore.
        if merchant.key.contains('_') {
            return Err(ConfigError::Validation(format!(
                "merchant key '{}' must not contain '_'",
                merchant.key
            )));
        }

        if merchant.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "merchant '{}' has an empty label",
                merchant.key
            )));
        }

        if merchant.url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "merchant '{}' has an empty url",
                merchant.key
            )));
        }

        if !seen_keys.insert(merchant.key.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate merchant key: '{}'",
                merchant.key
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "merchants_test.rs"]
mod tests;
