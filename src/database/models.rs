/*!
 * Database entity models.
 *
 * These structures map the message catalog tables to plain Rust values.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{IntlError, Result};

/// Default name of the source message table
pub const DEFAULT_SOURCE_MESSAGE_TABLE: &str = "source_message";

/// Default name of the translated message table
pub const DEFAULT_MESSAGE_TABLE: &str = "message";

static SQL_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// One source message joined with its translation for a language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationRecord {
    /// Source language template text
    pub message: String,
    /// Translated template text, empty when not translated yet
    pub translation: String,
    /// Source language localize config (JSON)
    pub localize_config: String,
    /// Translated localize config (JSON), empty when not translated yet
    pub translated_localize_config: String,
}

impl TranslationRecord {
    /// Whether the message has a non-empty translation
    pub fn has_translation(&self) -> bool {
        !self.translation.is_empty()
    }

    /// Template to render: the translation, or the source message as fallback
    pub fn message_template(&self) -> &str {
        if self.has_translation() {
            &self.translation
        } else {
            &self.message
        }
    }

    /// Localize config to decode: the translated one, or the source one as fallback
    pub fn localize_config_blob(&self) -> &str {
        if self.translated_localize_config.is_empty() {
            &self.localize_config
        } else {
            &self.translated_localize_config
        }
    }
}

/// Names of the two catalog tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNames {
    /// Table holding source messages, keyed by category
    #[serde(default = "default_source_message_table")]
    pub source_message: String,
    /// Table holding translations, keyed by language
    #[serde(default = "default_message_table")]
    pub message: String,
}

fn default_source_message_table() -> String {
    DEFAULT_SOURCE_MESSAGE_TABLE.to_string()
}

fn default_message_table() -> String {
    DEFAULT_MESSAGE_TABLE.to_string()
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            source_message: default_source_message_table(),
            message: default_message_table(),
        }
    }
}

impl TableNames {
    /// Create table names from the source message and message table names
    pub fn new(source_message: &str, message: &str) -> Self {
        Self {
            source_message: source_message.to_string(),
            message: message.to_string(),
        }
    }

    /// Check that both names are plain SQL identifiers
    pub fn validate(&self) -> Result<()> {
        for name in [&self.source_message, &self.message] {
            if !SQL_IDENTIFIER.is_match(name) {
                return Err(IntlError::InvalidTableName(name.clone()));
            }
        }
        Ok(())
    }
}
