/*!
 * Plural-aware localization of stored messages.
 *
 * This module contains the pieces used by `Intl::translate_plurals`:
 * - `config`: the serialized localize config and its decoding
 * - `plural`: the default localizer backed by CLDR plural rules
 * - `mock`: a scripted localizer for tests
 */

use std::fmt::{self, Debug};
use std::sync::Arc;

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::language_utils::language_fallbacks;
use crate::template::TemplateError;

pub mod config;
pub mod mock;
pub mod plural;

pub use config::{LocalizeConfig, Message};
pub use plural::PluralLocalizer;

/// CLDR plural category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluralCategory::Zero => write!(f, "zero"),
            PluralCategory::One => write!(f, "one"),
            PluralCategory::Two => write!(f, "two"),
            PluralCategory::Few => write!(f, "few"),
            PluralCategory::Many => write!(f, "many"),
            PluralCategory::Other => write!(f, "other"),
        }
    }
}

impl From<intl_pluralrules::PluralCategory> for PluralCategory {
    fn from(category: intl_pluralrules::PluralCategory) -> Self {
        use intl_pluralrules::PluralCategory as Cldr;
        match category {
            Cldr::ZERO => PluralCategory::Zero,
            Cldr::ONE => PluralCategory::One,
            Cldr::TWO => PluralCategory::Two,
            Cldr::FEW => PluralCategory::Few,
            Cldr::MANY => PluralCategory::Many,
            Cldr::OTHER => PluralCategory::Other,
        }
    }
}

/// Errors raised by a [`Localizer`]
#[derive(Error, Debug, Clone)]
pub enum LocalizeError {
    /// No plural rules exist for the language or any of its fallbacks
    #[error("no plural rules for language '{0}'")]
    UnsupportedLanguage(String),

    /// The config carries no `DefaultMessage`
    #[error("localize config has no DefaultMessage")]
    MissingMessage,

    /// The message defines no text for any plural category
    #[error("message '{id}' has no text")]
    EmptyMessage { id: String },

    /// The selected plural category has no text
    #[error("message '{id}' has no '{category}' plural form")]
    MissingPluralForm { id: String, category: PluralCategory },

    /// The plural rules could not categorize the count
    #[error("plural count {count} cannot be categorized: {reason}")]
    InvalidCount { count: i64, reason: String },

    /// The selected variant failed to parse or render
    #[error("template error in message '{id}': {source}")]
    Template {
        id: String,
        #[source]
        source: TemplateError,
    },

    /// Failure reported by a custom localizer
    #[error("{0}")]
    Other(String),
}

/// Per-call localization context, scoped to one parsed language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationContext {
    tag: LanguageIdentifier,
}

impl LocalizationContext {
    /// Create a context for the given language
    pub fn new(tag: LanguageIdentifier) -> Self {
        Self { tag }
    }

    /// Language this context localizes into
    pub fn tag(&self) -> &LanguageIdentifier {
        &self.tag
    }

    /// Lookup chain for the language, most specific first
    pub fn fallbacks(&self) -> Vec<LanguageIdentifier> {
        language_fallbacks(&self.tag)
    }
}

/// Capability that turns a decoded localize config into a final string
///
/// Implementations select the plural variant for the config's count under
/// the context language and substitute the template data.
pub trait Localizer: Send + Sync + Debug {
    /// Localize a config for the given context
    fn localize(
        &self,
        context: &LocalizationContext,
        config: &LocalizeConfig,
    ) -> Result<String, LocalizeError>;
}

impl<L: Localizer + ?Sized> Localizer for Arc<L> {
    fn localize(
        &self,
        context: &LocalizationContext,
        config: &LocalizeConfig,
    ) -> Result<String, LocalizeError> {
        (**self).localize(context, config)
    }
}
