/*!
 * Error types for the dbintl library.
 *
 * Every failure of a lookup or render is returned to the caller as one of
 * these types, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::localizer::LocalizeError;
use crate::template::TemplateError;

/// Coarse category of an [`IntlError`], for callers that only branch on kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Query,
    Connection,
    InvalidTableName,
    LanguageTag,
    ConfigDecode,
    TypeCoercion,
    TemplateSyntax,
    TemplateExecution,
    Localization,
}

/// Errors returned by message lookups and rendering
#[derive(Error, Debug)]
pub enum IntlError {
    /// No row matched the (key, language) pair
    #[error("no message found for key '{key}' in language '{lang}'")]
    NotFound {
        /// Message key (category)
        key: String,
        /// Language tag used for the lookup
        lang: String,
    },

    /// The database rejected or failed the query
    #[error("Query error: {0}")]
    Query(#[from] rusqlite::Error),

    /// The shared connection could not be used
    #[error("Connection error: {context}")]
    Connection {
        /// What was being attempted
        context: String,
        /// Lock poisoning message or the failed blocking task
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A configured table name is not a plain SQL identifier
    #[error("Invalid table name: '{0}'")]
    InvalidTableName(String),

    /// The language tag is not well-formed
    #[error("Language tag error: '{tag}' is not well-formed ({reason})")]
    LanguageTag {
        /// Tag as given by the caller
        tag: String,
        /// Parser diagnostic
        reason: String,
    },

    /// The stored localize config is not valid JSON for the expected shape
    #[error("Failed to decode localize config: {0}")]
    ConfigDecode(#[from] serde_json::Error),

    /// The plural count of a localize config is not numeric
    #[error("PluralCount must be a number, found {found}")]
    TypeCoercion {
        /// JSON type or value that was found instead
        found: String,
    },

    /// The message template could not be parsed
    #[error("Template syntax error: {0}")]
    TemplateSyntax(TemplateError),

    /// The message template could not be executed against the params
    #[error("Template execution error: {0}")]
    TemplateExecution(TemplateError),

    /// The plural localizer failed
    #[error("Localization error: {0}")]
    Localization(#[from] LocalizeError),
}

impl IntlError {
    pub(crate) fn connection<E>(context: &str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Connection {
            context: context.to_string(),
            source: source.into(),
        }
    }

    /// Get the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Query(_) => ErrorKind::Query,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::InvalidTableName(_) => ErrorKind::InvalidTableName,
            Self::LanguageTag { .. } => ErrorKind::LanguageTag,
            Self::ConfigDecode(_) => ErrorKind::ConfigDecode,
            Self::TypeCoercion { .. } => ErrorKind::TypeCoercion,
            Self::TemplateSyntax(_) => ErrorKind::TemplateSyntax,
            Self::TemplateExecution(_) => ErrorKind::TemplateExecution,
            Self::Localization(_) => ErrorKind::Localization,
        }
    }

    /// Whether this error means the (key, language) pair has no row
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias used across the library
pub type Result<T, E = IntlError> = std::result::Result<T, E>;
