/*!
 * # dbintl - Database-backed message translation
 *
 * A Rust library for looking up translated messages in a SQL message catalog
 * and turning them into final, localized strings.
 *
 * ## Features
 *
 * - Message lookup by key (category) and language from two joined tables
 * - Template rendering of `{{.Field}}` placeholders with caller params
 * - Plural-aware localization driven by CLDR plural rules
 * - Field-by-field fallback to the source message when a translation is empty
 * - Catalog table names injected at construction and fixed afterwards
 * - Blocking and async (spawn_blocking) variants of every lookup
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: SQLite catalog access:
 *   - `database::connection`: Shared connection handling
 *   - `database::schema`: Catalog table creation
 *   - `database::repository`: The message lookup query
 * - `template`: Minimal `{{.Field}}` template engine
 * - `localizer`: Plural localization of stored localize configs
 * - `language_utils`: BCP 47 language tag utilities
 * - `intl`: The translation service tying the pieces together
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod database;
pub mod errors;
pub mod intl;
pub mod language_utils;
pub mod localizer;
pub mod template;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::{DatabaseConnection, MessageRepository, TableNames, TranslationRecord};
pub use errors::{ErrorKind, IntlError};
pub use intl::{Intl, Translator};
pub use language_utils::{normalize_language_tag, parse_language_tag};
pub use localizer::{LocalizationContext, LocalizeConfig, Localizer, PluralLocalizer};
pub use template::{RenderOptions, Template};
