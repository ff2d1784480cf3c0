/*!
 * Database module for the message catalog.
 *
 * This module provides SQLite-based access to:
 * - Source messages keyed by category
 * - Their translations keyed by language
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{TableNames, TranslationRecord};
pub use repository::MessageRepository;
