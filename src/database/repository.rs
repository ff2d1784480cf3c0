/*!
 * Repository layer for message catalog lookups.
 *
 * This module runs the single read query behind every translation and maps
 * the result row into a `TranslationRecord`.
 */

use log::debug;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Arc;

use super::connection::DatabaseConnection;
use super::models::{TableNames, TranslationRecord};
use super::schema;
use crate::errors::{IntlError, Result};

/// Repository for message catalog lookups
#[derive(Clone, Debug)]
pub struct MessageRepository {
    /// Database connection
    db: DatabaseConnection,
    /// Catalog table names, fixed for the lifetime of the repository
    tables: TableNames,
    /// Lookup query built from the table names
    select_sql: Arc<str>,
}

impl MessageRepository {
    /// Create a repository reading from the given tables
    pub fn new(db: DatabaseConnection, tables: TableNames) -> Result<Self> {
        tables.validate()?;
        let select_sql = Self::build_select_sql(&tables).into();

        Ok(Self {
            db,
            tables,
            select_sql,
        })
    }

    /// Create a repository reading from `source_message` and `message`
    pub fn with_default_tables(db: DatabaseConnection) -> Self {
        let tables = TableNames::default();
        let select_sql = Self::build_select_sql(&tables).into();

        Self {
            db,
            tables,
            select_sql,
        }
    }

    /// Create a repository over an in-memory database with empty catalog tables (for testing)
    pub fn new_in_memory() -> anyhow::Result<Self> {
        let repository = Self::with_default_tables(DatabaseConnection::new_in_memory()?);
        repository.ensure_tables()?;
        Ok(repository)
    }

    /// Create a repository over the same connection reading from other tables
    pub fn with_table_names(&self, tables: TableNames) -> Result<Self> {
        Self::new(self.db.clone(), tables)
    }

    /// Table names this repository reads from
    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    /// Underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Create the catalog tables if they are missing
    pub fn ensure_tables(&self) -> Result<()> {
        self.db.execute(|conn| schema::ensure_tables(conn, &self.tables))
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Get the message and its translation for a key and language
    pub fn get_message(&self, key: &str, lang: &str) -> Result<TranslationRecord> {
        debug!("Looking up message '{}' for language '{}'", key, lang);

        self.db
            .execute(|conn| Self::get_message_sync(conn, &self.select_sql, key, lang))
    }

    /// Get the message and its translation without blocking the async runtime
    pub async fn get_message_async(&self, key: &str, lang: &str) -> Result<TranslationRecord> {
        debug!("Looking up message '{}' for language '{}'", key, lang);

        let select_sql = self.select_sql.clone();
        let key = key.to_string();
        let lang = lang.to_string();

        self.db
            .execute_async(move |conn| Self::get_message_sync(conn, &select_sql, &key, &lang))
            .await
    }

    fn get_message_sync(
        conn: &Connection,
        select_sql: &str,
        key: &str,
        lang: &str,
    ) -> Result<TranslationRecord> {
        let record = conn
            .query_row(select_sql, params![key, lang], |row| {
                Ok(TranslationRecord {
                    message: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    translation: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    localize_config: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    translated_localize_config: row
                        .get::<_, Option<String>>(3)?
                        .unwrap_or_default(),
                })
            })
            .optional()?;

        record.ok_or_else(|| IntlError::NotFound {
            key: key.to_string(),
            lang: lang.to_string(),
        })
    }

    fn build_select_sql(tables: &TableNames) -> String {
        format!(
            "SELECT sm.message, m.translation, sm.localize_config, m.localize_config \
             FROM {} AS sm INNER JOIN {} AS m ON sm.id = m.id \
             WHERE sm.category = ?1 AND m.language = ?2",
            tables.source_message, tables.message
        )
    }
}
