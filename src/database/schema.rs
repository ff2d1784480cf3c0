/*!
 * Message catalog table definitions.
 *
 * The catalog is two tables joined on `id`: source messages keyed by
 * category, and their translations keyed by language. This module only
 * creates the tables when they are missing; it does not version or
 * migrate them.
 */

use log::{debug, info};
use rusqlite::Connection;

use super::models::TableNames;
use crate::errors::Result;

/// Create both catalog tables if they do not exist yet
pub fn ensure_tables(conn: &Connection, tables: &TableNames) -> Result<()> {
    tables.validate()?;

    if table_exists(conn, &tables.source_message)? && table_exists(conn, &tables.message)? {
        debug!(
            "Catalog tables '{}' and '{}' already exist",
            tables.source_message, tables.message
        );
        return Ok(());
    }

    let sm = &tables.source_message;
    let m = &tables.message;

    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {sm} (
            id INTEGER PRIMARY KEY,
            category TEXT NOT NULL,
            message TEXT NOT NULL DEFAULT '',
            localize_config TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_{sm}_category ON {sm}(category);

        CREATE TABLE IF NOT EXISTS {m} (
            id INTEGER NOT NULL REFERENCES {sm}(id) ON DELETE CASCADE,
            language TEXT NOT NULL,
            translation TEXT NOT NULL DEFAULT '',
            localize_config TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (id, language)
        );
        "#
    ))?;

    info!("Created catalog tables '{}' and '{}'", sm, m);
    Ok(())
}

/// Check whether a table exists in the database
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
