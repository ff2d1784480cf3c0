/*!
 * Integration tests for catalog setup, table names and on-disk databases
 */

use anyhow::Result;
use serde_json::json;
use tempfile::TempDir;

use dbintl::{
    Config, DatabaseConnection, ErrorKind, Intl, MessageRepository, TableNames, Translator,
};
use crate::common::{self, DELIVERY_FR, DELIVERY_KEY, DELIVERY_SOURCE, Delivery};

#[test]
fn test_translate_withCustomTableNames_shouldQueryThoseTables() -> Result<()> {
    let db = DatabaseConnection::new_in_memory()?;
    let repo = MessageRepository::new(db, TableNames::new("tbl1", "tbl2"))?;
    repo.ensure_tables()?;
    common::seed_source(&repo, 1, DELIVERY_KEY, DELIVERY_SOURCE, "")?;
    common::seed_translation(&repo, 1, "fr-FR", DELIVERY_FR, "")?;
    let intl = Intl::new(repo);

    let msg = intl.translate(DELIVERY_KEY, "fr-FR", &Delivery::new("demain", 123))?;

    assert_eq!(msg, "Bonjour, votre date de livraison est le demain et le prix est le 123");
    Ok(())
}

#[test]
fn test_withTableNames_shouldNotAffectExistingTranslator() -> Result<()> {
    let repo = common::create_catalog()?;
    common::seed_source(&repo, 1, "greeting", "Hello", "")?;
    common::seed_translation(&repo, 1, "fr", "Bonjour", "")?;
    let intl = Intl::new(repo);

    let renamed = intl.with_table_names(TableNames::new("tbl1", "tbl2"))?;
    renamed.repository().ensure_tables()?;
    common::seed_source(renamed.repository(), 1, "greeting", "Hello", "")?;
    common::seed_translation(renamed.repository(), 1, "fr", "Salut", "")?;

    assert_eq!(intl.translate("greeting", "fr", &json!({}))?, "Bonjour");
    assert_eq!(renamed.translate("greeting", "fr", &json!({}))?, "Salut");
    assert_eq!(intl.repository().tables(), &TableNames::default());
    Ok(())
}

#[test]
fn test_new_withInjectedTableName_shouldRejectIt() -> Result<()> {
    let db = DatabaseConnection::new_in_memory()?;

    let err = MessageRepository::new(db, TableNames::new("message; DROP TABLE x", "message"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidTableName);
    Ok(())
}

#[test]
fn test_translate_withoutTables_shouldReturnQueryError() -> Result<()> {
    let intl = Intl::new(MessageRepository::with_default_tables(
        DatabaseConnection::new_in_memory()?,
    ));

    let err = intl.translate("greeting", "fr", &json!({})).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Query);
    Ok(())
}

#[test]
fn test_fromConfig_withOnDiskCatalog_shouldPersistBetweenConnections() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = Config::default();
    config.database_path = temp_dir
        .path()
        .join("nested")
        .join("catalog.db")
        .to_string_lossy()
        .into_owned();
    config.tables = TableNames::new("tbl1", "tbl2");
    config.validate()?;

    {
        let intl = Intl::from_config(DatabaseConnection::new(&config.database_path)?, &config)?;
        intl.repository().ensure_tables()?;
        common::seed_source(intl.repository(), 1, DELIVERY_KEY, DELIVERY_SOURCE, "")?;
        common::seed_translation(intl.repository(), 1, "fr-FR", "", "")?;
    }

    let intl = Intl::from_config(DatabaseConnection::new(&config.database_path)?, &config)?;
    let msg = intl.translate(DELIVERY_KEY, "fr-FR", &Delivery::new("tomorrow", 123))?;

    assert_eq!(msg, "Hi, your delivery date is tomorrow and a price is 123");
    Ok(())
}

#[test]
fn test_fromConfig_withEscapeHtml_shouldApplyToBothOperations() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = Config::default();
    config.render.escape_html = true;
    let db = DatabaseConnection::new(temp_dir.path().join("catalog.db"))?;
    let intl = Intl::from_config(db, &config)?;
    intl.repository().ensure_tables()?;

    let plural = json!({
        "DefaultMessage": { "ID": "Name", "One": "{{.Name}} one", "Other": "{{.Name}} many" },
        "TemplateData": { "Name": "<i>" },
        "PluralCount": 3,
    })
    .to_string();
    common::seed_source(intl.repository(), 1, "name", "{{.Name}}", &plural)?;
    common::seed_translation(intl.repository(), 1, "en", "", "")?;

    assert_eq!(intl.translate("name", "en", &json!({ "Name": "<i>" }))?, "&lt;i&gt;");
    assert_eq!(intl.translate_plurals("name", "en")?, "&lt;i&gt; many");
    Ok(())
}

#[test]
fn test_getMessage_shouldExposeRawRecord() -> Result<()> {
    let repo = common::create_catalog()?;
    common::seed_source(&repo, 1, DELIVERY_KEY, DELIVERY_SOURCE, "{\"PluralCount\": 1}")?;
    common::seed_translation(&repo, 1, "fr-FR", DELIVERY_FR, "")?;
    let intl = Intl::new(repo);

    let record = intl.get_message(DELIVERY_KEY, "fr-FR")?;

    assert_eq!(record.message, DELIVERY_SOURCE);
    assert_eq!(record.translation, DELIVERY_FR);
    assert_eq!(record.localize_config, "{\"PluralCount\": 1}");
    assert!(record.translated_localize_config.is_empty());
    assert_eq!(record.localize_config_blob(), "{\"PluralCount\": 1}");
    Ok(())
}
