/*!
 * Message translation service.
 *
 * `Intl` looks a message up in the catalog and turns it into a final string,
 * either by rendering the message template with caller params
 * (`translate`) or by handing the stored localize config to a plural-aware
 * [`Localizer`] (`translate_plurals`).
 *
 * Both operations fall back to the source language, field by field: an empty
 * translation falls back to the source message, and an empty translated
 * localize config falls back to the source config.
 */

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::app_config::Config;
use crate::database::{DatabaseConnection, MessageRepository, TableNames, TranslationRecord};
use crate::errors::{IntlError, Result};
use crate::language_utils::parse_language_tag;
use crate::localizer::{LocalizationContext, LocalizeConfig, Localizer, PluralLocalizer};
use crate::template::{RenderOptions, Template};

/// Translate messages by key and language
///
/// `translate` is generic over the params type, so this trait is meant for
/// static dispatch (`impl Translator` / `T: Translator`).
pub trait Translator {
    /// Render the message for `key` in `lang`, substituting fields from `params`
    ///
    /// The stored template reads fields with `{{.FieldName}}`, e.g.
    /// `Basket: {{.Product}} price is {{.Price}}.`
    fn translate<P: Serialize + ?Sized>(&self, key: &str, lang: &str, params: &P) -> Result<String>;

    /// Localize the pluralized message for `key` in `lang` from its stored localize config
    fn translate_plurals(&self, key: &str, lang: &str) -> Result<String>;
}

/// Catalog-backed translator
#[derive(Debug, Clone)]
pub struct Intl<L = PluralLocalizer> {
    repository: MessageRepository,
    localizer: L,
    render_options: RenderOptions,
}

impl Intl<PluralLocalizer> {
    /// Create a translator using CLDR plural rules
    pub fn new(repository: MessageRepository) -> Self {
        Self::with_localizer(repository, PluralLocalizer::new())
    }

    /// Create a translator from application configuration
    pub fn from_config(db: DatabaseConnection, config: &Config) -> Result<Self> {
        let repository = MessageRepository::new(db, config.tables.clone())?;
        Ok(Self::with_localizer(repository, PluralLocalizer::with_options(config.render))
            .with_render_options(config.render))
    }
}

impl<L: Localizer> Intl<L> {
    /// Create a translator with a custom localizer
    pub fn with_localizer(repository: MessageRepository, localizer: L) -> Self {
        Self {
            repository,
            localizer,
            render_options: RenderOptions::default(),
        }
    }

    /// Set the options used when rendering message templates
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Create a translator over the same connection reading from other tables
    pub fn with_table_names(&self, tables: TableNames) -> Result<Self>
    where
        L: Clone,
    {
        Ok(Self {
            repository: self.repository.with_table_names(tables)?,
            localizer: self.localizer.clone(),
            render_options: self.render_options,
        })
    }

    /// Catalog repository used for lookups
    pub fn repository(&self) -> &MessageRepository {
        &self.repository
    }

    /// Localizer used by `translate_plurals`
    pub fn localizer(&self) -> &L {
        &self.localizer
    }

    /// Get the raw catalog record for a key and language
    pub fn get_message(&self, key: &str, lang: &str) -> Result<TranslationRecord> {
        self.repository.get_message(key, lang)
    }

    /// Async variant of [`Translator::translate`]; the lookup runs on the blocking pool
    pub async fn translate_async<P: Serialize + ?Sized>(
        &self,
        key: &str,
        lang: &str,
        params: &P,
    ) -> Result<String> {
        let record = self.repository.get_message_async(key, lang).await?;
        self.render_record(key, lang, &record, params)
    }

    /// Async variant of [`Translator::translate_plurals`]; the lookup runs on the blocking pool
    pub async fn translate_plurals_async(&self, key: &str, lang: &str) -> Result<String> {
        let context = LocalizationContext::new(parse_language_tag(lang)?);
        let record = self.repository.get_message_async(key, lang).await?;
        self.localize_record(key, &context, &record)
    }

    fn render_record<P: Serialize + ?Sized>(
        &self,
        key: &str,
        lang: &str,
        record: &TranslationRecord,
        params: &P,
    ) -> Result<String> {
        if !record.has_translation() {
            debug!("No translation of '{}' for '{}', using source message", key, lang);
        }

        let template = Template::parse(record.message_template()).map_err(IntlError::TemplateSyntax)?;
        if !template.has_fields() {
            return template
                .render(&Value::Null, &self.render_options)
                .map_err(IntlError::TemplateExecution);
        }

        template
            .render_serializable(params, &self.render_options)
            .map_err(IntlError::TemplateExecution)
    }

    fn localize_record(
        &self,
        key: &str,
        context: &LocalizationContext,
        record: &TranslationRecord,
    ) -> Result<String> {
        if record.translated_localize_config.is_empty() {
            debug!(
                "No translated localize config of '{}' for '{}', using source config",
                key,
                context.tag()
            );
        }

        let config = LocalizeConfig::from_json(record.localize_config_blob())?;
        Ok(self.localizer.localize(context, &config)?)
    }
}

impl<L: Localizer> Translator for Intl<L> {
    fn translate<P: Serialize + ?Sized>(&self, key: &str, lang: &str, params: &P) -> Result<String> {
        let record = self.repository.get_message(key, lang)?;
        self.render_record(key, lang, &record, params)
    }

    fn translate_plurals(&self, key: &str, lang: &str) -> Result<String> {
        let context = LocalizationContext::new(parse_language_tag(lang)?);
        let record = self.repository.get_message(key, lang)?;
        self.localize_record(key, &context, &record)
    }
}
