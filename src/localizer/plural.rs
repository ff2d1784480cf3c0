/*!
 * Default localizer backed by CLDR cardinal plural rules.
 */

use intl_pluralrules::{PluralRuleType, PluralRules};
use log::debug;
use serde_json::{Map, Value, json};

use super::{LocalizationContext, LocalizeConfig, LocalizeError, Localizer, PluralCategory};
use crate::template::{RenderOptions, Template, TemplateError};

/// Selects a message variant with the context language's plural rules and
/// renders it with the config's template data
#[derive(Debug, Clone, Default)]
pub struct PluralLocalizer {
    options: RenderOptions,
}

impl PluralLocalizer {
    /// Create a localizer with default render options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a localizer with the given render options
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Plural category of `count` in the context language
    pub fn plural_category(
        &self,
        context: &LocalizationContext,
        count: i64,
    ) -> Result<PluralCategory, LocalizeError> {
        let rules = plural_rules(context)?;
        rules
            .select(count)
            .map(PluralCategory::from)
            .map_err(|reason| LocalizeError::InvalidCount {
                count,
                reason: reason.to_string(),
            })
    }
}

/// Cardinal rules for the most specific tag in the context's fallback chain
fn plural_rules(context: &LocalizationContext) -> Result<PluralRules, LocalizeError> {
    context
        .fallbacks()
        .into_iter()
        .find_map(|tag| PluralRules::create(tag, PluralRuleType::CARDINAL).ok())
        .ok_or_else(|| LocalizeError::UnsupportedLanguage(context.tag().to_string()))
}

impl Localizer for PluralLocalizer {
    fn localize(
        &self,
        context: &LocalizationContext,
        config: &LocalizeConfig,
    ) -> Result<String, LocalizeError> {
        let message = config
            .default_message
            .as_ref()
            .ok_or(LocalizeError::MissingMessage)?;
        if !message.has_variants() {
            return Err(LocalizeError::EmptyMessage { id: message.id.clone() });
        }

        let category = match config.plural_count {
            Some(count) => self.plural_category(context, count)?,
            None => PluralCategory::Other,
        };
        debug!(
            "Message '{}' in '{}' uses plural form '{}'",
            message.id,
            context.tag(),
            category
        );

        let text = message
            .variant(category)
            .ok_or_else(|| LocalizeError::MissingPluralForm {
                id: message.id.clone(),
                category,
            })?;

        let default_data;
        let data = match (&config.template_data, config.plural_count) {
            (Some(data), _) => data,
            (None, Some(count)) => {
                default_data = json!({ "PluralCount": count });
                &default_data
            }
            (None, None) => {
                default_data = Value::Object(Map::new());
                &default_data
            }
        };

        let template_error = |source: TemplateError| LocalizeError::Template {
            id: message.id.clone(),
            source,
        };
        let template = Template::parse_with_delims(
            text,
            message.left_delim.as_deref().unwrap_or_default(),
            message.right_delim.as_deref().unwrap_or_default(),
        )
        .map_err(template_error)?;

        template.render(data, &self.options).map_err(template_error)
    }
}
