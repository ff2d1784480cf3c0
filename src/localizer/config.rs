/*!
 * Serialized localize config.
 *
 * A localize config is stored as JSON next to each message:
 *
 * ```json
 * {
 *   "DefaultMessage": { "ID": "PersonCats", "One": "{{.Name}} has {{.Count}} cat.", "Other": "{{.Name}} has {{.Count}} cats." },
 *   "TemplateData": { "Name": "Nick", "Count": 2 },
 *   "PluralCount": 2
 * }
 * ```
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PluralCategory;
use crate::errors::{IntlError, Result};

/// A pluralizable message with one text per plural category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    /// Message identifier
    #[serde(rename = "ID", alias = "Id", alias = "id", default)]
    pub id: String,

    /// Note for translators
    #[serde(alias = "description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Opening template delimiter, `{{` when unset
    #[serde(alias = "leftDelim", default, skip_serializing_if = "Option::is_none")]
    pub left_delim: Option<String>,

    /// Closing template delimiter, `}}` when unset
    #[serde(alias = "rightDelim", default, skip_serializing_if = "Option::is_none")]
    pub right_delim: Option<String>,

    #[serde(alias = "zero", default, skip_serializing_if = "Option::is_none")]
    pub zero: Option<String>,

    #[serde(alias = "one", default, skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,

    #[serde(alias = "two", default, skip_serializing_if = "Option::is_none")]
    pub two: Option<String>,

    #[serde(alias = "few", default, skip_serializing_if = "Option::is_none")]
    pub few: Option<String>,

    #[serde(alias = "many", default, skip_serializing_if = "Option::is_none")]
    pub many: Option<String>,

    #[serde(alias = "other", default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl Message {
    /// Text for a plural category, if defined and non-empty
    pub fn variant(&self, category: PluralCategory) -> Option<&str> {
        let text = match category {
            PluralCategory::Zero => &self.zero,
            PluralCategory::One => &self.one,
            PluralCategory::Two => &self.two,
            PluralCategory::Few => &self.few,
            PluralCategory::Many => &self.many,
            PluralCategory::Other => &self.other,
        };
        text.as_deref().filter(|t| !t.is_empty())
    }

    /// Whether any plural category has text
    pub fn has_variants(&self) -> bool {
        [
            PluralCategory::Zero,
            PluralCategory::One,
            PluralCategory::Two,
            PluralCategory::Few,
            PluralCategory::Many,
            PluralCategory::Other,
        ]
        .into_iter()
        .any(|c| self.variant(c).is_some())
    }
}

/// Decoded localize config with an integral plural count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalizeConfig {
    /// Message to localize
    pub default_message: Option<Message>,
    /// Values substituted into the selected variant
    pub template_data: Option<Value>,
    /// Count that selects the plural category; `None` selects `other`.
    /// Always set by [`LocalizeConfig::from_json`].
    pub plural_count: Option<i64>,
}

/// Wire form of the config; `PluralCount` may be any JSON number and is
/// `Null` when the key is missing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawLocalizeConfig {
    #[serde(alias = "defaultMessage", default)]
    default_message: Option<Message>,
    #[serde(alias = "templateData", default)]
    template_data: Option<Value>,
    #[serde(alias = "pluralCount", default)]
    plural_count: Value,
}

impl LocalizeConfig {
    /// Decode a stored config and coerce its plural count to an integer
    pub fn from_json(blob: &str) -> Result<Self> {
        let raw: RawLocalizeConfig = serde_json::from_str(blob)?;
        let plural_count = coerce_plural_count(&raw.plural_count)?;

        Ok(Self {
            default_message: raw.default_message,
            template_data: raw.template_data.filter(|d| !d.is_null()),
            plural_count: Some(plural_count),
        })
    }
}

/// Convert a decoded plural count to an integer, truncating fractions
///
/// Anything but a number, `null` and a missing count included, is an error.
pub fn coerce_plural_count(value: &Value) -> Result<i64> {
    match value {
        Value::Null => Err(IntlError::TypeCoercion { found: "null".to_string() }),
        Value::Number(n) => {
            if let Some(count) = n.as_i64() {
                return Ok(count);
            }
            match n.as_f64().map(f64::trunc) {
                Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(IntlError::TypeCoercion { found: n.to_string() }),
            }
        }
        Value::Bool(_) => Err(IntlError::TypeCoercion { found: "boolean".to_string() }),
        Value::String(s) => Err(IntlError::TypeCoercion { found: format!("string \"{}\"", s) }),
        Value::Array(_) => Err(IntlError::TypeCoercion { found: "array".to_string() }),
        Value::Object(_) => Err(IntlError::TypeCoercion { found: "object".to_string() }),
    }
}
