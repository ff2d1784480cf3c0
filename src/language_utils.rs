/*!
 * Language utilities for BCP 47 language tag handling.
 *
 * This module parses and normalizes language tags and derives the
 * fallback chain used when looking up plural rules.
 */

use unic_langid::LanguageIdentifier;

use crate::errors::{IntlError, Result};

/// Parse a language tag such as `fr-FR` or `pt_BR`
pub fn parse_language_tag(tag: &str) -> Result<LanguageIdentifier> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(IntlError::LanguageTag {
            tag: tag.to_string(),
            reason: "empty tag".to_string(),
        });
    }

    trimmed
        .parse::<LanguageIdentifier>()
        .map_err(|e| IntlError::LanguageTag {
            tag: tag.to_string(),
            reason: e.to_string(),
        })
}

/// Normalize a language tag to its canonical form (e.g. `fr_fr` -> `fr-FR`)
pub fn normalize_language_tag(tag: &str) -> Result<String> {
    Ok(parse_language_tag(tag)?.to_string())
}

/// Get the lookup chain for a tag, most specific first
///
/// `sr-Latn-RS` yields `sr-Latn-RS`, `sr-Latn`, `sr`.
pub fn language_fallbacks(tag: &LanguageIdentifier) -> Vec<LanguageIdentifier> {
    let mut chain = vec![tag.clone()];

    let without_region =
        LanguageIdentifier::from_parts(tag.language, tag.script, None, &[]);
    if !chain.contains(&without_region) {
        chain.push(without_region);
    }

    let bare = LanguageIdentifier::from_parts(tag.language, None, None, &[]);
    if !chain.contains(&bare) {
        chain.push(bare);
    }

    chain
}
