/*!
 * Tests for error types and conversions
 */

use dbintl::errors::{ErrorKind, IntlError};
use dbintl::localizer::LocalizeError;
use dbintl::template::{Template, TemplateError};

#[test]
fn test_notFound_shouldDisplayKeyAndLanguage() {
    let error = IntlError::NotFound {
        key: "delivery.datetime.price".to_string(),
        lang: "fr-FR".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("delivery.datetime.price"));
    assert!(display.contains("fr-FR"));
    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert!(error.is_not_found());
}

#[test]
fn test_fromRusqliteError_shouldWrapAsQuery() {
    let error: IntlError = rusqlite::Error::QueryReturnedNoRows.into();
    assert_eq!(error.kind(), ErrorKind::Query);
    assert!(!error.is_not_found());
    assert!(format!("{}", error).contains("Query error"));
}

#[test]
fn test_fromSerdeError_shouldWrapAsConfigDecode() {
    let source = serde_json::from_str::<serde_json::Value>("{{").unwrap_err();
    let error: IntlError = source.into();
    assert_eq!(error.kind(), ErrorKind::ConfigDecode);
    assert!(format!("{}", error).contains("localize config"));
}

#[test]
fn test_fromLocalizeError_shouldWrapAsLocalization() {
    let error: IntlError = LocalizeError::UnsupportedLanguage("qaa".to_string()).into();
    assert_eq!(error.kind(), ErrorKind::Localization);
    assert!(format!("{}", error).contains("qaa"));
}

#[test]
fn test_templateErrors_shouldSplitIntoSyntaxAndExecution() {
    let syntax = Template::parse("{{.Date").unwrap_err();
    assert!(syntax.is_syntax());
    assert_eq!(IntlError::TemplateSyntax(syntax).kind(), ErrorKind::TemplateSyntax);

    let execution = TemplateError::MissingField { path: ".Price".to_string() };
    assert!(!execution.is_syntax());
    let error = IntlError::TemplateExecution(execution);
    assert_eq!(error.kind(), ErrorKind::TemplateExecution);
    assert!(format!("{}", error).contains(".Price"));
}

#[test]
fn test_languageTagError_shouldDisplayTag() {
    let error = IntlError::LanguageTag {
        tag: "___fake-Lang___".to_string(),
        reason: "invalid subtag".to_string(),
    };
    assert!(format!("{}", error).contains("___fake-Lang___"));
    assert_eq!(error.kind(), ErrorKind::LanguageTag);
}

#[test]
fn test_intlError_shouldConvertIntoAnyhow() {
    fn lookup() -> anyhow::Result<()> {
        let result: Result<(), IntlError> =
            Err(IntlError::TypeCoercion { found: "boolean".to_string() });
        result?;
        Ok(())
    }

    let error = lookup().unwrap_err();
    assert!(error.downcast_ref::<IntlError>().is_some());
    assert!(error.to_string().contains("boolean"));
}
