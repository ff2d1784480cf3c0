/*!
 * Integration tests for template rendering against a seeded catalog
 */

use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;

use dbintl::{ErrorKind, Intl, IntlError, RenderOptions, Translator};
use crate::common::{self, DELIVERY_FR, DELIVERY_KEY, DELIVERY_SOURCE, Delivery};

fn delivery_intl(translation: &str) -> Result<Intl> {
    let repo = common::create_catalog()?;
    common::seed_source(&repo, 1, DELIVERY_KEY, DELIVERY_SOURCE, "")?;
    common::seed_translation(&repo, 1, "fr-FR", translation, "")?;
    Ok(Intl::new(repo))
}

#[test]
fn test_translate_withTranslation_shouldRenderTranslatedTemplate() -> Result<()> {
    let intl = delivery_intl(DELIVERY_FR)?;

    let msg = intl.translate(DELIVERY_KEY, "fr-FR", &Delivery::new("demain", 123))?;

    assert_eq!(msg, "Bonjour, votre date de livraison est le demain et le prix est le 123");
    Ok(())
}

#[test]
fn test_translate_withEmptyTranslation_shouldFallBackToSourceMessage() -> Result<()> {
    let intl = delivery_intl("")?;

    let msg = intl.translate(DELIVERY_KEY, "fr-FR", &Delivery::new("tomorrow", 123))?;

    assert_eq!(msg, "Hi, your delivery date is tomorrow and a price is 123");
    Ok(())
}

#[test]
fn test_translate_withMapParams_shouldRenderLikeStruct() -> Result<()> {
    let intl = delivery_intl(DELIVERY_FR)?;
    let params = json!({ "Date": "demain", "Price": 123 });

    let msg = intl.translate(DELIVERY_KEY, "fr-FR", &params)?;

    assert_eq!(msg, "Bonjour, votre date de livraison est le demain et le prix est le 123");
    Ok(())
}

#[test]
fn test_translate_withMalformedTemplate_shouldReturnSyntaxError() -> Result<()> {
    let intl = delivery_intl(
        "Bonjour, votre date de livraison est le {{{.Date}} et le prix est le {{.Price}}",
    )?;

    let err = intl
        .translate(DELIVERY_KEY, "fr-FR", &Delivery::new("demain", 123))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TemplateSyntax);
    Ok(())
}

#[test]
fn test_translate_withMissingParam_shouldReturnExecutionError() -> Result<()> {
    let intl = delivery_intl(DELIVERY_FR)?;
    let mut params = HashMap::new();
    params.insert("Date", "demain");

    let err = intl.translate(DELIVERY_KEY, "fr-FR", &params).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TemplateExecution);
    assert!(err.to_string().contains("Price"));
    Ok(())
}

#[test]
fn test_translate_withNonObjectParams_shouldReadOnlyDot() -> Result<()> {
    let repo = common::create_catalog()?;
    common::seed_source(&repo, 1, "count", "{{.}} items", "")?;
    common::seed_translation(&repo, 1, "de", "{{.}} Artikel", "")?;
    let intl = Intl::new(repo);

    assert_eq!(intl.translate("count", "de", &5)?, "5 Artikel");
    Ok(())
}

#[test]
fn test_translate_withUnknownKey_shouldReturnNotFound() -> Result<()> {
    let intl = delivery_intl(DELIVERY_FR)?;

    let err = intl
        .translate("unknown.key", "fr-FR", &Delivery::new("demain", 123))
        .unwrap_err();

    assert!(matches!(err, IntlError::NotFound { ref key, ref lang } if key == "unknown.key" && lang == "fr-FR"));
    Ok(())
}

#[test]
fn test_translate_withUntranslatedLanguage_shouldReturnNotFound() -> Result<()> {
    let intl = delivery_intl(DELIVERY_FR)?;

    let err = intl
        .translate(DELIVERY_KEY, "ru-RU", &Delivery::new("завтра же", 123))
        .unwrap_err();

    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn test_translate_shouldNotValidateLanguageTag() -> Result<()> {
    let repo = common::create_catalog()?;
    common::seed_source(&repo, 1, "greeting", "Hello", "")?;
    common::seed_translation(&repo, 1, "___fake-Lang___", "Salut", "")?;
    let intl = Intl::new(repo);

    assert_eq!(intl.translate("greeting", "___fake-Lang___", &json!({}))?, "Salut");
    Ok(())
}

#[test]
fn test_translate_withEscapeHtml_shouldEscapeParamsOnly() -> Result<()> {
    let repo = common::create_catalog()?;
    common::seed_source(&repo, 1, "bold", "<b>{{.Name}}</b>", "")?;
    common::seed_translation(&repo, 1, "en", "", "")?;
    let intl = Intl::new(repo).with_render_options(RenderOptions { escape_html: true });

    let msg = intl.translate("bold", "en", &json!({ "Name": "Tom & \"Jerry\"" }))?;

    assert_eq!(msg, "<b>Tom &amp; &#34;Jerry&#34;</b>");
    Ok(())
}

#[test]
fn test_translate_calledRepeatedly_shouldReadFreshRows() -> Result<()> {
    let repo = common::create_catalog()?;
    common::seed_source(&repo, 1, "greeting", "Hello {{.Name}}", "")?;
    common::seed_translation(&repo, 1, "fr", "", "")?;
    let intl = Intl::new(repo.clone());
    let params = json!({ "Name": "Ana" });

    assert_eq!(intl.translate("greeting", "fr", &params)?, "Hello Ana");

    repo.connection().execute(|conn| {
        Ok(conn.execute("UPDATE message SET translation = 'Bonjour {{.Name}}' WHERE id = 1", [])?)
    })?;

    assert_eq!(intl.translate("greeting", "fr", &params)?, "Bonjour Ana");
    Ok(())
}

#[tokio::test]
async fn test_translateAsync_shouldMatchBlockingVariant() -> Result<()> {
    let intl = delivery_intl(DELIVERY_FR)?;
    let params = Delivery::new("demain", 123);

    let blocking = intl.translate(DELIVERY_KEY, "fr-FR", &params)?;
    let non_blocking = intl.translate_async(DELIVERY_KEY, "fr-FR", &params).await?;
    assert_eq!(blocking, non_blocking);

    let err = intl
        .translate_async(DELIVERY_KEY, "es", &params)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn test_translateAsync_withBlockOn_shouldFallBackToSource() -> Result<()> {
    let intl = delivery_intl("")?;

    let msg = tokio_test::block_on(async {
        intl.translate_async(DELIVERY_KEY, "fr-FR", &Delivery::new("tomorrow", 123))
            .await
    })?;

    assert_eq!(msg, "Hi, your delivery date is tomorrow and a price is 123");
    Ok(())
}

#[tokio::test]
async fn test_translateAsync_fromManyTasks_shouldShareConnection() -> Result<()> {
    let intl = delivery_intl(DELIVERY_FR)?;

    let mut handles = Vec::new();
    for price in 0..8 {
        let intl = intl.clone();
        handles.push(tokio::spawn(async move {
            intl.translate_async(DELIVERY_KEY, "fr-FR", &Delivery::new("demain", price))
                .await
        }));
    }

    for (price, handle) in handles.into_iter().enumerate() {
        let msg = handle.await??;
        assert!(msg.ends_with(&format!("le prix est le {}", price)));
    }
    Ok(())
}
