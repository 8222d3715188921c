/*!
 * Tests for the translation service over mock providers
 */

use tagloom::app_config::TranslationConfig;
use tagloom::errors::TranslationError;
use tagloom::providers::mock::MockProvider;
use tagloom::translation::{TRANSLATION_FAILED_SENTINEL, TranslationService};

fn service(provider: MockProvider) -> TranslationService {
    TranslationService::with_mock(provider, TranslationConfig::default())
}

#[tokio::test]
async fn test_translate_withIdentityProvider_shouldPreserveMarkup() {
    let service = service(MockProvider::identity());

    let out = service
        .translate("<p>Hello <b>world</b></p>", None, "fr")
        .await
        .unwrap();
    assert_eq!(out, "<p>Hello <b>world</b></p>");
}

#[tokio::test]
async fn test_translate_withContext_shouldStillTranslatePayloadOnly() {
    let service = service(MockProvider::identity());

    let out = service
        .translate("window two payload", Some("window one tail"), "fr")
        .await
        .unwrap();
    // Identity returns the payload; the context must not leak into it.
    assert_eq!(out, "window two payload");
}

#[tokio::test]
async fn test_translate_withFailingProvider_shouldSurfaceProviderError() {
    let service = service(MockProvider::failing());

    let result = service.translate("<p>x</p>", None, "fr").await;
    assert!(matches!(result, Err(TranslationError::Provider(_))));
}

#[tokio::test]
async fn test_translate_withEmptyResponse_shouldBeDistinctError() {
    let service = service(MockProvider::empty());

    let result = service.translate("<p>x</p>", None, "fr").await;
    assert!(matches!(result, Err(TranslationError::EmptyResponse)));
}

#[tokio::test]
async fn test_test_connection_shouldFollowProviderBehavior() {
    assert!(service(MockProvider::identity()).test_connection().await.is_ok());
    assert!(service(MockProvider::failing()).test_connection().await.is_err());
}

#[test]
fn test_sentinel_shouldMatchDocumentedValue() {
    assert_eq!(TRANSLATION_FAILED_SENTINEL, "ERROR: Translation Failed");
}
