//! Languages and translations.

mod common;

use common::setup;
use domain::models::{Language, NewLanguage};
use persistence::repositories::LanguageRepository;

#[tokio::test]
async fn test_empty_language_table_yields_english() {
    let ctx = setup().await;

    let languages = ctx.service.get_languages().await;
    assert_eq!(languages, vec![Language::default_locale()]);
    assert_eq!(languages[0].code, "en");
    assert_eq!(languages[0].name, "English");
}

#[tokio::test]
async fn test_stored_languages_replace_default() {
    let ctx = setup().await;
    ctx.service.add_language("sw", "Swahili").await;
    ctx.service.add_language("ar", "Arabic").await;

    let codes: Vec<_> = ctx
        .service
        .get_languages()
        .await
        .into_iter()
        .map(|l| l.code)
        .collect();
    assert_eq!(codes, vec!["sw", "ar"]);
}

#[tokio::test]
async fn test_duplicate_language_code_rejected() {
    let ctx = setup().await;
    let repo = LanguageRepository::new(ctx.db.clone());
    repo.create(NewLanguage::new("sw", "Swahili")).await.unwrap();

    let err = repo
        .create(NewLanguage::new("sw", "Kiswahili"))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_translations_by_language() {
    let ctx = setup().await;
    ctx.service.add_language("fr", "French").await;
    ctx.service.add_language("de", "German").await;
    ctx.service.add_translation("fr", "greeting", "Bonjour").await;
    ctx.service.add_translation("fr", "farewell", "Au revoir").await;
    ctx.service.add_translation("de", "greeting", "Hallo").await;

    let french = ctx.service.get_translations("fr").await;
    assert_eq!(french.len(), 2);
    assert_eq!(french[0].key, "greeting");
    assert_eq!(french[0].value, "Bonjour");

    assert_eq!(ctx.service.get_translations("de").await.len(), 1);
    assert!(ctx.service.get_translations("it").await.is_empty());
}

#[tokio::test]
async fn test_blank_translation_key_is_not_written() {
    let ctx = setup().await;
    ctx.service.add_translation("fr", "  ", "rien").await;
    ctx.service.add_translation("fr", "greeting", "").await;
    ctx.service.add_translation("", "greeting", "Bonjour").await;

    assert!(ctx.service.get_translations("fr").await.is_empty());
    assert!(ctx.service.get_translations("").await.is_empty());
}

#[tokio::test]
async fn test_blank_language_is_not_written() {
    let ctx = setup().await;
    ctx.service.add_language(" ", "Nothing").await;
    ctx.service.add_language("xx", "").await;

    assert_eq!(ctx.service.get_languages().await, vec![Language::default_locale()]);
}
