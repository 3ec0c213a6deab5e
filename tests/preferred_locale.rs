//! Runtime locale facts rendered into pages.

use locale_router::config::schema::{LocaleEntry, RoutingStrategy};

mod common;

async fn preferred_page(
    i18n: locale_router::config::schema::I18nConfig,
    accept_language: &str,
) -> String {
    let (addr, shutdown) = common::spawn_server(common::site(i18n)).await;
    let res = common::client()
        .get(format!("http://{addr}/new-site/preferred-locale"))
        .header("accept-language", accept_language)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    shutdown.trigger();
    body
}

#[tokio::test]
async fn test_wildcard_has_no_preference() {
    let body = preferred_page(common::i18n(RoutingStrategy::PrefixOtherLocales), "*").await;
    assert!(body.contains("Locale: none"));
    assert!(body.contains("Locale list: empty"));
}

#[tokio::test]
async fn test_single_preference() {
    let body = preferred_page(common::i18n(RoutingStrategy::PrefixOtherLocales), "pt").await;
    assert!(body.contains("Locale: pt"));
    assert!(body.contains("Locale list: pt"));
}

#[tokio::test]
async fn test_no_overlap() {
    let body = preferred_page(
        common::i18n(RoutingStrategy::PrefixOtherLocales),
        "fr;q=0.1,fr-AU;q=0.9",
    )
    .await;
    assert!(body.contains("Locale: none"));
    assert!(body.contains("Locale list: empty"));
}

#[tokio::test]
async fn test_underscored_locales() {
    let mut i18n = common::i18n(RoutingStrategy::PrefixOtherLocales);
    i18n.default_locale = "en".to_string();
    i18n.locales = vec![
        LocaleEntry::from("en"),
        LocaleEntry::from("en_AU"),
        LocaleEntry::from("pt_BR"),
        LocaleEntry::from("es_US"),
    ];
    i18n.fallback.clear();

    let body = preferred_page(i18n, "en-AU;q=0.1,pt-BR;q=0.9").await;
    assert!(body.contains("Locale: pt_BR"));
    assert!(body.contains("Locale list: pt_BR, en_AU"));
}

#[tokio::test]
async fn test_current_locale() {
    let (addr, shutdown) =
        common::spawn_server(common::site(common::i18n(RoutingStrategy::PrefixOtherLocales))).await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/new-site/current-locale"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "Current Locale: en");

    let res = client
        .get(format!("http://{addr}/new-site/pt/current-locale"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "Current Locale: pt");

    shutdown.trigger();
}
