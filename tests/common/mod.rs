//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

use tempfile::TempDir;

use locale_router::config::schema::{
    FallbackType, I18nConfig, LocaleEntry, RoutingStrategy, SiteConfig, TrailingSlash,
};
use locale_router::content::{Endpoint, PageTable};
use locale_router::http::{HttpServer, ServerMode};
use locale_router::lifecycle::{Shutdown, Site};

/// en/pt/it under `/new-site`, with `it` falling back to `en`.
pub fn i18n(strategy: RoutingStrategy) -> I18nConfig {
    I18nConfig {
        default_locale: "en".to_string(),
        locales: vec![
            LocaleEntry::from("en"),
            LocaleEntry::from("pt"),
            LocaleEntry::from("it"),
        ],
        routing_strategy: strategy,
        fallback: BTreeMap::from([("it".to_string(), "en".to_string())]),
        fallback_type: FallbackType::Redirect,
        base: "/new-site".to_string(),
        trailing_slash: TrailingSlash::Ignore,
        ..I18nConfig::default()
    }
}

/// Pages: en has everything, pt a subset, it nothing.
pub fn pages() -> PageTable {
    let mut pages = PageTable::new()
        .with_page("en", "/", "<html><body>Hello</body></html>")
        .with_page("en", "/start", "Start")
        .with_page("en", "/blog/1", "Hello world")
        .with_page("en", "/current-locale", "Current Locale: {{ current_locale }}")
        .with_page(
            "en",
            "/preferred-locale",
            "Locale: {{ preferred_locale }}\nLocale list: {{ preferred_locale_list }}",
        )
        .with_page("pt", "/", "<html><body>Hola</body></html>")
        .with_page("pt", "/start", "Oi essa e start")
        .with_page("pt", "/blog/1", "Hola mundo")
        .with_page("pt", "/current-locale", "Current Locale: {{ current_locale }}")
        .with_endpoint("/test.json", Endpoint::new(r#"{"lang":"en"}"#, "application/json"));
    pages.set_not_found("<html><body>Not here</body></html>");
    pages
}

pub fn site(i18n: I18nConfig) -> Site {
    let config = SiteConfig {
        i18n,
        ..SiteConfig::default()
    };
    Site::new(config, pages()).unwrap()
}

/// Run a server for `site` on an ephemeral port.
pub async fn spawn_server(site: Site) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(site, ServerMode::Production);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, None, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Output directory removed when dropped.
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}
