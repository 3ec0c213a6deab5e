//! Routing decisions per strategy, through the public API.

use locale_router::config::schema::{FallbackType, RoutingStrategy, TrailingSlash};
use locale_router::config::ValidationError;
use locale_router::routing::{MissReason, RequestContext, Resolver, RoutingDecision};

mod common;

fn resolve(i18n: locale_router::config::schema::I18nConfig, path: &str) -> RoutingDecision {
    let resolver = Resolver::new(i18n.validate().unwrap());
    resolver.resolve(&RequestContext::new(path), &common::pages())
}

#[test]
fn test_prefix_other_locales_serves_default_unprefixed() {
    let i18n = || common::i18n(RoutingStrategy::PrefixOtherLocales);
    assert_eq!(resolve(i18n(), "/new-site"), RoutingDecision::serve("en", "/"));
    assert_eq!(resolve(i18n(), "/new-site/start"), RoutingDecision::serve("en", "/start"));
    assert_eq!(resolve(i18n(), "/new-site/pt/blog/1"), RoutingDecision::serve("pt", "/blog/1"));
    assert_eq!(
        resolve(i18n(), "/new-site/en/start"),
        RoutingDecision::not_found(MissReason::DefaultLocalePrefixed)
    );
}

#[test]
fn test_prefix_always_redirects_root() {
    assert_eq!(
        resolve(common::i18n(RoutingStrategy::PrefixAlways), "/new-site"),
        RoutingDecision::redirect("/new-site/en", 302)
    );

    let mut i18n = common::i18n(RoutingStrategy::PrefixAlways);
    i18n.trailing_slash = TrailingSlash::Always;
    assert_eq!(
        resolve(i18n, "/new-site/"),
        RoutingDecision::redirect("/new-site/en/", 302)
    );
}

#[test]
fn test_prefix_always_no_redirect_root_is_not_found() {
    assert_eq!(
        resolve(common::i18n(RoutingStrategy::PrefixAlwaysNoRedirect), "/new-site"),
        RoutingDecision::not_found(MissReason::MissingLocalePrefix)
    );
}

#[test]
fn test_fallback_redirects_to_default() {
    let i18n = || common::i18n(RoutingStrategy::PrefixOtherLocales);
    assert_eq!(
        resolve(i18n(), "/new-site/it/start"),
        RoutingDecision::redirect("/new-site/start", 302)
    );
    assert_eq!(
        resolve(i18n(), "/new-site/fr/start"),
        RoutingDecision::not_found(MissReason::UnconfiguredLocale)
    );
}

#[test]
fn test_fallback_rewrite_serves_in_place() {
    let mut i18n = common::i18n(RoutingStrategy::PrefixAlways);
    i18n.fallback_type = FallbackType::Rewrite;
    assert_eq!(
        resolve(i18n, "/new-site/it/blog/1"),
        RoutingDecision::Serve {
            locale: "en".to_string(),
            path: "/blog/1".to_string(),
            fallback_from: Some("it".to_string()),
        }
    );
}

#[test]
fn test_underscored_locales() {
    let mut i18n = common::i18n(RoutingStrategy::PrefixOtherLocales);
    i18n.locales = vec!["en".into(), "pt_BR".into()];
    i18n.fallback.clear();
    let resolver = Resolver::new(i18n.validate().unwrap());
    let content = |locale: &str, _path: &str| locale == "pt_BR";

    for path in ["/new-site/pt_BR/start", "/new-site/pt-br/start", "/new-site/PT-BR/start"] {
        assert_eq!(
            resolver.resolve(&RequestContext::new(path), &content),
            RoutingDecision::serve("pt_BR", "/start"),
            "{path}"
        );
    }
}

#[test]
fn test_domains_strategy() {
    let mut i18n = common::i18n(RoutingStrategy::Domains);
    i18n.domains = [
        ("en".to_string(), "https://example.com".to_string()),
        ("pt".to_string(), "https://example.pt".to_string()),
        ("it".to_string(), "https://it.example.com".to_string()),
    ]
    .into_iter()
    .collect();
    let resolver = Resolver::new(i18n.validate().unwrap());
    let pages = common::pages();

    let ctx = RequestContext::new("/new-site/start")
        .with_host("example.pt:8080")
        .with_protocol("https");
    assert_eq!(resolver.resolve(&ctx, &pages), RoutingDecision::serve("pt", "/start"));

    let ctx = RequestContext::new("/new-site/start")
        .with_host("it.example.com")
        .with_protocol("https");
    assert_eq!(
        resolver.resolve(&ctx, &pages),
        RoutingDecision::redirect("https://example.com/new-site/start", 302)
    );

    let target = RequestContext::from_url("https://example.com/new-site/start").unwrap();
    assert_eq!(resolver.resolve(&target, &pages), RoutingDecision::serve("en", "/start"));
}

#[test]
fn test_domains_require_a_domain_per_locale() {
    let mut i18n = common::i18n(RoutingStrategy::Domains);
    i18n.domains = [("it".to_string(), "https://it.example.com".to_string())]
        .into_iter()
        .collect();
    let errors = i18n.validate().unwrap_err();
    assert_eq!(
        errors,
        vec![
            ValidationError::MissingLocaleDomain("en".to_string()),
            ValidationError::MissingLocaleDomain("pt".to_string()),
        ]
    );
}

#[test]
fn test_demo_site_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/site/locale-router.toml");
    let site = locale_router::lifecycle::load_site(&path).unwrap();

    let ctx = RequestContext::new("/new-site/es-ar/start");
    assert_eq!(
        site.resolver.resolve(&ctx, &site.pages),
        RoutingDecision::not_found(MissReason::UnconfiguredLocale)
    );
    let ctx = RequestContext::new("/new-site/spanish/start");
    assert_eq!(
        site.resolver.resolve(&ctx, &site.pages),
        RoutingDecision::not_found(MissReason::FallbackExhausted)
    );
    let ctx = RequestContext::new("/new-site/pt/start");
    assert_eq!(
        site.resolver.resolve(&ctx, &site.pages),
        RoutingDecision::serve("pt", "/start")
    );
}
