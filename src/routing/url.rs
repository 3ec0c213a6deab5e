//! Locale URL construction.
//!
//! # Responsibilities
//! - Join base, locale prefix and path under the trailing-slash policy
//! - Decide whether a locale is prefixed under the active strategy
//! - Build relative and absolute locale URLs for page code
//! - Build redirect targets for the engine
//!
//! # Design Decisions
//! - Every URL the engine emits goes through `join`, so a redirect never
//!   lands on a path that would itself be slash-redirected
//! - Absolute URLs use the locale's domain under `domains`, else `site`

use url::Url;

use crate::config::i18n::{ConfiguredLocale, LocaleConfig};
use crate::config::schema::{RoutingStrategy, TrailingSlash};
use crate::locale::normalize::normalize;

/// Join `base`, an optional locale segment and `path`, then apply `policy`.
pub fn join(base: &str, segment: Option<&str>, path: &str, policy: TrailingSlash) -> String {
    let mut out = String::from(base);
    if let Some(segment) = segment {
        out.push('/');
        out.push_str(segment);
    }
    let path = path.trim_start_matches('/');
    if !path.is_empty() {
        out.push('/');
        out.push_str(path);
    }
    if out.is_empty() {
        out.push('/');
    }

    match policy {
        TrailingSlash::Always => {
            if !out.ends_with('/') {
                out.push('/');
            }
        }
        TrailingSlash::Never => {
            while out.len() > 1 && out.ends_with('/') {
                out.pop();
            }
        }
        TrailingSlash::Ignore => {}
    }
    out
}

/// The URL segment for `locale`, or `None` when it is served unprefixed.
pub fn locale_prefix<'a>(config: &LocaleConfig, locale: &'a ConfiguredLocale) -> Option<&'a str> {
    match config.strategy() {
        RoutingStrategy::PrefixAlways | RoutingStrategy::PrefixAlwaysNoRedirect => Some(locale.path()),
        // The host selects the locale.
        RoutingStrategy::Domains => None,
        RoutingStrategy::PrefixOtherLocales => (!config.is_default(locale)).then(|| locale.path()),
    }
}

/// Path of `remainder` in `locale` on the site's own origin.
pub fn locale_path(config: &LocaleConfig, locale: &ConfiguredLocale, remainder: &str) -> String {
    join(
        config.base(),
        locale_prefix(config, locale),
        remainder,
        config.trailing_slash(),
    )
}

/// `/pt/about`-style URL for a locale given by path or code.
pub fn relative_locale_url(config: &LocaleConfig, locale: &str, path: &str) -> Option<String> {
    let locale = lookup(config, locale)?;
    Some(locale_path(config, locale, path))
}

/// `https://it.example.com/about`-style URL. `None` when no origin is known
/// for the locale.
pub fn absolute_locale_url(config: &LocaleConfig, locale: &str, path: &str) -> Option<String> {
    let locale = lookup(config, locale)?;
    let origin = match config.domain_for(locale) {
        Some(domain) if config.strategy() == RoutingStrategy::Domains => domain.origin(),
        _ => config.site()?,
    };
    Some(format!(
        "{}{}",
        origin_of(origin),
        locale_path(config, locale, path)
    ))
}

/// One relative URL per configured locale, in configured order.
pub fn relative_locale_urls(config: &LocaleConfig, path: &str) -> Vec<String> {
    config
        .locales()
        .iter()
        .map(|locale| locale_path(config, locale, path))
        .collect()
}

/// Redirect target for `remainder` in `locale`.
///
/// Under `domains` the target is always absolute, built from the request
/// protocol and the locale's domain authority.
pub fn url_for(
    config: &LocaleConfig,
    locale: &ConfiguredLocale,
    remainder: &str,
    protocol: &str,
) -> String {
    let path = locale_path(config, locale, remainder);
    match config.domain_for(locale) {
        Some(domain) if config.strategy() == RoutingStrategy::Domains => {
            format!("{protocol}://{}{path}", domain.authority())
        }
        _ => path,
    }
}

/// Append `?query` when present.
pub fn with_query(location: String, query: Option<&str>) -> String {
    match query {
        Some(query) => format!("{location}?{query}"),
        None => location,
    }
}

fn lookup<'a>(config: &'a LocaleConfig, locale: &str) -> Option<&'a ConfiguredLocale> {
    config
        .find(locale)
        .or_else(|| config.find_by_code(&normalize(locale)))
}

fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::I18nConfig;

    fn config(strategy: RoutingStrategy, trailing_slash: TrailingSlash) -> LocaleConfig {
        let domains = if strategy == RoutingStrategy::Domains {
            [
                ("en".to_string(), "https://example.com".to_string()),
                ("pt".to_string(), "https://example.pt".to_string()),
                ("it".to_string(), "https://it.example.com".to_string()),
            ]
            .into_iter()
            .collect()
        } else {
            Default::default()
        };
        I18nConfig {
            default_locale: "en".to_string(),
            locales: vec!["en".into(), "pt".into(), "it".into()],
            routing_strategy: strategy,
            trailing_slash,
            domains,
            site: Some("https://example.com".to_string()),
            ..I18nConfig::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", None, "/", TrailingSlash::Ignore), "/");
        assert_eq!(join("/new-site", Some("en"), "/", TrailingSlash::Ignore), "/new-site/en");
        assert_eq!(join("/new-site", Some("en"), "/", TrailingSlash::Always), "/new-site/en/");
        assert_eq!(join("/new-site", None, "/start/", TrailingSlash::Never), "/new-site/start");
        assert_eq!(join("", None, "/", TrailingSlash::Never), "/");
        assert_eq!(join("", None, "/", TrailingSlash::Always), "/");
    }

    #[test]
    fn test_relative_locale_url() {
        let config = config(RoutingStrategy::PrefixOtherLocales, TrailingSlash::Ignore);
        assert_eq!(relative_locale_url(&config, "pt", "/about").as_deref(), Some("/pt/about"));
        assert_eq!(relative_locale_url(&config, "en", "/about").as_deref(), Some("/about"));
        assert_eq!(relative_locale_url(&config, "fr", "/about"), None);

        let config = config_always();
        assert_eq!(relative_locale_url(&config, "en", "about").as_deref(), Some("/en/about/"));
    }

    fn config_always() -> LocaleConfig {
        config(RoutingStrategy::PrefixAlways, TrailingSlash::Always)
    }

    #[test]
    fn test_absolute_locale_url() {
        let config = config(RoutingStrategy::Domains, TrailingSlash::Ignore);
        assert_eq!(
            absolute_locale_url(&config, "it", "/about").as_deref(),
            Some("https://it.example.com/about")
        );
        assert_eq!(
            absolute_locale_url(&config, "pt", "/about").as_deref(),
            Some("https://example.pt/about")
        );

        let config = self::config(RoutingStrategy::PrefixOtherLocales, TrailingSlash::Ignore);
        assert_eq!(
            absolute_locale_url(&config, "pt", "/about").as_deref(),
            Some("https://example.com/pt/about")
        );
    }

    #[test]
    fn test_domains_urls_are_unprefixed() {
        let config = config(RoutingStrategy::Domains, TrailingSlash::Ignore);
        assert_eq!(
            relative_locale_urls(&config, "/about"),
            vec!["/about", "/about", "/about"]
        );
    }

    #[test]
    fn test_relative_locale_urls() {
        let config = config(RoutingStrategy::PrefixOtherLocales, TrailingSlash::Never);
        assert_eq!(
            relative_locale_urls(&config, "/blog/"),
            vec!["/blog", "/pt/blog", "/it/blog"]
        );
    }

    #[test]
    fn test_url_for_domain_uses_request_protocol() {
        let config = config(RoutingStrategy::Domains, TrailingSlash::Ignore);
        let it = config.find("it").unwrap();
        assert_eq!(url_for(&config, it, "/start", "http"), "http://it.example.com/start");
        let en = config.find("en").unwrap();
        assert_eq!(url_for(&config, en, "/start", "https"), "https://example.com/start");

        let config = config_always();
        let en = config.find("en").unwrap();
        assert_eq!(url_for(&config, en, "/start", "https"), "/en/start/");
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/en".to_string(), Some("a=1")), "/en?a=1");
        assert_eq!(with_query("/en".to_string(), None), "/en");
    }
}
