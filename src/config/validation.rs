//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default locale, fallback and domain keys
//!   reference configured locales)
//! - Reject fallback graphs deeper than one hop (which includes cycles)
//! - Under `domains`, require an origin for every locale
//! - Normalize the base path and parse origins
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: I18nConfig → Result<LocaleConfig, Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::i18n::{ConfiguredLocale, DomainEntry, LocaleConfig};
use crate::config::schema::{I18nConfig, LocaleEntry, RoutingStrategy};
use crate::locale::normalize::normalize;

/// A single semantic problem in the i18n configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one locale must be configured")]
    NoLocales,

    #[error("locale entry #{0} has an empty path or code")]
    EmptyLocale(usize),

    #[error("locale path `{0}` must be a single URL segment")]
    InvalidLocalePath(String),

    #[error("locale `{0}` is configured more than once")]
    DuplicateLocale(String),

    #[error("default locale `{0}` is not one of the configured locales")]
    UnknownDefaultLocale(String),

    #[error("fallback `{from}` -> `{to}` references unconfigured locale `{missing}`")]
    UnknownFallbackLocale {
        from: String,
        to: String,
        missing: String,
    },

    #[error("locale `{0}` falls back to itself")]
    FallbackToSelf(String),

    #[error("fallback `{from}` -> `{via}` is more than one hop: `{via}` has a fallback of its own")]
    FallbackChain { from: String, via: String },

    #[error("base path `{0}` must not contain a query, fragment or whitespace")]
    InvalidBase(String),

    #[error("domain for locale `{locale}` is invalid: `{value}` ({reason})")]
    InvalidDomain {
        locale: String,
        value: String,
        reason: String,
    },

    #[error("domain configured for unconfigured locale `{0}`")]
    UnknownDomainLocale(String),

    #[error("host `{0}` is bound to more than one locale")]
    DuplicateDomain(String),

    #[error("routing strategy `domains` requires at least one entry in `domains`")]
    MissingDomains,

    #[error("locale `{0}` has no entry in `domains`")]
    MissingLocaleDomain(String),

    #[error("`domains` is only valid with routing strategy `domains` (found `{0}`)")]
    DomainsWithoutStrategy(RoutingStrategy),

    #[error("site `{0}` is not an absolute http(s) URL")]
    InvalidSite(String),
}

/// Validate the i18n section and build the immutable [`LocaleConfig`].
pub fn validate_i18n(config: &I18nConfig) -> Result<LocaleConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let locales = build_locales(&config.locales, &mut errors);

    let default_locale = locales
        .iter()
        .position(|l| l.key() == &normalize(&config.default_locale));
    if default_locale.is_none() && !locales.is_empty() {
        errors.push(ValidationError::UnknownDefaultLocale(
            config.default_locale.clone(),
        ));
    }

    let fallback = build_fallback(config, &locales, &mut errors);
    let domains = build_domains(config, &locales, &mut errors);

    let base = match normalize_base(&config.base) {
        Some(base) => base,
        None => {
            errors.push(ValidationError::InvalidBase(config.base.clone()));
            String::new()
        }
    };

    let site = match config.site.as_deref() {
        Some(raw) => match parse_origin(raw) {
            Ok(url) => Some(url),
            Err(_) => {
                errors.push(ValidationError::InvalidSite(raw.to_string()));
                None
            }
        },
        None => None,
    };

    match default_locale {
        Some(default_locale) if errors.is_empty() => Ok(LocaleConfig {
            locales,
            default_locale,
            strategy: config.routing_strategy,
            fallback,
            fallback_type: config.fallback_type,
            base,
            trailing_slash: config.trailing_slash,
            domains,
            site,
        }),
        _ => Err(errors),
    }
}

fn build_locales(entries: &[LocaleEntry], errors: &mut Vec<ValidationError>) -> Vec<ConfiguredLocale> {
    if entries.is_empty() {
        errors.push(ValidationError::NoLocales);
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut locales = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let (path, codes) = match entry {
            LocaleEntry::Code(code) => (code.trim(), vec![code.trim().to_string()]),
            LocaleEntry::Group { path, codes } => (
                path.trim(),
                codes.iter().map(|c| c.trim().to_string()).collect(),
            ),
        };

        if path.is_empty() || codes.is_empty() || codes.iter().any(|c| c.is_empty()) {
            errors.push(ValidationError::EmptyLocale(i));
            continue;
        }
        if path.contains(|c: char| c == '/' || c == '?' || c == '#' || c.is_whitespace()) {
            errors.push(ValidationError::InvalidLocalePath(path.to_string()));
            continue;
        }
        if !seen.insert(normalize(path)) {
            errors.push(ValidationError::DuplicateLocale(path.to_string()));
            continue;
        }

        locales.push(ConfiguredLocale::new(path, codes));
    }

    locales
}

fn build_fallback(
    config: &I18nConfig,
    locales: &[ConfiguredLocale],
    errors: &mut Vec<ValidationError>,
) -> Vec<Option<usize>> {
    let position = |code: &str| locales.iter().position(|l| l.key() == &normalize(code));
    let mut fallback = vec![None; locales.len()];

    for (from, to) in &config.fallback {
        let (Some(from_index), Some(to_index)) = (position(from), position(to)) else {
            let missing = if position(from).is_none() { from } else { to };
            errors.push(ValidationError::UnknownFallbackLocale {
                from: from.clone(),
                to: to.clone(),
                missing: missing.clone(),
            });
            continue;
        };
        if from_index == to_index {
            errors.push(ValidationError::FallbackToSelf(from.clone()));
            continue;
        }
        fallback[from_index] = Some(to_index);
    }

    // Depth 1: a target may not itself fall back anywhere. This also rules out cycles.
    for (from, to) in &config.fallback {
        if let (Some(from_index), Some(to_index)) = (position(from), position(to)) {
            if from_index != to_index && fallback[to_index].is_some() {
                errors.push(ValidationError::FallbackChain {
                    from: from.clone(),
                    via: to.clone(),
                });
            }
        }
    }

    fallback
}

fn build_domains(
    config: &I18nConfig,
    locales: &[ConfiguredLocale],
    errors: &mut Vec<ValidationError>,
) -> Vec<DomainEntry> {
    let is_domains = config.routing_strategy == RoutingStrategy::Domains;
    if is_domains && config.domains.is_empty() {
        errors.push(ValidationError::MissingDomains);
    }
    if !is_domains && !config.domains.is_empty() {
        errors.push(ValidationError::DomainsWithoutStrategy(config.routing_strategy));
    }

    let mut hosts = HashSet::new();
    let mut domains = Vec::new();

    // Keep locale display order so "first match wins" follows the locales list.
    let mut entries: Vec<(usize, &String, &String)> = Vec::new();
    for (locale, value) in &config.domains {
        match locales.iter().position(|l| l.key() == &normalize(locale)) {
            Some(index) => entries.push((index, locale, value)),
            None => errors.push(ValidationError::UnknownDomainLocale(locale.clone())),
        }
    }
    entries.sort_by_key(|(index, _, _)| *index);

    // Every locale must be reachable by host.
    let mut missing = Vec::new();
    if is_domains && !config.domains.is_empty() {
        for (index, locale) in locales.iter().enumerate() {
            if !entries.iter().any(|(i, _, _)| *i == index) {
                missing.push(ValidationError::MissingLocaleDomain(locale.path().to_string()));
            }
        }
    }

    for (index, locale, value) in entries {
        let entry = parse_origin(value)
            .and_then(|url| DomainEntry::new(index, url).ok_or_else(|| "missing host".to_string()));
        match entry {
            Ok(entry) => {
                if !hosts.insert(entry.host().to_string()) {
                    errors.push(ValidationError::DuplicateDomain(entry.host().to_string()));
                    continue;
                }
                domains.push(entry);
            }
            Err(reason) => errors.push(ValidationError::InvalidDomain {
                locale: locale.clone(),
                value: value.clone(),
                reason,
            }),
        }
    }
    errors.extend(missing);

    domains
}

fn parse_origin(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(url)
}

/// `""`, `"/"` -> `""`; `"new-site/"` -> `"/new-site"`.
pub(crate) fn normalize_base(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.contains(|c: char| c == '?' || c == '#' || c.is_whitespace()) {
        return None;
    }
    let inner = trimmed.trim_matches('/');
    if inner.is_empty() {
        Some(String::new())
    } else {
        Some(format!("/{inner}"))
    }
}
