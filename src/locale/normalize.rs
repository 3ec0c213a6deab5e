//! Locale identifier normalization.
//!
//! Comparison keys are lower-cased with `_` mapped to `-`, so `en_AU`,
//! `EN-au` and `en-AU` are the same locale. Keys are for comparison only;
//! anything shown to users keeps the configured spelling.

use std::fmt;

use crate::config::i18n::LocaleConfig;

/// Canonical comparison key of a locale code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleKey(String);

impl LocaleKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a locale code for comparison.
pub fn normalize(code: &str) -> LocaleKey {
    LocaleKey(code.trim().to_lowercase().replace('_', "-"))
}

/// True when `code` names a configured locale, by path or by one of its codes.
pub fn is_configured(code: &str, config: &LocaleConfig) -> bool {
    let key = normalize(code);
    config.find_by_key(&key).is_some() || config.find_by_code(&key).is_some()
}

/// True when `segment` has the shape of a BCP 47 language tag.
///
/// A bare language subtag must be two letters; three-letter languages are
/// only recognised with a script or region subtag, and script subtags must be
/// title-cased (`Hans`), so ordinary segments such as `api`, `faq` or
/// `new-site` are not mistaken for locales.
pub fn looks_like_locale(segment: &str) -> bool {
    let mut subtags = segment.split(|c| c == '-' || c == '_');
    let language = match subtags.next() {
        Some(language) if language.chars().all(|c| c.is_ascii_alphabetic()) => language,
        _ => return false,
    };
    let rest: Vec<&str> = subtags.collect();

    if rest.is_empty() {
        return language.len() == 2;
    }
    if !(2..=3).contains(&language.len()) || rest.len() > 2 {
        return false;
    }
    rest.iter().all(|t| is_script(t) || is_region(t))
}

fn is_script(subtag: &str) -> bool {
    subtag.len() == 4
        && subtag.starts_with(|c: char| c.is_ascii_uppercase())
        && subtag.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
        || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()))
}
