//! Path matching.
//!
//! # Responsibilities
//! - Strip the configured base path
//! - Classify the first segment as a configured locale, an unconfigured
//!   locale, or an ordinary path segment
//! - Canonicalize paths for content lookups
//!
//! # Design Decisions
//! - No trailing-slash handling here; the engine applies the policy first
//! - Base matching is segment-aware: `/new-site` does not match `/new-sites`

use crate::config::i18n::{ConfiguredLocale, LocaleConfig};
use crate::locale::normalize::looks_like_locale;

/// What the first path segment (after the base) says about the locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleSegment<'a> {
    /// No locale segment; the whole path is content.
    Absent,
    Configured(&'a ConfiguredLocale),
    /// Shaped like a locale code, but not configured.
    Unconfigured(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch<'a> {
    pub segment: LocaleSegment<'a>,
    /// Path with base and locale segment removed; `/` for the root.
    pub remainder: String,
}

/// Remove `base` from `path`. `None` when the path lies outside the base.
///
/// The returned rest is empty or starts with `/`.
pub fn strip_base<'p>(path: &'p str, base: &str) -> Option<&'p str> {
    if base.is_empty() {
        return Some(path);
    }
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Strip the base and classify the first segment.
pub fn match_path<'a>(path: &str, config: &'a LocaleConfig) -> Option<PathMatch<'a>> {
    let rest = strip_base(path, config.base())?;
    Some(match_segment(rest, config))
}

/// Classify the first segment of a path that already has its base removed.
pub fn match_segment<'a>(rest: &str, config: &'a LocaleConfig) -> PathMatch<'a> {
    // `//pt/start` still carries the `pt` segment.
    let trimmed = rest.trim_start_matches('/');
    let (first, after) = match trimmed.find('/') {
        Some(i) => (&trimmed[..i], &trimmed[i..]),
        None => (trimmed, ""),
    };

    let segment = if first.is_empty() {
        LocaleSegment::Absent
    } else if let Some(locale) = config.find(first) {
        LocaleSegment::Configured(locale)
    } else if looks_like_locale(first) {
        LocaleSegment::Unconfigured(first.to_string())
    } else {
        LocaleSegment::Absent
    };

    let remainder = match segment {
        LocaleSegment::Absent => rest,
        _ => after,
    };
    let remainder = if remainder.is_empty() {
        "/".to_string()
    } else {
        remainder.to_string()
    };

    PathMatch { segment, remainder }
}

/// Leading slash, no trailing slash (except the root), no empty segments.
pub fn canonical_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// True for `""` and `"/"`.
pub fn is_root(rest: &str) -> bool {
    rest.is_empty() || rest == "/"
}
