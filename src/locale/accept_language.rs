//! Accept-Language parsing.
//!
//! Turns the header into quality-ordered language ranges and intersects them
//! with the configured locales. Independent of the routing strategy; page
//! code calls it, the routing engine never does.

use std::cmp::Ordering;

use serde::Serialize;

use crate::config::i18n::LocaleConfig;
use crate::locale::normalize::normalize;

/// One `tag;q=value` entry of an Accept-Language header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    pub tag: String,
    pub quality: f32,
}

/// Preferred configured locales for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preferred {
    primary: Option<String>,
    list: Vec<String>,
}

impl Preferred {
    /// Best matching configured locale, if any.
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    /// Every matching configured locale, best first.
    pub fn list(&self) -> &[String] {
        &self.list
    }

    /// `primary` for display: the locale, or `none`.
    pub fn primary_label(&self) -> &str {
        self.primary().unwrap_or("none")
    }

    /// `list` for display: comma separated, or `empty`.
    pub fn list_label(&self) -> String {
        if self.list.is_empty() {
            "empty".to_string()
        } else {
            self.list.join(", ")
        }
    }
}

/// Parse a header into language ranges, best quality first.
///
/// Entries with equal quality keep header order. Malformed entries (empty
/// tag, unparsable or out-of-range quality) are skipped on their own, as are
/// entries with `q=0`.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header
        .split(',')
        .filter_map(parse_range)
        .filter(|r| r.quality > 0.0)
        .collect();

    // sort_by is stable, which keeps header order between equal qualities.
    ranges.sort_by(|a, b| {
        b.quality
            .partial_cmp(&a.quality)
            .unwrap_or(Ordering::Equal)
    });
    ranges
}

fn parse_range(part: &str) -> Option<LanguageRange> {
    let mut params = part.trim().split(';');
    let tag = params.next()?.trim();
    if tag.is_empty() {
        return None;
    }

    let mut quality = 1.0;
    for param in params {
        let param = param.trim();
        let value = match param.split_once('=') {
            Some((name, value)) if name.trim().eq_ignore_ascii_case("q") => value.trim(),
            _ => continue,
        };
        match value.parse::<f32>() {
            Ok(q) if (0.0..=1.0).contains(&q) => quality = q,
            _ => {
                tracing::trace!(entry = %part, "Skipping Accept-Language entry with malformed quality");
                return None;
            }
        }
    }

    Some(LanguageRange {
        tag: tag.to_string(),
        quality,
    })
}

/// Intersect an Accept-Language header with the configured locales.
///
/// Output uses the configured spelling (`pt_BR`, not the header's `pt-BR`).
/// `*` matches nothing.
pub fn parse_preferred(header: &str, config: &LocaleConfig) -> Preferred {
    let mut list: Vec<String> = Vec::new();

    for range in parse_accept_language(header) {
        if range.tag == "*" {
            continue;
        }
        let Some(locale) = config.find_by_code(&normalize(&range.tag)) else {
            continue;
        };
        if !list.iter().any(|p| p == locale.path()) {
            list.push(locale.path().to_string());
        }
    }

    Preferred {
        primary: list.first().cloned(),
        list,
    }
}
