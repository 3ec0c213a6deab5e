//! One-hop locale fallback.

use crate::config::i18n::{ConfiguredLocale, LocaleConfig};
use crate::config::schema::FallbackType;

/// What to do with a locale candidate after the content check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackOutcome<'a> {
    /// Content exists; serve the candidate as is.
    Same,
    /// Content is missing; deliver `target` instead.
    Substitute {
        target: &'a ConfiguredLocale,
        kind: FallbackType,
    },
    /// Content is missing and no fallback is configured.
    Exhausted,
}

/// Decide the fallback for `locale`. The target's own content is not checked:
/// fallback is exactly one hop.
pub fn resolve_fallback<'a>(
    locale: &ConfiguredLocale,
    has_content: bool,
    config: &'a LocaleConfig,
) -> FallbackOutcome<'a> {
    if has_content {
        return FallbackOutcome::Same;
    }
    match config.fallback_for(locale) {
        Some(target) => FallbackOutcome::Substitute {
            target,
            kind: config.fallback_type(),
        },
        None => FallbackOutcome::Exhausted,
    }
}
