//! Locale identifiers and language preferences.
//!
//! # Responsibilities
//! - Canonicalize locale codes for comparison (`normalize.rs`)
//! - Parse Accept-Language and intersect it with configured locales
//!   (`accept_language.rs`)
//!
//! Both are pure functions over a `LocaleConfig`; neither depends on the
//! routing strategy.

pub mod accept_language;
pub mod normalize;

pub use accept_language::{parse_accept_language, parse_preferred, LanguageRange, Preferred};
pub use normalize::{is_configured, looks_like_locale, normalize, LocaleKey};
