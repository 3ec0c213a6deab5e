//! Runtime facts exposed to page code.
//!
//! # Responsibilities
//! - Carry the resolved locale, the configured locale list and the
//!   request's preferred locales into rendering (`PageContext`)
//! - Substitute those facts into page templates (`template.rs`)
//!
//! # Design Decisions
//! - Page code never re-derives the locale; it reads the decision's
//! - Preferred locales are computed per request, outside the resolver

pub mod template;

use serde::Serialize;

use crate::config::i18n::LocaleConfig;
use crate::locale::accept_language::{parse_preferred, Preferred};

pub use template::render;

/// What a page knows about locales while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    pub current_locale: String,
    pub locales: Vec<String>,
    pub preferred: Preferred,
}

impl PageContext {
    pub fn new(config: &LocaleConfig, current_locale: &str, accept_language: Option<&str>) -> Self {
        let preferred = accept_language
            .map(|header| parse_preferred(header, config))
            .unwrap_or_default();
        Self {
            current_locale: current_locale.to_string(),
            locales: config.locales().iter().map(|l| l.path().to_string()).collect(),
            preferred,
        }
    }
}
