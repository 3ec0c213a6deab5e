//! Configuration schema definitions.
//!
//! This module defines the complete on-disk configuration structure.
//! All types derive Serde traits for deserialization from config files;
//! semantic checks live in `validation.rs`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::i18n::LocaleConfig;
use crate::config::validation::{validate_i18n, ValidationError};

/// Root configuration for a localized site.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Locale routing settings.
    pub i18n: I18nConfig,

    /// HTTP server settings (serve and dev modes).
    pub server: ServerConfig,

    /// Static pre-render settings.
    pub build: BuildConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Locale routing configuration, as written by the user.
///
/// Turned into an immutable [`LocaleConfig`] by [`I18nConfig::validate`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale served when the URL carries no locale segment.
    pub default_locale: String,

    /// Configured locales, in display order.
    pub locales: Vec<LocaleEntry>,

    /// How locales appear in URLs.
    pub routing_strategy: RoutingStrategy,

    /// One-hop fallback map: requested locale -> substitute locale.
    pub fallback: BTreeMap<String, String>,

    /// How a fallback substitution is delivered.
    pub fallback_type: FallbackType,

    /// Path prefix the whole site is mounted under (e.g. `/new-site`).
    pub base: String,

    /// Trailing slash policy for request paths and generated URLs.
    pub trailing_slash: TrailingSlash,

    /// Locale -> origin (e.g. `pt = "https://example.pt"`), `domains` strategy only.
    pub domains: BTreeMap<String, String>,

    /// Canonical origin of the site, used for absolute URLs.
    pub site: Option<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: vec![LocaleEntry::Code("en".to_string())],
            routing_strategy: RoutingStrategy::default(),
            fallback: BTreeMap::new(),
            fallback_type: FallbackType::default(),
            base: String::new(),
            trailing_slash: TrailingSlash::default(),
            domains: BTreeMap::new(),
            site: None,
        }
    }
}

impl I18nConfig {
    /// Validate and freeze into a [`LocaleConfig`].
    pub fn validate(&self) -> Result<LocaleConfig, Vec<ValidationError>> {
        validate_i18n(self)
    }
}

/// A configured locale: either a bare code or a path shared by several codes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LocaleEntry {
    /// `"pt_BR"`: the code is also the URL segment.
    Code(String),
    /// `{ path = "spanish", codes = ["es", "es-AR"] }`.
    Group { path: String, codes: Vec<String> },
}

impl LocaleEntry {
    /// Output path segment for this entry.
    pub fn path(&self) -> &str {
        match self {
            LocaleEntry::Code(code) => code,
            LocaleEntry::Group { path, .. } => path,
        }
    }
}

impl From<&str> for LocaleEntry {
    fn from(code: &str) -> Self {
        LocaleEntry::Code(code.to_string())
    }
}

/// Policy governing whether and how locale codes appear in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingStrategy {
    /// Default locale unprefixed, every other locale prefixed.
    #[default]
    PrefixOtherLocales,
    /// Every locale prefixed; the bare root redirects to the default locale.
    PrefixAlways,
    /// Every locale prefixed; the bare root is not found.
    PrefixAlwaysNoRedirect,
    /// Locale chosen by request host.
    Domains,
}

impl RoutingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingStrategy::PrefixOtherLocales => "prefix-other-locales",
            RoutingStrategy::PrefixAlways => "prefix-always",
            RoutingStrategy::PrefixAlwaysNoRedirect => "prefix-always-no-redirect",
            RoutingStrategy::Domains => "domains",
        }
    }
}

impl fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a fallback locale is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackType {
    /// 302 to the fallback locale's URL.
    #[default]
    Redirect,
    /// Serve the fallback content at the requested URL.
    Rewrite,
}

/// Trailing slash policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrailingSlash {
    Always,
    Never,
    #[default]
    Ignore,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:4321").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Content directory, relative to the config file.
    pub content_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:4321".to_string(),
            request_timeout_secs: 30,
            content_dir: "content".to_string(),
        }
    }
}

/// Static pre-render configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory, relative to the config file.
    pub out_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: "dist".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
