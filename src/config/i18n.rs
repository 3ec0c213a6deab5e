//! Validated, immutable locale routing configuration.
//!
//! Built once by `validation.rs` and shared read-only (usually behind an
//! `Arc`) by every request or pre-rendered path.

use url::Url;

use crate::config::schema::{FallbackType, RoutingStrategy, TrailingSlash};
use crate::locale::normalize::{normalize, LocaleKey};

/// One configured locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredLocale {
    path: String,
    codes: Vec<String>,
    key: LocaleKey,
    code_keys: Vec<LocaleKey>,
}

impl ConfiguredLocale {
    pub(crate) fn new(path: impl Into<String>, codes: Vec<String>) -> Self {
        let path = path.into();
        let key = normalize(&path);
        let code_keys = codes.iter().map(|c| normalize(c)).collect();
        Self {
            path,
            codes,
            key,
            code_keys,
        }
    }

    /// URL segment and output identifier, with configured casing.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Language codes that select this locale.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn key(&self) -> &LocaleKey {
        &self.key
    }

    /// True when one of this locale's codes normalizes to `key`.
    pub fn has_code(&self, key: &LocaleKey) -> bool {
        self.code_keys.iter().any(|k| k == key)
    }
}

/// A locale bound to an origin under the `domains` strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntry {
    pub(crate) locale: usize,
    host: String,
    authority: String,
    origin: Url,
}

impl DomainEntry {
    pub(crate) fn new(locale: usize, origin: Url) -> Option<Self> {
        let host = origin.host_str()?.to_lowercase();
        let authority = match origin.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.clone(),
        };
        Some(Self {
            locale,
            host,
            authority,
            origin,
        })
    }

    /// Lower-cased host without port.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host with explicit port, if any.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

/// Immutable routing configuration.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub(crate) locales: Vec<ConfiguredLocale>,
    pub(crate) default_locale: usize,
    pub(crate) strategy: RoutingStrategy,
    pub(crate) fallback: Vec<Option<usize>>,
    pub(crate) fallback_type: FallbackType,
    pub(crate) base: String,
    pub(crate) trailing_slash: TrailingSlash,
    pub(crate) domains: Vec<DomainEntry>,
    pub(crate) site: Option<Url>,
}

impl LocaleConfig {
    /// Configured locales in display order.
    pub fn locales(&self) -> &[ConfiguredLocale] {
        &self.locales
    }

    pub fn default_locale(&self) -> &ConfiguredLocale {
        &self.locales[self.default_locale]
    }

    pub fn is_default(&self, locale: &ConfiguredLocale) -> bool {
        locale.key == self.default_locale().key
    }

    pub fn strategy(&self) -> RoutingStrategy {
        self.strategy
    }

    pub fn fallback_type(&self) -> FallbackType {
        self.fallback_type
    }

    /// Normalized base path: empty, or `/segment[/segment...]` without trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn trailing_slash(&self) -> TrailingSlash {
        self.trailing_slash
    }

    pub fn domains(&self) -> &[DomainEntry] {
        &self.domains
    }

    pub fn site(&self) -> Option<&Url> {
        self.site.as_ref()
    }

    /// Look up a locale by its URL segment, case and separator insensitive.
    pub fn find(&self, segment: &str) -> Option<&ConfiguredLocale> {
        self.find_by_key(&normalize(segment))
    }

    pub fn find_by_key(&self, key: &LocaleKey) -> Option<&ConfiguredLocale> {
        self.locales.iter().find(|l| &l.key == key)
    }

    /// Look up a locale by one of its language codes.
    pub fn find_by_code(&self, key: &LocaleKey) -> Option<&ConfiguredLocale> {
        self.locales.iter().find(|l| l.has_code(key))
    }

    /// The one-hop fallback target of `locale`, if configured.
    pub fn fallback_for(&self, locale: &ConfiguredLocale) -> Option<&ConfiguredLocale> {
        let index = self.index_of(locale)?;
        self.fallback[index].map(|target| &self.locales[target])
    }

    /// The domain bound to `locale`, if any.
    pub fn domain_for(&self, locale: &ConfiguredLocale) -> Option<&DomainEntry> {
        let index = self.index_of(locale)?;
        self.domains.iter().find(|d| d.locale == index)
    }

    /// The locale a domain entry serves.
    pub fn domain_locale(&self, domain: &DomainEntry) -> &ConfiguredLocale {
        &self.locales[domain.locale]
    }

    fn index_of(&self, locale: &ConfiguredLocale) -> Option<usize> {
        self.locales.iter().position(|l| l.key == locale.key)
    }
}
