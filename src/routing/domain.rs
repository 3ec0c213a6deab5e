//! Domain matching for the `domains` strategy.
//!
//! The effective host (already folded from `X-Forwarded-Host`/`Host` by
//! `RequestContext`) is compared with each configured domain's host, in
//! locale order. Protocol never gates the match; it only shapes absolute
//! redirect targets.

use crate::config::i18n::{ConfiguredLocale, LocaleConfig};
use crate::routing::context::RequestContext;

/// The locale whose domain serves this request's host.
pub fn match_domain<'a>(ctx: &RequestContext, config: &'a LocaleConfig) -> Option<&'a ConfiguredLocale> {
    let host = ctx.host()?;
    config
        .domains()
        .iter()
        .find(|domain| domain.host() == host)
        .map(|domain| config.domain_locale(domain))
}
