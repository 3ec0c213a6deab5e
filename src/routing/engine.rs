//! Routing decision engine.
//!
//! # Responsibilities
//! - Apply the trailing-slash policy before anything else
//! - Classify the request (domain or path segment) per routing strategy
//! - Look up the outcome in a (strategy × segment) table
//! - Finish locale candidates with the content check and fallback
//!
//! # Design Decisions
//! - Pure: the resolver owns no I/O and no mutable state, and is shared via
//!   `Arc` without locking
//! - Two phases (`route` then `Candidate::complete`) so the content check can
//!   be synchronous, asynchronous, or precomputed
//! - Every redirect target is formatted per the trailing-slash policy

use std::future::Future;
use std::sync::Arc;

use crate::config::i18n::{ConfiguredLocale, LocaleConfig};
use crate::config::schema::{FallbackType, RoutingStrategy, TrailingSlash};
use crate::content::ContentIndex;
use crate::routing::context::RequestContext;
use crate::routing::decision::{MissReason, RoutingDecision, FOUND, MOVED_PERMANENTLY};
use crate::routing::domain::match_domain;
use crate::routing::fallback::{resolve_fallback, FallbackOutcome};
use crate::routing::path::{canonical_path, is_root, match_segment, strip_base, LocaleSegment};
use crate::routing::url::{join, url_for, with_query};

/// Resolves request contexts into routing decisions.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: Arc<LocaleConfig>,
}

/// Result of the first routing phase.
#[derive(Debug)]
pub enum Route<'a> {
    /// Final without a content check.
    Decided(RoutingDecision),
    /// A locale candidate that still needs the content check.
    Pending(Candidate<'a>),
}

/// A locale and content path awaiting the content check.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    config: &'a LocaleConfig,
    locale: &'a ConfiguredLocale,
    path: String,
    query: Option<String>,
    protocol: String,
}

/// How the request was classified before the table lookup.
#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Absent,
    Default(&'a ConfiguredLocale),
    Other(&'a ConfiguredLocale),
    Unconfigured,
    Domain(&'a ConfiguredLocale),
    UnknownHost,
}

#[derive(Debug, Clone, Copy)]
enum Step<'a> {
    Candidate(&'a ConfiguredLocale),
    RedirectToDefault,
    Miss(MissReason),
}

impl Resolver {
    pub fn new(config: LocaleConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn from_shared(config: Arc<LocaleConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    /// First phase: everything that does not depend on content.
    pub fn route<'a>(&'a self, ctx: &RequestContext) -> Route<'a> {
        let config = &*self.config;

        let Some(rest) = strip_base(ctx.path(), config.base()) else {
            return Route::Decided(RoutingDecision::not_found(MissReason::OutsideBase));
        };

        if let Some(location) = trailing_slash_redirect(config, rest, ctx.query()) {
            return Route::Decided(RoutingDecision::redirect(location, MOVED_PERMANENTLY));
        }

        let (segment, remainder) = classify(config, ctx, rest);
        let step = lookup(config.strategy(), segment, is_root(rest), config);

        tracing::trace!(
            path = %ctx.path(),
            strategy = %config.strategy(),
            segment = ?segment,
            step = ?step,
            "Routing step"
        );

        match step {
            Step::Candidate(locale) => Route::Pending(Candidate {
                config,
                locale,
                path: canonical_path(&remainder),
                query: ctx.query().map(str::to_string),
                protocol: ctx.protocol().to_string(),
            }),
            Step::RedirectToDefault => {
                let location = join(
                    config.base(),
                    Some(config.default_locale().path()),
                    "/",
                    config.trailing_slash(),
                );
                Route::Decided(RoutingDecision::redirect(
                    with_query(location, ctx.query()),
                    FOUND,
                ))
            }
            Step::Miss(reason) => Route::Decided(RoutingDecision::not_found(reason)),
        }
    }

    /// Both phases with a synchronous content index.
    pub fn resolve(&self, ctx: &RequestContext, content: &impl ContentIndex) -> RoutingDecision {
        let decision = match self.route(ctx) {
            Route::Decided(decision) => decision,
            Route::Pending(candidate) => {
                let has_content = content.has_content(candidate.locale().path(), candidate.path());
                candidate.complete(has_content)
            }
        };
        tracing::debug!(path = %ctx.path(), decision = decision.kind(), "Resolved");
        decision
    }

    /// Both phases with an asynchronous content lookup `(locale, path) -> bool`.
    pub async fn resolve_async<F, Fut>(&self, ctx: &RequestContext, lookup: F) -> RoutingDecision
    where
        F: FnOnce(String, String) -> Fut,
        Fut: Future<Output = bool>,
    {
        let decision = match self.route(ctx) {
            Route::Decided(decision) => decision,
            Route::Pending(candidate) => {
                let has_content = lookup(
                    candidate.locale().path().to_string(),
                    candidate.path().to_string(),
                )
                .await;
                candidate.complete(has_content)
            }
        };
        tracing::debug!(path = %ctx.path(), decision = decision.kind(), "Resolved");
        decision
    }
}

impl<'a> Candidate<'a> {
    pub fn locale(&self) -> &'a ConfiguredLocale {
        self.locale
    }

    /// Canonical content path, base and locale segment removed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Second phase: apply the fallback policy given the content check.
    pub fn complete(self, has_content: bool) -> RoutingDecision {
        match resolve_fallback(self.locale, has_content, self.config) {
            FallbackOutcome::Same => RoutingDecision::serve(self.locale.path(), self.path),
            FallbackOutcome::Substitute {
                target,
                kind: FallbackType::Redirect,
            } => {
                let location = url_for(self.config, target, &self.path, &self.protocol);
                RoutingDecision::redirect(with_query(location, self.query.as_deref()), FOUND)
            }
            FallbackOutcome::Substitute {
                target,
                kind: FallbackType::Rewrite,
            } => RoutingDecision::Serve {
                locale: target.path().to_string(),
                path: self.path,
                fallback_from: Some(self.locale.path().to_string()),
            },
            FallbackOutcome::Exhausted => RoutingDecision::not_found(MissReason::FallbackExhausted),
        }
    }
}

/// 301 target when the rest of the path violates the slash policy.
fn trailing_slash_redirect(config: &LocaleConfig, rest: &str, query: Option<&str>) -> Option<String> {
    if is_root(rest) {
        return None;
    }
    let location = match config.trailing_slash() {
        TrailingSlash::Always if !rest.ends_with('/') => format!("{}{rest}/", config.base()),
        TrailingSlash::Never if rest.ends_with('/') => {
            let trimmed = format!("{}{}", config.base(), rest.trim_end_matches('/'));
            if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed
            }
        }
        _ => return None,
    };
    Some(with_query(location, query))
}

fn classify<'a>(config: &'a LocaleConfig, ctx: &RequestContext, rest: &str) -> (Segment<'a>, String) {
    if config.strategy() == RoutingStrategy::Domains {
        let segment = match match_domain(ctx, config) {
            Some(locale) => Segment::Domain(locale),
            None => Segment::UnknownHost,
        };
        let remainder = if rest.is_empty() { "/" } else { rest };
        return (segment, remainder.to_string());
    }

    let matched = match_segment(rest, config);
    let segment = match matched.segment {
        LocaleSegment::Absent => Segment::Absent,
        LocaleSegment::Configured(locale) if config.is_default(locale) => Segment::Default(locale),
        LocaleSegment::Configured(locale) => Segment::Other(locale),
        LocaleSegment::Unconfigured(_) => Segment::Unconfigured,
    };
    (segment, matched.remainder)
}

fn lookup<'a>(
    strategy: RoutingStrategy,
    segment: Segment<'a>,
    at_root: bool,
    config: &'a LocaleConfig,
) -> Step<'a> {
    use RoutingStrategy::*;

    match (strategy, segment) {
        (_, Segment::Unconfigured) => Step::Miss(MissReason::UnconfiguredLocale),
        (_, Segment::UnknownHost) => Step::Miss(MissReason::UnknownHost),

        (PrefixOtherLocales, Segment::Absent) => Step::Candidate(config.default_locale()),
        (PrefixOtherLocales, Segment::Default(_)) => Step::Miss(MissReason::DefaultLocalePrefixed),

        (PrefixAlways, Segment::Absent) if at_root => Step::RedirectToDefault,
        (PrefixAlways | PrefixAlwaysNoRedirect, Segment::Absent) => {
            Step::Miss(MissReason::MissingLocalePrefix)
        }

        (_, Segment::Default(locale) | Segment::Other(locale) | Segment::Domain(locale)) => {
            Step::Candidate(locale)
        }

        // Domains never produces a path segment.
        (Domains, Segment::Absent) => Step::Miss(MissReason::UnknownHost),
    }
}
