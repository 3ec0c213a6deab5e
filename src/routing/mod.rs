//! Locale routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, Host / X-Forwarded-*, Accept-Language)
//!     → context.rs (effective RequestContext, derived once)
//!     → engine.rs
//!         → trailing-slash policy (301)
//!         → domain.rs (domains strategy) or path.rs (base + locale segment)
//!         → (strategy × segment) table
//!         → content check → fallback.rs (one hop)
//!     → decision.rs: Serve | Redirect | NotFound
//!
//! url.rs builds every redirect target and the page-facing locale URLs.
//! ```
//!
//! # Design Decisions
//! - LocaleConfig is validated once, immutable at runtime
//! - Deterministic: same input always yields the same decision
//! - Misses are decisions, never errors

pub mod context;
pub mod decision;
pub mod domain;
pub mod engine;
pub mod fallback;
pub mod path;
pub mod url;

pub use context::RequestContext;
pub use decision::{meta_refresh_html, MissReason, RoutingDecision};
pub use engine::{Candidate, Resolver, Route};
pub use self::url::{absolute_locale_url, relative_locale_url, relative_locale_urls};
