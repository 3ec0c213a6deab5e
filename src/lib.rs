//! Locale routing for multi-language sites.
//!
//! Resolves each request (path, host headers) into one routing decision:
//! serve a page in a locale, redirect, or not found. The same resolver backs
//! the server-rendered mode, the dev server and the static build.

// Core
pub mod config;
pub mod locale;
pub mod routing;

// Collaborators
pub mod content;
pub mod page;

// Execution modes
pub mod build;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{LocaleConfig, SiteConfig};
pub use content::{ContentIndex, PageTable};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, Site};
pub use routing::{RequestContext, Resolver, RoutingDecision};
