//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! locale-router.toml
//!     → loader.rs (read & deserialize into SiteConfig)
//!     → validation.rs (semantic checks, all violations collected)
//!     → LocaleConfig (validated, immutable)
//!     → shared via Arc with the resolver
//!
//! Dev mode:
//!     watcher.rs detects a config or content change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new Site sent to the server, swapped atomically
//!     → in-flight requests keep the snapshot they loaded
//! ```
//!
//! # Design Decisions
//! - `SiteConfig` is the raw file shape; `LocaleConfig` is what routing reads
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - An invalid reload is logged and ignored

pub mod i18n;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use i18n::{ConfiguredLocale, DomainEntry, LocaleConfig};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    BuildConfig, FallbackType, I18nConfig, LocaleEntry, ObservabilityConfig, RoutingStrategy,
    ServerConfig, SiteConfig, TrailingSlash,
};
pub use validation::ValidationError;
