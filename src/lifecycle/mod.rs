//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Scan content → Site
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop dev watcher → broadcast → server drains → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then content, then listeners
//! - Config reload is file-driven (dev mode watcher), not signal-driven

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{load_site, Site, StartupError};
