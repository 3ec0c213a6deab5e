//! Content existence and page storage.
//!
//! # Data Flow
//! ```text
//! content/
//!     <locale path>/**/*.html   → pages keyed by (locale, canonical path)
//!     _endpoints/**             → locale-agnostic endpoints and assets
//!     404.html                  → not-found page
//!         → table.rs (PageTable::scan_dir)
//!         → ContentIndex::has_content for the resolver's content check
//! ```
//!
//! # Design Decisions
//! - The resolver only sees `ContentIndex`; it never reads files
//! - Closures implement `ContentIndex`, so tests and callers can supply
//!   existence checks without building a table

pub mod table;

pub use table::{Endpoint, PageTable};

/// Answers "does `locale` have content at `path`?".
///
/// `locale` is a configured locale path (`pt_BR`, `spanish`); `path` is the
/// canonical content path with base and locale removed.
pub trait ContentIndex {
    fn has_content(&self, locale: &str, path: &str) -> bool;
}

impl<F> ContentIndex for F
where
    F: Fn(&str, &str) -> bool,
{
    fn has_content(&self, locale: &str, path: &str) -> bool {
        self(locale, path)
    }
}
