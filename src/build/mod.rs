//! Static build subsystem.
//!
//! # Data Flow
//! ```text
//! Site (config + content)
//!     → prerender::plan (enumerate URLs, resolve each)
//!         Serve    → rendered HTML at <url>/index.html
//!         Redirect → meta-refresh HTML at <url>/index.html
//!         NotFound → no file
//!     → prerender::write (out_dir)
//! ```

pub mod prerender;

pub use prerender::{build, plan, write, BuildReport, FileKind, StaticFile};
