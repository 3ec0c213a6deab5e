//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Scan the content directory
//! - Assemble the immutable `Site` every execution mode runs against
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Relative directories resolve against the config file's directory
//! - A `Site` is replaced wholesale on reload, never mutated

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::SiteConfig;
use crate::content::PageTable;
use crate::routing::engine::Resolver;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read content from {path}: {source}")]
    Content {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything needed to answer requests: settings, resolver and content.
#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub resolver: Resolver,
    pub pages: PageTable,
    root: PathBuf,
}

impl Site {
    /// Assemble a site from in-memory configuration and content.
    pub fn new(config: SiteConfig, pages: PageTable) -> Result<Self, ConfigError> {
        let locales = config.i18n.validate().map_err(ConfigError::Validation)?;
        Ok(Self {
            config,
            resolver: Resolver::new(locales),
            pages,
            root: PathBuf::from("."),
        })
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Directory relative paths in the config resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.config.server.content_dir)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join(&self.config.build.out_dir)
    }
}

/// Load config from `path`, then scan its content directory.
pub fn load_site(path: &Path) -> Result<Site, StartupError> {
    let (config, locales) = load_config(path)?;
    let root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let content_dir = root.join(&config.server.content_dir);
    let pages = PageTable::scan_dir(&content_dir, &locales).map_err(|source| {
        StartupError::Content {
            path: content_dir.clone(),
            source,
        }
    })?;

    tracing::info!(
        strategy = %locales.strategy(),
        default_locale = %locales.default_locale().path(),
        locales = locales.locales().len(),
        base = %locales.base(),
        "Site loaded"
    );

    Ok(Site {
        config,
        resolver: Resolver::new(locales),
        pages,
        root,
    })
}
