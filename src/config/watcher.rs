//! Config and content watcher for dev-mode hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::lifecycle::startup::{load_site, Site};

/// Monitors the configuration file and the content directory.
pub struct SiteWatcher {
    config_path: PathBuf,
    content_dir: PathBuf,
    update_tx: mpsc::UnboundedSender<Site>,
}

impl SiteWatcher {
    /// Create a new SiteWatcher.
    ///
    /// Returns the watcher and a receiver for reloaded sites.
    pub fn new(config_path: &Path, content_dir: &Path) -> (Self, mpsc::UnboundedReceiver<Site>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                config_path: absolute(config_path),
                content_dir: absolute(content_dir),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread. The returned watcher must be
    /// kept alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let config_path = self.config_path.clone();
        let content_dir = self.content_dir.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove()) {
                        return;
                    }
                    let relevant = event
                        .paths
                        .iter()
                        .any(|p| p == &config_path || p.starts_with(&content_dir));
                    if !relevant {
                        return;
                    }

                    tracing::info!(paths = ?event.paths, "Change detected, reloading site");
                    match load_site(&config_path) {
                        Ok(site) => {
                            let _ = tx.send(site);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to reload site. Keeping current configuration.");
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        // Editors often replace the file, so watch its directory.
        let config_dir = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;
        watcher.watch(&self.content_dir, RecursiveMode::Recursive)?;

        tracing::info!(
            config = ?self.config_path,
            content = ?self.content_dir,
            "Site watcher started"
        );
        Ok(watcher)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
