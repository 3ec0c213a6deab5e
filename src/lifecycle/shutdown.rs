//! Shutdown coordination.
//!
//! # Responsibilities
//! - Broadcast one stop signal to the server and any background task
//! - In dev mode, own the site watcher so a shutdown also stops hot reload
//!
//! # Design Decisions
//! - Dropping the watcher closes the reload channel; the server's swap task
//!   then ends on its own
//! - Triggering twice is harmless

use std::sync::{Mutex, PoisonError};

use notify::RecommendedWatcher;
use tokio::sync::broadcast;

pub struct Shutdown {
    tx: broadcast::Sender<()>,
    watcher: Mutex<Option<RecommendedWatcher>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            watcher: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Keep the dev-mode watcher alive until shutdown.
    pub fn hold_watcher(&self, watcher: RecommendedWatcher) {
        *self.watcher.lock().unwrap_or_else(PoisonError::into_inner) = Some(watcher);
    }

    /// True while a dev-mode watcher is held.
    pub fn is_watching(&self) -> bool {
        self.watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Stop the watcher (if any), then signal every subscriber.
    pub fn trigger(&self) {
        let watcher = self
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(watcher) = watcher {
            drop(watcher);
            tracing::info!("Site watcher stopped");
        }

        let listeners = self.tx.send(()).unwrap_or(0);
        tracing::info!(listeners, "Shutdown triggered");
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    use crate::config::watcher::SiteWatcher;

    #[tokio::test]
    async fn test_trigger_reaches_subscribers() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let mut reload = shutdown.subscribe();

        shutdown.trigger();
        assert!(server.recv().await.is_ok());
        assert!(reload.recv().await.is_ok());

        // No subscribers left to notify.
        drop((server, reload));
        shutdown.trigger();
    }

    #[tokio::test]
    async fn test_trigger_stops_site_watcher() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("locale-router.toml");
        fs::write(&config, "[i18n]\nlocales = [\"en\"]\n").unwrap();
        fs::create_dir_all(tmp.path().join("content/en")).unwrap();

        let (watcher, mut updates) = SiteWatcher::new(&config, &tmp.path().join("content"));
        let shutdown = Shutdown::new();
        shutdown.hold_watcher(watcher.run().unwrap());
        assert!(shutdown.is_watching());

        shutdown.trigger();
        assert!(!shutdown.is_watching());

        // With the watcher gone, the reload channel closes.
        let closed = tokio::time::timeout(Duration::from_secs(5), async {
            while updates.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
