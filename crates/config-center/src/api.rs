use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::model::AppConfig;

/// Read side of the persisted-configuration collaborator.
///
/// A subscriber observes the current snapshot immediately and every later
/// replacement. Replacement is atomic; there is no partial mutation.
pub trait ConfigCenter: Send + Sync {
    fn snapshot(&self) -> Arc<AppConfig>;
    fn replace(&self, config: AppConfig);
    fn subscribe(&self) -> watch::Receiver<Arc<AppConfig>>;
}

/// In-memory center; the production change-notification stream feeds
/// `replace`, and tests drive it directly.
pub struct InMemoryConfigCenter {
    watch_tx: watch::Sender<Arc<AppConfig>>,
}

impl InMemoryConfigCenter {
    pub fn new(initial: AppConfig) -> Arc<Self> {
        let (watch_tx, _watch_rx) = watch::channel(Arc::new(initial));
        Arc::new(Self { watch_tx })
    }

    pub fn with_defaults() -> Arc<Self> {
        Self::new(AppConfig::default())
    }
}

impl ConfigCenter for InMemoryConfigCenter {
    fn snapshot(&self) -> Arc<AppConfig> {
        self.watch_tx.borrow().clone()
    }

    fn replace(&self, config: AppConfig) {
        debug!(?config, "replacing config snapshot");
        self.watch_tx.send_replace(Arc::new(config));
    }

    fn subscribe(&self) -> watch::Receiver<Arc<AppConfig>> {
        self.watch_tx.subscribe()
    }
}
