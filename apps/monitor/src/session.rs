use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::config::MonitorSettings;
use crate::monitoring::{OverlapPolicy, PollScheduler, Prober, SharedRegistry, StatusSink};
use crate::registry::{HostRegistry, RegistrationError, ServerRecord};
use crate::storage::{KeyValueStore, StorageError};

/// The two mutually exclusive views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Registration form
    Add,
    /// Monitoring table with an active schedule
    View,
}

/// Owns the registry, the active schedule and the display sink for one run
pub struct MonitorSession {
    registry: SharedRegistry,
    store: Arc<dyn KeyValueStore>,
    sink: Arc<dyn StatusSink>,
    scheduler: PollScheduler,
    mode: ViewMode,
}

impl MonitorSession {
    /// Load the registry from `store`. No schedule runs until a mode is
    /// entered.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        prober: Arc<Prober>,
        sink: Arc<dyn StatusSink>,
        interval: Duration,
        overlap: OverlapPolicy,
    ) -> Result<Self, StorageError> {
        let registry = Arc::new(RwLock::new(HostRegistry::load(store.as_ref()).await?));
        let scheduler =
            PollScheduler::new(prober, registry.clone(), sink.clone(), interval, overlap);

        Ok(Self { registry, store, sink, scheduler, mode: ViewMode::Add })
    }

    /// [`Self::open`] with timing taken from the `[monitor]` config section
    pub async fn from_settings(
        store: Arc<dyn KeyValueStore>,
        prober: Arc<Prober>,
        sink: Arc<dyn StatusSink>,
        settings: &MonitorSettings,
    ) -> Result<Self, StorageError> {
        Self::open(
            store,
            prober,
            sink,
            Duration::from_millis(settings.interval_ms),
            settings.overlap,
        )
        .await
    }

    /// "view" when anything is registered, otherwise "add"
    pub async fn initial_mode(&self) -> ViewMode {
        if self.registry.read().await.is_empty() { ViewMode::Add } else { ViewMode::View }
    }

    pub async fn enter_initial_mode(&mut self) {
        let mode = self.initial_mode().await;
        self.switch_mode(mode).await;
    }

    /// Entering "view" rebuilds every slot and restarts the schedule.
    /// Entering "add" leaves any running schedule alone.
    pub async fn switch_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        if mode == ViewMode::View {
            let servers = self.servers().await;
            self.sink.rebuild(&servers);
            self.scheduler.start();
        }
        tracing::debug!(?mode, "Switched view mode");
    }

    /// Register a server; on success the view switches to the table
    pub async fn register(
        &mut self,
        name: &str,
        host: &str,
    ) -> Result<ServerRecord, RegistrationError> {
        let record = self.registry.write().await.register(self.store.as_ref(), name, host).await?;
        self.switch_mode(ViewMode::View).await;
        Ok(record)
    }

    /// Remove a server; the table is rebuilt when it is showing
    pub async fn remove(&mut self, name: &str) -> Result<ServerRecord, RegistrationError> {
        let removed = self.registry.write().await.remove(self.store.as_ref(), name).await?;
        if self.mode == ViewMode::View {
            self.switch_mode(ViewMode::View).await;
        }
        Ok(removed)
    }

    /// Re-read the registry from the store, picking up changes made by
    /// another process. A changed registry re-enters "view".
    pub async fn reload(&mut self) -> Result<bool, StorageError> {
        let fresh = HostRegistry::load(self.store.as_ref()).await?;
        {
            let mut registry = self.registry.write().await;
            if *registry == fresh {
                return Ok(false);
            }
            *registry = fresh;
        }

        tracing::info!("Registry changed in the store");
        self.switch_mode(ViewMode::View).await;
        Ok(true)
    }

    /// Restart the schedule so a sweep runs right away
    pub fn refresh(&mut self) {
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub async fn servers(&self) -> Vec<ServerRecord> {
        self.registry.read().await.servers().to_vec()
    }

    pub fn scheduler(&self) -> &PollScheduler {
        &self.scheduler
    }
}
