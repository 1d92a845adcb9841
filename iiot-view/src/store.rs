use std::sync::Arc;

use iiot_core::FactSnapshot;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::source::FactSource;

/// Shared handle to the snapshot currently being rendered.
///
/// Replacement swaps the whole snapshot under the lock, so a render pass
/// that called [`FactStore::snapshot`] keeps a consistent view even if a
/// refresh lands while it is still projecting.
pub struct FactStore {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    snapshot: Arc<FactSnapshot>,
    generation: u64,
}

impl FactStore {
    pub fn new(snapshot: FactSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                snapshot: Arc::new(snapshot),
                generation: 0,
            })),
        }
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<FactSnapshot> {
        let inner = self.inner.read().await;
        Arc::clone(&inner.snapshot)
    }

    /// Number of replacements since the store was created.
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Install `snapshot`, returning the one it replaced.
    pub async fn replace(&self, snapshot: FactSnapshot) -> Arc<FactSnapshot> {
        let (previous, _) = self.install(snapshot).await;
        previous
    }

    /// Read `source` and install the result.
    ///
    /// On error the current snapshot stays in place. Returns the new
    /// generation on success.
    pub async fn refresh_from<S>(&self, source: &S) -> Result<u64, S::Error>
    where
        S: FactSource,
    {
        let snapshot = match source.read().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "fact source read failed, keeping previous snapshot");
                return Err(e);
            }
        };

        let devices = snapshot.devices.len();
        let alerts = snapshot.alerts.len();

        let (_, generation) = self.install(snapshot).await;

        info!(generation, devices, alerts, "fact store refreshed");
        Ok(generation)
    }

    /// Swap in `snapshot` and bump the generation under one write lock.
    async fn install(&self, snapshot: FactSnapshot) -> (Arc<FactSnapshot>, u64) {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        let previous = std::mem::replace(&mut inner.snapshot, Arc::new(snapshot));
        (previous, inner.generation)
    }
}

impl Default for FactStore {
    fn default() -> Self {
        Self::new(FactSnapshot::default())
    }
}

impl Clone for FactStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use iiot_core::{Device, DeviceId, DeviceStatus};

    use super::*;
    use crate::source::memory::MemorySource;

    #[derive(Debug, thiserror::Error)]
    #[error("backend unavailable")]
    struct Unavailable;

    struct FailingSource;

    #[async_trait]
    impl FactSource for FailingSource {
        type Error = Unavailable;

        async fn read(&self) -> Result<FactSnapshot, Self::Error> {
            Err(Unavailable)
        }
    }

    fn one_device(id: &str) -> FactSnapshot {
        FactSnapshot {
            devices: vec![Device {
                id: DeviceId::from(id),
                name: "Press".into(),
                status: DeviceStatus::Idle,
                last_seen: None,
            }]
            .into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn starts_empty() {
        let store = FactStore::default();
        assert!(store.snapshot().await.is_empty());
        assert_eq!(store.generation().await, 0);
    }

    #[tokio::test]
    async fn replace_swaps_whole_snapshot() {
        let store = FactStore::new(one_device("A"));
        let held = store.snapshot().await;

        let previous = store.replace(one_device("B")).await;
        assert_eq!(previous.devices[0].id, DeviceId::from("A"));

        // A reader holding the old snapshot still sees it unchanged.
        assert_eq!(held.devices[0].id, DeviceId::from("A"));
        assert_eq!(store.snapshot().await.devices[0].id, DeviceId::from("B"));
        assert_eq!(store.generation().await, 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = FactStore::default();
        let other = store.clone();

        other.replace(one_device("C")).await;
        assert_eq!(store.snapshot().await.devices.len(), 1);
    }

    #[tokio::test]
    async fn refresh_from_source() {
        let store = FactStore::default();
        let generation = store.refresh_from(&MemorySource::demo()).await.unwrap();

        assert_eq!(generation, 1);
        assert_eq!(store.snapshot().await.devices.len(), 4);
    }

    #[tokio::test]
    async fn replace_and_refresh_share_generation() {
        let store = FactStore::new(one_device("A"));

        store.replace(one_device("B")).await;
        let generation = store.refresh_from(&MemorySource::demo()).await.unwrap();
        assert_eq!(generation, 2);

        let previous = store.replace(one_device("C")).await;
        assert_eq!(previous.devices.len(), 4);
        assert_eq!(store.generation().await, 3);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous() {
        let store = FactStore::new(one_device("A"));

        assert!(store.refresh_from(&FailingSource).await.is_err());
        assert_eq!(store.generation().await, 0);
        assert_eq!(store.snapshot().await.devices[0].id, DeviceId::from("A"));
    }
}
