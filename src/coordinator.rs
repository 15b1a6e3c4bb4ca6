//! Shared data coordinator for chlorinator readings.
//!
//! The coordinator owns the latest snapshot delivered by a reading source
//! and notifies dependents when it changes. Entities hold a shared handle
//! and read through to the current snapshot on every state request; they
//! never mutate it.

use crate::error::Result;
use crate::value::SensorValue;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// One snapshot of device readings, keyed by sensor key.
///
/// Keys are owned strings: the upstream fetcher may deliver any subset or
/// superset of the catalog, and an absent key is expected steady state,
/// not an error.
#[derive(Debug, Clone)]
pub struct ChlorinatorData {
    readings: HashMap<String, SensorValue>,
    captured_at: DateTime<Utc>,
}

impl ChlorinatorData {
    /// Create an empty snapshot captured now.
    pub fn new() -> Self {
        Self {
            readings: HashMap::new(),
            captured_at: Utc::now(),
        }
    }

    /// Parse a snapshot from the JSON object shape a fetcher delivers,
    /// e.g. `{"ph_measurement": 7.4, "mode": "Auto"}`.
    pub fn from_json(payload: &str) -> Result<Self> {
        let readings: HashMap<String, SensorValue> = serde_json::from_str(payload)?;
        Ok(Self {
            readings,
            captured_at: Utc::now(),
        })
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SensorValue>) {
        self.readings.insert(key.into(), value.into());
    }

    /// Reading for a sensor key, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&SensorValue> {
        self.readings.get(key)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// When this snapshot was captured.
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// True when both snapshots carry identical readings, ignoring
    /// capture time.
    pub fn same_readings(&self, other: &Self) -> bool {
        self.readings == other.readings
    }
}

impl Default for ChlorinatorData {
    fn default() -> Self {
        Self::new()
    }
}

/// Upstream side of the coordinator: anything that can produce a fresh
/// snapshot of device readings.
///
/// A real device client implements this over its wire protocol; the
/// bundled [`crate::input::SimulatedChlorinator`] implements it without
/// hardware attached.
#[async_trait]
pub trait ReadingSource: Send {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Produce a fresh snapshot.
    async fn poll(&mut self) -> Result<ChlorinatorData>;
}

/// Owns the latest snapshot and wakes a dependent task when it changes.
///
/// The version counter increments each time a snapshot with different
/// readings is swapped in, so pollers can cheaply detect change.
pub struct ChlorinatorCoordinator {
    data: RwLock<ChlorinatorData>,
    version: AtomicU32,
    notify: Notify,
}

impl ChlorinatorCoordinator {
    /// Create a coordinator with an empty snapshot. Entities read `None`
    /// for every key until the first refresh lands.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(ChlorinatorData::new()),
            version: AtomicU32::new(0),
            notify: Notify::new(),
        }
    }

    /// Clone of the current snapshot.
    pub fn data(&self) -> ChlorinatorData {
        self.data.read().clone()
    }

    /// Current value for one sensor key, or `None` if the latest snapshot
    /// omits it.
    pub fn value(&self, key: &str) -> Option<SensorValue> {
        self.data.read().get(key).cloned()
    }

    /// Snapshot version, incremented on each change.
    pub fn version(&self) -> u32 {
        self.version.load(Ordering::SeqCst)
    }

    /// Swap in a new snapshot. Bumps the version and wakes the change
    /// waiter only when the readings actually differ; the stored capture
    /// time is refreshed either way.
    pub fn update(&self, data: ChlorinatorData) {
        let changed = {
            let mut guard = self.data.write();
            let changed = !guard.same_readings(&data);
            *guard = data;
            changed
        };
        if changed {
            self.version.fetch_add(1, Ordering::SeqCst);
            self.notify.notify_one();
        }
    }

    /// Wait until the next snapshot change. A change that happens while
    /// no task is waiting is held as a permit, so a looping waiter never
    /// misses one.
    pub async fn changed(&self) {
        self.notify.notified().await;
    }
}

impl Default for ChlorinatorCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the refresh loop: poll the source on a fixed interval and hand
/// each snapshot to the coordinator.
///
/// A failed poll keeps the previous snapshot and is logged; the next tick
/// is the next attempt.
pub fn spawn_refresh(
    coordinator: Arc<ChlorinatorCoordinator>,
    mut source: Box<dyn ReadingSource>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match source.poll().await {
                Ok(data) => {
                    debug!("[{}] snapshot with {} readings", source.name(), data.len());
                    coordinator.update(data);
                }
                Err(e) => {
                    warn!("[{}] poll failed, keeping last snapshot: {e}", source.name());
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use std::collections::VecDeque;
    use tokio::time::timeout;

    struct ScriptedSource {
        polls: VecDeque<Result<ChlorinatorData>>,
    }

    #[async_trait]
    impl ReadingSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn poll(&mut self) -> Result<ChlorinatorData> {
            self.polls
                .pop_front()
                .unwrap_or_else(|| Err(BridgeError::SourceUnavailable("script ended".into())))
        }
    }

    fn snapshot(ph: f64) -> ChlorinatorData {
        let mut data = ChlorinatorData::new();
        data.insert("ph_measurement", ph);
        data.insert("mode", "Auto");
        data
    }

    #[test]
    fn test_snapshot_lookup() {
        let data = snapshot(7.4);
        assert_eq!(data.get("ph_measurement"), Some(&SensorValue::Number(7.4)));
        assert_eq!(data.get("mode"), Some(&SensorValue::Text("Auto".into())));
        assert_eq!(data.get("pump_speed"), None);
    }

    #[test]
    fn test_snapshot_from_json() {
        let data =
            ChlorinatorData::from_json(r#"{"ph_measurement": 7.4, "mode": "Auto"}"#).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("ph_measurement"), Some(&SensorValue::Number(7.4)));
        assert_eq!(data.get("mode"), Some(&SensorValue::Text("Auto".into())));
    }

    #[test]
    fn test_snapshot_from_json_rejects_non_object() {
        assert!(ChlorinatorData::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_update_bumps_version_on_change_only() {
        let coordinator = ChlorinatorCoordinator::new();
        assert_eq!(coordinator.version(), 0);
        assert_eq!(coordinator.value("ph_measurement"), None);

        coordinator.update(snapshot(7.4));
        assert_eq!(coordinator.version(), 1);
        assert_eq!(
            coordinator.value("ph_measurement"),
            Some(SensorValue::Number(7.4))
        );

        // Same readings, fresh capture time: no version bump.
        coordinator.update(snapshot(7.4));
        assert_eq!(coordinator.version(), 1);

        coordinator.update(snapshot(7.2));
        assert_eq!(coordinator.version(), 2);
    }

    #[tokio::test]
    async fn test_update_wakes_changed_waiter() {
        let coordinator = ChlorinatorCoordinator::new();
        coordinator.update(snapshot(7.4));

        // The change landed before we waited; the held permit completes
        // the wait immediately.
        timeout(Duration::from_millis(100), coordinator.changed())
            .await
            .expect("changed() did not observe the update");
    }

    #[tokio::test]
    async fn test_refresh_keeps_last_snapshot_on_poll_failure() {
        let coordinator = Arc::new(ChlorinatorCoordinator::new());
        let source = ScriptedSource {
            polls: VecDeque::from([Ok(snapshot(7.4))]),
        };

        let task = spawn_refresh(
            coordinator.clone(),
            Box::new(source),
            Duration::from_millis(5),
        );

        // First poll succeeds, every following poll fails.
        timeout(Duration::from_secs(1), coordinator.changed())
            .await
            .expect("refresh never delivered a snapshot");
        tokio::time::sleep(Duration::from_millis(30)).await;
        task.abort();

        assert_eq!(coordinator.version(), 1);
        assert_eq!(
            coordinator.value("ph_measurement"),
            Some(SensorValue::Number(7.4))
        );
    }
}
