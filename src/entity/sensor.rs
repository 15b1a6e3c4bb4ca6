//! Per-sensor entity adapter.

use super::{DEVICE_INFO, DeviceInfo, Entity};
use crate::coordinator::ChlorinatorCoordinator;
use crate::sensor_types::SensorDescription;
use crate::value::SensorValue;
use std::sync::Arc;

/// Read-only sensor entity backed by the shared coordinator.
///
/// Binds one catalog entry to the entity surface. The adapter holds no
/// state of its own: every [`Entity::state`] call reads through to the
/// coordinator's current snapshot, and a key absent from that snapshot
/// reads as `None` rather than an error.
pub struct ChlorinatorSensor {
    coordinator: Arc<ChlorinatorCoordinator>,
    description: &'static SensorDescription,
    unique_id: String,
}

impl ChlorinatorSensor {
    /// Device prefix shared by the unique ids of all entities on the
    /// device.
    const UNIQUE_ID_PREFIX: &'static str = "POOL01";

    /// Bind one catalog entry to the coordinator.
    ///
    /// The coordinator is externally owned and outlives the entity; the
    /// description must come from the catalog table.
    pub fn new(
        coordinator: Arc<ChlorinatorCoordinator>,
        description: &'static SensorDescription,
    ) -> Self {
        let unique_id = format!("{}_{}", Self::UNIQUE_ID_PREFIX, description.key).to_lowercase();
        Self {
            coordinator,
            description,
            unique_id,
        }
    }

    pub fn key(&self) -> &'static str {
        self.description.key
    }

    pub fn description(&self) -> &'static SensorDescription {
        self.description
    }
}

impl Entity for ChlorinatorSensor {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        self.description.name
    }

    fn unit(&self) -> Option<&str> {
        self.description.unit
    }

    fn device_info(&self) -> DeviceInfo {
        DEVICE_INFO.clone()
    }

    fn state(&self) -> Option<SensorValue> {
        self.coordinator.value(self.description.key)
    }
}
