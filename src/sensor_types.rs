//! Static sensor catalog for the chlorinator integration.
//!
//! The single source of truth mapping each supported sensor key to its
//! presentation metadata. Catalog maintenance is a data edit: adding a
//! sensor means adding a table entry, never touching entity logic.

use serde::{Deserialize, Serialize};

/// Device class vocabulary understood by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorDeviceClass {
    /// Enumerated state drawn from a fixed set of strings.
    Enum,
    Ph,
    Temperature,
    Voltage,
}

/// State class vocabulary understood by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStateClass {
    Measurement,
    Total,
    TotalIncreasing,
}

/// Presentation metadata for one sensor key.
///
/// Identity is the key. Entries live in [`SENSOR_TYPES`] for the life of
/// the process and are never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorDescription {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub unit: Option<&'static str>,
    pub device_class: Option<SensorDeviceClass>,
    pub state_class: Option<SensorStateClass>,
}

/// Every sensor the chlorinator exposes, in entity registration order.
///
/// Keys must be unique; this is the exhaustive enumeration of valid keys.
pub const SENSOR_TYPES: &[SensorDescription] = &[
    SensorDescription {
        key: "ph_measurement",
        name: "pH",
        icon: "mdi:ph",
        unit: None,
        device_class: None,
        state_class: Some(SensorStateClass::Measurement),
    },
    SensorDescription {
        key: "mode",
        name: "Mode",
        icon: "mdi:power",
        unit: None,
        device_class: Some(SensorDeviceClass::Enum),
        state_class: None,
    },
    SensorDescription {
        key: "pump_speed",
        name: "Pump speed",
        icon: "mdi:speedometer",
        unit: None,
        device_class: Some(SensorDeviceClass::Enum),
        state_class: None,
    },
    SensorDescription {
        key: "chlorine_control_status",
        name: "Chlorine status",
        icon: "mdi:beaker-outline",
        unit: None,
        device_class: Some(SensorDeviceClass::Enum),
        state_class: None,
    },
    SensorDescription {
        key: "info_message",
        name: "Info message",
        icon: "mdi:information-outline",
        unit: None,
        device_class: Some(SensorDeviceClass::Enum),
        state_class: None,
    },
    SensorDescription {
        key: "ph_control_setpoint",
        name: "pH setpoint",
        icon: "mdi:ph",
        unit: None,
        device_class: None,
        state_class: Some(SensorStateClass::Measurement),
    },
    SensorDescription {
        key: "chlorine_control_setpoint",
        name: "ORP setpoint",
        icon: "mdi:beaker-check-outline",
        unit: None,
        device_class: None,
        state_class: Some(SensorStateClass::Measurement),
    },
    SensorDescription {
        key: "ph_control_type",
        name: "pH control",
        icon: "mdi:ph",
        unit: None,
        device_class: Some(SensorDeviceClass::Enum),
        state_class: None,
    },
    SensorDescription {
        key: "chlorine_control_type",
        name: "ORP control",
        icon: "mdi:beaker-outline",
        unit: None,
        device_class: Some(SensorDeviceClass::Enum),
        state_class: None,
    },
];

/// Look up a catalog entry by sensor key.
pub fn find(key: &str) -> Option<&'static SensorDescription> {
    SENSOR_TYPES.iter().find(|description| description.key == key)
}
