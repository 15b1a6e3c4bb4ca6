//! Sensor values and the chlorinator's enumerated vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

/// A single sensor reading as delivered by the upstream fetcher.
///
/// Readings are either numeric (pH, setpoints) or enumerated strings
/// (mode, pump speed, status and info messages). The untagged serde form
/// matches the JSON shape a fetcher delivers: bare numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Number(f64),
    Text(String),
}

impl SensorValue {
    /// Numeric form of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// String form of the value, if it has one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for SensorValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SensorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SensorValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Operating mode reported by the chlorinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum OperatingMode {
    Off,
    Auto,
    Manual,
}

/// Filtration pump speed reported by the chlorinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum PumpSpeed {
    Low,
    Medium,
    High,
    #[strum(serialize = "AI")]
    Ai,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        let value = SensorValue::Number(7.4);
        assert_eq!(value.as_f64(), Some(7.4));
        assert_eq!(value.as_str(), None);

        let value = SensorValue::from("Auto");
        assert_eq!(value.as_f64(), None);
        assert_eq!(value.as_str(), Some("Auto"));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(SensorValue::Number(7.4).to_string(), "7.4");
        assert_eq!(SensorValue::from("Low").to_string(), "Low");
    }

    #[test]
    fn test_untagged_json_forms() {
        let value: SensorValue = serde_json::from_str("7.4").unwrap();
        assert_eq!(value, SensorValue::Number(7.4));

        let value: SensorValue = serde_json::from_str(r#""Auto""#).unwrap();
        assert_eq!(value, SensorValue::Text("Auto".to_string()));

        // Integers read as numbers, not text.
        let value: SensorValue = serde_json::from_str("720").unwrap();
        assert_eq!(value, SensorValue::Number(720.0));
    }

    #[test]
    fn test_vocabulary_string_forms() {
        assert_eq!(OperatingMode::Auto.to_string(), "Auto");
        assert_eq!(PumpSpeed::Ai.to_string(), "AI");
        assert_eq!("Manual".parse::<OperatingMode>().unwrap(), OperatingMode::Manual);
        assert_eq!("AI".parse::<PumpSpeed>().unwrap(), PumpSpeed::Ai);
    }
}
