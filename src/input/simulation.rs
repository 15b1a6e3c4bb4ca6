//! Simulated chlorinator for development and testing.
//!
//! Produces plausible readings with no hardware attached: pH drifts
//! around the configured setpoint, mode and pump speed cycle through the
//! device vocabulary.

use crate::coordinator::{ChlorinatorData, ReadingSource};
use crate::error::Result;
use crate::value::{OperatingMode, PumpSpeed};
use async_trait::async_trait;
use rand::Rng;

/// Reading source that fabricates a full snapshot on every poll.
pub struct SimulatedChlorinator {
    ph_setpoint: f64,
    orp_setpoint: f64,
    cycle: u32,
}

impl SimulatedChlorinator {
    pub fn new() -> Self {
        Self {
            ph_setpoint: 7.2,
            orp_setpoint: 720.0,
            cycle: 0,
        }
    }

    /// Override the setpoints the simulation drifts around.
    pub fn with_setpoints(mut self, ph: f64, orp: f64) -> Self {
        self.ph_setpoint = ph;
        self.orp_setpoint = orp;
        self
    }

    fn mode(&self) -> OperatingMode {
        match (self.cycle / 6) % 3 {
            0 => OperatingMode::Auto,
            1 => OperatingMode::Manual,
            _ => OperatingMode::Off,
        }
    }

    fn pump_speed(&self) -> PumpSpeed {
        if self.mode() == OperatingMode::Off {
            return PumpSpeed::Low;
        }
        match (self.cycle / 3) % 4 {
            0 => PumpSpeed::Low,
            1 => PumpSpeed::Medium,
            2 => PumpSpeed::High,
            _ => PumpSpeed::Ai,
        }
    }

    fn chlorine_status(&self) -> &'static str {
        match self.mode() {
            OperatingMode::Off => "Idle",
            _ if self.cycle % 2 == 0 => "Dosing",
            _ => "Monitoring",
        }
    }
}

impl Default for SimulatedChlorinator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadingSource for SimulatedChlorinator {
    fn name(&self) -> &str {
        "simulation"
    }

    async fn poll(&mut self) -> Result<ChlorinatorData> {
        self.cycle = self.cycle.wrapping_add(1);
        let mut rng = rand::thread_rng();

        // One decimal place, matching what the device reports.
        let ph = (self.ph_setpoint + rng.gen_range(-0.3..=0.3)) * 10.0;
        let ph = ph.round() / 10.0;

        let mut data = ChlorinatorData::new();
        data.insert("ph_measurement", ph);
        data.insert("mode", self.mode().to_string());
        data.insert("pump_speed", self.pump_speed().to_string());
        data.insert("chlorine_control_status", self.chlorine_status());
        data.insert("info_message", "OK");
        data.insert("ph_control_setpoint", self.ph_setpoint);
        data.insert("chlorine_control_setpoint", self.orp_setpoint);
        data.insert("ph_control_type", "Automatic");
        data.insert("chlorine_control_type", "ORP");
        Ok(data)
    }
}
