use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load environment variables from a `.env` file in the working directory.
/// Real environment variables take precedence over file entries.
pub fn load_dotenv() {
    let env_path = Path::new(".env");
    let Ok(content) = fs::read_to_string(env_path) else {
        return;
    };

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let mut value = value.trim();
            if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
                || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
            {
                value = &value[1..value.len() - 1];
            }

            if std::env::var(key).is_err() {
                // SAFETY: called from main before the async runtime starts,
                // while the process is still single-threaded.
                unsafe { std::env::set_var(key, value) };
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Config-entry id under which the coordinator is stored.
    pub entry_id: String,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Feed the coordinator from the simulated chlorinator. Off means the
    /// daemon waits for an external source and every sensor reads as
    /// unavailable.
    pub enabled: bool,
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry_id: "pool01".to_string(),
            simulation: SimulationConfig {
                enabled: true,
                poll_interval_secs: 10,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(entry_id) = std::env::var("CHLORINATOR_ENTRY_ID") {
            config.entry_id = entry_id;
        }
        if let Ok(enabled) = std::env::var("CHLORINATOR_SIMULATION")
            && let Ok(e) = enabled.parse()
        {
            config.simulation.enabled = e;
        }
        if let Ok(interval) = std::env::var("CHLORINATOR_POLL_INTERVAL_SECS")
            && let Ok(i) = interval.parse()
        {
            config.simulation.poll_interval_secs = i;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.entry_id, "pool01");
        assert!(config.simulation.enabled);
        assert_eq!(config.simulation.poll_interval_secs, 10);
    }
}
