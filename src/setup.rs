//! Config-entry setup: binds a stored coordinator to freshly built
//! entities.

use crate::DOMAIN;
use crate::coordinator::ChlorinatorCoordinator;
use crate::entity::{ChlorinatorSensor, Entity};
use crate::error::{BridgeError, Result};
use crate::sensor_types::SENSOR_TYPES;
use log::info;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Process-wide shared state, keyed by integration domain and config-entry
/// id.
///
/// The platform stores a coordinator handle here when a config entry is
/// loaded; platform setup functions read it back out. Handles are
/// reference-counted, so entities built from them never outlive the
/// coordinator.
#[derive(Default)]
pub struct BridgeState {
    coordinators: RwLock<HashMap<(String, String), Arc<ChlorinatorCoordinator>>>,
}

impl BridgeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the coordinator for a config entry of this integration.
    pub fn insert_coordinator(&self, entry_id: &str, coordinator: Arc<ChlorinatorCoordinator>) {
        self.coordinators
            .write()
            .insert((DOMAIN.to_string(), entry_id.to_string()), coordinator);
    }

    /// Coordinator handle for a config entry, if one is stored.
    pub fn coordinator(&self, entry_id: &str) -> Option<Arc<ChlorinatorCoordinator>> {
        self.coordinators
            .read()
            .get(&(DOMAIN.to_string(), entry_id.to_string()))
            .cloned()
    }
}

/// Set up the sensor platform for one config entry.
///
/// Builds one sensor entity per catalog entry, in table order, and hands
/// the full list to the registration callback. Fails only when no
/// coordinator is stored for the entry.
pub fn setup_entry(
    state: &BridgeState,
    entry_id: &str,
    add_entities: impl FnOnce(Vec<Box<dyn Entity>>),
) -> Result<()> {
    let coordinator =
        state
            .coordinator(entry_id)
            .ok_or_else(|| BridgeError::UnknownConfigEntry {
                domain: DOMAIN.to_string(),
                entry_id: entry_id.to_string(),
            })?;

    let entities: Vec<Box<dyn Entity>> = SENSOR_TYPES
        .iter()
        .map(|description| {
            Box::new(ChlorinatorSensor::new(coordinator.clone(), description)) as Box<dyn Entity>
        })
        .collect();

    info!(
        "Registering {} chlorinator sensor entities for entry {entry_id}",
        entities.len()
    );
    add_entities(entities);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityRegistry;

    #[test]
    fn test_setup_builds_one_entity_per_catalog_entry() {
        let state = BridgeState::new();
        state.insert_coordinator("pool01", Arc::new(ChlorinatorCoordinator::new()));

        let mut registry = EntityRegistry::new();
        setup_entry(&state, "pool01", |entities| registry.add_entities(entities))
            .expect("setup failed");

        assert_eq!(registry.len(), SENSOR_TYPES.len());
        let expected: Vec<String> = SENSOR_TYPES
            .iter()
            .map(|description| format!("pool01_{}", description.key))
            .collect();
        let actual: Vec<String> = registry
            .iter()
            .map(|entity| entity.unique_id().to_string())
            .collect();
        assert_eq!(actual, expected, "registration order must follow the table");
    }

    #[test]
    fn test_setup_unknown_entry_is_an_error() {
        let state = BridgeState::new();

        let mut called = false;
        let result = setup_entry(&state, "missing", |_| called = true);

        assert!(!called, "callback must not run when setup fails");
        match result {
            Err(BridgeError::UnknownConfigEntry { domain, entry_id }) => {
                assert_eq!(domain, DOMAIN);
                assert_eq!(entry_id, "missing");
            }
            other => panic!("expected UnknownConfigEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_state_keys_are_scoped_by_domain_and_entry() {
        let state = BridgeState::new();
        let coordinator = Arc::new(ChlorinatorCoordinator::new());
        state.insert_coordinator("pool01", coordinator.clone());

        assert!(state.coordinator("pool01").is_some());
        assert!(state.coordinator("pool02").is_none());
        assert!(Arc::ptr_eq(&state.coordinator("pool01").unwrap(), &coordinator));
    }
}
