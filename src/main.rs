use chlorinator_bridge::config::{Config, load_dotenv};
use chlorinator_bridge::coordinator::{ChlorinatorCoordinator, spawn_refresh};
use chlorinator_bridge::entity::{DEVICE_INFO, EntityRegistry};
use chlorinator_bridge::input::SimulatedChlorinator;
use chlorinator_bridge::setup::{BridgeState, setup_entry};
use clap::Parser;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Bridge daemon exposing pool chlorinator readings as sensor entities.
#[derive(Parser, Debug)]
#[command(name = "chlorinator-bridge", version, about)]
struct Args {
    /// Config entry id to set up (overrides CHLORINATOR_ENTRY_ID).
    #[arg(long)]
    entry_id: Option<String>,

    /// Seconds between source polls.
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Run without the simulated chlorinator feeding the coordinator.
    #[arg(long)]
    no_simulation: bool,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_logger();
    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(entry_id) = args.entry_id {
        config.entry_id = entry_id;
    }
    if let Some(secs) = args.poll_interval {
        config.simulation.poll_interval_secs = secs;
    }
    if args.no_simulation {
        config.simulation.enabled = false;
    }

    info!("Starting chlorinator bridge");
    info!(
        "  Device: {} {} ({})",
        DEVICE_INFO.manufacturer, DEVICE_INFO.model, DEVICE_INFO.name
    );
    info!("  Config entry: {}", config.entry_id);
    info!(
        "  Simulation: {} ({}s poll)",
        if config.simulation.enabled { "on" } else { "off" },
        config.simulation.poll_interval_secs
    );

    // The platform stores the coordinator before platform setup runs,
    // mirroring how an integration's entry setup precedes its platforms.
    let state = BridgeState::new();
    let coordinator = Arc::new(ChlorinatorCoordinator::new());
    state.insert_coordinator(&config.entry_id, coordinator.clone());

    let mut registry = EntityRegistry::new();
    if let Err(e) = setup_entry(&state, &config.entry_id, |entities| {
        registry.add_entities(entities)
    }) {
        log::error!("Sensor platform setup failed: {e}");
        std::process::exit(1);
    }
    let registry = Arc::new(registry);

    let refresh_task = config.simulation.enabled.then(|| {
        spawn_refresh(
            coordinator.clone(),
            Box::new(SimulatedChlorinator::new()),
            Duration::from_secs(config.simulation.poll_interval_secs),
        )
    });

    // Log every entity's current value whenever a new snapshot lands.
    let report_task = {
        let coordinator = coordinator.clone();
        let registry = registry.clone();
        tokio::spawn(async move {
            loop {
                coordinator.changed().await;
                let data = coordinator.data();
                info!(
                    "Snapshot v{} captured {}",
                    coordinator.version(),
                    data.captured_at().format("%H:%M:%S%.3f")
                );
                for entity in registry.iter() {
                    match entity.state() {
                        Some(value) => info!("  {} = {}", entity.unique_id(), value),
                        None => info!("  {} = unavailable", entity.unique_id()),
                    }
                }
            }
        })
    };

    info!("Chlorinator bridge is running, press Ctrl+C to exit");

    match signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => log::error!("Failed to listen for shutdown signal: {e}"),
    }

    if let Some(task) = refresh_task {
        task.abort();
    }
    report_task.abort();

    info!("Chlorinator bridge stopped");
}
