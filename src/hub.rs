// src/hub.rs - Composition root wiring sensors, thermostat, and dashboard
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::{ConfigError, DashboardMode, HubConfig};
use crate::consumer::{pump_events, run_scheduled};
use crate::dashboard::{ConsoleDashboard, JsonFeedDashboard};
use crate::ports::{DashboardError, DashboardService};
use crate::sensor::SimulatedSensor;
use crate::thermostat::Thermostat;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("dashboard error: {0}")]
    Dashboard(#[from] DashboardError),
}

/// Owns the thermostat and the background tasks that feed and drive it.
pub struct Hub {
    config: HubConfig,
    thermostat: Arc<Thermostat>,
    shutdown_tx: broadcast::Sender<()>,
    tasks: Vec<JoinHandle<()>>,
}

impl Hub {
    pub async fn new(config: HubConfig) -> Result<Self, HubError> {
        config.validate()?;
        let dashboard = build_dashboard(&config).await?;
        let thermostat = Arc::new(Thermostat::new(
            config.target_temperature(),
            config.sampling_window(),
            dashboard,
        ));
        let (shutdown_tx, _) = broadcast::channel(1);
        Ok(Self {
            config,
            thermostat,
            shutdown_tx,
            tasks: Vec::new(),
        })
    }

    /// Spawn one event pump per configured sensor plus the periodic update
    /// loop.
    pub fn start(&mut self) {
        for (name, sensor_config) in &self.config.sensors {
            let sensor = SimulatedSensor::new(
                name.clone(),
                sensor_config.base_temperature,
                sensor_config.swing,
                sensor_config.read_interval(),
            );
            tracing::info!(
                "Starting sensor '{}' ({} ms read interval)",
                name,
                sensor_config.read_interval_ms
            );
            self.tasks.push(tokio::spawn(pump_events(
                self.thermostat.clone(),
                sensor,
                self.shutdown_tx.subscribe(),
            )));
        }

        self.tasks.push(tokio::spawn(run_scheduled(
            self.thermostat.clone(),
            self.shutdown_tx.subscribe(),
        )));

        tracing::info!(
            "Hub started: {} sensor(s), regulating to {}",
            self.config.sensors.len(),
            self.thermostat.target_temperature()
        );
    }

    /// Shared handle to the consumer, e.g. for feeding it events from a
    /// source the hub does not manage.
    pub fn thermostat(&self) -> Arc<Thermostat> {
        self.thermostat.clone()
    }

    /// Stop all background tasks and wait for them to finish.
    pub async fn shutdown(&mut self) {
        tracing::info!("Shutting down hub");
        let _ = self.shutdown_tx.send(());
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
    }
}

async fn build_dashboard(config: &HubConfig) -> Result<Arc<dyn DashboardService>, HubError> {
    match config.dashboard.mode {
        DashboardMode::Console => Ok(Arc::new(ConsoleDashboard::new())),
        DashboardMode::Feed => {
            let feed = JsonFeedDashboard::open(&config.dashboard.feed_path).await?;
            tracing::info!("Dashboard feed: {}", config.dashboard.feed_path);
            Ok(Arc::new(feed))
        }
    }
}
