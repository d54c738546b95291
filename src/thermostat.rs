// src/thermostat.rs - The scheduled thermostat consumer
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::consumer::{Consumer, ScheduledConsumer};
use crate::entities::{Temperature, TemperatureEntry};
use crate::ports::{DashboardError, DashboardService};

/// Dead-band above the target, in degrees: the heater is only told to stop
/// once the average exceeds target + HYSTERESIS, so the control signal does
/// not oscillate around the target. The low side deliberately has no
/// dead-band: any average below target turns the heater on.
const HYSTERESIS: f64 = 1.5;

/// Accumulates temperature readings between sampling windows and, on each
/// `update`, reports the window average to the dashboard together with a
/// heater on/off decision.
pub struct Thermostat {
    target_temperature: Temperature,
    sampling_window: Duration,
    dashboard: Arc<dyn DashboardService>,
    state: Mutex<Vec<TemperatureEntry>>,
}

impl Thermostat {
    pub fn new(
        target_temperature: Temperature,
        sampling_window: Duration,
        dashboard: Arc<dyn DashboardService>,
    ) -> Self {
        tracing::info!(
            "Thermostat target {} (dead-band +{:.1}), sampling window {:?}",
            target_temperature,
            HYSTERESIS,
            sampling_window
        );
        Self {
            target_temperature,
            sampling_window,
            dashboard,
            state: Mutex::new(Vec::new()),
        }
    }

    pub fn target_temperature(&self) -> Temperature {
        self.target_temperature
    }

    /// Snapshot of the readings accumulated since the last drain.
    pub async fn pending_samples(&self) -> Vec<TemperatureEntry> {
        self.state.lock().await.clone()
    }

    // Read and clear are one critical section: a reading is never counted
    // in two averages and never dropped between windows.
    async fn drain(&self) -> Vec<TemperatureEntry> {
        let mut state = self.state.lock().await;
        std::mem::take(&mut *state)
    }
}

#[async_trait]
impl Consumer for Thermostat {
    type Event = TemperatureEntry;

    async fn react(&self, entry: TemperatureEntry) {
        tracing::debug!("Reading {} from '{}'", entry.temperature, entry.source);
        let mut state = self.state.lock().await;
        state.push(entry);
    }
}

#[async_trait]
impl ScheduledConsumer for Thermostat {
    type Error = DashboardError;

    fn sampling_window(&self) -> Duration {
        self.sampling_window
    }

    /// Close the current sampling window: drain the buffer, report the
    /// average, and drive the heater decision.
    ///
    /// The drain happens before any dashboard call, so a failing
    /// notification can never leak already-counted readings into the next
    /// window; the error still surfaces to the caller.
    async fn update(&self) -> Result<(), DashboardError> {
        let batch = self.drain().await;
        let average = match Temperature::mean(batch.iter().map(|e| e.temperature)) {
            Some(average) => average,
            // Empty window: nothing to report, nothing to decide.
            None => return Ok(()),
        };

        tracing::info!("Window closed: average {} over {} readings", average, batch.len());
        self.dashboard.temperature_updated(average).await?;

        if average > self.target_temperature + HYSTERESIS {
            tracing::info!("Average above dead-band, requesting heater off");
            self.dashboard.off_heater_notified().await?;
        } else if average < self.target_temperature {
            tracing::info!("Average below target, requesting heater on");
            self.dashboard.on_heater_notified().await?;
        }
        Ok(())
    }
}
