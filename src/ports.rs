//! Interfaces to the consumer's externally-owned collaborators: the
//! dashboard that renders summaries and the event source that pushes
//! temperature readings.

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::Temperature;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dashboard I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dashboard encoding error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("dashboard unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notifications to the display/control service.
///
/// Calls may suspend (the dashboard may do I/O) and may fail; the caller
/// decides what a failed notification means for the rest of its cycle.
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Average temperature over the sampling window that just closed.
    /// Sent once per non-empty window.
    async fn temperature_updated(&self, average: Temperature) -> Result<(), DashboardError>;

    /// The heater should turn on: the window average fell below target.
    async fn on_heater_notified(&self) -> Result<(), DashboardError>;

    /// The heater should turn off: the window average exceeded target
    /// plus the dead-band.
    async fn off_heater_notified(&self) -> Result<(), DashboardError>;
}

/// A push-style producer of events, consumed one at a time.
///
/// `next_event` is polled inside a `select!` and may be dropped before
/// completion on shutdown, so implementations must not take an event out
/// of their underlying source until they are ready to return it.
#[async_trait]
pub trait EventSource: Send {
    type Event: Send;

    /// The next pushed event, or `None` once the source is exhausted.
    async fn next_event(&mut self) -> Option<Self::Event>;
}
