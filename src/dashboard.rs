// src/dashboard.rs - DashboardService implementations
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::entities::Temperature;
use crate::ports::{DashboardError, DashboardService};

/// One dashboard notification, as recorded on the JSON feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DashboardEvent {
    TemperatureUpdated {
        average: Temperature,
        at: DateTime<Utc>,
    },
    HeaterOn {
        at: DateTime<Utc>,
    },
    HeaterOff {
        at: DateTime<Utc>,
    },
}

/// Dashboard that renders every notification as a structured log line.
#[derive(Debug, Default)]
pub struct ConsoleDashboard;

impl ConsoleDashboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DashboardService for ConsoleDashboard {
    async fn temperature_updated(&self, average: Temperature) -> Result<(), DashboardError> {
        tracing::info!("Dashboard: average temperature {}", average);
        Ok(())
    }

    async fn on_heater_notified(&self) -> Result<(), DashboardError> {
        tracing::info!("Dashboard: heater ON");
        Ok(())
    }

    async fn off_heater_notified(&self) -> Result<(), DashboardError> {
        tracing::info!("Dashboard: heater OFF");
        Ok(())
    }
}

/// Dashboard that appends one JSON line per notification to a feed file,
/// for an external display to tail.
pub struct JsonFeedDashboard {
    feed: Mutex<File>,
}

impl JsonFeedDashboard {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let feed = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .await?;
        Ok(Self {
            feed: Mutex::new(feed),
        })
    }

    // The file stays locked for the whole line write so lines from
    // concurrent notifications never interleave.
    async fn append(&self, event: &DashboardEvent) -> Result<(), DashboardError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let mut feed = self.feed.lock().await;
        feed.write_all(line.as_bytes()).await?;
        feed.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl DashboardService for JsonFeedDashboard {
    async fn temperature_updated(&self, average: Temperature) -> Result<(), DashboardError> {
        self.append(&DashboardEvent::TemperatureUpdated {
            average,
            at: Utc::now(),
        })
        .await
    }

    async fn on_heater_notified(&self) -> Result<(), DashboardError> {
        self.append(&DashboardEvent::HeaterOn { at: Utc::now() }).await
    }

    async fn off_heater_notified(&self) -> Result<(), DashboardError> {
        self.append(&DashboardEvent::HeaterOff { at: Utc::now() }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn feed_gets_one_parseable_line_per_notification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.jsonl");

        let dashboard = JsonFeedDashboard::open(&path).await.unwrap();
        dashboard
            .temperature_updated(Temperature::new(19.5))
            .await
            .unwrap();
        dashboard.on_heater_notified().await.unwrap();
        dashboard.off_heater_notified().await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let events: Vec<DashboardEvent> = raw
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            DashboardEvent::TemperatureUpdated { average, .. } if average == Temperature::new(19.5)
        ));
        assert!(matches!(events[1], DashboardEvent::HeaterOn { .. }));
        assert!(matches!(events[2], DashboardEvent::HeaterOff { .. }));
    }

    #[tokio::test]
    async fn reopening_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.jsonl");

        let first = JsonFeedDashboard::open(&path).await.unwrap();
        first.on_heater_notified().await.unwrap();
        drop(first);

        let second = JsonFeedDashboard::open(&path).await.unwrap();
        second.off_heater_notified().await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 2);
    }
}
