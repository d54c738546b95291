// src/config.rs - Daemon configuration
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::Temperature;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration for the hub daemon.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HubConfig {
    #[serde(default)]
    pub thermostat: ThermostatConfig,

    /// Simulated sensors, keyed by sensor name.
    #[serde(default)]
    pub sensors: HashMap<String, SensorConfig>,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThermostatConfig {
    /// Temperature the heater regulates toward, in °C.
    #[serde(default = "default_target_temperature")]
    pub target_temperature: f64,

    /// Duration of one sampling window, in milliseconds.
    #[serde(default = "default_sampling_window_ms")]
    pub sampling_window_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorConfig {
    /// Temperature the simulated reading reverts toward, in °C.
    #[serde(default = "default_base_temperature")]
    pub base_temperature: f64,

    #[serde(default = "default_read_interval_ms")]
    pub read_interval_ms: u64,

    /// Largest single random-walk step, in °C.
    #[serde(default = "default_swing")]
    pub swing: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_mode")]
    pub mode: DashboardMode,

    /// Target file for `mode = "feed"`.
    #[serde(default = "default_feed_path")]
    pub feed_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardMode {
    Console,
    Feed,
}

// Default value functions
fn default_target_temperature() -> f64 {
    21.0
}
fn default_sampling_window_ms() -> u64 {
    5000
}
fn default_base_temperature() -> f64 {
    19.0
}
fn default_read_interval_ms() -> u64 {
    1000
}
fn default_swing() -> f64 {
    0.5
}
fn default_dashboard_mode() -> DashboardMode {
    DashboardMode::Console
}
fn default_feed_path() -> String {
    "dashboard-feed.jsonl".to_string()
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            target_temperature: default_target_temperature(),
            sampling_window_ms: default_sampling_window_ms(),
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            base_temperature: default_base_temperature(),
            read_interval_ms: default_read_interval_ms(),
            swing: default_swing(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            mode: default_dashboard_mode(),
            feed_path: default_feed_path(),
        }
    }
}

impl HubConfig {
    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: HubConfig = toml::from_str(&contents)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.thermostat.target_temperature.is_finite() {
            return Err(ConfigError::Invalid(
                "thermostat.target_temperature must be a finite number".to_string(),
            ));
        }
        if self.thermostat.sampling_window_ms == 0 {
            return Err(ConfigError::Invalid(
                "thermostat.sampling_window_ms must be positive".to_string(),
            ));
        }
        for (name, sensor) in &self.sensors {
            if !sensor.base_temperature.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "sensor '{}': base_temperature must be a finite number",
                    name
                )));
            }
            if sensor.read_interval_ms == 0 {
                return Err(ConfigError::Invalid(format!(
                    "sensor '{}': read_interval_ms must be positive",
                    name
                )));
            }
            if !sensor.swing.is_finite() || sensor.swing < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "sensor '{}': swing must be a non-negative number",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn target_temperature(&self) -> Temperature {
        Temperature::new(self.thermostat.target_temperature)
    }

    pub fn sampling_window(&self) -> Duration {
        Duration::from_millis(self.thermostat.sampling_window_ms)
    }
}

impl SensorConfig {
    pub fn read_interval(&self) -> Duration {
        Duration::from_millis(self.read_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = HubConfig::default();
        assert_eq!(config.thermostat.target_temperature, 21.0);
        assert_eq!(config.thermostat.sampling_window_ms, 5000);
        assert!(config.sensors.is_empty());
        assert_eq!(config.dashboard.mode, DashboardMode::Console);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_a_full_document() {
        let doc = r#"
[thermostat]
target_temperature = 20.5
sampling_window_ms = 2000

[sensors.living_room]
base_temperature = 19.5
read_interval_ms = 800
swing = 0.4

[sensors.bedroom]
base_temperature = 18.0

[dashboard]
mode = "feed"
feed_path = "/tmp/feed.jsonl"
        "#;

        let config: HubConfig = toml::from_str(doc).unwrap();
        assert_eq!(config.thermostat.target_temperature, 20.5);
        assert_eq!(config.sampling_window(), Duration::from_millis(2000));
        assert_eq!(config.sensors.len(), 2);

        let living_room = config.sensors.get("living_room").unwrap();
        assert_eq!(living_room.read_interval(), Duration::from_millis(800));
        assert_eq!(living_room.swing, 0.4);

        // Omitted sensor fields fall back to their defaults.
        let bedroom = config.sensors.get("bedroom").unwrap();
        assert_eq!(bedroom.read_interval_ms, 1000);

        assert_eq!(config.dashboard.mode, DashboardMode::Feed);
        assert_eq!(config.dashboard.feed_path, "/tmp/feed.jsonl");
    }

    #[test]
    fn rejects_zero_sampling_window() {
        let mut config = HubConfig::default();
        config.thermostat.sampling_window_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_non_finite_target() {
        let mut config = HubConfig::default();
        config.thermostat.target_temperature = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_sensor_swing() {
        let mut config = HubConfig::default();
        config.sensors.insert(
            "bad".to_string(),
            SensorConfig {
                swing: -0.1,
                ..SensorConfig::default()
            },
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hub.toml");
        std::fs::write(&path, "[thermostat]\ntarget_temperature = 19.0\n").unwrap();

        let config = HubConfig::load(&path).unwrap();
        assert_eq!(config.thermostat.target_temperature, 19.0);
        // Everything else takes defaults.
        assert_eq!(config.thermostat.sampling_window_ms, 5000);
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = HubConfig::load(Path::new("/nonexistent/hub.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
