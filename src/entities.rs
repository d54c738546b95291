// src/entities.rs - Core value types for temperature sampling
use std::fmt;
use std::ops::Add;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A temperature in degrees Celsius.
///
/// Supports adding a plain `f64` offset (for dead-band arithmetic) and
/// ordering comparisons against other temperatures.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Temperature(f64);

impl Temperature {
    pub fn new(degrees: f64) -> Self {
        Self(degrees)
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }

    /// Arithmetic mean of a sequence of temperatures, or `None` when the
    /// sequence is empty.
    pub fn mean<I>(temperatures: I) -> Option<Temperature>
    where
        I: IntoIterator<Item = Temperature>,
    {
        let mut sum = 0.0;
        let mut count = 0usize;
        for temperature in temperatures {
            sum += temperature.0;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(Temperature(sum / count as f64))
        }
    }
}

impl From<f64> for Temperature {
    fn from(degrees: f64) -> Self {
        Temperature(degrees)
    }
}

impl Add<f64> for Temperature {
    type Output = Temperature;

    fn add(self, offset: f64) -> Temperature {
        Temperature(self.0 + offset)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

/// One timestamped temperature sample from a named sensor.
///
/// Entries are plain immutable data: they are created once by an event
/// source and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureEntry {
    pub source: String,
    pub temperature: Temperature,
    pub at: DateTime<Utc>,
}

impl TemperatureEntry {
    /// Create an entry stamped with the current time.
    pub fn new(source: impl Into<String>, temperature: Temperature) -> Self {
        Self {
            source: source.into(),
            temperature,
            at: Utc::now(),
        }
    }
}
