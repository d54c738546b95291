// src/sensor.rs - Simulated temperature sensor source
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::{Temperature, TemperatureEntry};
use crate::ports::EventSource;

/// Development stand-in for a real probe: emits one reading per
/// `read_interval`, produced by a mean-reverting random walk around a base
/// temperature with step size bounded by `swing`.
pub struct SimulatedSensor {
    name: String,
    base: f64,
    swing: f64,
    read_interval: Duration,
    current: f64,
    rng: StdRng,
}

impl SimulatedSensor {
    pub fn new(name: impl Into<String>, base: f64, swing: f64, read_interval: Duration) -> Self {
        Self::with_rng(name, base, swing, read_interval, StdRng::from_os_rng())
    }

    /// Deterministic variant for tests.
    pub fn seeded(
        name: impl Into<String>,
        base: f64,
        swing: f64,
        read_interval: Duration,
        seed: u64,
    ) -> Self {
        Self::with_rng(name, base, swing, read_interval, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        name: impl Into<String>,
        base: f64,
        swing: f64,
        read_interval: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            name: name.into(),
            base,
            swing,
            read_interval,
            current: base,
            rng,
        }
    }

    fn next_reading(&mut self) -> f64 {
        let step = self.rng.random_range(-self.swing..=self.swing);
        // Pull a tenth of the way back toward base so the walk cannot
        // drift arbitrarily far from it.
        self.current += step + 0.1 * (self.base - self.current);
        self.current
    }
}

#[async_trait]
impl EventSource for SimulatedSensor {
    type Event = TemperatureEntry;

    async fn next_event(&mut self) -> Option<TemperatureEntry> {
        tokio::time::sleep(self.read_interval).await;
        let reading = self.next_reading();
        Some(TemperatureEntry::new(
            self.name.clone(),
            Temperature::new(reading),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_swing_holds_the_base_temperature() {
        let mut sensor = SimulatedSensor::seeded("flat", 18.0, 0.0, Duration::from_millis(1), 7);
        for _ in 0..100 {
            assert_eq!(sensor.next_reading(), 18.0);
        }
    }

    #[test]
    fn same_seed_gives_the_same_trace() {
        let mut a = SimulatedSensor::seeded("a", 20.0, 0.5, Duration::from_millis(1), 42);
        let mut b = SimulatedSensor::seeded("b", 20.0, 0.5, Duration::from_millis(1), 42);
        for _ in 0..20 {
            assert_eq!(a.next_reading(), b.next_reading());
        }
    }

    #[test]
    fn walk_stays_within_reversion_bounds() {
        let mut sensor = SimulatedSensor::seeded("walk", 20.0, 0.5, Duration::from_millis(1), 3);
        for _ in 0..1_000 {
            let reading = sensor.next_reading();
            // Steps are at most swing and reversion removes a tenth of the
            // excursion each step, so |reading - base| stays under
            // 10 * swing.
            assert!((reading - 20.0).abs() < 5.0, "reading drifted to {}", reading);
        }
    }

    #[tokio::test]
    async fn events_carry_the_sensor_name() {
        let mut sensor = SimulatedSensor::seeded("attic", 17.0, 0.2, Duration::from_millis(1), 9);
        let entry = sensor.next_event().await.unwrap();
        assert_eq!(entry.source, "attic");
    }
}
