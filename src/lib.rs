//! hearth: a scheduled thermostat consumer.
//!
//! Temperature readings are pushed in asynchronously via [`Consumer::react`]
//! and buffered; a periodic driver closes each sampling window with
//! [`ScheduledConsumer::update`], which drains the buffer, reports the
//! window average to a [`DashboardService`], and decides whether the heater
//! should be switched on or off.

pub mod config;
pub mod consumer;
pub mod dashboard;
pub mod entities;
pub mod hub;
pub mod ports;
pub mod sensor;
pub mod thermostat;

pub use consumer::{Consumer, ScheduledConsumer};
pub use entities::{Temperature, TemperatureEntry};
pub use ports::{DashboardService, EventSource};
pub use thermostat::Thermostat;
