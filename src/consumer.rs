// src/consumer.rs - Scheduled consumer pattern and its driver loops
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::ports::EventSource;

/// An actor that ingests discrete events and buffers them internally.
#[async_trait]
pub trait Consumer: Send + Sync {
    type Event: Send + 'static;

    /// Ingest one event. May be called concurrently with other `react`
    /// calls and with `update`; implementations serialize access to their
    /// own state.
    async fn react(&self, event: Self::Event);
}

/// A consumer that additionally wants a periodic `update` at a fixed
/// cadence, in which it summarizes and drains what `react` accumulated.
#[async_trait]
pub trait ScheduledConsumer: Consumer {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Desired duration between successive `update` invocations.
    fn sampling_window(&self) -> Duration;

    /// Summarize and drain the accumulated state.
    async fn update(&self) -> Result<(), Self::Error>;
}

/// Forward every event from `source` to `consumer.react` until the source
/// is exhausted or shutdown is broadcast.
pub async fn pump_events<C, S>(
    consumer: Arc<C>,
    mut source: S,
    mut shutdown: broadcast::Receiver<()>,
) where
    C: Consumer,
    S: EventSource<Event = C::Event>,
{
    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::debug!("Event pump shutting down");
                break;
            }
            event = source.next_event() => {
                match event {
                    Some(event) => consumer.react(event).await,
                    None => {
                        tracing::debug!("Event source exhausted");
                        break;
                    }
                }
            }
        }
    }
}

/// Drive `consumer.update` once per sampling window until shutdown is
/// broadcast. The first tick fires one full window after start; missed
/// ticks are skipped rather than bursted, so at most one update runs per
/// window. A failed update is logged and the cadence continues.
pub async fn run_scheduled<C>(consumer: Arc<C>, mut shutdown: broadcast::Receiver<()>)
where
    C: ScheduledConsumer,
{
    let window = consumer.sampling_window();
    let mut interval = interval_at(Instant::now() + window, window);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Update loop shutting down");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = consumer.update().await {
                    tracing::error!("Scheduled update failed: {}", e);
                }
            }
        }
    }
}
