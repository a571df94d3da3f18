//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::SimulationEvent;

/// Event consumer.
pub trait EventSink: Send {
    fn handle(&mut self, event: &SimulationEvent);

    /// Called once when the simulation ends.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Collects events in memory.
///
/// The storage is shared: keep a [`VecSink::share`] before boxing the sink
/// into a bus to read the events afterwards.
#[derive(Default, Clone)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another view onto the same storage.
    pub fn share(&self) -> VecSink {
        self.clone()
    }

    /// Copy of every event received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing` at a fixed level.
pub struct TracingSink {
    level: tracing::Level,
    handled: usize,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level, handled: 0 }
    }

    pub fn level(&self) -> tracing::Level {
        self.level
    }

    /// Events logged so far.
    pub fn handled(&self) -> usize {
        self.handled
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.handled += 1;
        match self.level {
            tracing::Level::ERROR => {
                tracing::error!(frame = event.frame, kind = event.name(), event = ?event.kind, "simulation_event")
            }
            tracing::Level::WARN => {
                tracing::warn!(frame = event.frame, kind = event.name(), event = ?event.kind, "simulation_event")
            }
            tracing::Level::INFO => {
                tracing::info!(frame = event.frame, kind = event.name(), event = ?event.kind, "simulation_event")
            }
            tracing::Level::DEBUG => {
                tracing::debug!(frame = event.frame, kind = event.name(), event = ?event.kind, "simulation_event")
            }
            tracing::Level::TRACE => {
                tracing::trace!(frame = event.frame, kind = event.name(), event = ?event.kind, "simulation_event")
            }
        }
    }

    fn finalize(&mut self) {
        tracing::debug!(handled = self.handled, "Tracing sink finished");
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
