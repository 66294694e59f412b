//! Simulation configuration.

use gatesim_types::SimTime;

/// Bounds on a simulation run.
///
/// An acyclic netlist always drains its queue. Netlists with feedback
/// loops may oscillate forever; these bounds turn that into an error instead
/// of a hang. Both are unbounded by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Maximum number of transitions popped from the queue, stale ones
    /// included.
    pub max_events: Option<u64>,

    /// Latest instant that may be processed.
    pub max_time: Option<SimTime>,
}

impl SimulationConfig {
    /// Create an unbounded configuration.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Set the event bound.
    pub fn with_max_events(mut self, max_events: u64) -> Self {
        self.max_events = Some(max_events);
        self
    }

    /// Set the time bound.
    pub fn with_max_time(mut self, max_time: SimTime) -> Self {
        self.max_time = Some(max_time);
        self
    }
}
