//! Scheduled changes of a gate's output.

use crate::SimulationError;
use gatesim_core::{Circuit, CircuitError};
use gatesim_types::{Bit, GateId, SimTime};
use std::cmp::Ordering;

/// Key for ordering transitions in the queue.
///
/// Transitions are ordered by:
/// 1. Time (earlier first)
/// 2. Sequence number (created earlier first)
///
/// Sequence numbers are unique per queue, so the order is total and ties at
/// the same instant resolve in discovery order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TransitionKey {
    /// When the transition takes effect.
    pub time: SimTime,
    /// Sequence number for deterministic FIFO ordering.
    pub sequence: u64,
}

impl Ord for TransitionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Order by time first
        match self.time.cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Finally by sequence (FIFO)
        self.sequence.cmp(&other.sequence)
    }
}

impl PartialOrd for TransitionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A potential change of a gate's output to `new_output` at `time`.
///
/// Whether it turns into a real change is decided when it is popped: by then
/// the gate may already hold `new_output`, in which case the transition is
/// stale and dropped.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    /// Gate whose output may change.
    pub gate: GateId,
    /// Value the output takes.
    pub new_output: Bit,
    /// When the output takes the new value.
    pub time: SimTime,
    /// Creation order, unique within one queue.
    pub sequence: u64,
}

impl Transition {
    /// Create a transition from a raw output value.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidOutput`] if `new_output` is not 0 or 1.
    pub fn new(
        gate: GateId,
        new_output: u8,
        time: SimTime,
        sequence: u64,
    ) -> Result<Self, SimulationError> {
        let new_output =
            Bit::try_from(new_output).map_err(|e| SimulationError::InvalidOutput(e.0))?;
        Ok(Self::with_bit(gate, new_output, time, sequence))
    }

    /// Create a transition from an already valid bit.
    pub fn with_bit(gate: GateId, new_output: Bit, time: SimTime, sequence: u64) -> Self {
        Self {
            gate,
            new_output,
            time,
            sequence,
        }
    }

    /// The queue ordering key.
    pub fn key(&self) -> TransitionKey {
        TransitionKey {
            time: self.time,
            sequence: self.sequence,
        }
    }

    /// True if applying the transition would actually change the gate's
    /// output.
    pub fn is_valid(&self, circuit: &Circuit) -> Result<bool, CircuitError> {
        Ok(circuit.gate(self.gate)?.output() != self.new_output)
    }

    /// Make the transition effective by changing the gate's output.
    ///
    /// # Errors
    ///
    /// [`CircuitError::NoOpTransition`] if the gate already holds the value.
    pub fn apply(&self, circuit: &mut Circuit) -> Result<(), CircuitError> {
        circuit.set_output(self.gate, self.new_output)
    }
}

// Equality follows the key so that it agrees with `Ord`.
impl PartialEq for Transition {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Transition {}

impl Ord for Transition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Transition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
