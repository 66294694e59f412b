//! Error types for simulation.

use crate::SimulationPhase;
use gatesim_core::CircuitError;
use gatesim_types::SimTime;
use thiserror::Error;

/// Errors raised while scheduling or running a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A transition was requested with a value other than 0 or 1.
    #[error("Invalid output value: {0} (expected 0 or 1)")]
    InvalidOutput(u8),

    /// Circuit lookup, evaluation or output update failed.
    #[error(transparent)]
    Circuit(#[from] CircuitError),

    /// Operation called in the wrong lifecycle phase.
    #[error("Simulation is {actual}, operation requires {expected}")]
    InvalidPhase {
        /// Phase the operation needs.
        expected: SimulationPhase,
        /// Phase the simulation is in.
        actual: SimulationPhase,
    },

    /// Processing the next instant would pop more transitions than the
    /// configured bound allows.
    #[error("Event limit of {limit} exceeded at t={time}")]
    EventLimitExceeded {
        /// Configured maximum.
        limit: u64,
        /// The instant that was not processed.
        time: SimTime,
    },

    /// The next instant lies past the configured time bound.
    #[error("Time limit {limit} exceeded: next instant is t={time}")]
    TimeLimitExceeded {
        /// Configured maximum.
        limit: SimTime,
        /// The instant that was not processed.
        time: SimTime,
    },
}
