//! Error types for circuit construction and wiring.

use gatesim_types::Bit;
use std::fmt;
use thiserror::Error;

/// Which name registry of a circuit an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    /// Truth table names.
    TruthTable,
    /// Gate type names.
    GateType,
    /// Gate names.
    Gate,
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registry::TruthTable => write!(f, "truth table"),
            Registry::GateType => write!(f, "gate type"),
            Registry::Gate => write!(f, "gate"),
        }
    }
}

/// Errors raised while building or mutating a circuit.
///
/// None of these are transient: each one means the netlist is malformed or
/// the API was misused, and the operation that raised it had no effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    /// Truth table output list has a bad length or a non-binary entry.
    #[error("Invalid truth table '{name}': {reason}")]
    InvalidTable {
        /// Table name.
        name: String,
        /// What was wrong with the output list.
        reason: String,
    },

    /// Input vector or terminal index does not match the declared fan-in.
    #[error("Arity mismatch for '{name}': expected {expected}, got {actual}")]
    Arity {
        /// Table, type or gate name.
        name: String,
        /// Declared input count.
        expected: usize,
        /// Supplied input count or terminal index.
        actual: usize,
    },

    /// Gate type declared with a negative delay.
    #[error("Invalid delay for gate type '{name}': {delay}")]
    InvalidDelay {
        /// Gate type name.
        name: String,
        /// Rejected delay.
        delay: i64,
    },

    /// A name was registered twice.
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName {
        /// Registry that already holds the name.
        kind: Registry,
        /// The colliding name.
        name: String,
    },

    /// Reference to an unregistered truth table.
    #[error("Unknown truth table: {0}")]
    UnknownTable(String),

    /// Reference to an unregistered gate type.
    #[error("Unknown gate type: {0}")]
    UnknownType(String),

    /// Reference to an unregistered gate.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Input terminal is already bound to another gate.
    #[error("Input terminal {terminal} of gate '{gate}' already connected")]
    AlreadyConnected {
        /// Gate owning the terminal.
        gate: String,
        /// Terminal index.
        terminal: usize,
    },

    /// Gate was probed twice.
    #[error("Gate already probed: {0}")]
    AlreadyProbed(String),

    /// Output asked to transition to the value it already holds.
    #[error("Gate '{gate}' output should not transition to the same value ({value})")]
    NoOpTransition {
        /// Gate name.
        gate: String,
        /// The unchanged value.
        value: Bit,
    },

    /// Gate has some inputs bound and at least one left unbound.
    #[error("Input terminal {terminal} of gate '{gate}' is not connected")]
    UnconnectedInput {
        /// Gate name.
        gate: String,
        /// First unbound terminal.
        terminal: usize,
    },

    /// The gate arena has no ids left.
    #[error("Circuit is full: {gates} gates")]
    TooManyGates {
        /// Gates already in the circuit.
        gates: usize,
    },
}
