//! Error types for loading and running netlists.

use gatesim_core::CircuitError;
use gatesim_simulation::SimulationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a netlist file or running it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Netlist file could not be read.
    #[error("Failed to read netlist {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Netlist file is not valid TOML or has the wrong shape.
    #[error("Failed to parse netlist: {0}")]
    Parse(#[from] toml::de::Error),

    /// Netlist describes an invalid circuit.
    #[error("Invalid circuit: {0}")]
    Circuit(#[from] CircuitError),

    /// Scheduling or running the simulation failed.
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),
}
