//! Netlist files.
//!
//! A netlist is a TOML document. Top-level keys (`probes`) must come before
//! the first array-of-tables header, as TOML requires.
//!
//! ```toml
//! probes = ["G"]
//!
//! [limits]
//! max_events = 100000
//!
//! [[table]]
//! name = "and2"
//! outputs = [0, 0, 0, 1]
//!
//! [[gate_type]]
//! name = "AND2"
//! table = "and2"
//! delay = 5
//!
//! [[gate]]
//! name = "G"
//! type = "AND2"
//! inputs = ["A", "B"]
//!
//! [[flip]]
//! gate = "A"
//! value = 1
//! time = 0
//! ```
//!
//! Sections are applied in a fixed order: tables, gate types, gates (in file
//! order, so a gate may only name gates listed above it), probes, flips.

use crate::ConfigError;
use gatesim_core::{Circuit, CircuitError};
use gatesim_simulation::{SimTime, Simulation, SimulationConfig};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A complete netlist: circuit topology plus input stimuli.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetlistConfig {
    /// Gates whose output changes are reported.
    #[serde(default)]
    pub probes: Vec<String>,

    /// Optional run bounds.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Truth tables.
    #[serde(default, rename = "table")]
    pub tables: Vec<TableConfig>,

    /// Gate types.
    #[serde(default, rename = "gate_type")]
    pub gate_types: Vec<GateTypeConfig>,

    /// Gates, each wired to gates listed before it.
    #[serde(default, rename = "gate")]
    pub gates: Vec<GateConfig>,

    /// External input changes.
    #[serde(default, rename = "flip")]
    pub flips: Vec<FlipConfig>,
}

/// A `[[table]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Unique table name.
    pub name: String,
    /// Flat output list in counter order.
    pub outputs: Vec<i64>,
}

impl TableConfig {
    /// Narrow the outputs to bytes. Range errors surface as
    /// [`CircuitError::InvalidTable`], like any other non-binary entry.
    fn output_bits(&self) -> Result<Vec<u8>, CircuitError> {
        self.outputs
            .iter()
            .map(|&value| {
                u8::try_from(value).map_err(|_| CircuitError::InvalidTable {
                    name: self.name.clone(),
                    reason: format!("Invalid bit value: {value} (expected 0 or 1)"),
                })
            })
            .collect()
    }
}

/// A `[[gate_type]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateTypeConfig {
    /// Unique gate type name.
    pub name: String,
    /// Name of the truth table.
    pub table: String,
    /// Propagation delay in ticks.
    pub delay: i64,
}

/// A `[[gate]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Unique gate name.
    pub name: String,
    /// Name of the gate type.
    #[serde(rename = "type")]
    pub gate_type: String,
    /// Gates driving each input terminal, in terminal order. Empty for
    /// externally driven gates.
    #[serde(default)]
    pub inputs: Vec<String>,
}

/// A `[[flip]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlipConfig {
    /// Gate whose output is driven.
    pub gate: String,
    /// New output value, 0 or 1.
    pub value: u8,
    /// When the change happens.
    pub time: u64,
}

/// The `[limits]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum transitions popped.
    pub max_events: Option<u64>,
    /// Latest instant processed.
    pub max_time: Option<u64>,
}

impl LimitsConfig {
    /// Convert to simulation bounds.
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            max_events: self.max_events,
            max_time: self.max_time.map(SimTime),
        }
    }
}

impl NetlistConfig {
    /// Parse a netlist from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a netlist file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build the circuit described by the netlist.
    pub fn build_circuit(&self) -> Result<Circuit, ConfigError> {
        let mut circuit = Circuit::new();
        for table in &self.tables {
            circuit.add_truth_table(&table.name, &table.output_bits()?)?;
        }
        for gate_type in &self.gate_types {
            circuit.add_gate_type(&gate_type.name, &gate_type.table, gate_type.delay)?;
        }
        for gate in &self.gates {
            circuit.add_gate(&gate.name, &gate.gate_type, gate.inputs.as_slice())?;
        }
        for probe in &self.probes {
            circuit.add_probe(probe)?;
        }
        debug!(
            tables = self.tables.len(),
            gate_types = self.gate_types.len(),
            gates = self.gates.len(),
            probes = self.probes.len(),
            "Built circuit from netlist"
        );
        Ok(circuit)
    }

    /// Build the circuit and schedule every flip on a new simulation.
    pub fn build_simulation(&self, config: SimulationConfig) -> Result<Simulation, ConfigError> {
        let mut simulation = Simulation::with_config(self.build_circuit()?, config);
        for flip in &self.flips {
            simulation.schedule_input(&flip.gate, flip.value, SimTime(flip.time))?;
        }
        Ok(simulation)
    }
}
