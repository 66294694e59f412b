//! Gatesim Simulator
//!
//! Everything around the event loop needed to run a circuit from a file.
//!
//! # Architecture
//!
//! The simulator builds on `gatesim-simulation` to provide:
//!
//! - **Netlist files**: TOML descriptions of tables, gate types, gates,
//!   probes and input flips
//! - **Workload generation**: Seeded random input flips for stress and
//!   determinism testing
//! - **Reports**: The `<time> <gate> <value>` trace format and a topology
//!   dump
//! - **Configuration**: Run bounds and probing mode
//!
//! # Example
//!
//! ```
//! use gatesim_simulator::{NetlistConfig, Simulator, SimulatorConfig};
//!
//! let netlist = NetlistConfig::from_toml_str(r#"
//!     probes = ["G"]
//!
//!     [[table]]
//!     name = "and2"
//!     outputs = [0, 0, 0, 1]
//!
//!     [[table]]
//!     name = "buf"
//!     outputs = [0, 1]
//!
//!     [[gate_type]]
//!     name = "AND2"
//!     table = "and2"
//!     delay = 5
//!
//!     [[gate_type]]
//!     name = "IN"
//!     table = "buf"
//!     delay = 0
//!
//!     [[gate]]
//!     name = "A"
//!     type = "IN"
//!
//!     [[gate]]
//!     name = "B"
//!     type = "IN"
//!
//!     [[gate]]
//!     name = "G"
//!     type = "AND2"
//!     inputs = ["A", "B"]
//!
//!     [[flip]]
//!     gate = "A"
//!     value = 1
//!     time = 0
//!
//!     [[flip]]
//!     gate = "B"
//!     value = 1
//!     time = 3
//! "#)?;
//!
//! let report = Simulator::new(netlist, SimulatorConfig::default()).run()?;
//! assert_eq!(report.lines(), vec!["8 G 1"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod netlist;
pub mod report;
pub mod runner;
pub mod workload;

pub use config::{SimulatorConfig, WorkloadConfig};
pub use error::ConfigError;
pub use netlist::{FlipConfig, GateConfig, GateTypeConfig, LimitsConfig, NetlistConfig, TableConfig};
pub use report::{write_probe_report, write_topology, SimulationReport};
pub use runner::Simulator;
pub use workload::{FlipMode, RandomFlipWorkload, Stimulus, WorkloadGenerator};
