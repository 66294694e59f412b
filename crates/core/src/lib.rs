//! Circuit topology for the gate-level simulator.
//!
//! A [`Circuit`] owns three registries, each keyed by a caller-chosen unique
//! name:
//!
//! ```text
//! TruthTable ──shared by──▶ GateType ──shared by──▶ Gate
//!   (logic)                 (logic + delay)          (instance, output, wiring)
//! ```
//!
//! Gates live in an arena addressed by [`GateId`]. Fan-in (`inputs`) is set by
//! [`Circuit::connect_input`], which is also the only place fan-out
//! (`dependents`) is ever written, so the two always mirror each other.
//!
//! All validation happens here, at construction and wiring time. The event
//! loop in `gatesim-simulation` only reads topology and flips outputs.

mod circuit;
mod error;
mod gate;
mod gate_type;
mod traits;
mod truth_table;

pub use circuit::{Circuit, GateDescription};
pub use error::{CircuitError, Registry};
pub use gate::Gate;
pub use gate_type::GateType;
pub use traits::Evaluate;
pub use truth_table::TruthTable;

pub use gatesim_types::{Bit, GateId, SimTime};
