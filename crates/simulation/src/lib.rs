//! Deterministic discrete-event simulation of gate-level circuits.
//!
//! Given the same circuit and the same scheduled input stimuli, a simulation
//! produces an identical, time-ordered trace of probed output changes every
//! run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Simulation                         │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  EventQueue (BinaryHeap<Reverse<Transition>>)      │ │
//! │  │  Ordered by: time, sequence                        │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │ all transitions at the      │
//! │                           ▼ earliest time               │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  Apply phase: drop stale, flip outputs, record     │ │
//! │  │  probes                                            │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  Propagate phase: re-evaluate dependents →         │ │
//! │  │  schedule transitions at time + delay              │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Applying every same-instant transition before any dependent is
//! re-evaluated means a gate whose inputs change together sees them change
//! together, and never emits a spurious intermediate value.

mod config;
mod error;
mod event_queue;
mod probe;
mod runner;
mod transition;

pub use config::SimulationConfig;
pub use error::SimulationError;
pub use event_queue::EventQueue;
pub use probe::ProbeRecord;
pub use runner::{Simulation, SimulationPhase, SimulationStats};
pub use transition::{Transition, TransitionKey};

pub use gatesim_types::{Bit, GateId, SimTime};
