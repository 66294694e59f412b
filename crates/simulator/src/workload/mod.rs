//! Workload generation for simulations.
//!
//! Generators produce input flips for externally driven gates, for stress
//! and determinism testing.

mod flips;

pub use flips::{FlipMode, RandomFlipWorkload};

use gatesim_simulation::{Bit, SimTime};

/// One generated input change.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stimulus {
    /// When the change happens.
    pub time: SimTime,
    /// Name of the driven gate.
    pub gate: String,
    /// New output value.
    pub value: Bit,
}

/// Trait for generating input workloads.
pub trait WorkloadGenerator {
    /// Generate a batch of stimuli over `inputs`.
    fn generate_batch(&mut self, inputs: &[String], rng: &mut impl rand::Rng) -> Vec<Stimulus>;

    /// Generate a single stimulus. Returns `None` when there are no inputs
    /// or the generator has run out of room.
    fn generate_one(&mut self, inputs: &[String], rng: &mut impl rand::Rng) -> Option<Stimulus>;
}
