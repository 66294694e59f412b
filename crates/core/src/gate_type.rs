//! Gate types: shared logic plus a fixed propagation delay.

use crate::{CircuitError, Evaluate, TruthTable};
use gatesim_types::{Bit, SimTime};
use std::sync::Arc;

/// A type of gate, e.g. 2-input NAND with 60 ticks of delay.
///
/// The delay is input-independent: every output transition lands exactly
/// `delay` ticks after the input change that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateType {
    name: String,
    truth_table: Arc<TruthTable>,
    input_count: usize,
    delay: u64,
}

impl GateType {
    /// Create a gate type.
    ///
    /// # Errors
    ///
    /// [`CircuitError::InvalidDelay`] if `delay` is negative.
    pub fn new(
        name: impl Into<String>,
        truth_table: Arc<TruthTable>,
        delay: i64,
    ) -> Result<Self, CircuitError> {
        let name = name.into();
        let delay = u64::try_from(delay).map_err(|_| CircuitError::InvalidDelay {
            name: name.clone(),
            delay,
        })?;
        Ok(Self {
            name,
            input_count: truth_table.input_count(),
            truth_table,
            delay,
        })
    }

    /// Gate type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared truth table.
    pub fn truth_table(&self) -> &Arc<TruthTable> {
        &self.truth_table
    }

    /// Propagation delay in ticks.
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// The output value for an input vector.
    pub fn output(&self, inputs: &[Bit]) -> Result<Bit, CircuitError> {
        self.truth_table.output(inputs)
    }

    /// When the output reflects an input change made at `input_time`.
    pub fn output_time(&self, input_time: SimTime) -> SimTime {
        input_time.after(self.delay)
    }
}

impl Evaluate for GateType {
    fn input_count(&self) -> usize {
        self.input_count
    }

    fn evaluate(&self, inputs: &[Bit]) -> Result<Bit, CircuitError> {
        self.output(inputs)
    }
}
