//! Truth tables.

use crate::{CircuitError, Evaluate};
use gatesim_types::Bit;

/// Truth table representation of the logic inside a gate.
///
/// Stored as a flat list of `2^n` outputs in counter order: the entry for an
/// input vector is found by reading the vector as a binary number, first
/// input most significant.
///
/// ```text
///   inputs   index   and2 = [0, 0, 0, 1]
///   (0, 0)     0        0
///   (0, 1)     1        0
///   (1, 0)     2        0
///   (1, 1)     3        1
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    name: String,
    outputs: Vec<Bit>,
    input_count: usize,
}

impl TruthTable {
    /// Build a truth table from its flat output list.
    ///
    /// # Errors
    ///
    /// [`CircuitError::InvalidTable`] if the list is shorter than 2, its
    /// length is not a power of two, or any entry is not 0 or 1.
    pub fn new(name: impl Into<String>, output_list: &[u8]) -> Result<Self, CircuitError> {
        let name = name.into();
        let len = output_list.len();

        // A table of n inputs halves cleanly n times down to a pair of leaves.
        if len < 2 || !len.is_power_of_two() {
            return Err(CircuitError::InvalidTable {
                name,
                reason: format!("output list length {len} is not a power of two >= 2"),
            });
        }

        let outputs = output_list
            .iter()
            .map(|&value| Bit::try_from(value))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CircuitError::InvalidTable {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            name,
            input_count: len.trailing_zeros() as usize,
            outputs,
        })
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The flat output list, in counter order.
    pub fn outputs(&self) -> &[Bit] {
        &self.outputs
    }

    /// Look up the output for an input vector.
    ///
    /// # Errors
    ///
    /// [`CircuitError::Arity`] if `inputs.len()` differs from the table's
    /// input count.
    pub fn output(&self, inputs: &[Bit]) -> Result<Bit, CircuitError> {
        if inputs.len() != self.input_count {
            return Err(CircuitError::Arity {
                name: self.name.clone(),
                expected: self.input_count,
                actual: inputs.len(),
            });
        }
        let index = inputs
            .iter()
            .fold(0usize, |index, bit| (index << 1) | bit.as_index());
        Ok(self.outputs[index])
    }
}

impl Evaluate for TruthTable {
    fn input_count(&self) -> usize {
        self.input_count
    }

    fn evaluate(&self, inputs: &[Bit]) -> Result<Bit, CircuitError> {
        self.output(inputs)
    }
}
