//! Core traits for gate logic.

use crate::CircuitError;
use gatesim_types::Bit;

/// Boolean logic with a fixed number of inputs.
///
/// This is the single evaluation seam of the simulator. Truth tables
/// implement it directly and gate types delegate to their table, so every
/// gate in a netlist shares the same contract:
///
/// - **Pure**: no interior state, same inputs always give the same output
/// - **Fixed arity**: `inputs.len()` must equal [`input_count`](Self::input_count)
pub trait Evaluate {
    /// Number of inputs the logic consumes.
    fn input_count(&self) -> usize;

    /// Compute the output for an ordered input vector.
    ///
    /// # Errors
    ///
    /// [`CircuitError::Arity`] if `inputs` has the wrong length.
    fn evaluate(&self, inputs: &[Bit]) -> Result<Bit, CircuitError>;
}
