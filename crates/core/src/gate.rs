//! Gate instances.

use crate::{CircuitError, Evaluate, GateType};
use gatesim_types::{Bit, GateId, SimTime};
use std::sync::Arc;

/// A gate in a circuit.
///
/// Gates are created unconnected with output 0 by
/// [`Circuit::add_gate`](crate::Circuit::add_gate). Wiring and output changes
/// go through the owning [`Circuit`](crate::Circuit), which keeps fan-in and
/// fan-out consistent across the arena.
#[derive(Debug, Clone)]
pub struct Gate {
    name: String,
    gate_type: Arc<GateType>,
    /// One slot per input terminal; `None` while unbound.
    inputs: Vec<Option<GateId>>,
    /// Gates with an input terminal bound to this gate's output.
    dependents: Vec<GateId>,
    probed: bool,
    output: Bit,
}

impl Gate {
    pub(crate) fn new(name: String, gate_type: Arc<GateType>) -> Self {
        Self {
            inputs: vec![None; gate_type.input_count()],
            name,
            gate_type,
            dependents: Vec::new(),
            probed: false,
            output: Bit::Zero,
        }
    }

    /// Gate name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The gate's type.
    pub fn gate_type(&self) -> &Arc<GateType> {
        &self.gate_type
    }

    /// Input terminal bindings, in terminal order.
    pub fn inputs(&self) -> &[Option<GateId>] {
        &self.inputs
    }

    /// Gates fed by this gate's output, in wiring order.
    pub fn dependents(&self) -> &[GateId] {
        &self.dependents
    }

    /// Whether output transitions are recorded.
    pub fn is_probed(&self) -> bool {
        self.probed
    }

    /// Current output value.
    pub fn output(&self) -> Bit {
        self.output
    }

    /// True if every input terminal is bound.
    pub fn has_inputs_connected(&self) -> bool {
        self.inputs.iter().all(Option::is_some)
    }

    /// True if at least one other gate reads this gate's output.
    pub fn has_output_connected(&self) -> bool {
        !self.dependents.is_empty()
    }

    /// True if all inputs are bound and the output feeds something.
    pub fn is_connected(&self) -> bool {
        self.has_inputs_connected() && self.has_output_connected()
    }

    /// True if no input terminal is bound (an externally driven gate).
    pub fn is_primary_input(&self) -> bool {
        self.inputs.iter().all(Option::is_none)
    }

    /// First unbound terminal, if any.
    pub fn first_unbound_terminal(&self) -> Option<usize> {
        self.inputs.iter().position(Option::is_none)
    }

    /// When the output reflects an input change made at `input_time`.
    pub fn compute_transition_time(&self, input_time: SimTime) -> SimTime {
        self.gate_type.output_time(input_time)
    }

    /// Evaluate the gate's logic on already-gathered input values.
    pub(crate) fn evaluate(&self, inputs: &[Bit]) -> Result<Bit, CircuitError> {
        self.gate_type.evaluate(inputs)
    }

    pub(crate) fn bind_input(&mut self, terminal: usize, source: GateId) -> Result<(), CircuitError> {
        let slot = self
            .inputs
            .get_mut(terminal)
            .ok_or_else(|| CircuitError::Arity {
                name: self.name.clone(),
                expected: self.gate_type.input_count(),
                actual: terminal + 1,
            })?;
        if slot.is_some() {
            return Err(CircuitError::AlreadyConnected {
                gate: self.name.clone(),
                terminal,
            });
        }
        *slot = Some(source);
        Ok(())
    }

    pub(crate) fn push_dependent(&mut self, dependent: GateId) {
        self.dependents.push(dependent);
    }

    pub(crate) fn probe(&mut self) -> Result<(), CircuitError> {
        if self.probed {
            return Err(CircuitError::AlreadyProbed(self.name.clone()));
        }
        self.probed = true;
        Ok(())
    }

    pub(crate) fn unprobe(&mut self) {
        self.probed = false;
    }

    pub(crate) fn set_output(&mut self, value: Bit) -> Result<(), CircuitError> {
        if self.output == value {
            return Err(CircuitError::NoOpTransition {
                gate: self.name.clone(),
                value,
            });
        }
        self.output = value;
        Ok(())
    }
}
