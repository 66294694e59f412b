//! Circuit registries and wiring.

use crate::{CircuitError, Evaluate, Gate, GateType, Registry, TruthTable};
use gatesim_types::{Bit, GateId, SimTime};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// The topology of a combinational circuit, and a snapshot of its state.
///
/// Holds how gates are connected to each other as well as the value at each
/// gate's output terminal at one instant of simulated time.
///
/// Registries preserve insertion order, so every iteration over the circuit
/// (topology dumps, bulk probing) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    truth_tables: IndexMap<String, Arc<TruthTable>>,
    gate_types: IndexMap<String, Arc<GateType>>,
    /// Gate arena, indexed by `GateId`.
    gates: Vec<Gate>,
    gate_ids: IndexMap<String, GateId>,
}

/// Read-only view of one gate's place in the netlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDescription {
    /// Gate name.
    pub name: String,
    /// Gate type name.
    pub gate_type: String,
    /// Truth table name.
    pub truth_table: String,
    /// Whether output transitions are recorded.
    pub probed: bool,
    /// Names of the gates driving each input terminal, `None` when unbound.
    pub inputs: Vec<Option<String>>,
    /// Names of the gates this gate's output feeds.
    pub dependents: Vec<String>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════════

    /// Add a truth table that can later be attached to gate types.
    pub fn add_truth_table(
        &mut self,
        name: &str,
        output_list: &[u8],
    ) -> Result<(), CircuitError> {
        if self.truth_tables.contains_key(name) {
            return Err(CircuitError::DuplicateName {
                kind: Registry::TruthTable,
                name: name.to_string(),
            });
        }
        let table = TruthTable::new(name, output_list)?;
        debug!(table = name, entries = output_list.len(), "Added truth table");

        self.truth_tables.insert(name.to_string(), Arc::new(table));
        Ok(())
    }

    /// Add a gate type that can later be attached to gates.
    pub fn add_gate_type(
        &mut self,
        name: &str,
        truth_table_name: &str,
        delay: i64,
    ) -> Result<(), CircuitError> {
        if self.gate_types.contains_key(name) {
            return Err(CircuitError::DuplicateName {
                kind: Registry::GateType,
                name: name.to_string(),
            });
        }
        let table = self
            .truth_tables
            .get(truth_table_name)
            .ok_or_else(|| CircuitError::UnknownTable(truth_table_name.to_string()))?;
        let gate_type = GateType::new(name, Arc::clone(table), delay)?;
        debug!(
            gate_type = name,
            table = truth_table_name,
            delay,
            "Added gate type"
        );

        self.gate_types.insert(name.to_string(), Arc::new(gate_type));
        Ok(())
    }

    /// Add a gate and connect its inputs to already-registered gates.
    ///
    /// Terminal `i` is bound to `input_names[i]`. Supplying fewer names than
    /// the type's fan-in leaves the remaining terminals unbound; a gate with
    /// no names at all is an externally driven input.
    ///
    /// Every reference is resolved before anything is registered, so a
    /// failed call leaves the circuit unchanged.
    pub fn add_gate<S: AsRef<str>>(
        &mut self,
        name: &str,
        type_name: &str,
        input_names: &[S],
    ) -> Result<GateId, CircuitError> {
        if self.gate_ids.contains_key(name) {
            return Err(CircuitError::DuplicateName {
                kind: Registry::Gate,
                name: name.to_string(),
            });
        }
        let gate_type = self
            .gate_types
            .get(type_name)
            .map(Arc::clone)
            .ok_or_else(|| CircuitError::UnknownType(type_name.to_string()))?;

        let sources = input_names
            .iter()
            .map(|input| self.gate_id(input.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let fan_in = gate_type.input_count();
        if sources.len() > fan_in {
            return Err(CircuitError::Arity {
                name: name.to_string(),
                expected: fan_in,
                actual: sources.len(),
            });
        }

        let id = next_gate_id(self.gates.len())?;
        self.gates.push(Gate::new(name.to_string(), gate_type));
        self.gate_ids.insert(name.to_string(), id);

        for (terminal, source) in sources.into_iter().enumerate() {
            self.connect_input(id, source, terminal)?;
        }

        debug!(
            gate = name,
            gate_type = type_name,
            inputs = input_names.len(),
            "Added gate"
        );
        Ok(id)
    }

    /// Bind input `terminal` of `gate` to the output of `source`.
    ///
    /// This is the only way fan-out is recorded: on success `gate` is
    /// appended to `source`'s dependents.
    pub fn connect_input(
        &mut self,
        gate: GateId,
        source: GateId,
        terminal: usize,
    ) -> Result<(), CircuitError> {
        // Both ids must be valid before either side is touched.
        self.gate(source)?;
        self.gate_mut(gate)?.bind_input(terminal, source)?;
        self.gate_mut(source)?.push_dependent(gate);
        trace!(%gate, %source, terminal, "Connected input");
        Ok(())
    }

    /// Mark a gate as probed, so the simulator records its transitions.
    pub fn add_probe(&mut self, gate_name: &str) -> Result<GateId, CircuitError> {
        let id = self.gate_id(gate_name)?;
        self.gate_mut(id)?.probe()?;
        debug!(gate = gate_name, "Added probe");
        Ok(id)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Lookups
    // ═══════════════════════════════════════════════════════════════════════════

    /// Resolve a gate name.
    pub fn gate_id(&self, name: &str) -> Result<GateId, CircuitError> {
        self.gate_ids
            .get(name)
            .copied()
            .ok_or_else(|| CircuitError::UnknownGate(name.to_string()))
    }

    /// Get a gate by id.
    pub fn gate(&self, id: GateId) -> Result<&Gate, CircuitError> {
        self.gates
            .get(id.index())
            .ok_or_else(|| CircuitError::UnknownGate(id.to_string()))
    }

    fn gate_mut(&mut self, id: GateId) -> Result<&mut Gate, CircuitError> {
        self.gates
            .get_mut(id.index())
            .ok_or_else(|| CircuitError::UnknownGate(id.to_string()))
    }

    /// All gates with their ids, in insertion order.
    ///
    /// Indices fit in a `u32`: `add_gate` refuses ids past `u32::MAX`.
    pub fn gates(&self) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates
            .iter()
            .enumerate()
            .map(|(index, gate)| (GateId(index as u32), gate))
    }

    /// Look up a truth table by name.
    pub fn truth_table(&self, name: &str) -> Option<&Arc<TruthTable>> {
        self.truth_tables.get(name)
    }

    /// Look up a gate type by name.
    pub fn gate_type(&self, name: &str) -> Option<&Arc<GateType>> {
        self.gate_types.get(name)
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Gates with no bound inputs, in insertion order.
    pub fn primary_inputs(&self) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates().filter(|(_, gate)| gate.is_primary_input())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Evaluation
    // ═══════════════════════════════════════════════════════════════════════════

    /// The value a gate's output will take given its inputs' current outputs.
    ///
    /// # Errors
    ///
    /// [`CircuitError::UnconnectedInput`] if any terminal is unbound.
    pub fn compute_next_output(&self, id: GateId) -> Result<Bit, CircuitError> {
        let gate = self.gate(id)?;
        let inputs = gate
            .inputs()
            .iter()
            .enumerate()
            .map(|(terminal, source)| match source {
                Some(source) => Ok(self.gates[source.index()].output()),
                None => Err(CircuitError::UnconnectedInput {
                    gate: gate.name().to_string(),
                    terminal,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        gate.evaluate(&inputs)
    }

    /// When a gate's output reflects an input change made at `input_time`.
    pub fn compute_transition_time(
        &self,
        id: GateId,
        input_time: SimTime,
    ) -> Result<SimTime, CircuitError> {
        Ok(self.gate(id)?.compute_transition_time(input_time))
    }

    /// Change a gate's output.
    ///
    /// # Errors
    ///
    /// [`CircuitError::NoOpTransition`] if the output already holds `value`.
    pub fn set_output(&mut self, id: GateId, value: Bit) -> Result<(), CircuitError> {
        self.gate_mut(id)?.set_output(value)
    }

    /// Check that no gate is partially wired.
    ///
    /// Gates with no bound inputs are externally driven and pass. Any other
    /// gate must have every terminal bound, since it will be evaluated when
    /// one of its inputs changes.
    pub fn validate_connectivity(&self) -> Result<(), CircuitError> {
        for gate in &self.gates {
            if gate.is_primary_input() {
                continue;
            }
            if let Some(terminal) = gate.first_unbound_terminal() {
                return Err(CircuitError::UnconnectedInput {
                    gate: gate.name().to_string(),
                    terminal,
                });
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Probing
    // ═══════════════════════════════════════════════════════════════════════════

    /// Probe every gate that is not probed yet.
    ///
    /// Returns the gates that were toggled, for [`unprobe`](Self::unprobe).
    pub fn probe_all(&mut self) -> Vec<GateId> {
        let mut toggled = Vec::new();
        for (index, gate) in self.gates.iter_mut().enumerate() {
            if gate.probe().is_ok() {
                toggled.push(GateId(index as u32));
            }
        }
        debug!(toggled = toggled.len(), "Probed all gates");
        toggled
    }

    /// Clear the probe flag on the given gates.
    pub fn unprobe(&mut self, ids: &[GateId]) {
        for id in ids {
            if let Some(gate) = self.gates.get_mut(id.index()) {
                gate.unprobe();
            }
        }
        debug!(reverted = ids.len(), "Reverted probes");
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Topology dump
    // ═══════════════════════════════════════════════════════════════════════════

    /// Describe every gate's wiring, in insertion order.
    pub fn describe(&self) -> Vec<GateDescription> {
        let name_of = |id: &GateId| self.gates[id.index()].name().to_string();
        self.gates
            .iter()
            .map(|gate| GateDescription {
                name: gate.name().to_string(),
                gate_type: gate.gate_type().name().to_string(),
                truth_table: gate.gate_type().truth_table().name().to_string(),
                probed: gate.is_probed(),
                inputs: gate.inputs().iter().map(|i| i.as_ref().map(name_of)).collect(),
                dependents: gate.dependents().iter().map(name_of).collect(),
            })
            .collect()
    }
}

/// Id of the gate that would be added to an arena of `len` gates.
fn next_gate_id(len: usize) -> Result<GateId, CircuitError> {
    u32::try_from(len)
        .map(GateId)
        .map_err(|_| CircuitError::TooManyGates { gates: len })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// and2 / AND2 (delay 5) plus buffer-typed inputs A and B.
    fn and_circuit() -> Circuit {
        let mut circuit = Circuit::new();
        circuit.add_truth_table("and2", &[0, 0, 0, 1]).unwrap();
        circuit.add_truth_table("buf", &[0, 1]).unwrap();
        circuit.add_gate_type("AND2", "and2", 5).unwrap();
        circuit.add_gate_type("BUF", "buf", 1).unwrap();
        circuit.add_gate("A", "BUF", &[] as &[&str]).unwrap();
        circuit.add_gate("B", "BUF", &[] as &[&str]).unwrap();
        circuit
    }

    #[test]
    fn test_duplicate_names_rejected_per_registry() {
        let mut circuit = and_circuit();

        assert_eq!(
            circuit.add_truth_table("and2", &[0, 1]),
            Err(CircuitError::DuplicateName {
                kind: Registry::TruthTable,
                name: "and2".to_string(),
            })
        );
        assert!(matches!(
            circuit.add_gate_type("AND2", "and2", 1),
            Err(CircuitError::DuplicateName { kind: Registry::GateType, .. })
        ));
        assert!(matches!(
            circuit.add_gate("A", "BUF", &[] as &[&str]),
            Err(CircuitError::DuplicateName { kind: Registry::Gate, .. })
        ));

        // Registries are independent namespaces.
        circuit.add_gate_type("and2", "and2", 1).unwrap();
    }

    #[test]
    fn test_unknown_references() {
        let mut circuit = and_circuit();
        assert_eq!(
            circuit.add_gate_type("OR2", "or2", 1),
            Err(CircuitError::UnknownTable("or2".to_string()))
        );
        assert_eq!(
            circuit.add_gate("G", "OR2", &["A", "B"]),
            Err(CircuitError::UnknownType("OR2".to_string()))
        );
        assert_eq!(
            circuit.add_probe("Z"),
            Err(CircuitError::UnknownGate("Z".to_string()))
        );
    }

    #[test]
    fn test_forward_reference_rejected_and_circuit_unchanged() {
        let mut circuit = and_circuit();
        let err = circuit.add_gate("G", "AND2", &["A", "C"]).unwrap_err();
        assert_eq!(err, CircuitError::UnknownGate("C".to_string()));

        // Nothing was registered or wired.
        assert_eq!(circuit.len(), 2);
        assert!(circuit.gate_id("G").is_err());
        let a = circuit.gate_id("A").unwrap();
        assert!(circuit.gate(a).unwrap().dependents().is_empty());
    }

    #[test]
    fn test_self_reference_rejected() {
        let mut circuit = and_circuit();
        let err = circuit.add_gate("G", "AND2", &["A", "G"]).unwrap_err();
        assert_eq!(err, CircuitError::UnknownGate("G".to_string()));
    }

    #[test]
    fn test_too_many_inputs_rejected() {
        let mut circuit = and_circuit();
        let err = circuit.add_gate("G", "AND2", &["A", "B", "A"]).unwrap_err();
        assert!(matches!(err, CircuitError::Arity { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_wiring_mirrors_fan_in_and_fan_out() {
        let mut circuit = and_circuit();
        let g = circuit.add_gate("G", "AND2", &["A", "B"]).unwrap();
        let h = circuit.add_gate("H", "AND2", &["A", "A"]).unwrap();
        let a = circuit.gate_id("A").unwrap();
        let b = circuit.gate_id("B").unwrap();

        assert_eq!(circuit.gate(g).unwrap().inputs(), &[Some(a), Some(b)]);
        assert_eq!(circuit.gate(a).unwrap().dependents(), &[g, h, h]);
        assert_eq!(circuit.gate(b).unwrap().dependents(), &[g]);
    }

    #[test]
    fn test_next_gate_id() {
        assert_eq!(next_gate_id(0), Ok(GateId(0)));
        assert_eq!(next_gate_id(u32::MAX as usize), Ok(GateId(u32::MAX)));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_next_gate_id_rejects_overflow() {
        let len = u32::MAX as usize + 1;
        assert_eq!(
            next_gate_id(len),
            Err(CircuitError::TooManyGates { gates: len })
        );
    }

    #[test]
    fn test_connect_input_twice_fails() {
        let mut circuit = and_circuit();
        let g = circuit.add_gate("G", "AND2", &["A"]).unwrap();
        let a = circuit.gate_id("A").unwrap();
        let b = circuit.gate_id("B").unwrap();

        circuit.connect_input(g, b, 1).unwrap();
        let err = circuit.connect_input(g, a, 1).unwrap_err();
        assert_eq!(
            err,
            CircuitError::AlreadyConnected {
                gate: "G".to_string(),
                terminal: 1,
            }
        );
        // The failed call did not add a dependent.
        assert_eq!(circuit.gate(a).unwrap().dependents(), &[g]);
    }

    #[test]
    fn test_probe_twice_fails() {
        let mut circuit = and_circuit();
        circuit.add_probe("A").unwrap();
        assert_eq!(
            circuit.add_probe("A"),
            Err(CircuitError::AlreadyProbed("A".to_string()))
        );
    }

    #[test]
    fn test_compute_next_output_uses_current_inputs() {
        let mut circuit = and_circuit();
        let g = circuit.add_gate("G", "AND2", &["A", "B"]).unwrap();
        let a = circuit.gate_id("A").unwrap();
        let b = circuit.gate_id("B").unwrap();

        assert_eq!(circuit.compute_next_output(g), Ok(Bit::Zero));
        circuit.set_output(a, Bit::One).unwrap();
        assert_eq!(circuit.compute_next_output(g), Ok(Bit::Zero));
        circuit.set_output(b, Bit::One).unwrap();
        assert_eq!(circuit.compute_next_output(g), Ok(Bit::One));
        assert_eq!(circuit.compute_transition_time(g, SimTime(3)), Ok(SimTime(8)));
    }

    #[test]
    fn test_partially_wired_gate_fails_validation() {
        let mut circuit = and_circuit();
        let g = circuit.add_gate("G", "AND2", &["A"]).unwrap();
        assert!(circuit.validate_connectivity().is_err());
        assert_eq!(
            circuit.compute_next_output(g),
            Err(CircuitError::UnconnectedInput {
                gate: "G".to_string(),
                terminal: 1,
            })
        );

        let b = circuit.gate_id("B").unwrap();
        circuit.connect_input(g, b, 1).unwrap();
        assert!(circuit.validate_connectivity().is_ok());
    }

    #[test]
    fn test_primary_inputs() {
        let mut circuit = and_circuit();
        circuit.add_gate("G", "AND2", &["A", "B"]).unwrap();
        let names: Vec<&str> = circuit.primary_inputs().map(|(_, g)| g.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_probe_all_and_revert_keeps_explicit_probes() {
        let mut circuit = and_circuit();
        circuit.add_gate("G", "AND2", &["A", "B"]).unwrap();
        circuit.add_probe("G").unwrap();

        let toggled = circuit.probe_all();
        assert_eq!(toggled.len(), 2);
        assert!(circuit.gates().all(|(_, gate)| gate.is_probed()));

        circuit.unprobe(&toggled);
        let probed: Vec<&str> = circuit
            .gates()
            .filter(|(_, gate)| gate.is_probed())
            .map(|(_, gate)| gate.name())
            .collect();
        assert_eq!(probed, vec!["G"]);
    }

    #[test]
    fn test_describe_in_insertion_order() {
        let mut circuit = and_circuit();
        circuit.add_gate("G", "AND2", &["A"]).unwrap();
        circuit.add_probe("G").unwrap();

        let description = circuit.describe();
        assert_eq!(description.len(), 3);
        assert_eq!(description[0].name, "A");
        assert_eq!(description[0].dependents, vec!["G".to_string()]);
        assert_eq!(
            description[2],
            GateDescription {
                name: "G".to_string(),
                gate_type: "AND2".to_string(),
                truth_table: "and2".to_string(),
                probed: true,
                inputs: vec![Some("A".to_string()), None],
                dependents: vec![],
            }
        );
    }
}
