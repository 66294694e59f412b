//! Fixture circuits.

use gatesim_core::Circuit;

/// Delay of the `IN` gate type used for externally driven gates.
pub const IN_DELAY: i64 = 0;
/// Delay of `NOT`.
pub const NOT_DELAY: i64 = 1;
/// Delay of `AND2`.
pub const AND2_DELAY: i64 = 5;
/// Delay of `OR2`.
pub const OR2_DELAY: i64 = 3;
/// Delay of `XOR2`.
pub const XOR2_DELAY: i64 = 4;
/// Delay of `NAND2`.
pub const NAND2_DELAY: i64 = 2;

/// No gate inputs. Used for externally driven gates.
pub const NO_INPUTS: &[&str] = &[];

/// An empty circuit with the standard tables and gate types registered.
///
/// | Type    | Table   | Delay |
/// |---------|---------|-------|
/// | `IN`    | `buf`   | 0     |
/// | `NOT`   | `not`   | 1     |
/// | `AND2`  | `and2`  | 5     |
/// | `OR2`   | `or2`   | 3     |
/// | `XOR2`  | `xor2`  | 4     |
/// | `NAND2` | `nand2` | 2     |
pub fn gate_library() -> Circuit {
    let tables: [(&str, &[u8]); 6] = [
        ("buf", &[0, 1]),
        ("not", &[1, 0]),
        ("and2", &[0, 0, 0, 1]),
        ("or2", &[0, 1, 1, 1]),
        ("xor2", &[0, 1, 1, 0]),
        ("nand2", &[1, 1, 1, 0]),
    ];

    let mut circuit = Circuit::new();
    for (name, outputs) in tables {
        circuit
            .add_truth_table(name, outputs)
            .expect("fixture table is valid");
    }
    for (name, table, delay) in [
        ("IN", "buf", IN_DELAY),
        ("NOT", "not", NOT_DELAY),
        ("AND2", "and2", AND2_DELAY),
        ("OR2", "or2", OR2_DELAY),
        ("XOR2", "xor2", XOR2_DELAY),
        ("NAND2", "nand2", NAND2_DELAY),
    ] {
        circuit
            .add_gate_type(name, table, delay)
            .expect("fixture gate type is valid");
    }
    circuit
}

/// Add externally driven gates with the given names.
pub fn add_inputs(circuit: &mut Circuit, names: &[&str]) {
    for name in names {
        circuit
            .add_gate(name, "IN", NO_INPUTS)
            .expect("fixture input is valid");
    }
}

/// `G = AND2(A, B)`, with `G` probed.
pub fn and_gate_circuit() -> Circuit {
    single_gate_circuit("AND2")
}

/// `G = XOR2(A, B)`, with `G` probed.
pub fn xor_gate_circuit() -> Circuit {
    single_gate_circuit("XOR2")
}

fn single_gate_circuit(gate_type: &str) -> Circuit {
    let mut circuit = gate_library();
    add_inputs(&mut circuit, &["A", "B"]);
    circuit
        .add_gate("G", gate_type, &["A", "B"])
        .expect("fixture gate is valid");
    circuit.add_probe("G").expect("fixture probe is valid");
    circuit
}

/// `N = NOT(A)` where `NOT` has the given delay, with `N` probed.
pub fn not_gate_circuit(delay: i64) -> Circuit {
    let mut circuit = Circuit::new();
    circuit.add_truth_table("buf", &[0, 1]).expect("valid");
    circuit.add_truth_table("not", &[1, 0]).expect("valid");
    circuit.add_gate_type("IN", "buf", IN_DELAY).expect("valid");
    circuit.add_gate_type("NOT", "not", delay).expect("valid");
    add_inputs(&mut circuit, &["A"]);
    circuit.add_gate("N", "NOT", &["A"]).expect("valid");
    circuit.add_probe("N").expect("valid");
    circuit
}

/// An n-bit ripple-carry adder.
///
/// Inputs `A0..An-1`, `B0..Bn-1` (bit 0 least significant) and `CIN`.
/// Sum outputs `S0..Sn-1` and the final carry `COUT` are probed.
///
/// Each full adder `i` is built from `P_i = A_i ^ B_i`, `S_i = P_i ^ C_i`,
/// `G_i = A_i & B_i`, `T_i = P_i & C_i`, `C_{i+1} = G_i | T_i`.
pub fn ripple_carry_adder(bits: usize) -> Circuit {
    let mut circuit = gate_library();
    add_inputs(&mut circuit, &["CIN"]);
    for i in 0..bits {
        add_inputs(&mut circuit, &[&format!("A{i}"), &format!("B{i}")]);
    }

    let mut carry = "CIN".to_string();
    for i in 0..bits {
        let (a, b) = (format!("A{i}"), format!("B{i}"));
        let (p, s, g, t) = (
            format!("P{i}"),
            format!("S{i}"),
            format!("G{i}"),
            format!("T{i}"),
        );
        let next_carry = if i + 1 == bits {
            "COUT".to_string()
        } else {
            format!("C{}", i + 1)
        };

        for (name, gate_type, inputs) in [
            (&p, "XOR2", [&a, &b]),
            (&s, "XOR2", [&p, &carry]),
            (&g, "AND2", [&a, &b]),
            (&t, "AND2", [&p, &carry]),
            (&next_carry, "OR2", [&g, &t]),
        ] {
            circuit
                .add_gate(name, gate_type, &inputs)
                .expect("fixture adder gate is valid");
        }
        circuit.add_probe(&s).expect("fixture probe is valid");
        carry = next_carry;
    }
    circuit.add_probe("COUT").expect("fixture probe is valid");
    circuit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adder_shape() {
        let circuit = ripple_carry_adder(4);
        // 1 carry-in + 8 operand inputs + 5 gates per bit.
        assert_eq!(circuit.len(), 9 + 4 * 5);
        assert!(circuit.validate_connectivity().is_ok());
        assert_eq!(circuit.primary_inputs().count(), 9);
    }
}
