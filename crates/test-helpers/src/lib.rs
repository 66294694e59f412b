//! Test helpers for gatesim - fixture circuits shared across crate tests.
//!
//! Every fixture starts from [`gate_library`], which registers a small set of
//! truth tables and gate types with fixed delays, so expected trace times in
//! tests can be worked out by hand.
//!
//! # Example
//!
//! ```rust
//! use gatesim_test_helpers::fixtures;
//!
//! let circuit = fixtures::and_gate_circuit();
//! assert_eq!(circuit.len(), 3);
//! assert!(circuit.gate(circuit.gate_id("G").unwrap()).unwrap().is_probed());
//! ```

pub mod fixtures;

pub use fixtures::gate_library;
