//! Leaf value types for the gate-level simulator.
//!
//! This crate provides the small value types shared by every other crate in
//! the workspace:
//!
//! - **Signals**: [`Bit`], the only value a gate output can hold
//! - **Identifiers**: [`GateId`] for arena addressing, [`SimTime`] for
//!   simulated time
//!
//! # Design Philosophy
//!
//! This crate is self-contained with minimal dependencies. It does not depend on
//! any other workspace crates, making it the foundation layer.

mod bit;
mod identifiers;

pub use bit::{Bit, InvalidBit};
pub use identifiers::{GateId, SimTime};
