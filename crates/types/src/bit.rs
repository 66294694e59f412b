//! Binary signal value.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A binary signal value carried by a gate output.
///
/// Ordered `Zero < One`, so collections of records containing bits sort the
/// same way their integer renderings would.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Bit {
    /// Logic low.
    #[default]
    Zero,
    /// Logic high.
    One,
}

impl Bit {
    /// The bit as a table index (0 or 1).
    pub fn as_index(self) -> usize {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    /// The opposite value.
    pub fn flipped(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

/// A value that is neither 0 nor 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid bit value: {0} (expected 0 or 1)")]
pub struct InvalidBit(pub u8);

impl TryFrom<u8> for Bit {
    type Error = InvalidBit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(InvalidBit(other)),
        }
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.as_index() as u8
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_index())
    }
}
