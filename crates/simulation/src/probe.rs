//! Recorded output changes of probed gates.

use gatesim_types::{Bit, SimTime};
use std::fmt;

/// One output change of a probed gate.
///
/// Records order by time, then gate name, then value, which is the order a
/// finished simulation reports them in. `Display` renders the line format
/// `<time> <gate> <value>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProbeRecord {
    /// When the output changed.
    pub time: SimTime,
    /// Gate name.
    pub gate: String,
    /// New output value.
    pub value: Bit,
}

impl ProbeRecord {
    /// Create a probe record.
    pub fn new(time: SimTime, gate: impl Into<String>, value: Bit) -> Self {
        Self {
            time,
            gate: gate.into(),
            value,
        }
    }
}

impl fmt::Display for ProbeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.time, self.gate, self.value)
    }
}
