//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gate identifier.
///
/// Index of a gate inside the arena of the circuit that created it. Ids are
/// handed out in insertion order and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GateId(pub u32);

impl GateId {
    /// Get the arena index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gate({})", self.0)
    }
}

/// A point in simulated time.
///
/// Time is measured in abstract ticks; gate delays use the same unit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SimTime(pub u64);

impl SimTime {
    /// Start of the simulation.
    pub const ZERO: Self = SimTime(0);

    /// The time `delay` ticks after this one.
    pub fn after(self, delay: u64) -> Self {
        SimTime(self.0.saturating_add(delay))
    }

    /// Get the raw tick count.
    pub fn ticks(self) -> u64 {
        self.0
    }
}

impl From<u64> for SimTime {
    fn from(ticks: u64) -> Self {
        SimTime(ticks)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_time_after() {
        assert_eq!(SimTime(3).after(5), SimTime(8));
        assert_eq!(SimTime::ZERO.after(0), SimTime::ZERO);
        assert_eq!(SimTime(u64::MAX).after(1), SimTime(u64::MAX));
    }

    #[test]
    fn test_display_is_raw_ticks() {
        assert_eq!(SimTime(42).to_string(), "42");
        assert_eq!(GateId(7).to_string(), "Gate(7)");
        assert_eq!(GateId(7).index(), 7);
    }
}
