//! Configuration types for the simulator.

use crate::workload::FlipMode;
use gatesim_simulation::SimulationConfig;

/// Configuration for a simulator run.
///
/// Bounds set here override the netlist's `[limits]` table field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Probe every gate for the run, not just the netlist's probes.
    pub probe_all: bool,

    /// Run bounds.
    pub limits: SimulationConfig,

    /// Random input flips added on top of the netlist's own.
    pub workload: Option<WorkloadConfig>,
}

impl SimulatorConfig {
    /// Create a configuration that runs the netlist as written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe every gate.
    pub fn with_probe_all(mut self, probe_all: bool) -> Self {
        self.probe_all = probe_all;
        self
    }

    /// Set the run bounds.
    pub fn with_limits(mut self, limits: SimulationConfig) -> Self {
        self.limits = limits;
        self
    }

    /// Add a random flip workload.
    pub fn with_workload(mut self, workload: WorkloadConfig) -> Self {
        self.workload = Some(workload);
        self
    }

    /// Merge these bounds over the netlist's. Bounds set here win.
    pub fn effective_limits(&self, netlist: &SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            max_events: self.limits.max_events.or(netlist.max_events),
            max_time: self.limits.max_time.or(netlist.max_time),
        }
    }
}

/// Random flip workload configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Number of flips to generate. Toggle mode generates fewer when the
    /// horizon runs out of ticks.
    pub flips: usize,

    /// Flips land in `0..=horizon`.
    pub horizon: u64,

    /// Seed for the flip generator.
    pub seed: u64,

    /// How flip values are chosen.
    pub mode: FlipMode,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            flips: 100,
            horizon: 1_000,
            seed: 12345,
            mode: FlipMode::default(),
        }
    }
}

impl WorkloadConfig {
    /// Create a workload of `flips` random flips.
    pub fn new(flips: usize) -> Self {
        Self {
            flips,
            ..Self::default()
        }
    }

    /// Set the time horizon.
    pub fn with_horizon(mut self, horizon: u64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the flip mode.
    pub fn with_mode(mut self, mode: FlipMode) -> Self {
        self.mode = mode;
        self
    }
}
