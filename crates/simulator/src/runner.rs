//! Netlist simulator.

use crate::config::SimulatorConfig;
use crate::netlist::NetlistConfig;
use crate::report::SimulationReport;
use crate::workload::{RandomFlipWorkload, Stimulus, WorkloadGenerator};
use crate::ConfigError;
use gatesim_core::GateDescription;
use gatesim_simulation::{Bit, SimTime, Simulation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Runs a netlist under a [`SimulatorConfig`].
///
/// Deterministic: the same netlist and configuration, workload seed
/// included, always produce the same report.
pub struct Simulator {
    netlist: NetlistConfig,
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator for a parsed netlist.
    pub fn new(netlist: NetlistConfig, config: SimulatorConfig) -> Self {
        Self { netlist, config }
    }

    /// The netlist being simulated.
    pub fn netlist(&self) -> &NetlistConfig {
        &self.netlist
    }

    /// The simulator configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Build the circuit and describe every gate without running it.
    pub fn describe(&self) -> Result<Vec<GateDescription>, ConfigError> {
        let mut circuit = self.netlist.build_circuit()?;
        if self.config.probe_all {
            circuit.probe_all();
        }
        Ok(circuit.describe())
    }

    /// Build the simulation and run it to completion.
    pub fn run(&self) -> Result<SimulationReport, ConfigError> {
        let limits = self
            .config
            .effective_limits(&self.netlist.limits.to_simulation_config());
        let mut simulation = self.netlist.build_simulation(limits)?;

        if self.config.probe_all {
            simulation.probe_all_gates();
        }
        let workload_flips = self.schedule_workload(&mut simulation)?;

        info!(
            gates = simulation.circuit().len(),
            flips = self.netlist.flips.len(),
            workload_flips,
            probe_all = self.config.probe_all,
            "Starting simulation"
        );

        simulation.run()?;

        let stats = simulation.stats().clone();
        info!(
            final_time = %stats.final_time,
            steps = stats.steps,
            applied = stats.transitions_applied,
            stale = stats.stale_discarded,
            records = stats.probe_records,
            "Simulation complete"
        );

        Ok(SimulationReport {
            records: simulation.into_probe_records(),
            stats,
            workload_flips,
        })
    }

    /// Schedule generated flips on the circuit's externally driven gates.
    fn schedule_workload(&self, simulation: &mut Simulation) -> Result<usize, ConfigError> {
        let Some(workload) = &self.config.workload else {
            return Ok(0);
        };
        let inputs: Vec<String> = simulation
            .circuit()
            .primary_inputs()
            .map(|(_, gate)| gate.name().to_string())
            .collect();

        // Netlist flips were validated when they were scheduled.
        let scheduled: Vec<Stimulus> = self
            .netlist
            .flips
            .iter()
            .filter_map(|flip| {
                Some(Stimulus {
                    time: SimTime(flip.time),
                    gate: flip.gate.clone(),
                    value: Bit::try_from(flip.value).ok()?,
                })
            })
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(workload.seed);
        let stimuli = RandomFlipWorkload::new(workload.flips, workload.horizon)
            .with_mode(workload.mode)
            .after_stimuli(&scheduled)
            .generate_batch(&inputs, &mut rng);

        for stimulus in &stimuli {
            simulation.schedule_input(&stimulus.gate, stimulus.value.into(), stimulus.time)?;
        }
        Ok(stimuli.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkloadConfig;
    use crate::workload::FlipMode;
    use gatesim_simulation::{SimulationConfig, SimulationError};

    const NOT_NETLIST: &str = r#"
probes = ["N"]

[[table]]
name = "buf"
outputs = [0, 1]

[[table]]
name = "not"
outputs = [1, 0]

[[gate_type]]
name = "IN"
table = "buf"
delay = 0

[[gate_type]]
name = "NOT"
table = "not"
delay = 2

[[gate]]
name = "A"
type = "IN"

[[gate]]
name = "N"
type = "NOT"
inputs = ["A"]

[[flip]]
gate = "A"
value = 1
time = 0

[[flip]]
gate = "A"
value = 0
time = 10
"#;

    fn netlist() -> NetlistConfig {
        NetlistConfig::from_toml_str(NOT_NETLIST).unwrap()
    }

    #[test]
    fn test_run_reports_probed_changes() {
        let report = Simulator::new(netlist(), SimulatorConfig::new()).run().unwrap();
        assert_eq!(report.lines(), vec!["12 N 1"]);
        assert_eq!(report.stats.final_time, SimTime(12));
        assert_eq!(report.workload_flips, 0);
    }

    #[test]
    fn test_probe_all_records_inputs() {
        let config = SimulatorConfig::new().with_probe_all(true);
        let report = Simulator::new(netlist(), config).run().unwrap();
        assert_eq!(report.lines(), vec!["0 A 1", "10 A 0", "12 N 1"]);
    }

    #[test]
    fn test_describe_does_not_run() {
        let gates = Simulator::new(netlist(), SimulatorConfig::new())
            .describe()
            .unwrap();
        assert_eq!(gates.len(), 2);
        assert_eq!(gates[0].dependents, vec!["N"]);
        assert!(gates[1].probed);
    }

    #[test]
    fn test_limits_from_config() {
        let config =
            SimulatorConfig::new().with_limits(SimulationConfig::unbounded().with_max_events(1));
        let err = Simulator::new(netlist(), config).run().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Simulation(SimulationError::EventLimitExceeded { limit: 1, .. })
        ));
    }

    #[test]
    fn test_workload_is_deterministic() {
        let config = SimulatorConfig::new()
            .with_probe_all(true)
            .with_workload(WorkloadConfig::new(30).with_horizon(60).with_seed(7));
        let first = Simulator::new(netlist(), config.clone()).run().unwrap();
        let second = Simulator::new(netlist(), config).run().unwrap();
        assert_eq!(first.workload_flips, 30);
        assert_eq!(first.lines(), second.lines());
    }

    #[test]
    fn test_toggle_workload_changes_every_time() {
        let config = SimulatorConfig::new().with_probe_all(true).with_workload(
            WorkloadConfig::new(10)
                .with_horizon(100)
                .with_seed(3)
                .with_mode(FlipMode::Toggle),
        );
        let mut netlist = netlist();
        netlist.flips.clear();
        let report = Simulator::new(netlist, config).run().unwrap();
        let a_changes = report.records.iter().filter(|r| r.gate == "A").count();
        assert_eq!(a_changes, 10);
    }

    #[test]
    fn test_toggle_workload_follows_netlist_flips() {
        let config = SimulatorConfig::new().with_probe_all(true).with_workload(
            WorkloadConfig::new(10)
                .with_horizon(200)
                .with_seed(3)
                .with_mode(FlipMode::Toggle),
        );
        let report = Simulator::new(netlist(), config).run().unwrap();

        // Both netlist flips plus every generated flip change A.
        let a_changes: Vec<_> = report.records.iter().filter(|r| r.gate == "A").collect();
        assert_eq!(report.workload_flips, 10);
        assert_eq!(a_changes.len(), 12);
        assert!(a_changes[2..].iter().all(|r| r.time > SimTime(10)));
        assert!(a_changes.iter().all(|r| r.time <= SimTime(200)));
    }
}
