//! Deterministic simulation runner.
//!
//! The runner owns the circuit for the duration of a run. Output changes
//! only happen through the apply phase of [`Simulation::step`], and every
//! change of a probed gate is recorded.

use crate::{EventQueue, ProbeRecord, SimulationConfig, SimulationError};
use gatesim_core::Circuit;
use gatesim_types::{Bit, GateId, SimTime};
use std::fmt;
use tracing::{debug, trace, warn};

/// Lifecycle of a [`Simulation`].
///
/// ```text
/// Unstarted ──start()──▶ Draining ──step() until queue empty──▶ Drained
///     │                      │                                    ▲
///     │                      └──limit exceeded──▶ Aborted         │
///     └────────────── start() with nothing queued ────────────────┘
/// ```
///
/// There is no way back: a simulation is single-use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Stimuli may be scheduled; nothing has run.
    Unstarted,
    /// The queue holds at least one transition.
    Draining,
    /// The queue is empty and probe records are final.
    Drained,
    /// A run bound was hit. Transitions past the bound stay queued and are
    /// never processed; the records cover everything processed before it.
    Aborted,
}

impl fmt::Display for SimulationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationPhase::Unstarted => write!(f, "unstarted"),
            SimulationPhase::Draining => write!(f, "draining"),
            SimulationPhase::Drained => write!(f, "drained"),
            SimulationPhase::Aborted => write!(f, "aborted"),
        }
    }
}

/// Statistics collected during simulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationStats {
    /// Instants processed.
    pub steps: u64,
    /// Transitions placed in the queue, stimuli included.
    pub transitions_scheduled: u64,
    /// Transitions removed from the queue.
    pub transitions_popped: u64,
    /// Popped transitions dropped because the gate already held the value.
    pub stale_discarded: u64,
    /// Popped transitions that changed a gate's output.
    pub transitions_applied: u64,
    /// Output changes recorded for probed gates.
    pub probe_records: u64,
    /// Time of the last processed instant.
    pub final_time: SimTime,
}

impl SimulationStats {
    /// Fraction of popped transitions that were stale.
    pub fn stale_ratio(&self) -> f64 {
        if self.transitions_popped == 0 {
            0.0
        } else {
            self.stale_discarded as f64 / self.transitions_popped as f64
        }
    }
}

/// An external input change recorded before the run starts.
///
/// Field order gives the seeding order: time, then gate name, then value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Stimulus {
    time: SimTime,
    gate_name: String,
    value: Bit,
    gate: GateId,
}

/// State needed to compute a circuit's state as it evolves over time.
///
/// # Example
///
/// ```
/// use gatesim_core::Circuit;
/// use gatesim_simulation::Simulation;
/// use gatesim_types::SimTime;
///
/// let mut circuit = Circuit::new();
/// circuit.add_truth_table("and2", &[0, 0, 0, 1])?;
/// circuit.add_truth_table("buf", &[0, 1])?;
/// circuit.add_gate_type("AND2", "and2", 5)?;
/// circuit.add_gate_type("BUF", "buf", 0)?;
/// circuit.add_gate("A", "BUF", &[] as &[&str])?;
/// circuit.add_gate("B", "BUF", &[] as &[&str])?;
/// circuit.add_gate("G", "AND2", &["A", "B"])?;
/// circuit.add_probe("G")?;
///
/// let mut simulation = Simulation::new(circuit);
/// simulation.schedule_input("A", 1, SimTime(0))?;
/// simulation.schedule_input("B", 1, SimTime(3))?;
/// simulation.run()?;
///
/// let lines: Vec<String> = simulation
///     .probe_records()
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(lines, vec!["8 G 1"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Simulation {
    /// The circuit being simulated; outputs are mutated in place.
    circuit: Circuit,

    /// Run bounds.
    config: SimulationConfig,

    /// Stimuli recorded by `schedule_input`, seeded by `start`.
    stimuli: Vec<Stimulus>,

    /// Pending transitions, ordered deterministically.
    queue: EventQueue,

    /// Output changes of probed gates, sorted once the run drains.
    probes: Vec<ProbeRecord>,

    /// Gates toggled by `probe_all_gates`, reverted by `unprobe_all_gates`.
    probe_all_undo_log: Vec<GateId>,

    /// Current lifecycle phase.
    phase: SimulationPhase,

    /// Statistics.
    stats: SimulationStats,
}

impl Simulation {
    /// Create an unbounded simulation over a circuit.
    ///
    /// The circuit may still be extended through
    /// [`circuit_mut`](Self::circuit_mut) until the run starts.
    pub fn new(circuit: Circuit) -> Self {
        Self::with_config(circuit, SimulationConfig::default())
    }

    /// Create a simulation with run bounds.
    pub fn with_config(circuit: Circuit, config: SimulationConfig) -> Self {
        Self {
            circuit,
            config,
            stimuli: Vec::new(),
            queue: EventQueue::new(),
            probes: Vec::new(),
            probe_all_undo_log: Vec::new(),
            phase: SimulationPhase::Unstarted,
            stats: SimulationStats::default(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════════

    /// The simulated circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Mutable access to the circuit, only before the run starts.
    pub fn circuit_mut(&mut self) -> Result<&mut Circuit, SimulationError> {
        self.expect_phase(SimulationPhase::Unstarted)?;
        Ok(&mut self.circuit)
    }

    /// Give the circuit back, with outputs as they are now.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    /// Run bounds.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Number of transitions waiting in the queue.
    pub fn pending_transitions(&self) -> usize {
        self.queue.len()
    }

    /// Recorded output changes of probed gates.
    ///
    /// Ordered by `(time, gate name, value)` once the simulation has drained
    /// or aborted; in processing order before that.
    pub fn probe_records(&self) -> &[ProbeRecord] {
        &self.probes
    }

    /// Take ownership of the recorded output changes.
    pub fn into_probe_records(self) -> Vec<ProbeRecord> {
        self.probes
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Setup
    // ═══════════════════════════════════════════════════════════════════════════

    /// Record an external change of `gate_name`'s output to `value` at `time`.
    ///
    /// The stimulus is queued when the run starts. It should target an
    /// externally driven gate; a stimulus on an internal gate is overwritten
    /// as soon as the gate's inputs change.
    pub fn schedule_input(
        &mut self,
        gate_name: &str,
        value: u8,
        time: SimTime,
    ) -> Result<(), SimulationError> {
        self.expect_phase(SimulationPhase::Unstarted)?;
        let value = Bit::try_from(value).map_err(|e| SimulationError::InvalidOutput(e.0))?;
        let gate = self.circuit.gate_id(gate_name)?;

        trace!(gate = gate_name, %value, %time, "Scheduled input");
        self.stimuli.push(Stimulus {
            time,
            gate_name: gate_name.to_string(),
            value,
            gate,
        });
        Ok(())
    }

    /// Turn on probing for every gate that is not probed yet.
    pub fn probe_all_gates(&mut self) {
        let toggled = self.circuit.probe_all();
        self.probe_all_undo_log.extend(toggled);
    }

    /// Revert [`probe_all_gates`](Self::probe_all_gates).
    ///
    /// Gates probed before the call stay probed.
    pub fn unprobe_all_gates(&mut self) {
        let toggled = std::mem::take(&mut self.probe_all_undo_log);
        self.circuit.unprobe(&toggled);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Running
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run the simulation to completion.
    pub fn run(&mut self) -> Result<(), SimulationError> {
        self.start()?;
        while self.phase == SimulationPhase::Draining {
            self.step()?;
        }
        Ok(())
    }

    /// Validate wiring and queue the scheduled stimuli.
    ///
    /// Stimuli are queued sorted by `(time, gate name, value)`, which fixes
    /// their sequence numbers independently of scheduling order.
    pub fn start(&mut self) -> Result<(), SimulationError> {
        self.expect_phase(SimulationPhase::Unstarted)?;
        self.circuit.validate_connectivity()?;

        let mut stimuli = std::mem::take(&mut self.stimuli);
        stimuli.sort();
        for stimulus in stimuli {
            self.queue
                .schedule(stimulus.gate, stimulus.value, stimulus.time);
            self.stats.transitions_scheduled += 1;
        }

        debug!(
            gates = self.circuit.len(),
            stimuli = self.queue.len(),
            "Simulation started"
        );

        if self.queue.is_empty() {
            self.finish();
        } else {
            self.phase = SimulationPhase::Draining;
        }
        Ok(())
    }

    /// Process every transition scheduled for the earliest pending instant.
    ///
    /// A step does not equal one unit of time: instants where nothing
    /// happens are skipped, and all transitions at the same time are handled
    /// together. They are all applied first, and only then are dependents
    /// re-evaluated, so every dependent sees the complete set of changes.
    ///
    /// Returns the instant that was processed.
    pub fn step(&mut self) -> Result<SimTime, SimulationError> {
        self.expect_phase(SimulationPhase::Draining)?;
        let Some(step_time) = self.queue.peek_min().map(|t| t.time) else {
            self.finish();
            return Err(SimulationError::InvalidPhase {
                expected: SimulationPhase::Draining,
                actual: self.phase,
            });
        };
        if let Some(limit) = self.config.max_time {
            if step_time > limit {
                self.abort();
                return Err(SimulationError::TimeLimitExceeded {
                    limit,
                    time: step_time,
                });
            }
        }

        // An instant is processed whole or not at all.
        if let Some(limit) = self.config.max_events {
            let at_instant = self.queue.count_at(step_time) as u64;
            if self.stats.transitions_popped + at_instant > limit {
                self.abort();
                return Err(SimulationError::EventLimitExceeded {
                    limit,
                    time: step_time,
                });
            }
        }

        // Apply all the transitions at this instant before propagating.
        let mut applied = Vec::new();
        while self.queue.peek_min().is_some_and(|t| t.time == step_time) {
            let Some(transition) = self.queue.extract_min() else {
                break;
            };
            self.stats.transitions_popped += 1;

            if !transition.is_valid(&self.circuit)? {
                self.stats.stale_discarded += 1;
                continue;
            }
            transition.apply(&mut self.circuit)?;
            self.stats.transitions_applied += 1;

            let gate = self.circuit.gate(transition.gate)?;
            trace!(
                time = %step_time,
                gate = gate.name(),
                value = %transition.new_output,
                "Applied transition"
            );
            if gate.is_probed() {
                self.probes.push(ProbeRecord::new(
                    transition.time,
                    gate.name(),
                    transition.new_output,
                ));
                self.stats.probe_records += 1;
            }
            applied.push(transition);
        }

        // Propagate the effects to every dependent, seeing all of this
        // instant's changes at once.
        let circuit = &self.circuit;
        for transition in &applied {
            for &dependent in circuit.gate(transition.gate)?.dependents() {
                let output = circuit.compute_next_output(dependent)?;
                let time = circuit.compute_transition_time(dependent, step_time)?;
                self.queue.schedule(dependent, output, time);
                self.stats.transitions_scheduled += 1;
            }
        }

        self.stats.steps += 1;
        self.stats.final_time = step_time;

        if self.queue.is_empty() {
            self.finish();
        }
        Ok(step_time)
    }

    fn finish(&mut self) {
        self.probes.sort();
        self.phase = SimulationPhase::Drained;
        debug!(
            steps = self.stats.steps,
            applied = self.stats.transitions_applied,
            stale = self.stats.stale_discarded,
            records = self.probes.len(),
            final_time = %self.stats.final_time,
            "Simulation drained"
        );
    }

    fn abort(&mut self) {
        self.probes.sort();
        self.phase = SimulationPhase::Aborted;
        warn!(
            steps = self.stats.steps,
            pending = self.queue.len(),
            final_time = %self.stats.final_time,
            "Simulation aborted at run bound"
        );
    }

    fn expect_phase(&self, expected: SimulationPhase) -> Result<(), SimulationError> {
        if self.phase != expected {
            return Err(SimulationError::InvalidPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}
