//! Tests for deterministic simulation.
//!
//! These tests verify that the simulation produces identical traces given
//! the same circuit and stimuli, which is the core property we need for
//! golden-file comparison and replay.

use gatesim_core::Circuit;
use gatesim_simulation::{ProbeRecord, SimTime, Simulation, SimulationStats};
use gatesim_test_helpers::fixtures;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_test::traced_test;

const ADDER_BITS: usize = 8;

/// Generate random flips of the circuit's externally driven gates.
fn random_stimuli(circuit: &Circuit, seed: u64, count: usize) -> Vec<(String, u8, SimTime)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let inputs: Vec<String> = circuit
        .primary_inputs()
        .map(|(_, gate)| gate.name().to_string())
        .collect();
    (0..count)
        .map(|_| {
            let gate = inputs[rng.gen_range(0..inputs.len())].clone();
            let value = rng.gen_range(0..=1u8);
            // Coarse times so that many flips share an instant.
            let time = SimTime(rng.gen_range(0..20u64) * 10);
            (gate, value, time)
        })
        .collect()
}

fn run_adder(stimuli: &[(String, u8, SimTime)]) -> (Vec<ProbeRecord>, SimulationStats) {
    let mut simulation = Simulation::new(fixtures::ripple_carry_adder(ADDER_BITS));
    simulation.probe_all_gates();
    for (gate, value, time) in stimuli {
        simulation.schedule_input(gate, *value, *time).unwrap();
    }
    simulation.run().unwrap();
    let stats = simulation.stats().clone();
    (simulation.into_probe_records(), stats)
}

/// Test that the same stimuli produce the same trace.
#[traced_test]
#[test]
fn test_determinism_same_stimuli() {
    let circuit = fixtures::ripple_carry_adder(ADDER_BITS);
    let stimuli = random_stimuli(&circuit, 12345, 64);

    let (records1, stats1) = run_adder(&stimuli);
    let (records2, stats2) = run_adder(&stimuli);

    assert!(!records1.is_empty(), "Random stimuli should cause activity");
    assert_eq!(records1, records2, "Same stimuli should produce same trace");
    assert_eq!(stats1, stats2, "Same stimuli should produce same stats");
}

/// Test that the order stimuli are scheduled in does not matter.
#[traced_test]
#[test]
fn test_determinism_independent_of_scheduling_order() {
    let circuit = fixtures::ripple_carry_adder(ADDER_BITS);
    let stimuli = random_stimuli(&circuit, 777, 64);

    let mut shuffled = stimuli.clone();
    shuffled.shuffle(&mut ChaCha8Rng::seed_from_u64(1));
    let mut reversed = stimuli.clone();
    reversed.reverse();

    let (baseline, _) = run_adder(&stimuli);
    let (from_shuffled, _) = run_adder(&shuffled);
    let (from_reversed, _) = run_adder(&reversed);

    assert_eq!(baseline, from_shuffled);
    assert_eq!(baseline, from_reversed);
}

/// Test that the rendered trace is byte-identical across runs.
#[traced_test]
#[test]
fn test_rendered_trace_is_byte_identical() {
    let circuit = fixtures::ripple_carry_adder(ADDER_BITS);
    let stimuli = random_stimuli(&circuit, 42, 32);

    let render = |records: Vec<ProbeRecord>| -> String {
        records
            .iter()
            .map(|r| format!("{r}\n"))
            .collect::<String>()
    };
    let (first, _) = run_adder(&stimuli);
    let (second, _) = run_adder(&stimuli);
    assert_eq!(render(first).into_bytes(), render(second).into_bytes());
}

/// Test that records come out sorted regardless of processing order.
#[traced_test]
#[test]
fn test_trace_is_sorted() {
    let circuit = fixtures::ripple_carry_adder(ADDER_BITS);
    let stimuli = random_stimuli(&circuit, 9001, 48);
    let (records, _) = run_adder(&stimuli);

    assert!(records.windows(2).all(|pair| pair[0] <= pair[1]));
}

/// Test that different stimuli diverge.
#[traced_test]
#[test]
fn test_different_seeds_diverge() {
    let circuit = fixtures::ripple_carry_adder(ADDER_BITS);
    let (records1, _) = run_adder(&random_stimuli(&circuit, 111, 64));
    let (records2, _) = run_adder(&random_stimuli(&circuit, 222, 64));

    assert_ne!(
        records1, records2,
        "Different stimuli should produce different traces"
    );
}
