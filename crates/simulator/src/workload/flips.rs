//! Random input flip generator.

use crate::workload::{Stimulus, WorkloadGenerator};
use gatesim_simulation::{Bit, SimTime};
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// How flip values are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlipMode {
    /// Uniform random time in the horizon and a random value. Many flips
    /// end up stale or redundant, which exercises the stale filter.
    #[default]
    Random,

    /// Times walk forward and each flip inverts the input's previous
    /// level, so every flip is a real change.
    Toggle,
}

/// Generates random flips of externally driven gates.
///
/// All flip times fall in `0..=horizon`. Toggle mode places at most one flip
/// per tick, so it stops early once the horizon is used up.
pub struct RandomFlipWorkload {
    count: usize,
    horizon: u64,
    mode: FlipMode,

    /// Toggle mode: first tick available to generated flips.
    start: u64,
    /// Toggle mode: next flip time.
    cursor: u64,
    /// Toggle mode: last level per input.
    levels: HashMap<String, Bit>,
}

impl RandomFlipWorkload {
    /// Create a generator of `count` flips in `0..=horizon`.
    pub fn new(count: usize, horizon: u64) -> Self {
        Self {
            count,
            horizon,
            mode: FlipMode::default(),
            start: 0,
            cursor: 0,
            levels: HashMap::new(),
        }
    }

    /// Set the flip mode.
    pub fn with_mode(mut self, mode: FlipMode) -> Self {
        self.mode = mode;
        self
    }

    /// Continue after stimuli that are already scheduled.
    ///
    /// Toggle flips start one tick after the latest of them, and each input
    /// starts from the level its last stimulus leaves it at.
    pub fn after_stimuli(mut self, scheduled: &[Stimulus]) -> Self {
        let mut sorted: Vec<&Stimulus> = scheduled.iter().collect();
        sorted.sort();
        for stimulus in &sorted {
            self.levels.insert(stimulus.gate.clone(), stimulus.value);
        }
        if let Some(last) = sorted.last() {
            self.start = last.time.ticks().saturating_add(1);
            self.cursor = self.start;
        }
        self
    }

    fn toggle_step(&self) -> u64 {
        let window = self
            .horizon
            .saturating_add(1)
            .saturating_sub(self.start);
        (window / self.count.max(1) as u64).max(1)
    }
}

impl WorkloadGenerator for RandomFlipWorkload {
    fn generate_batch(&mut self, inputs: &[String], rng: &mut impl rand::Rng) -> Vec<Stimulus> {
        let mut stimuli = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            match self.generate_one(inputs, rng) {
                Some(stimulus) => stimuli.push(stimulus),
                None => break,
            }
        }
        stimuli
    }

    fn generate_one(&mut self, inputs: &[String], rng: &mut impl rand::Rng) -> Option<Stimulus> {
        match self.mode {
            FlipMode::Random => Some(Stimulus {
                gate: inputs.choose(rng)?.clone(),
                time: SimTime(rng.gen_range(0..=self.horizon)),
                value: Bit::from(rng.gen_bool(0.5)),
            }),
            FlipMode::Toggle => {
                if self.cursor > self.horizon {
                    return None;
                }
                let gate = inputs.choose(rng)?.clone();
                let time = SimTime(self.cursor);
                self.cursor = self
                    .cursor
                    .saturating_add(rng.gen_range(1..=self.toggle_step()));
                let level = self.levels.entry(gate.clone()).or_default();
                *level = level.flipped();
                Some(Stimulus {
                    time,
                    gate,
                    value: *level,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn inputs() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[test]
    fn test_random_flips_stay_in_horizon() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let flips = RandomFlipWorkload::new(200, 50).generate_batch(&inputs(), &mut rng);
        assert_eq!(flips.len(), 200);
        assert!(flips.iter().all(|s| s.time <= SimTime(50)));
        assert!(flips.iter().all(|s| s.gate == "A" || s.gate == "B"));
    }

    #[test]
    fn test_same_seed_same_flips() {
        let generate = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            RandomFlipWorkload::new(50, 100).generate_batch(&inputs(), &mut rng)
        };
        assert_eq!(generate(9), generate(9));
        assert_ne!(generate(9), generate(10));
    }

    #[test]
    fn test_toggle_alternates_per_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let flips = RandomFlipWorkload::new(40, 400)
            .with_mode(FlipMode::Toggle)
            .generate_batch(&inputs(), &mut rng);

        assert!(flips.windows(2).all(|w| w[0].time < w[1].time));
        for name in ["A", "B"] {
            let values: Vec<Bit> = flips
                .iter()
                .filter(|s| s.gate == name)
                .map(|s| s.value)
                .collect();
            for (i, value) in values.iter().enumerate() {
                let expected = if i % 2 == 0 { Bit::One } else { Bit::Zero };
                assert_eq!(*value, expected);
            }
        }
    }

    #[test]
    fn test_toggle_stays_in_horizon() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let flips = RandomFlipWorkload::new(10, 3)
            .with_mode(FlipMode::Toggle)
            .generate_batch(&inputs(), &mut rng);

        let times: Vec<SimTime> = flips.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![SimTime(0), SimTime(1), SimTime(2), SimTime(3)]);
    }

    #[test]
    fn test_toggle_continues_after_scheduled() {
        let scheduled = vec![
            Stimulus {
                time: SimTime(4),
                gate: "A".to_string(),
                value: Bit::One,
            },
            Stimulus {
                time: SimTime(2),
                gate: "A".to_string(),
                value: Bit::Zero,
            },
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let flips = RandomFlipWorkload::new(6, 100)
            .with_mode(FlipMode::Toggle)
            .after_stimuli(&scheduled)
            .generate_batch(&["A".to_string()], &mut rng);

        assert_eq!(flips.len(), 6);
        assert_eq!(flips[0].time, SimTime(5));
        let values: Vec<Bit> = flips.iter().map(|s| s.value).collect();
        assert_eq!(
            values,
            vec![Bit::Zero, Bit::One, Bit::Zero, Bit::One, Bit::Zero, Bit::One]
        );
        assert!(flips.iter().all(|s| s.time <= SimTime(100)));
    }

    #[test]
    fn test_toggle_with_no_room_left() {
        let scheduled = vec![Stimulus {
            time: SimTime(10),
            gate: "A".to_string(),
            value: Bit::One,
        }];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let flips = RandomFlipWorkload::new(5, 10)
            .with_mode(FlipMode::Toggle)
            .after_stimuli(&scheduled)
            .generate_batch(&inputs(), &mut rng);
        assert!(flips.is_empty());
    }

    #[test]
    fn test_no_inputs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(RandomFlipWorkload::new(10, 10)
            .generate_batch(&[], &mut rng)
            .is_empty());
    }
}
