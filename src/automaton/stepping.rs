//! One logic generation over the whole lattice.

use rand::Rng;

use super::grid::count_neighbors;
use super::rules::{AgeGate, BiasOffsets};
use crate::config::RuleSet;
use crate::state::Lattice;

/// Per-tick parameters shared by every cell.
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    pub rule: RuleSet,
    pub bias: BiasOffsets,
    pub now_ms: u64,
    pub memory_ms: u64,
}

/// Births and deaths produced by one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub births: usize,
    pub deaths: usize,
}

/// Step the lattice forward by one generation.
///
/// Every cell is evaluated against `current` and written to `scratch` in index order,
/// so the random stream is consumed deterministically. The buffers are swapped at the
/// end and the generation counter incremented.
pub fn step_lattice<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    params: StepParams,
    rng: &mut R,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if lattice.is_empty() {
        return outcome;
    }

    let n = lattice.size;
    let mut idx = 0;
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let stats = count_neighbors(lattice, x, y, z);
                let alive = lattice.current[idx] != 0;
                let age = AgeGate {
                    activated_at: lattice.ages[idx],
                    now_ms: params.now_ms,
                    memory_ms: params.memory_ms,
                };

                let next = params.rule.next_state(alive, stats, age, params.bias, rng);
                match (alive, next) {
                    (false, true) => outcome.births += 1,
                    (true, false) => outcome.deaths += 1,
                    _ => {}
                }
                lattice.scratch[idx] = next as u8;
                idx += 1;
            }
        }
    }

    lattice.swap();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn params(rule: RuleSet) -> StepParams {
        StepParams {
            rule,
            bias: BiasOffsets::default(),
            now_ms: 0,
            memory_ms: 0,
        }
    }

    #[test]
    fn test_step_life_5766_birth_on_six() {
        let mut lattice = Lattice::new(8);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        // Six cells around (4,4,4) in its own layer
        for (x, y) in [(3, 3), (4, 3), (5, 3), (3, 5), (4, 5), (5, 5)] {
            lattice.set(x, y, 4, true);
        }

        let outcome = step_lattice(&mut lattice, params(RuleSet::Life5766), &mut rng);

        assert_eq!(lattice.get(4, 4, 4), 1);
        assert!(outcome.births >= 1);
        // Corners of the rows only had 1-2 neighbors each and died
        assert_eq!(lattice.get(3, 3, 4), 0);
        assert_eq!(lattice.generation, 1);
    }

    #[test]
    fn test_step_counts_births_and_deaths() {
        let mut lattice = Lattice::new(6);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        lattice.set(1, 1, 1, true);
        lattice.set(4, 4, 4, true);

        let outcome = step_lattice(&mut lattice, params(RuleSet::Life5766), &mut rng);

        assert_eq!(outcome, StepOutcome { births: 0, deaths: 2 });
        assert_eq!(lattice.live_count(), 0);
    }

    #[test]
    fn test_step_generation_increments() {
        let mut lattice = Lattice::new(4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert_eq!(lattice.generation, 0);
        step_lattice(&mut lattice, params(RuleSet::Life25D), &mut rng);
        assert_eq!(lattice.generation, 1);
        step_lattice(&mut lattice, params(RuleSet::Life25D), &mut rng);
        assert_eq!(lattice.generation, 2);
    }

    #[test]
    fn test_step_empty_lattice_stays_empty() {
        let mut lattice = Lattice::new(4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for rule in RuleSet::ALL {
            step_lattice(&mut lattice, params(rule), &mut rng);
            assert!(lattice.current.iter().all(|&c| c == 0));
        }
        assert_eq!(lattice.generation, 3);
    }

    #[test]
    fn test_step_life_25d_blinker() {
        // A 2D blinker in one layer flips between horizontal and vertical
        let mut lattice = Lattice::new(7);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        lattice.set(2, 3, 3, true);
        lattice.set(3, 3, 3, true);
        lattice.set(4, 3, 3, true);

        step_lattice(&mut lattice, params(RuleSet::Life25D), &mut rng);
        assert_eq!(lattice.live_count(), 3);
        assert_eq!(lattice.get(3, 2, 3), 1);
        assert_eq!(lattice.get(3, 3, 3), 1);
        assert_eq!(lattice.get(3, 4, 3), 1);

        step_lattice(&mut lattice, params(RuleSet::Life25D), &mut rng);
        assert_eq!(lattice.get(2, 3, 3), 1);
        assert_eq!(lattice.get(4, 3, 3), 1);
        assert_eq!(lattice.get(3, 2, 3), 0);
    }

    #[test]
    fn test_step_golxr_age_gate_keeps_isolated_cell() {
        let mut lattice = Lattice::new(5);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let idx = lattice.index(2, 2, 2);
        lattice.activate(idx, 1000);

        let params = StepParams {
            rule: RuleSet::Golxr,
            bias: BiasOffsets::default(),
            now_ms: 1500,
            memory_ms: 2000,
        };
        for _ in 0..20 {
            step_lattice(&mut lattice, params, &mut rng);
            assert_eq!(lattice.get(2, 2, 2), 1);
        }
    }
}
