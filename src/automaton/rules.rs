//! Transition rules.
//!
//! Every rule goes through [`RuleSet::next_state`], which takes the cell's current state,
//! its neighbor statistics, its age gate and the tick's bias offsets. The deterministic
//! rules ignore the age gate, the bias and the random source.

use rand::Rng;

use super::grid::NeighborStats;
use crate::config::RuleSet;

/// Upper clamp for both bias offsets.
pub const MAX_BIAS_OFFSET: f64 = 0.9;

const SURVIVAL_BIAS_WEIGHT: f64 = 0.5;
const BIRTH_BIAS_WEIGHT: f64 = 0.3;

/// GOLXR old-age attrition: a live cell dies when a draw exceeds this plus the survival bias.
const ATTRITION_THRESHOLD: f64 = 0.95;

/// Survival and birth offsets derived from the bias scalar once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiasOffsets {
    pub survival: f64,
    pub birth: f64,
}

impl BiasOffsets {
    pub fn from_bias(bias: f32) -> Self {
        let offset = |weight: f64| (bias as f64 * weight).clamp(0.0, MAX_BIAS_OFFSET);
        BiasOffsets {
            survival: offset(SURVIVAL_BIAS_WEIGHT),
            birth: offset(BIRTH_BIAS_WEIGHT),
        }
    }
}

/// The memory window of one cell at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeGate {
    pub activated_at: Option<u64>,
    pub now_ms: u64,
    pub memory_ms: u64,
}

impl AgeGate {
    /// A gate for a cell that has never been force-activated.
    pub fn closed() -> Self {
        AgeGate {
            activated_at: None,
            now_ms: 0,
            memory_ms: 0,
        }
    }

    /// True while `now - activated_at < memory_ms`.
    #[inline]
    pub fn is_open(self) -> bool {
        match self.activated_at {
            Some(at) => self.now_ms.saturating_sub(at) < self.memory_ms,
            None => false,
        }
    }
}

impl RuleSet {
    /// Compute the next state of one cell.
    pub fn next_state<R: Rng + ?Sized>(
        self,
        alive: bool,
        stats: NeighborStats,
        age: AgeGate,
        bias: BiasOffsets,
        rng: &mut R,
    ) -> bool {
        match self {
            RuleSet::Golxr => golxr(alive, stats, age, bias, rng),
            RuleSet::Life5766 => life_5766(alive, stats),
            RuleSet::Life25D => life_25d(alive, stats),
        }
    }
}

/// Stochastic rule with cell memory.
///
/// Survival thresholds: 4 neighbors 0.1, 3 or 5 neighbors 0.4, otherwise 0.99, each lowered
/// by the survival bias. Births only on 4 (0.7 - birth bias) or 3 (0.95 - birth bias / 2).
/// Whatever ends up alive then faces the attrition draw, newborns included.
pub fn golxr<R: Rng + ?Sized>(
    alive: bool,
    stats: NeighborStats,
    age: AgeGate,
    bias: BiasOffsets,
    rng: &mut R,
) -> bool {
    if age.is_open() {
        return true;
    }

    let neighbors = stats.total();
    let mut next = if alive {
        let threshold = match neighbors {
            4 => 0.1,
            3 | 5 => 0.4,
            _ => 0.99,
        };
        rng.random::<f64>() > threshold - bias.survival
    } else {
        match neighbors {
            4 => rng.random::<f64>() > 0.7 - bias.birth,
            3 => rng.random::<f64>() > 0.95 - bias.birth / 2.0,
            _ => false,
        }
    };

    if next && rng.random::<f64>() > ATTRITION_THRESHOLD + bias.survival {
        next = false;
    }

    next
}

/// B6/S567 over the full 26-cell neighborhood.
pub fn life_5766(alive: bool, stats: NeighborStats) -> bool {
    let neighbors = stats.total();
    if alive {
        (5..=7).contains(&neighbors)
    } else {
        neighbors == 6
    }
}

/// Layered rule: 2D Life (B3/S23) on the plane, vetoed by more than one cross-layer neighbor.
pub fn life_25d(alive: bool, stats: NeighborStats) -> bool {
    if stats.cross > 1 {
        return false;
    }
    if alive {
        stats.plane == 2 || stats.plane == 3
    } else {
        stats.plane == 3
    }
}
