//! Initial and post-extinction population of the lattice.

use rand::Rng;

use crate::config::RuleSet;
use crate::state::Lattice;

/// Number of random cells scattered around the GOLXR cross.
pub const GOLXR_SCATTER_COUNT: usize = 50;
/// Half-width of the cube the GOLXR scatter is drawn from.
pub const GOLXR_SCATTER_RADIUS: i16 = 5;
/// Cells left empty along every face for the Bernoulli-filled rules.
pub const FILL_MARGIN: i16 = 2;

/// Center plus its six face neighbors.
const CROSS_OFFSETS: [(i16, i16, i16); 7] = [
    (0, 0, 0),
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Seed the lattice for `rule`, stamping every seeded cell with `now_ms`.
///
/// Cells that are already alive stay alive. Returns the number of cells activated.
pub fn seed<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    rule: RuleSet,
    now_ms: u64,
    rng: &mut R,
) -> usize {
    match rule {
        RuleSet::Golxr => seed_cross_scatter(lattice, now_ms, rng),
        RuleSet::Life5766 => seed_fill(lattice, 0.2, now_ms, rng),
        RuleSet::Life25D => seed_fill(lattice, 0.3, now_ms, rng),
    }
}

/// Fixed 7-cell cross at the center and a random scatter within ±5 of it.
/// Scatter cells falling outside the lattice are dropped.
pub fn seed_cross_scatter<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    now_ms: u64,
    rng: &mut R,
) -> usize {
    let c = lattice.size / 2;
    let mut seeded = 0;

    for (dx, dy, dz) in CROSS_OFFSETS {
        seeded += activate_at(lattice, c + dx, c + dy, c + dz, now_ms);
    }

    let r = GOLXR_SCATTER_RADIUS;
    for _ in 0..GOLXR_SCATTER_COUNT {
        let x = c + rng.random_range(-r..=r);
        let y = c + rng.random_range(-r..=r);
        let z = c + rng.random_range(-r..=r);
        seeded += activate_at(lattice, x, y, z, now_ms);
    }

    seeded
}

/// Independent Bernoulli fill of the centered sub-cube `[margin, N - margin)³`.
///
/// The sub-cube is empty below [`crate::config::MIN_FILL_GRID_SIZE`], which
/// `EngineConfig::validate` rejects for the fill rules.
pub fn seed_fill<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    density: f64,
    now_ms: u64,
    rng: &mut R,
) -> usize {
    let lo = FILL_MARGIN;
    let hi = lattice.size - FILL_MARGIN;
    let mut seeded = 0;

    for x in lo..hi {
        for y in lo..hi {
            for z in lo..hi {
                if rng.random_bool(density) {
                    seeded += activate_at(lattice, x, y, z, now_ms);
                }
            }
        }
    }

    seeded
}

/// Returns 1 if a dead cell was brought to life, 0 otherwise (out of bounds or already alive).
fn activate_at(lattice: &mut Lattice, x: i16, y: i16, z: i16, now_ms: u64) -> usize {
    if !lattice.in_bounds(x, y, z) {
        return 0;
    }
    let idx = lattice.index(x, y, z);
    let was_dead = lattice.current[idx] == 0;
    lattice.activate(idx, now_ms);
    was_dead as usize
}
