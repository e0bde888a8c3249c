//! Moore-neighborhood statistics over the current buffer.

use crate::state::Lattice;

/// Live-neighbor counts for one cell, split by layer.
///
/// `plane` counts neighbors sharing the cell's z, `cross` counts the other two layers.
/// Rules that only care about the full neighborhood read [`NeighborStats::total`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborStats {
    pub plane: u8,
    pub cross: u8,
}

impl NeighborStats {
    #[inline]
    pub fn total(self) -> u8 {
        self.plane + self.cross
    }
}

/// Count alive neighbors using Moore neighborhood (26 neighbors).
///
/// Reads `lattice.current` only. Neighbors outside the lattice are absent, there is no
/// wraparound.
pub fn count_neighbors(lattice: &Lattice, x: i16, y: i16, z: i16) -> NeighborStats {
    count_in(&lattice.current, lattice, x, y, z)
}

/// Same as [`count_neighbors`] against an arbitrary buffer with the lattice's layout.
pub fn count_in(cells: &[u8], lattice: &Lattice, x: i16, y: i16, z: i16) -> NeighborStats {
    let mut stats = NeighborStats::default();

    for dx in -1..=1 {
        for dy in -1..=1 {
            for dz in -1..=1 {
                // Skip the center cell
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }

                let nx = x + dx;
                let ny = y + dy;
                let nz = z + dz;

                if !lattice.in_bounds(nx, ny, nz) {
                    continue;
                }

                let alive = cells[lattice.index(nx, ny, nz)];
                if dz == 0 {
                    stats.plane += alive;
                } else {
                    stats.cross += alive;
                }
            }
        }
    }

    stats
}
