//! Double-buffered lattice storage and the per-cell age map.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::MAX_GRID_SIZE;

/// The cubic lattice owned by an engine.
///
/// `current` is the state readers see. A logic tick reads only `current`, writes every
/// cell of `scratch`, then swaps the two. Both buffers always hold a defined state for
/// every coordinate.
pub struct Lattice {
    pub size: i16,
    pub current: Vec<u8>, // 0 = dead, 1 = alive
    pub scratch: Vec<u8>,
    /// Last forced activation per cell, in monotonic milliseconds. `None` = never.
    ///
    /// 16 bytes per cell: about 268 MB on a `MAX_GRID_SIZE` lattice, 128 KB at the
    /// default edge of 20.
    pub ages: Vec<Option<u64>>,
    pub generation: u64,
}

impl Lattice {
    /// Allocate an all-dead lattice. `size` must already be validated.
    pub fn new(size: usize) -> Self {
        debug_assert!(size <= MAX_GRID_SIZE, "lattice edge {size} exceeds {MAX_GRID_SIZE}");
        let len = size * size * size;
        Lattice {
            size: size as i16,
            current: vec![0; len],
            scratch: vec![0; len],
            ages: vec![None; len],
            generation: 0,
        }
    }

    /// Number of cells in one buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Linear index for a 3D coordinate: `x*N*N + y*N + z`.
    #[inline]
    pub fn index(&self, x: i16, y: i16, z: i16) -> usize {
        let n = self.size as usize;
        x as usize * n * n + y as usize * n + z as usize
    }

    /// Inverse of [`Lattice::index`].
    #[inline]
    pub fn coords(&self, idx: usize) -> (i16, i16, i16) {
        let n = self.size as usize;
        ((idx / (n * n)) as i16, ((idx / n) % n) as i16, (idx % n) as i16)
    }

    /// Check if coordinates are within lattice bounds.
    #[inline]
    pub fn in_bounds(&self, x: i16, y: i16, z: i16) -> bool {
        x >= 0 && x < self.size && y >= 0 && y < self.size && z >= 0 && z < self.size
    }

    /// Current state of a cell; out-of-bounds reads are dead.
    pub fn get(&self, x: i16, y: i16, z: i16) -> u8 {
        if self.in_bounds(x, y, z) {
            self.current[self.index(x, y, z)]
        } else {
            0
        }
    }

    /// Set a cell in `current` without touching its age. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i16, y: i16, z: i16, alive: bool) {
        if self.in_bounds(x, y, z) {
            let idx = self.index(x, y, z);
            self.current[idx] = alive as u8;
        }
    }

    /// Force a cell alive and stamp its activation time.
    #[inline]
    pub fn activate(&mut self, idx: usize, now_ms: u64) {
        self.current[idx] = 1;
        self.ages[idx] = Some(now_ms);
    }

    /// Promote `scratch` to `current`. The old `current` becomes the next scratch buffer.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.generation += 1;
    }

    /// Kill every cell and forget every activation. Used before a reseed.
    pub fn clear(&mut self) {
        self.current.fill(0);
        self.ages.fill(None);
    }

    /// Number of live cells in `current`.
    #[cfg(not(feature = "parallel"))]
    pub fn live_count(&self) -> usize {
        self.current.iter().filter(|&&c| c != 0).count()
    }

    /// Number of live cells in `current`.
    #[cfg(feature = "parallel")]
    pub fn live_count(&self) -> usize {
        self.current.par_iter().filter(|&&c| c != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lattice() {
        let lattice = Lattice::new(8);
        assert_eq!(lattice.size, 8);
        assert_eq!(lattice.len(), 512);
        assert_eq!(lattice.scratch.len(), 512);
        assert_eq!(lattice.ages.len(), 512);
        assert_eq!(lattice.generation, 0);
        assert!(lattice.current.iter().all(|&c| c == 0));
        assert!(lattice.ages.iter().all(|a| a.is_none()));
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_new_rejects_oversized_edge() {
        Lattice::new(MAX_GRID_SIZE + 1);
    }

    #[test]
    fn test_index_layout() {
        let lattice = Lattice::new(4);

        assert_eq!(lattice.index(0, 0, 0), 0);
        assert_eq!(lattice.index(3, 3, 3), 63);
        // z is the fastest axis
        assert_eq!(lattice.index(0, 0, 1), 1);
        assert_eq!(lattice.index(0, 1, 0), 4);
        assert_eq!(lattice.index(1, 0, 0), 16);
    }

    #[test]
    fn test_coords_inverts_index() {
        let lattice = Lattice::new(5);
        for idx in 0..lattice.len() {
            let (x, y, z) = lattice.coords(idx);
            assert_eq!(lattice.index(x, y, z), idx);
        }
    }

    #[test]
    fn test_in_bounds() {
        let lattice = Lattice::new(4);

        assert!(lattice.in_bounds(0, 0, 0));
        assert!(lattice.in_bounds(3, 3, 3));

        assert!(!lattice.in_bounds(-1, 0, 0));
        assert!(!lattice.in_bounds(4, 0, 0));
        assert!(!lattice.in_bounds(0, -1, 0));
        assert!(!lattice.in_bounds(0, 4, 0));
        assert!(!lattice.in_bounds(0, 0, -1));
        assert!(!lattice.in_bounds(0, 0, 4));
    }

    #[test]
    fn test_set_get_out_of_bounds() {
        let mut lattice = Lattice::new(4);
        lattice.set(1, 2, 3, true);
        assert_eq!(lattice.get(1, 2, 3), 1);

        // Should not panic
        lattice.set(-1, 0, 0, true);
        lattice.set(4, 0, 0, true);
        assert_eq!(lattice.get(-1, 0, 0), 0);
        assert_eq!(lattice.live_count(), 1);
    }

    #[test]
    fn test_swap_exchanges_buffers() {
        let mut lattice = Lattice::new(4);
        lattice.current[0] = 1;
        lattice.scratch[5] = 1;

        lattice.swap();

        assert_eq!(lattice.current[5], 1);
        assert_eq!(lattice.current[0], 0);
        assert_eq!(lattice.scratch[0], 1);
        assert_eq!(lattice.generation, 1);
    }

    #[test]
    fn test_activate_and_clear() {
        let mut lattice = Lattice::new(4);
        lattice.activate(7, 1234);
        assert_eq!(lattice.current[7], 1);
        assert_eq!(lattice.ages[7], Some(1234));

        lattice.clear();
        assert_eq!(lattice.live_count(), 0);
        assert_eq!(lattice.ages[7], None);
    }
}
