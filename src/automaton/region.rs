//! Region extraction for renderers that pull state in boxes.

use super::fade::OpacityMap;
use crate::state::Lattice;

/// An axis-aligned box `[min, max)` clamped to the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min: (i16, i16, i16),
    pub max: (i16, i16, i16),
}

impl Region {
    /// Clamp the box to `[0, size)`. Returns `None` for empty or inverted boxes.
    pub fn clamped(
        size: i16,
        min: (i16, i16, i16),
        max: (i16, i16, i16),
    ) -> Option<Region> {
        let clamp = |v: i16| v.max(0).min(size);
        let min = (clamp(min.0), clamp(min.1), clamp(min.2));
        let max = (clamp(max.0), clamp(max.1), clamp(max.2));

        if min.0 >= max.0 || min.1 >= max.1 || min.2 >= max.2 {
            return None;
        }
        Some(Region { min, max })
    }

    pub fn volume(&self) -> usize {
        (self.max.0 - self.min.0) as usize
            * (self.max.1 - self.min.1) as usize
            * (self.max.2 - self.min.2) as usize
    }
}

/// Extract alive flags of a box into `out_buf`.
///
/// # Layout
/// The buffer is filled in z,y,x order (z changes slowest, x changes fastest).
///
/// # Returns
/// Number of cells written, or 0 if the box is empty or the buffer too small.
pub fn extract_region(
    lattice: &Lattice,
    out_buf: &mut [u8],
    min: (i16, i16, i16),
    max: (i16, i16, i16),
) -> u64 {
    extract_with(lattice, out_buf, min, max, |idx| lattice.current[idx])
}

/// Extract opacities of a box into `out_buf`, same layout as [`extract_region`].
pub fn extract_opacity_region(
    lattice: &Lattice,
    opacity: &OpacityMap,
    out_buf: &mut [f32],
    min: (i16, i16, i16),
    max: (i16, i16, i16),
) -> u64 {
    extract_with(lattice, out_buf, min, max, |idx| opacity.values[idx])
}

fn extract_with<T>(
    lattice: &Lattice,
    out_buf: &mut [T],
    min: (i16, i16, i16),
    max: (i16, i16, i16),
    read: impl Fn(usize) -> T,
) -> u64 {
    let region = match Region::clamped(lattice.size, min, max) {
        Some(r) => r,
        None => return 0,
    };

    // Ensure buffer is large enough
    if out_buf.len() < region.volume() {
        return 0;
    }

    let mut offset = 0;
    for z in region.min.2..region.max.2 {
        for y in region.min.1..region.max.1 {
            for x in region.min.0..region.max.0 {
                out_buf[offset] = read(lattice.index(x, y, z));
                offset += 1;
            }
        }
    }

    offset as u64
}
