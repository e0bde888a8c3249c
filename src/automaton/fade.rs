//! Per-cell visibility that trails the logic state by a fixed step per frame.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::VISIBILITY_EPSILON;

/// Accumulated float error this close to a bound snaps onto the bound.
const FADE_SNAP: f32 = 1e-6;

pub struct OpacityMap {
    pub values: Vec<f32>,
    pub fade_speed: f32,
}

impl OpacityMap {
    /// All cells start fully transparent.
    pub fn new(len: usize, fade_speed: f32) -> Self {
        OpacityMap {
            values: vec![0.0; len],
            fade_speed,
        }
    }

    /// Move every opacity one step toward 1 (alive) or 0 (dead).
    pub fn step(&mut self, cells: &[u8]) {
        fade_all(&mut self.values, cells, self.fade_speed);
    }

    #[inline]
    pub fn is_visible(&self, idx: usize) -> bool {
        self.values[idx] > VISIBILITY_EPSILON
    }

    pub fn visible_count(&self) -> usize {
        self.values.iter().filter(|&&o| o > VISIBILITY_EPSILON).count()
    }
}

#[cfg(not(feature = "parallel"))]
fn fade_all(values: &mut [f32], cells: &[u8], speed: f32) {
    for (opacity, &cell) in values.iter_mut().zip(cells) {
        *opacity = fade(*opacity, cell != 0, speed);
    }
}

#[cfg(feature = "parallel")]
fn fade_all(values: &mut [f32], cells: &[u8], speed: f32) {
    values
        .par_iter_mut()
        .zip(cells.par_iter())
        .for_each(|(opacity, &cell)| *opacity = fade(*opacity, cell != 0, speed));
}

/// One fade step for a single cell.
#[inline]
pub fn fade(opacity: f32, alive: bool, speed: f32) -> f32 {
    if alive {
        if opacity >= 1.0 {
            return 1.0;
        }
        let next = opacity + speed;
        if next >= 1.0 - FADE_SNAP {
            1.0
        } else {
            next
        }
    } else {
        if opacity <= 0.0 {
            return 0.0;
        }
        let next = opacity - speed;
        if next <= FADE_SNAP {
            0.0
        } else {
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_reaches_one() {
        let speed = 0.1;
        let frames = (1.0f32 / speed).ceil() as usize;
        let mut map = OpacityMap::new(1, speed);

        let mut previous = 0.0;
        for _ in 0..frames {
            map.step(&[1]);
            assert!(map.values[0] >= previous);
            previous = map.values[0];
        }
        assert_eq!(map.values[0], 1.0);

        map.step(&[1]);
        assert_eq!(map.values[0], 1.0);
    }

    #[test]
    fn test_fade_out_reaches_zero() {
        let mut map = OpacityMap::new(1, 0.3);
        map.values[0] = 1.0;

        for _ in 0..4 {
            map.step(&[0]);
            assert!((0.0..=1.0).contains(&map.values[0]));
        }
        assert_eq!(map.values[0], 0.0);
    }

    #[test]
    fn test_awkward_speeds_stay_in_range() {
        for speed in [0.07f32, 0.1, 0.13, 1.0 / 3.0, 0.9, 1.0] {
            let frames = (1.0 / speed).ceil() as usize;
            let mut opacity = 0.0;
            for _ in 0..frames {
                opacity = fade(opacity, true, speed);
                assert!((0.0..=1.0).contains(&opacity));
            }
            assert_eq!(opacity, 1.0, "speed {speed}");
            for _ in 0..frames {
                opacity = fade(opacity, false, speed);
                assert!((0.0..=1.0).contains(&opacity));
            }
            assert_eq!(opacity, 0.0, "speed {speed}");
        }
    }

    #[test]
    fn test_visibility_epsilon() {
        let mut map = OpacityMap::new(3, 0.1);
        map.values[0] = 0.01;
        map.values[1] = 0.011;
        map.values[2] = 0.0;

        assert!(!map.is_visible(0));
        assert!(map.is_visible(1));
        assert!(!map.is_visible(2));
        assert_eq!(map.visible_count(), 1);
    }

    #[test]
    fn test_mixed_cells() {
        let mut map = OpacityMap::new(2, 0.25);
        map.values[1] = 0.5;
        map.step(&[1, 0]);
        assert_eq!(map.values[0], 0.25);
        assert_eq!(map.values[1], 0.25);
    }
}
