//! The moving point source that forces cells alive under GOLXR.

use glam::Vec3;

use crate::state::Lattice;

/// Where the spawner is and how it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnerMotion {
    /// Closed-form orbit: `(sin t, cos 0.7t, sin 0.5t) · amplitude`.
    Orbit { amplitude: f32 },
    /// Held at a caller-supplied position.
    Pinned(Vec3),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    pub motion: SpawnerMotion,
    pub radius: f32,
    pub position: Vec3,
}

impl Spawner {
    pub fn new(amplitude: f32, radius: f32) -> Self {
        let motion = SpawnerMotion::Orbit { amplitude };
        Spawner {
            motion,
            radius,
            position: orbit_position(amplitude, 0.0),
        }
    }

    /// Recompute the position for `t` seconds of elapsed time.
    pub fn update(&mut self, t: f64) {
        self.position = match self.motion {
            SpawnerMotion::Orbit { amplitude } => orbit_position(amplitude, t),
            SpawnerMotion::Pinned(p) => p,
        };
    }

    pub fn pin(&mut self, position: Vec3) {
        self.motion = SpawnerMotion::Pinned(position);
        self.position = position;
    }

    /// Return to the orbit. The position catches up on the next [`Spawner::update`].
    pub fn release(&mut self, amplitude: f32) {
        self.motion = SpawnerMotion::Orbit { amplitude };
    }

    /// Bring every dead cell within the capture radius to life with age `now_ms`.
    ///
    /// Exhaustive scan of the lattice. Returns the number of cells injected.
    pub fn inject(&self, lattice: &mut Lattice, spacing: f32, now_ms: u64) -> usize {
        let radius_sq = self.radius * self.radius;
        let mut injected = 0;

        for idx in 0..lattice.len() {
            if lattice.current[idx] != 0 {
                continue;
            }
            let (x, y, z) = lattice.coords(idx);
            let world = world_position(lattice.size, spacing, x, y, z);
            if world.distance_squared(self.position) <= radius_sq {
                lattice.activate(idx, now_ms);
                injected += 1;
            }
        }

        injected
    }
}

/// Orbit position at `t` seconds.
pub fn orbit_position(amplitude: f32, t: f64) -> Vec3 {
    Vec3::new(
        (t.sin() as f32) * amplitude,
        ((0.7 * t).cos() as f32) * amplitude,
        ((0.5 * t).sin() as f32) * amplitude,
    )
}

/// World-space centre of a cell. The lattice is centred on the origin.
pub fn world_position(size: i16, spacing: f32, x: i16, y: i16, z: i16) -> Vec3 {
    let half = (size as f32 - 1.0) / 2.0;
    Vec3::new(
        (x as f32 - half) * spacing,
        (y as f32 - half) * spacing,
        (z as f32 - half) * spacing,
    )
}
