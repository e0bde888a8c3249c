//! The simulation facade owned by the embedding application.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::automaton::{
    extract_opacity_region, extract_region, seed, step_lattice, world_position, BiasOffsets,
    OpacityMap, Spawner, StepParams, TickScheduler,
};
use crate::config::{ConfigError, EngineConfig, RuleSet};
use crate::state::Lattice;

/// Counters describing the most recent logic tick and the run so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub generation: u64,
    pub live_cells: usize,
    /// Rule-driven births in the last tick.
    pub births: usize,
    /// Rule-driven deaths in the last tick.
    pub deaths: usize,
    /// Cells forced alive by the spawner in the last tick.
    pub spawned: usize,
    /// Extinction reseeds since construction.
    pub extinctions: u64,
}

/// One entry of the renderer's draw list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellInstance {
    pub coord: (i16, i16, i16),
    pub position: Vec3,
    pub opacity: f32,
    pub alive: bool,
}

/// A running automaton: lattice, visibility, spawner, scheduler and random source.
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) lattice: Lattice,
    pub(crate) opacity: OpacityMap,
    pub(crate) spawner: Spawner,
    pub(crate) scheduler: TickScheduler,
    pub(crate) rng: ChaCha8Rng,
    origin_ms: u64,
    stats: EngineStats,
}

impl Engine {
    /// Validate `config`, allocate the lattices and seed them for the configured rule.
    ///
    /// `now_ms` is the monotonic time of construction. It stamps the seeded cells, starts
    /// the tick clock and is the zero point of the spawner orbit.
    pub fn new(config: EngineConfig, now_ms: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed_value = config.rng_seed.unwrap_or_else(rand::random);
        info!(
            grid_size = config.grid_size,
            rule = %config.rule_set,
            interval_ms = config.update_interval_ms,
            seed = seed_value,
            "creating voxel automaton"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(seed_value);
        let mut lattice = Lattice::new(config.grid_size);
        let seeded = seed(&mut lattice, config.rule_set, now_ms, &mut rng);
        let opacity = OpacityMap::new(lattice.len(), config.fade_speed);
        let spawner = Spawner::new(config.spawner_amplitude, config.spawner_radius);
        let scheduler = TickScheduler::new(config.update_interval_ms, now_ms);

        Ok(Engine {
            config,
            lattice,
            opacity,
            spawner,
            scheduler,
            rng,
            origin_ms: now_ms,
            stats: EngineStats {
                live_cells: seeded,
                ..EngineStats::default()
            },
        })
    }

    /// Per-frame entry point.
    ///
    /// Runs at most one logic tick if the update interval has elapsed, then fades every
    /// cell one step. Returns whether a logic tick ran.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        self.update_spawner(now_ms);

        let ticked = self.scheduler.poll(now_ms);
        if ticked {
            self.tick(now_ms);
        }

        self.opacity.step(&self.lattice.current);
        ticked
    }

    /// Run one logic tick immediately, bypassing the scheduler.
    pub fn tick(&mut self, now_ms: u64) {
        self.update_spawner(now_ms);

        let rule = self.config.rule_set;
        let spawned = if rule.uses_spawner() {
            self.spawner
                .inject(&mut self.lattice, self.config.cell_spacing, now_ms)
        } else {
            0
        };

        let params = StepParams {
            rule,
            bias: BiasOffsets::from_bias(self.config.bias),
            now_ms,
            memory_ms: self.config.cell_memory_ms,
        };
        let outcome = step_lattice(&mut self.lattice, params, &mut self.rng);

        let mut live_cells = self.lattice.live_count();
        if live_cells == 0 {
            live_cells = self.reseed(now_ms);
        }

        self.stats = EngineStats {
            generation: self.lattice.generation,
            live_cells,
            births: outcome.births,
            deaths: outcome.deaths,
            spawned,
            extinctions: self.stats.extinctions,
        };
        trace!(
            generation = self.stats.generation,
            live = live_cells,
            births = outcome.births,
            deaths = outcome.deaths,
            spawned,
            "logic tick"
        );
    }

    /// Wipe the lattice and seed it again. Opacity is left to fade on its own.
    fn reseed(&mut self, now_ms: u64) -> usize {
        self.lattice.clear();
        let seeded = seed(&mut self.lattice, self.config.rule_set, now_ms, &mut self.rng);
        self.stats.extinctions += 1;
        debug!(
            generation = self.lattice.generation,
            seeded,
            extinctions = self.stats.extinctions,
            "lattice went extinct, reseeding"
        );
        seeded
    }

    fn update_spawner(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.origin_ms) as f64 / 1000.0;
        self.spawner.update(elapsed);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rule_set(&self) -> RuleSet {
        self.config.rule_set
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn generation(&self) -> u64 {
        self.lattice.generation
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn live_count(&self) -> usize {
        self.lattice.live_count()
    }

    /// Whether a cell is alive. Out-of-bounds coordinates are dead.
    pub fn is_alive(&self, x: i16, y: i16, z: i16) -> bool {
        self.lattice.get(x, y, z) != 0
    }

    /// Visibility of a cell in [0, 1]. Out-of-bounds coordinates are 0.
    pub fn opacity(&self, x: i16, y: i16, z: i16) -> f32 {
        if self.lattice.in_bounds(x, y, z) {
            self.opacity.values[self.lattice.index(x, y, z)]
        } else {
            0.0
        }
    }

    /// Alive flags in lattice index order (`x*N*N + y*N + z`).
    pub fn cells(&self) -> &[u8] {
        &self.lattice.current
    }

    /// Opacities in lattice index order.
    pub fn opacities(&self) -> &[f32] {
        &self.opacity.values
    }

    /// Draw list of every cell above the visibility epsilon, in lattice index order.
    pub fn visible_cells(&self) -> Vec<CellInstance> {
        let size = self.lattice.size;
        let spacing = self.config.cell_spacing;
        (0..self.lattice.len())
            .filter(|&idx| self.opacity.is_visible(idx))
            .map(|idx| {
                let (x, y, z) = self.lattice.coords(idx);
                CellInstance {
                    coord: (x, y, z),
                    position: world_position(size, spacing, x, y, z),
                    opacity: self.opacity.values[idx],
                    alive: self.lattice.current[idx] != 0,
                }
            })
            .collect()
    }

    /// World-space centre of a cell.
    pub fn cell_position(&self, x: i16, y: i16, z: i16) -> Vec3 {
        world_position(self.lattice.size, self.config.cell_spacing, x, y, z)
    }

    /// Current spawner position. Computed under every rule, only GOLXR injects.
    pub fn spawner_position(&self) -> Vec3 {
        self.spawner.position
    }

    pub fn spawner_radius(&self) -> f32 {
        self.spawner.radius
    }

    /// Hold the spawner at `position` until [`Engine::release_spawner`].
    pub fn set_spawner_position(&mut self, position: Vec3) {
        self.spawner.pin(position);
    }

    /// Put the spawner back on its orbit.
    pub fn release_spawner(&mut self) {
        self.spawner.release(self.config.spawner_amplitude);
    }

    /// See [`crate::automaton::extract_region`].
    pub fn extract_region(
        &self,
        out_buf: &mut [u8],
        min: (i16, i16, i16),
        max: (i16, i16, i16),
    ) -> u64 {
        extract_region(&self.lattice, out_buf, min, max)
    }

    /// See [`crate::automaton::extract_opacity_region`].
    pub fn extract_opacity_region(
        &self,
        out_buf: &mut [f32],
        min: (i16, i16, i16),
        max: (i16, i16, i16),
    ) -> u64 {
        extract_opacity_region(&self.lattice, &self.opacity, out_buf, min, max)
    }
}
