//! Engine configuration and construction-time validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::automaton::seeding::FILL_MARGIN;

/// Largest supported lattice edge. Coordinates are stored as `i16`.
pub const MAX_GRID_SIZE: usize = 256;

/// Smallest lattice edge whose fill region `[margin, N - margin)` holds a cell.
pub const MIN_FILL_GRID_SIZE: usize = 2 * FILL_MARGIN as usize + 1;

/// Cells at or below this opacity are invisible to the renderer.
pub const VISIBILITY_EPSILON: f32 = 0.01;

/// The transition rule driving the lattice. Fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// Stochastic rule with cell memory, bias and the moving spawner.
    #[default]
    Golxr,
    /// Deterministic B6/S567.
    Life5766,
    /// Deterministic layered rule: plane-neighbors behave like 2D Life, cross-layer
    /// neighbors suppress.
    Life25D,
}

impl RuleSet {
    pub const ALL: [RuleSet; 3] = [RuleSet::Golxr, RuleSet::Life5766, RuleSet::Life25D];

    pub fn name(self) -> &'static str {
        match self {
            RuleSet::Golxr => "golxr",
            RuleSet::Life5766 => "life5766",
            RuleSet::Life25D => "life25d",
        }
    }

    /// Whether the rule is seeded by a random fill of the interior sub-cube.
    pub fn seeds_by_fill(self) -> bool {
        matches!(self, RuleSet::Life5766 | RuleSet::Life25D)
    }

    /// Whether the spawner injects cells under this rule.
    pub fn uses_spawner(self) -> bool {
        matches!(self, RuleSet::Golxr)
    }

    /// Stable numeric tag used by the C ABI.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(RuleSet::Golxr),
            1 => Some(RuleSet::Life5766),
            2 => Some(RuleSet::Life25D),
            _ => None,
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        RuleSet::ALL
            .into_iter()
            .find(|rule| rule.name() == lowered)
            .ok_or_else(|| ConfigError::UnknownRuleSet(s.to_string()))
    }
}

/// Errors that can occur when constructing an engine.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// A rule name that does not match any known rule set.
    #[error("unknown rule set `{0}` (expected golxr, life5766 or life25d)")]
    UnknownRuleSet(String),
}

/// Static configuration for an engine. Established once at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Edge length of the cubic lattice.
    pub grid_size: usize,
    /// Minimum wall-clock time between logic ticks.
    pub update_interval_ms: u64,
    /// How long a force-activated cell is kept alive under GOLXR.
    pub cell_memory_ms: u64,
    /// Skews GOLXR birth and survival, in [0, 1].
    pub bias: f32,
    /// Opacity change per frame, in (0, 1].
    pub fade_speed: f32,
    /// Capture radius of the spawner in world units.
    pub spawner_radius: f32,
    /// Amplitude of the spawner orbit in world units.
    pub spawner_amplitude: f32,
    /// Distance between adjacent cell centres in world units.
    pub cell_spacing: f32,
    pub rule_set: RuleSet,
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            update_interval_ms: 66,
            cell_memory_ms: 2000,
            bias: 0.2,
            fade_speed: 0.1,
            spawner_radius: 2.0,
            spawner_amplitude: 6.0,
            cell_spacing: 1.0,
            rule_set: RuleSet::Golxr,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration for the given rule.
    pub fn for_rule(rule_set: RuleSet) -> Self {
        Self {
            rule_set,
            ..Self::default()
        }
    }

    /// Reject degenerate configurations before any lattice is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::InvalidConfig("grid_size must be non-zero"));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::InvalidConfig("grid_size must not exceed 256"));
        }
        if self.rule_set.seeds_by_fill() && self.grid_size < MIN_FILL_GRID_SIZE {
            return Err(ConfigError::InvalidConfig(
                "grid_size must be at least 5 for life5766 and life25d",
            ));
        }
        if !self.bias.is_finite() || !(0.0..=1.0).contains(&self.bias) {
            return Err(ConfigError::InvalidConfig("bias must be between 0.0 and 1.0"));
        }
        if !self.fade_speed.is_finite() || self.fade_speed <= 0.0 || self.fade_speed > 1.0 {
            return Err(ConfigError::InvalidConfig("fade_speed must be in (0.0, 1.0]"));
        }
        if !self.spawner_radius.is_finite() || self.spawner_radius < 0.0 {
            return Err(ConfigError::InvalidConfig(
                "spawner_radius must be finite and non-negative",
            ));
        }
        if !self.spawner_amplitude.is_finite() || self.spawner_amplitude < 0.0 {
            return Err(ConfigError::InvalidConfig(
                "spawner_amplitude must be finite and non-negative",
            ));
        }
        if !self.cell_spacing.is_finite() || self.cell_spacing <= 0.0 {
            return Err(ConfigError::InvalidConfig("cell_spacing must be positive"));
        }
        Ok(())
    }
}
