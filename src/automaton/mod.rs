//! Core automaton logic.
//!
//! Each submodule owns one concern of a logic tick or frame. The [`crate::engine`]
//! facade wires them together and the FFI layer in `ffi/` calls the facade.

pub mod fade;
pub mod grid;
pub mod region;
pub mod rules;
pub mod scheduler;
pub mod seeding;
pub mod spawner;
pub mod stepping;

pub use fade::OpacityMap;
pub use grid::{count_neighbors, NeighborStats};
pub use region::{extract_opacity_region, extract_region, Region};
pub use rules::{AgeGate, BiasOffsets};
pub use scheduler::TickScheduler;
pub use seeding::seed;
pub use spawner::{world_position, Spawner, SpawnerMotion};
pub use stepping::{step_lattice, StepOutcome, StepParams};
