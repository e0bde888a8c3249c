//! Voxel Life - 3D Cellular Automaton Engine
//!
//! A fixed-size cubic lattice advanced by one of three transition rules, with per-cell
//! memory, a moving spawner, per-frame opacity fading and automatic reseeding on
//! extinction. Rendering is left to the host, which drives [`Engine::advance`] once per
//! frame and reads alive flags and opacities back.
//!
//! The library also provides a C ABI (see [`ffi`]) for hosts outside Rust.

pub mod automaton;
pub mod config;
pub mod engine;
pub mod ffi;
pub mod state;


pub use config::{ConfigError, EngineConfig, RuleSet, MAX_GRID_SIZE, VISIBILITY_EPSILON};
pub use engine::{CellInstance, Engine, EngineStats};
pub use glam::Vec3;
