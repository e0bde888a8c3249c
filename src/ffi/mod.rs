//! C FFI layer for renderers outside Rust.
//!
//! This module exports C ABI functions over an opaque `Engine` handle.
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `engine` and `automaton` modules. These functions are thin
//! wrappers that handle null checks, pointer safety, and C-to-Rust conversions.

pub mod grid;
pub mod lifecycle;
pub mod region;
pub mod spawner;

pub use grid::{vl_advance, vl_get_cell, vl_get_opacity, vl_live_count};
pub use lifecycle::{vl_create, vl_destroy, vl_get_generation, vl_grid_size};
pub use region::{vl_extract_opacity_region, vl_extract_region};
pub use spawner::{vl_release_spawner, vl_set_spawner_position, vl_spawner_position};
