//! Frame advance and per-cell reads.

use crate::engine::Engine;

/// Per-frame entry point: maybe one logic tick, always one fade step.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
///
/// # Returns
/// 1 if a logic tick ran, 0 otherwise (including null pointer).
#[no_mangle]
pub unsafe extern "C" fn vl_advance(ptr: *mut Engine, now_ms: u64) -> u8 {
    if ptr.is_null() {
        return 0;
    }

    let engine = &mut *ptr;
    engine.advance(now_ms) as u8
}

/// Gets the state of a cell (0 = dead, 1 = alive).
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
///
/// # Returns
/// 0 if out of bounds, null pointer, or dead; 1 if alive.
#[no_mangle]
pub unsafe extern "C" fn vl_get_cell(ptr: *const Engine, x: i16, y: i16, z: i16) -> u8 {
    if ptr.is_null() {
        return 0;
    }

    (*ptr).is_alive(x, y, z) as u8
}

/// Gets the visibility of a cell in [0, 1].
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
///
/// # Returns
/// 0.0 if out of bounds or null pointer.
#[no_mangle]
pub unsafe extern "C" fn vl_get_opacity(ptr: *const Engine, x: i16, y: i16, z: i16) -> f32 {
    if ptr.is_null() {
        return 0.0;
    }

    (*ptr).opacity(x, y, z)
}

/// Number of live cells.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
#[no_mangle]
pub unsafe extern "C" fn vl_live_count(ptr: *const Engine) -> u64 {
    if ptr.is_null() {
        return 0;
    }

    (*ptr).live_count() as u64
}
