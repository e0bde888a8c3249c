//! Spawner position reads and the external stimulus.

use glam::Vec3;

use crate::engine::Engine;

/// Writes the spawner position as three floats (x, y, z) into `out_xyz`.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
/// - `out_xyz` must point to at least 3 writable floats, or be null
///
/// # Returns
/// 0 on success, 1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn vl_spawner_position(ptr: *const Engine, out_xyz: *mut f32) -> i32 {
    if ptr.is_null() || out_xyz.is_null() {
        return 1;
    }

    let out = std::slice::from_raw_parts_mut(out_xyz, 3);
    out.copy_from_slice(&(*ptr).spawner_position().to_array());
    0
}

/// Pins the spawner at a world-space position.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
#[no_mangle]
pub unsafe extern "C" fn vl_set_spawner_position(ptr: *mut Engine, x: f32, y: f32, z: f32) {
    if ptr.is_null() {
        return;
    }

    (*ptr).set_spawner_position(Vec3::new(x, y, z));
}

/// Returns the spawner to its orbit.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
#[no_mangle]
pub unsafe extern "C" fn vl_release_spawner(ptr: *mut Engine) {
    if ptr.is_null() {
        return;
    }

    (*ptr).release_spawner();
}
