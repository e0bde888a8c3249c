//! Engine creation, destruction, and generation queries.

use tracing::warn;

use crate::config::{EngineConfig, RuleSet};
use crate::engine::Engine;

/// Creates a new engine and returns an opaque pointer.
///
/// `rule` is 0 = GOLXR, 1 = LIFE_5766, 2 = LIFE_25D. A `seed` of 0 draws a seed from
/// entropy. `now_ms` is the caller's monotonic clock and must be the same clock later
/// passed to `vl_advance`. All other settings take their defaults.
///
/// # Returns
/// A pointer to a new Engine, or null for an unknown rule or invalid grid size.
///
/// # Safety
/// The returned pointer must eventually be freed with `vl_destroy()`.
#[no_mangle]
pub extern "C" fn vl_create(grid_size: u16, rule: u8, seed: u64, now_ms: u64) -> *mut Engine {
    let rule_set = match RuleSet::from_tag(rule) {
        Some(r) => r,
        None => {
            warn!(rule, "vl_create: unknown rule tag");
            return std::ptr::null_mut();
        }
    };

    let config = EngineConfig {
        grid_size: grid_size as usize,
        rule_set,
        rng_seed: (seed != 0).then_some(seed),
        ..EngineConfig::default()
    };

    match Engine::new(config, now_ms) {
        Ok(engine) => Box::into_raw(Box::new(engine)),
        Err(err) => {
            warn!(%err, "vl_create: rejected configuration");
            std::ptr::null_mut()
        }
    }
}

/// Destroys an engine and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vl_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn vl_destroy(ptr: *mut Engine) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the current generation counter.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn vl_get_generation(ptr: *const Engine) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}

/// Gets the lattice edge length.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
///
/// # Returns
/// The grid size, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn vl_grid_size(ptr: *const Engine) -> u16 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).grid_size() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_create_and_destroy() {
        unsafe {
            let engine = vl_create(8, 0, 1, 0);
            assert!(!engine.is_null());
            assert_eq!(vl_grid_size(engine), 8);

            // Should not crash
            vl_destroy(engine);
        }
    }

    #[test]
    fn test_initial_generation() {
        unsafe {
            let engine = vl_create(8, 1, 1, 0);
            assert_eq!(vl_get_generation(engine), 0);
            vl_destroy(engine);
        }
    }

    #[test]
    fn test_create_rejects_bad_input() {
        assert!(vl_create(0, 0, 1, 0).is_null());
        assert!(vl_create(8, 3, 1, 0).is_null());
        assert!(vl_create(1000, 0, 1, 0).is_null());
        // Fill rules have no interior to seed on a 4³ lattice
        assert!(vl_create(4, 1, 1, 0).is_null());
        assert!(vl_create(4, 2, 1, 0).is_null());
    }

    #[test]
    fn test_null_handles() {
        unsafe {
            // Should not crash
            vl_destroy(ptr::null_mut());
            assert_eq!(vl_get_generation(ptr::null()), 0);
            assert_eq!(vl_grid_size(ptr::null()), 0);
        }
    }
}
