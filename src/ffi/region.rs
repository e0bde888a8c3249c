//! Region extraction FFI functions.

use crate::engine::Engine;

/// Buffer length a `[min, max)` box needs before clamping.
fn requested_volume(min: (i16, i16, i16), max: (i16, i16, i16)) -> usize {
    let width = (max.0 as i32 - min.0 as i32).max(0) as usize;
    let height = (max.1 as i32 - min.1 as i32).max(0) as usize;
    let depth = (max.2 as i32 - min.2 as i32).max(0) as usize;
    width * height * depth
}

/// Extracts alive flags of a box into a flat output buffer.
///
/// # Layout
/// The buffer is filled in z,y,x order (z changes slowest, x changes fastest), over the
/// box clamped to the lattice.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
/// - `out_buf` must point to a buffer with at least
///   `(max_x - min_x) * (max_y - min_y) * (max_z - min_z)` bytes
///
/// # Returns
/// Number of bytes written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn vl_extract_region(
    ptr: *const Engine,
    out_buf: *mut u8,
    min_x: i16,
    min_y: i16,
    min_z: i16,
    max_x: i16,
    max_y: i16,
    max_z: i16,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let min = (min_x, min_y, min_z);
    let max = (max_x, max_y, max_z);
    let len = requested_volume(min, max);
    if len == 0 {
        return 0;
    }

    let buf_slice = std::slice::from_raw_parts_mut(out_buf, len);
    (*ptr).extract_region(buf_slice, min, max)
}

/// Extracts opacities of a box into a flat `f32` output buffer.
///
/// # Layout
/// Same as `vl_extract_region`.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Engine, or null
/// - `out_buf` must point to a buffer with at least
///   `(max_x - min_x) * (max_y - min_y) * (max_z - min_z)` floats
///
/// # Returns
/// Number of floats written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn vl_extract_opacity_region(
    ptr: *const Engine,
    out_buf: *mut f32,
    min_x: i16,
    min_y: i16,
    min_z: i16,
    max_x: i16,
    max_y: i16,
    max_z: i16,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let min = (min_x, min_y, min_z);
    let max = (max_x, max_y, max_z);
    let len = requested_volume(min, max);
    if len == 0 {
        return 0;
    }

    let buf_slice = std::slice::from_raw_parts_mut(out_buf, len);
    (*ptr).extract_opacity_region(buf_slice, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{grid, lifecycle};
    use std::ptr;

    #[test]
    fn test_extract_full_grid() {
        unsafe {
            let engine = lifecycle::vl_create(4, 0, 5, 0);
            let mut buffer = vec![0u8; 64];

            let written = vl_extract_region(engine, buffer.as_mut_ptr(), 0, 0, 0, 4, 4, 4);

            assert_eq!(written, 64);
            let alive = buffer.iter().filter(|&&c| c == 1).count() as u64;
            assert_eq!(alive, grid::vl_live_count(engine));

            lifecycle::vl_destroy(engine);
        }
    }

    #[test]
    fn test_extract_opacity() {
        unsafe {
            let engine = lifecycle::vl_create(4, 0, 5, 0);
            grid::vl_advance(engine, 1);

            let mut buffer = vec![0.0f32; 8];
            let written =
                vl_extract_opacity_region(engine, buffer.as_mut_ptr(), 1, 1, 1, 3, 3, 3);

            assert_eq!(written, 8);
            // (2,2,2) is the seeded center, last entry of the box
            assert!(buffer[7] > 0.0);

            lifecycle::vl_destroy(engine);
        }
    }

    #[test]
    fn test_extract_empty_region() {
        unsafe {
            let engine = lifecycle::vl_create(4, 0, 5, 0);
            let mut buffer = vec![0u8; 8];

            assert_eq!(
                vl_extract_region(engine, buffer.as_mut_ptr(), 3, 3, 3, 1, 1, 1),
                0
            );

            lifecycle::vl_destroy(engine);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            let mut buffer = vec![0u8; 8];
            assert_eq!(
                vl_extract_region(ptr::null(), buffer.as_mut_ptr(), 0, 0, 0, 2, 2, 2),
                0
            );

            let engine = lifecycle::vl_create(4, 0, 5, 0);
            assert_eq!(
                vl_extract_region(engine, ptr::null_mut(), 0, 0, 0, 2, 2, 2),
                0
            );
            assert_eq!(
                vl_extract_opacity_region(engine, ptr::null_mut(), 0, 0, 0, 2, 2, 2),
                0
            );
            lifecycle::vl_destroy(engine);
        }
    }
}
