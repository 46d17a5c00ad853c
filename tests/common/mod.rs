#![allow(dead_code)]

use std::fs;
use std::path::Path;

use ndarray::{Array3, Array4};

pub const T: usize = 20;
pub const H: usize = 64;
pub const W: usize = 64;

/// Value at (t, i) in the synthetic pattern, constant over each frame.
pub fn pattern_value(t: usize, i: usize) -> u8 {
    ((t * 10 + i) % 256) as u8
}

/// A (20, n, 64, 64) array where every pixel of frame t of sequence i is
/// `pattern_value(t, i)`.
pub fn patterned_raw(n: usize) -> Array4<u8> {
    Array4::from_shape_fn((T, n, H, W), |(t, i, _, _)| pattern_value(t, i))
}

/// A (20, n, 64, 64) array whose pixels differ within a frame too.
pub fn textured_raw(n: usize) -> Array4<u8> {
    Array4::from_shape_fn((T, n, H, W), |(t, i, y, x)| {
        ((t * 7 + i * 13 + y * 3 + x) % 256) as u8
    })
}

pub fn write_raw(path: &Path, raw: &Array4<u8>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    ndarray_npy::write_npy(path, raw).expect("write npy fixture");
}

pub fn write_wrong_rank(path: &Path) {
    let raw = Array3::<u8>::zeros((T, H, W));
    ndarray_npy::write_npy(path, &raw).expect("write npy fixture");
}

pub fn write_wrong_dtype(path: &Path) {
    let raw = Array4::<f32>::zeros((T, 2, H, W));
    ndarray_npy::write_npy(path, &raw).expect("write npy fixture");
}
