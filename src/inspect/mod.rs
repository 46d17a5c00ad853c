//! Inspection of a raw sequence array.
//!
//! Produces counts, shapes and pixel statistics for a local `.npy` file
//! without writing anything.

mod report;

pub use report::{InspectReport, IntensityBucket, PixelStats};

use std::path::Path;

use ndarray::{Array4, Axis};

use crate::dataset::{load_sequences, DatasetDescriptor};
use crate::error::MovingMnistError;

/// Options for array inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Number of equal-width intensity buckets over 0..=255.
    pub buckets: usize,
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            buckets: 8,
            bar_width: 20,
        }
    }
}

/// Loads `path` the same way the adapter does and reports on it.
pub fn inspect_file(
    path: &Path,
    descriptor: &DatasetDescriptor,
    opts: &InspectOptions,
) -> Result<InspectReport, MovingMnistError> {
    let raw = load_sequences(path, descriptor)?;
    Ok(inspect_array(&raw, opts))
}

/// Reports on an in-memory (time, sequence, height, width) array.
pub fn inspect_array(raw: &Array4<u8>, opts: &InspectOptions) -> InspectReport {
    let dims = raw.shape();
    let num_sequences = raw.len_of(Axis(1));

    InspectReport {
        num_sequences,
        raw_shape: [dims[0], dims[1], dims[2], dims[3]],
        record_shape: [dims[0], dims[2], dims[3], 1],
        pixels: compute_pixel_stats(raw),
        histogram: compute_histogram(raw, opts.buckets),
        bar_width: opts.bar_width,
    }
}

fn compute_pixel_stats(raw: &Array4<u8>) -> PixelStats {
    if raw.is_empty() {
        return PixelStats::default();
    }

    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum = 0u64;
    for &value in raw.iter() {
        min = min.min(value);
        max = max.max(value);
        sum += u64::from(value);
    }

    PixelStats {
        count: raw.len(),
        min: Some(min),
        max: Some(max),
        mean: Some(sum as f64 / raw.len() as f64),
    }
}

fn compute_histogram(raw: &Array4<u8>, buckets: usize) -> Vec<IntensityBucket> {
    let buckets = buckets.clamp(1, 256);
    let mut counts = vec![0usize; buckets];
    for &value in raw.iter() {
        counts[usize::from(value) * buckets / 256] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| IntensityBucket {
            low: (i * 256 / buckets) as u8,
            high: ((i + 1) * 256 / buckets - 1) as u8,
            count,
        })
        .collect()
}
