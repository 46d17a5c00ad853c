//! Deserialization of the raw sequence array and lazy record iteration.
//!
//! The published file stores frames as (time, sequence, height, width).
//! Records are produced one sequence at a time as (time, height, width, 1)
//! without materializing the whole transposed array.

use std::fs::File;
use std::io::{BufReader, Read};
use std::iter::FusedIterator;
use std::path::Path;

use ndarray::{Array4, ArrayView3, Axis};
use ndarray_npy::ReadNpyExt;

use super::info::DatasetDescriptor;
use crate::error::MovingMnistError;

const TIME_AXIS: Axis = Axis(0);
const SEQUENCE_AXIS: Axis = Axis(1);

/// One output record: a single full video sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Example {
    /// Shape (time, height, width, 1), uint8.
    pub image_sequence: Array4<u8>,
}

impl Example {
    /// Frame `t` as (height, width, 1).
    pub fn frame(&self, t: usize) -> ArrayView3<'_, u8> {
        self.image_sequence.index_axis(Axis(0), t)
    }
}

/// Reads a raw (time, sequence, height, width) uint8 array from a `.npy` file.
///
/// # Errors
/// Returns a deserialization-class error if the file cannot be opened, is
/// not a well-formed `.npy` array, has the wrong rank or dtype, or its
/// time/height/width dimensions disagree with the descriptor.
pub fn load_sequences(
    path: &Path,
    descriptor: &DatasetDescriptor,
) -> Result<Array4<u8>, MovingMnistError> {
    let file = File::open(path).map_err(|source| MovingMnistError::ArrayOpen {
        path: path.to_path_buf(),
        source,
    })?;

    parse_sequences(BufReader::new(file), descriptor, path)
}

/// Parses `.npy` bytes from any reader; `origin` names the source in errors.
pub fn parse_sequences<R: Read>(
    reader: R,
    descriptor: &DatasetDescriptor,
    origin: &Path,
) -> Result<Array4<u8>, MovingMnistError> {
    let raw = Array4::<u8>::read_npy(reader).map_err(|source| {
        MovingMnistError::ArrayDeserialize {
            path: origin.to_path_buf(),
            source,
        }
    })?;

    let (height, width) = descriptor.resolution;
    let dims = raw.shape();
    log::debug!("loaded {} with shape {:?}", origin.display(), dims);
    if dims[0] != descriptor.sequence_length || dims[2] != height || dims[3] != width {
        return Err(MovingMnistError::ArrayShape {
            path: origin.to_path_buf(),
            expected: format!(
                "({}, N, {}, {})",
                descriptor.sequence_length, height, width
            ),
            found: dims.to_vec(),
        });
    }

    Ok(raw)
}

/// Finite, single-pass iterator over the sequences of a raw array.
///
/// Yields sequences in the order they appear along the sequence axis. The
/// raw array is released once the last record has been produced.
#[derive(Debug)]
pub struct Examples {
    raw: Option<Array4<u8>>,
    next: usize,
    len: usize,
}

impl Examples {
    /// Wraps an in-memory (time, sequence, height, width) array.
    pub fn from_raw(raw: Array4<u8>) -> Self {
        let len = raw.len_of(SEQUENCE_AXIS);
        Self {
            raw: Some(raw),
            next: 0,
            len,
        }
    }

    /// Total number of sequences in the source array.
    pub fn num_sequences(&self) -> usize {
        self.len
    }

    /// Record shape (time, height, width, 1) of the source array.
    pub fn record_shape(&self) -> Option<[usize; 4]> {
        self.raw.as_ref().map(|raw| {
            let dims = raw.shape();
            [dims[0], dims[2], dims[3], 1]
        })
    }
}

impl Iterator for Examples {
    type Item = Example;

    fn next(&mut self) -> Option<Example> {
        let raw = self.raw.as_ref()?;
        if self.next >= self.len {
            self.raw = None;
            return None;
        }

        // (time, h, w) -> (time, h, w, 1)
        let image_sequence = raw
            .index_axis(SEQUENCE_AXIS, self.next)
            .insert_axis(Axis(3))
            .to_owned();
        debug_assert_eq!(image_sequence.len_of(TIME_AXIS), raw.len_of(TIME_AXIS));

        self.next += 1;
        if self.next == self.len {
            self.raw = None;
        }
        Some(Example { image_sequence })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Examples {}

impl FusedIterator for Examples {}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    fn patterned(t: usize, n: usize, h: usize, w: usize) -> Array4<u8> {
        Array4::from_shape_fn((t, n, h, w), |(t, i, y, x)| {
            ((t * 100 + i * 10 + y + x) % 256) as u8
        })
    }

    #[test]
    fn yields_one_record_per_sequence_in_order() {
        let raw = patterned(4, 3, 2, 2);
        let examples = Examples::from_raw(raw.clone());
        assert_eq!(examples.len(), 3);

        let records: Vec<Example> = examples.collect();
        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.image_sequence.shape(), &[4, 2, 2, 1]);
            for t in 0..4 {
                let expected = raw.index_axis(Axis(0), t).index_axis(Axis(0), i).to_owned();
                assert_eq!(record.frame(t).index_axis(Axis(2), 0), expected);
            }
        }
    }

    #[test]
    fn releases_source_after_exhaustion() {
        let mut examples = Examples::from_raw(patterned(2, 1, 2, 2));
        assert_eq!(examples.record_shape(), Some([2, 2, 2, 1]));
        assert!(examples.next().is_some());
        assert_eq!(examples.record_shape(), None);
        assert!(examples.next().is_none());
        assert!(examples.next().is_none());
        assert_eq!(examples.num_sequences(), 1);
    }

    #[test]
    fn empty_sequence_axis_yields_nothing() {
        let mut examples = Examples::from_raw(Array4::zeros((20, 0, 64, 64)));
        assert_eq!(examples.len(), 0);
        assert!(examples.next().is_none());
    }

    #[test]
    fn size_hint_tracks_progress() {
        let mut examples = Examples::from_raw(patterned(2, 3, 1, 1));
        examples.next();
        assert_eq!(examples.size_hint(), (2, Some(2)));
        assert_eq!(examples.len(), 2);
    }
}
