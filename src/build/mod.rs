//! A minimal host that drives the adapter end to end.
//!
//! `build_dataset` runs describe, split generation and example generation,
//! then persists each split as `.npy` shards plus a `dataset_info.json`.
//! Records are consumed one at a time; at most one shard is buffered.

pub mod report;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::ops::Range;
use std::path::Path;

use ndarray::Array5;
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use serde::Serialize;

use crate::dataset::{DatasetInfo, Example, Examples, MovingMnist, Split};
use crate::download::Downloader;
use crate::error::MovingMnistError;

pub use report::{BuildReport, ShardSummary, SplitSummary};

pub const DATASET_INFO_FILE: &str = "dataset_info.json";

/// Contiguous record ranges for `num_shards` shards over `n` records.
///
/// Lengths sum to `n` and differ by at most one; shards may be empty when
/// `n < num_shards`.
pub fn shard_boundaries(n: usize, num_shards: usize) -> Vec<Range<usize>> {
    if num_shards == 0 {
        return Vec::new();
    }
    (0..num_shards)
        .map(|k| (k * n / num_shards)..((k + 1) * n / num_shards))
        .collect()
}

/// File name of shard `index` of a split.
pub fn shard_file_name(dataset: &str, split: Split, index: usize, num_shards: usize) -> String {
    format!("{dataset}-{split}.npy-{index:05}-of-{num_shards:05}")
}

/// Builds every split the adapter declares into `output_dir`.
///
/// # Errors
/// Download and deserialization errors from the adapter propagate
/// unchanged; any failure aborts the whole build.
pub fn build_dataset(
    adapter: &MovingMnist,
    downloader: &dyn Downloader,
    output_dir: &Path,
) -> Result<BuildReport, MovingMnistError> {
    let info = adapter.describe();
    let splits = adapter.split_generators(downloader)?;

    fs::create_dir_all(output_dir)?;

    let mut summaries = Vec::with_capacity(splits.len());
    for split in splits {
        let examples = adapter.generate_examples(&split.gen_kwargs.data_path)?;
        let summary = write_split(
            &info,
            split.name,
            split.num_shards,
            examples,
            output_dir,
        )?;
        summaries.push(summary);
    }

    let info_path = output_dir.join(DATASET_INFO_FILE);
    write_dataset_info(&info_path, &info, &summaries)?;

    Ok(BuildReport {
        dataset: info.descriptor.name.clone(),
        version: info.descriptor.version.clone(),
        output_dir: output_dir.to_path_buf(),
        info_path,
        splits: summaries,
    })
}

/// Writes one split's examples as `num_shards` shard files.
pub fn write_split(
    info: &DatasetInfo,
    split: Split,
    num_shards: usize,
    mut examples: Examples,
    output_dir: &Path,
) -> Result<SplitSummary, MovingMnistError> {
    let record_shape = info.descriptor.record_shape();
    let record_len: usize = record_shape.iter().product();
    let total = examples.len();

    let mut shards = Vec::with_capacity(num_shards);
    for (index, range) in shard_boundaries(total, num_shards).into_iter().enumerate() {
        let count = range.len();
        let mut buffer = Vec::with_capacity(count * record_len);
        for example in examples.by_ref().take(count) {
            push_record(&mut buffer, &example, record_shape)?;
        }

        let shape = (
            count,
            record_shape[0],
            record_shape[1],
            record_shape[2],
            record_shape[3],
        );
        let stacked = Array5::from_shape_vec(shape, buffer).map_err(|source| {
            MovingMnistError::UnsupportedFormat(format!("cannot stack shard {index}: {source}"))
        })?;

        let path = output_dir.join(shard_file_name(
            &info.descriptor.name,
            split,
            index,
            num_shards,
        ));
        write_shard(&path, &stacked)?;
        log::info!("wrote {} ({} examples)", path.display(), count);

        shards.push(ShardSummary {
            path,
            num_examples: count,
        });
    }

    Ok(SplitSummary {
        name: split,
        num_examples: total,
        shards,
    })
}

fn push_record(
    buffer: &mut Vec<u8>,
    example: &Example,
    expected: [usize; 4],
) -> Result<(), MovingMnistError> {
    if example.image_sequence.shape() != &expected[..] {
        return Err(MovingMnistError::UnsupportedFormat(format!(
            "record shape {:?} does not match feature shape {:?}",
            example.image_sequence.shape(),
            expected
        )));
    }
    // Logical (row-major) order regardless of memory layout.
    buffer.extend(example.image_sequence.iter().copied());
    Ok(())
}

fn create_output(path: &Path) -> Result<File, MovingMnistError> {
    File::create(path).map_err(|source| MovingMnistError::OutputCreate {
        path: path.to_path_buf(),
        source,
    })
}

fn write_shard(path: &Path, array: &Array5<u8>) -> Result<(), MovingMnistError> {
    let file = create_output(path)?;
    array
        .write_npy(BufWriter::new(file))
        .map_err(|source| MovingMnistError::ShardWrite {
            path: path.to_path_buf(),
            source,
        })
}

#[derive(Serialize)]
struct SplitInfoJson<'a> {
    name: Split,
    num_examples: usize,
    num_shards: usize,
    shard_lengths: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    files: Vec<&'a str>,
}

#[derive(Serialize)]
struct DatasetInfoJson<'a> {
    #[serde(flatten)]
    info: &'a DatasetInfo,
    splits: Vec<SplitInfoJson<'a>>,
}

fn write_dataset_info(
    path: &Path,
    info: &DatasetInfo,
    splits: &[SplitSummary],
) -> Result<(), MovingMnistError> {
    let doc = DatasetInfoJson {
        info,
        splits: splits
            .iter()
            .map(|split| SplitInfoJson {
                name: split.name,
                num_examples: split.num_examples,
                num_shards: split.shards.len(),
                shard_lengths: split.shard_lengths(),
                files: split
                    .shards
                    .iter()
                    .filter_map(|shard| shard.path.file_name().and_then(|name| name.to_str()))
                    .collect(),
            })
            .collect(),
    };

    let file = create_output(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &doc).map_err(|source| {
        MovingMnistError::InfoWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads back a shard written by [`write_split`].
pub fn read_shard(path: &Path) -> Result<Array5<u8>, MovingMnistError> {
    let file = File::open(path).map_err(|source| MovingMnistError::ArrayOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Array5::<u8>::read_npy(BufReader::new(file)).map_err(|source| {
        MovingMnistError::ArrayDeserialize {
            path: path.to_path_buf(),
            source,
        }
    })
}
