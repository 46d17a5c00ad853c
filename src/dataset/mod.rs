//! The Moving MNIST dataset adapter.
//!
//! The adapter has three entry points, called by a host in a fixed order:
//!
//! 1. [`MovingMnist::describe`] declares metadata and the feature schema.
//! 2. [`MovingMnist::split_generators`] fetches the published array through
//!    a [`Downloader`] and returns the single `test` split.
//! 3. [`MovingMnist::generate_examples`] turns the local file into a lazy
//!    stream of [`Example`]s.
//!
//! No state is shared between the calls other than the immutable
//! [`DatasetDescriptor`].

pub mod examples;
pub mod info;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::download::Downloader;
use crate::error::MovingMnistError;

pub use examples::{load_sequences, parse_sequences, Example, Examples};
pub use info::{DType, DatasetDescriptor, DatasetInfo, Feature, IMAGE_SEQUENCE};

/// Shard count requested for the test split.
///
/// This is a fixed policy of the host's sharding, not derived from the
/// number of sequences.
pub const TEST_NUM_SHARDS: usize = 5;

/// A named partition of a dataset.
///
/// Follows the split names hosts use. This adapter only ever emits
/// [`Split::Test`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        };
        f.write_str(name)
    }
}

/// Parameters handed back to [`MovingMnist::generate_examples`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenKwargs {
    pub data_path: PathBuf,
}

/// A split plus what the host needs to generate and shard it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitGenerator {
    pub name: Split,
    pub num_shards: usize,
    pub gen_kwargs: GenKwargs,
}

/// Adapter exposing the published Moving MNIST test sequences.
#[derive(Clone, Debug, Default)]
pub struct MovingMnist {
    descriptor: DatasetDescriptor,
}

impl MovingMnist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the array from a mirror instead of the authors' site.
    ///
    /// Only the source changes; the feature schema stays fixed.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.descriptor.source_url = url.into();
        self
    }

    pub fn descriptor(&self) -> &DatasetDescriptor {
        &self.descriptor
    }

    /// Dataset metadata and the single `image_sequence` video feature.
    pub fn describe(&self) -> DatasetInfo {
        let mut features = BTreeMap::new();
        features.insert(
            IMAGE_SEQUENCE.to_string(),
            Feature::Video {
                shape: self.descriptor.record_shape(),
                dtype: DType::U8,
            },
        );

        DatasetInfo {
            descriptor: self.descriptor.clone(),
            features,
        }
    }

    /// Downloads the source array and returns the `test` split.
    ///
    /// The authors only publish test data, so no train or validation split
    /// is produced.
    ///
    /// # Errors
    /// Propagates the downloader's error unchanged.
    pub fn split_generators(
        &self,
        downloader: &dyn Downloader,
    ) -> Result<Vec<SplitGenerator>, MovingMnistError> {
        let data_path = downloader.download(&self.descriptor.source_url)?;
        log::debug!("source array available at {}", data_path.display());

        Ok(vec![SplitGenerator {
            name: Split::Test,
            num_shards: TEST_NUM_SHARDS,
            gen_kwargs: GenKwargs { data_path },
        }])
    }

    /// Opens the local array and returns a lazy stream of examples.
    ///
    /// # Errors
    /// Returns a deserialization-class error if the file is missing,
    /// malformed, or not a (time, N, height, width) uint8 array.
    pub fn generate_examples(&self, data_path: &Path) -> Result<Examples, MovingMnistError> {
        let raw = load_sequences(data_path, &self.descriptor)?;
        let examples = Examples::from_raw(raw);
        log::debug!(
            "{} sequences in {}",
            examples.num_sequences(),
            data_path.display()
        );
        Ok(examples)
    }
}
