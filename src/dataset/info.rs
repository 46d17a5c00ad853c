//! Static dataset metadata: descriptor, feature schema, and the
//! serializable `DatasetInfo` returned by [`MovingMnist::describe`].
//!
//! [`MovingMnist::describe`]: super::MovingMnist::describe

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of the only feature in every example.
pub const IMAGE_SEQUENCE: &str = "image_sequence";

pub const DATASET_NAME: &str = "moving_mnist";
pub const DATASET_VERSION: &str = "0.1.0";

pub const OUT_RESOLUTION: (usize, usize) = (64, 64);
pub const SEQUENCE_LENGTH: usize = 20;
pub const CHANNELS: usize = 1;

pub const HOMEPAGE: &str = "http://www.cs.toronto.edu/~nitish/unsupervised_video/";
pub const SOURCE_URL: &str =
    "http://www.cs.toronto.edu/~nitish/unsupervised_video/mnist_test_seq.npy";

pub const DESCRIPTION: &str = "Moving variant of MNIST database of handwritten digits. This is the \
data used by the authors for reporting model performance. Training and validation data can be \
generated from the MNIST dataset with a moving-sequence mapping, which is not part of this crate.";

pub const CITATION: &str = r#"@article{DBLP:journals/corr/SrivastavaMS15,
  author    = {Nitish Srivastava and
               Elman Mansimov and
               Ruslan Salakhutdinov},
  title     = {Unsupervised Learning of Video Representations using LSTMs},
  journal   = {CoRR},
  volume    = {abs/1502.04681},
  year      = {2015},
  url       = {http://arxiv.org/abs/1502.04681},
  archivePrefix = {arXiv},
  eprint    = {1502.04681},
  timestamp = {Mon, 13 Aug 2018 16:47:05 +0200},
  biburl    = {https://dblp.org/rec/bib/journals/corr/SrivastavaMS15},
  bibsource = {dblp computer science bibliography, https://dblp.org}
}"#;

/// Immutable metadata describing the published Moving MNIST test file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub name: String,
    pub version: String,
    /// Frame resolution as (height, width).
    pub resolution: (usize, usize),
    /// Frames per sequence.
    pub sequence_length: usize,
    pub channels: usize,
    pub source_url: String,
    pub homepage: String,
    pub description: String,
    pub citation: String,
}

impl Default for DatasetDescriptor {
    fn default() -> Self {
        Self {
            name: DATASET_NAME.to_string(),
            version: DATASET_VERSION.to_string(),
            resolution: OUT_RESOLUTION,
            sequence_length: SEQUENCE_LENGTH,
            channels: CHANNELS,
            source_url: SOURCE_URL.to_string(),
            homepage: HOMEPAGE.to_string(),
            description: DESCRIPTION.to_string(),
            citation: CITATION.to_string(),
        }
    }
}

impl DatasetDescriptor {
    /// Shape of one record: (time, height, width, channels).
    pub fn record_shape(&self) -> [usize; 4] {
        [
            self.sequence_length,
            self.resolution.0,
            self.resolution.1,
            self.channels,
        ]
    }
}

/// Element type of a tensor feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    #[serde(rename = "uint8")]
    U8,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::U8 => write!(f, "uint8"),
        }
    }
}

/// A typed feature in the output schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Feature {
    /// A video tensor of shape (frames, height, width, channels).
    Video { shape: [usize; 4], dtype: DType },
}

impl Feature {
    pub fn shape(&self) -> &[usize] {
        match self {
            Feature::Video { shape, .. } => shape,
        }
    }
}

/// Everything the host needs to know about the dataset before building it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    #[serde(flatten)]
    pub descriptor: DatasetDescriptor,
    pub features: BTreeMap<String, Feature>,
}

impl DatasetInfo {
    pub fn image_sequence(&self) -> Option<&Feature> {
        self.features.get(IMAGE_SEQUENCE)
    }
}

impl fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.descriptor;
        writeln!(f, "{} v{}", d.name, d.version)?;
        writeln!(f)?;
        writeln!(f, "{}", d.description)?;
        writeln!(f)?;
        writeln!(f, "Homepage: {}", d.homepage)?;
        writeln!(f, "Source:   {}", d.source_url)?;
        writeln!(f)?;
        writeln!(f, "Features:")?;
        for (name, feature) in &self.features {
            match feature {
                Feature::Video { shape, dtype } => {
                    writeln!(f, "  {name}: Video{shape:?} {dtype}")?;
                }
            }
        }
        writeln!(f)?;
        writeln!(f, "Citation:")?;
        writeln!(f, "{}", d.citation)
    }
}
