//! Build report types and terminal formatting.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::dataset::Split;

/// The result of building a dataset.
#[derive(Clone, Debug, Serialize)]
pub struct BuildReport {
    pub dataset: String,
    pub version: String,
    pub output_dir: PathBuf,
    /// Path of the written `dataset_info.json`.
    pub info_path: PathBuf,
    pub splits: Vec<SplitSummary>,
}

/// What was written for one split.
#[derive(Clone, Debug, Serialize)]
pub struct SplitSummary {
    pub name: Split,
    pub num_examples: usize,
    pub shards: Vec<ShardSummary>,
}

/// One shard file on disk.
#[derive(Clone, Debug, Serialize)]
pub struct ShardSummary {
    pub path: PathBuf,
    pub num_examples: usize,
}

impl SplitSummary {
    pub fn shard_lengths(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.num_examples).collect()
    }
}

impl BuildReport {
    pub fn total_examples(&self) -> usize {
        self.splits.iter().map(|split| split.num_examples).sum()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Built {} v{} into {}",
            self.dataset,
            self.version,
            self.output_dir.display()
        )?;
        writeln!(f)?;

        for split in &self.splits {
            writeln!(
                f,
                "  {}: {} example(s) in {} shard(s)",
                split.name,
                split.num_examples,
                split.shards.len()
            )?;
            for shard in &split.shards {
                let name = shard
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default();
                writeln!(f, "    {:<40} {:>6}", name, shard.num_examples)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Dataset info: {}", self.info_path.display())
    }
}
