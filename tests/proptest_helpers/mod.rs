#![allow(dead_code)]

use ndarray::Array4;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(16);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 256;
    config
}

/// Raw (time, n, height, width) arrays with small spatial dims and
/// arbitrary pixel values.
pub fn arb_raw(max_time: usize, max_sequences: usize) -> BoxedStrategy<Array4<u8>> {
    (1..=max_time, 0..=max_sequences, 1usize..=4, 1usize..=4)
        .prop_flat_map(|(t, n, h, w)| {
            proptest::collection::vec(any::<u8>(), t * n * h * w).prop_map(move |values| {
                Array4::from_shape_vec((t, n, h, w), values).expect("shape matches length")
            })
        })
        .boxed()
}
