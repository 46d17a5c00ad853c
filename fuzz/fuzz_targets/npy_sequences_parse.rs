//! Fuzz target for sequence array deserialization.
//!
//! This fuzzer feeds arbitrary byte sequences to the `.npy` sequence
//! parser, checking for panics, crashes, or hangs.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use moving_mnist::dataset::{parse_sequences, DatasetDescriptor, Examples};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let descriptor = DatasetDescriptor::default();
    if let Ok(raw) = parse_sequences(data, &descriptor, Path::new("<fuzz>")) {
        for example in Examples::from_raw(raw) {
            let _ = example.frame(0);
        }
    }
});
