use moving_mnist::build::{build_dataset, read_shard, shard_file_name, DATASET_INFO_FILE};
use moving_mnist::dataset::{MovingMnist, Split};
use moving_mnist::download::PrefetchedDownloader;
use ndarray::Axis;

mod common;

#[test]
fn build_writes_five_shards_that_reproduce_records_in_order() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let source = temp.path().join("downloads").join("mnist_test_seq.npy");
    let raw = common::textured_raw(7);
    common::write_raw(&source, &raw);
    let output_dir = temp.path().join("out");

    let adapter = MovingMnist::new();
    let report = build_dataset(&adapter, &PrefetchedDownloader::new(&source), &output_dir)
        .expect("build dataset");

    assert_eq!(report.splits.len(), 1);
    let split = &report.splits[0];
    assert_eq!(split.name, Split::Test);
    assert_eq!(split.num_examples, 7);
    assert_eq!(split.shard_lengths(), vec![1, 1, 2, 1, 2]);
    assert_eq!(report.total_examples(), 7);

    let mut next_sequence = 0;
    for (index, shard) in split.shards.iter().enumerate() {
        assert_eq!(
            shard.path,
            output_dir.join(shard_file_name("moving_mnist", Split::Test, index, 5))
        );
        let stacked = read_shard(&shard.path).expect("read shard");
        assert_eq!(&stacked.shape()[1..], &[20, 64, 64, 1]);

        for record in stacked.axis_iter(Axis(0)) {
            // (time, h, w, 1) -> (time, h, w)
            let record = record.index_axis(Axis(3), 0);
            let expected = raw.index_axis(Axis(1), next_sequence);
            assert_eq!(record, expected, "sequence {next_sequence}");
            next_sequence += 1;
        }
    }
    assert_eq!(next_sequence, 7);
}

#[test]
fn build_writes_dataset_info_json() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let source = temp.path().join("mnist_test_seq.npy");
    common::write_raw(&source, &common::patterned_raw(3));
    let output_dir = temp.path().join("out");

    let report = build_dataset(
        &MovingMnist::new(),
        &PrefetchedDownloader::new(&source),
        &output_dir,
    )
    .expect("build dataset");
    assert_eq!(report.info_path, output_dir.join(DATASET_INFO_FILE));

    let text = std::fs::read_to_string(&report.info_path).expect("read dataset info");
    let json: serde_json::Value = serde_json::from_str(&text).expect("valid json");

    assert_eq!(json["name"], "moving_mnist");
    assert_eq!(json["version"], "0.1.0");
    assert_eq!(
        json["features"]["image_sequence"]["shape"],
        serde_json::json!([20, 64, 64, 1])
    );
    assert_eq!(json["features"]["image_sequence"]["type"], "video");
    assert_eq!(json["features"]["image_sequence"]["dtype"], "uint8");
    assert_eq!(json["splits"][0]["name"], "test");
    assert_eq!(json["splits"][0]["num_examples"], 3);
    assert_eq!(json["splits"][0]["num_shards"], 5);
    assert_eq!(
        json["splits"][0]["shard_lengths"],
        serde_json::json!([0, 1, 0, 1, 1])
    );
    assert!(json["citation"]
        .as_str()
        .is_some_and(|citation| citation.contains("Srivastava")));
}

#[test]
fn build_with_missing_source_fails_before_writing() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let output_dir = temp.path().join("out");

    let err = build_dataset(
        &MovingMnist::new(),
        &PrefetchedDownloader::new(temp.path().join("missing.npy")),
        &output_dir,
    )
    .expect_err("missing source");

    assert!(err.is_download());
    assert!(!output_dir.exists());
}

#[test]
fn build_with_malformed_source_is_deserialization_error() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let source = temp.path().join("mnist_test_seq.npy");
    std::fs::write(&source, b"not an npy file").expect("write garbage");

    let err = build_dataset(
        &MovingMnist::new(),
        &PrefetchedDownloader::new(&source),
        &temp.path().join("out"),
    )
    .expect_err("garbage source");

    assert!(err.is_deserialization());
    assert!(!temp.path().join("out").join(DATASET_INFO_FILE).exists());
}
