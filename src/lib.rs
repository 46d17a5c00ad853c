//! moving-mnist: the published Moving MNIST test sequences as a dataset.
//!
//! The crate downloads the single `.npy` file released with Srivastava et
//! al. (2015), a `(20, N, 64, 64)` uint8 array of video frames, and
//! re-exposes it as a lazy stream of `(20, 64, 64, 1)` records keyed
//! `image_sequence`.
//!
//! # Modules
//!
//! - [`dataset`]: The adapter (`describe`, `split_generators`, `generate_examples`)
//! - [`download`]: The [`download::Downloader`] capability and its implementations
//! - [`build`]: A minimal host that shards a split into `.npy` files
//! - [`inspect`]: Statistics over a raw sequence array
//! - [`error`]: Error types for moving-mnist operations

pub mod build;
pub mod dataset;
pub mod download;
pub mod error;
pub mod inspect;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub use dataset::{Example, Examples, MovingMnist, Split, SplitGenerator};
pub use error::MovingMnistError;

/// The moving-mnist CLI application.
#[derive(Parser)]
#[command(name = "moving-mnist")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log progress (equivalent to RUST_LOG=info).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print dataset metadata and the feature schema.
    Info(InfoArgs),
    /// Download the source array into the data directory.
    Fetch(FetchArgs),
    /// Report shapes and pixel statistics of a local array file.
    Inspect(InspectArgs),
    /// Download, reshape and write the dataset as .npy shards.
    Build(BuildArgs),
}

/// Arguments for the info subcommand.
#[derive(clap::Args)]
struct InfoArgs {
    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the fetch subcommand.
#[derive(clap::Args)]
struct FetchArgs {
    /// Directory downloads are cached in.
    #[arg(long, env = "MOVING_MNIST_DATA_DIR", default_value = "moving_mnist_data")]
    data_dir: PathBuf,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Local .npy file shaped (20, N, 64, 64).
    input: PathBuf,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the build subcommand.
#[derive(clap::Args)]
struct BuildArgs {
    /// Directory shards and dataset_info.json are written to.
    #[arg(long)]
    output_dir: PathBuf,

    /// Directory downloads are cached in.
    #[arg(long, env = "MOVING_MNIST_DATA_DIR", default_value = "moving_mnist_data")]
    data_dir: PathBuf,

    /// Use an already downloaded source file instead of fetching it.
    #[arg(long)]
    data_path: Option<PathBuf>,
}

/// Run the moving-mnist CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), MovingMnistError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Info(args)) => run_info(args),
        Some(Commands::Fetch(args)) => run_fetch(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Build(args)) => run_build(args),
        None => {
            println!("moving-mnist {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("The Moving MNIST test sequences as a dataset.");
            println!();
            println!("Run 'moving-mnist --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    // RUST_LOG, when set, takes precedence over the default level.
    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .try_init();
}

/// Execute the info subcommand.
fn run_info(args: InfoArgs) -> Result<(), MovingMnistError> {
    let info = MovingMnist::new().describe();

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&info)?),
        "text" => print!("{}", info),
        other => return Err(unsupported_output(other)),
    }
    Ok(())
}

/// Execute the fetch subcommand.
fn run_fetch(args: FetchArgs) -> Result<(), MovingMnistError> {
    let downloader = http_downloader(&args.data_dir)?;
    let splits = MovingMnist::new().split_generators(&*downloader)?;

    for split in &splits {
        println!(
            "{}: {} ({} shard(s))",
            split.name,
            split.gen_kwargs.data_path.display(),
            split.num_shards
        );
    }
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), MovingMnistError> {
    let adapter = MovingMnist::new();
    let report = inspect::inspect_file(
        &args.input,
        adapter.descriptor(),
        &inspect::InspectOptions::default(),
    )?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print!("{}", report),
        other => return Err(unsupported_output(other)),
    }
    Ok(())
}

/// Execute the build subcommand.
fn run_build(args: BuildArgs) -> Result<(), MovingMnistError> {
    let downloader: Box<dyn download::Downloader> = match args.data_path {
        Some(path) => Box::new(download::PrefetchedDownloader::new(path)),
        None => http_downloader(&args.data_dir)?,
    };

    let report = build::build_dataset(&MovingMnist::new(), &*downloader, &args.output_dir)?;
    print!("{}", report);
    Ok(())
}

#[cfg(feature = "remote")]
fn http_downloader(data_dir: &Path) -> Result<Box<dyn download::Downloader>, MovingMnistError> {
    Ok(Box::new(download::HttpDownloader::new(data_dir)))
}

#[cfg(not(feature = "remote"))]
fn http_downloader(data_dir: &Path) -> Result<Box<dyn download::Downloader>, MovingMnistError> {
    Err(MovingMnistError::Download {
        url: dataset::info::SOURCE_URL.to_string(),
        message: format!(
            "built without the 'remote' feature; cannot download into '{}' (use --data-path)",
            data_dir.display()
        ),
    })
}

fn unsupported_output(other: &str) -> MovingMnistError {
    MovingMnistError::UnsupportedFormat(format!(
        "output '{}' (supported: text, json)",
        other
    ))
}
