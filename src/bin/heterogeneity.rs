//! A binary to measure locus-sharing heterogeneity across patient cohorts.
//!
//! ```shell
//! cargo run --release --bin=heterogeneity --features=binaries -- cohort.csv --save
//! ```
//!
//! Each table is analyzed independently. A table that cannot be analyzed is
//! reported and skipped, and the process exits with an error once every table
//! has been attempted.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap::ValueEnum;
use clap_verbosity_flag::Verbosity;
use heterogeneity::batch::Batch;
use heterogeneity::index::CountPolicy;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// How to treat the stored `n_patients` column.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// Trust the stored count (warn on mismatches).
    Trust,
    /// Reject rows whose stored count does not match the patient list.
    Validate,
    /// Recompute the count from the patient list.
    Recompute,
}

impl From<Policy> for CountPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Trust => CountPolicy::Trust,
            Policy::Validate => CountPolicy::Validate,
            Policy::Recompute => CountPolicy::Recompute,
        }
    }
}

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The cohort tables to analyze (`.csv` is appended to a missing path
    /// without an extension).
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Whether or not to save a text report for each table.
    #[arg(short, long, default_value_t = false)]
    save: bool,

    /// If desired, the directory to save reports in instead of next to each
    /// table.
    #[arg(short, long)]
    output_directory: Option<PathBuf>,

    /// How to treat the stored patient count of each row.
    #[arg(long, value_enum, default_value_t = Policy::Trust)]
    count_policy: Policy,

    #[command(flatten)]
    verbose: Verbosity,
}

fn throw(args: Args) -> Result<()> {
    let batch = Batch::new(args.count_policy.into())
        .save(args.save)
        .output_directory(args.output_directory);

    let outcome = batch.run(&args.paths, &mut io::stdout().lock())?;

    if !outcome.is_success() {
        bail!(
            "{} of {} analyses failed",
            outcome.failed().len(),
            args.paths.len()
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    throw(args)
}
