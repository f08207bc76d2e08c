//! A binary to count annotated and novel transcripts in a merged gene-model
//! file.
//!
//! ```shell
//! cargo run --release --bin=novel-transcripts --features=binaries -- merged.gtf
//! ```

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use flate2::read::GzDecoder;
use heterogeneity::gtf;
use heterogeneity::gtf::summary::DEFAULT_FEATURE;
use heterogeneity::gtf::summary::MAX_NOVEL_EXAMPLES;
use tracing::debug;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The merged gene-model file (optionally gzipped).
    gtf: PathBuf,

    /// The number of novel transcripts to print.
    #[arg(short = 'n', long, default_value_t = 3)]
    examples: usize,

    /// The feature type to count.
    #[arg(long, default_value = DEFAULT_FEATURE)]
    feature: String,

    #[command(flatten)]
    verbose: Verbosity,
}

fn throw(args: &Args) -> Result<()> {
    let file = File::open(&args.gtf)
        .with_context(|| format!("opening gene-model file {}", args.gtf.display()))?;

    let inner: Box<dyn BufRead> = match args.gtf.extension() {
        Some(ext) if ext == "gz" => Box::new(BufReader::new(GzDecoder::new(file))),
        _ => Box::new(BufReader::new(file)),
    };

    let mut reader = gtf::Reader::new(inner);
    let summary = gtf::Summary::try_from_reader(&mut reader, &args.feature)
        .with_context(|| format!("reading {}", args.gtf.display()))?;
    debug!("read {} lines", reader.line_no());

    println!("Total transcripts: {}", summary.total());
    println!("Annotated transcripts: {}", summary.annotated());
    println!("Novel transcripts: {}", summary.novel());

    if args.examples > MAX_NOVEL_EXAMPLES {
        debug!("only the first {MAX_NOVEL_EXAMPLES} novel transcripts are retained");
    }

    println!("Example novel transcripts:");
    for example in summary.examples().iter().take(args.examples) {
        println!("  {example}");
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

    throw(&args)
}
