//! kconvert: KRD room bank to room-definition converter
//!
//! Usage:
//!   kconvert [OPTIONS] <INPUT> <OUTPUT>

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info};

use krd_core::{ConvertConfig, convert_file};

#[derive(Debug, Parser)]
#[command(name = "kconvert")]
#[command(version)]
#[command(about = "Convert a Knights KRD room bank into room-definition text", long_about = None)]
struct Args {
    /// Room bank to read
    input: PathBuf,
    /// Text file to write
    output: PathBuf,
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Log every room and skipped segment
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Info
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> krd_core::Result<()> {
    let config = match &args.config {
        Some(path) => ConvertConfig::load(path)?,
        None => ConvertConfig::default(),
    };

    let summary = convert_file(&args.input, &args.output, &config)?;

    info!(
        "{} segments written, {} skipped",
        summary.segments,
        summary.skipped.len()
    );
    let counts: Vec<String> = summary
        .class_counts()
        .iter()
        .map(|(class, n)| format!("{}={}", class, n))
        .collect();
    info!("rooms per class: {}", counts.join(" "));
    Ok(())
}
