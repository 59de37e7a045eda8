// src/main.rs
use clap::Parser;
use log::{error, info};
use segy_rs::{Converter, JobConfig, LocalStorage, SplitPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert SEG-Y files to Parquet, one part file per trace-aligned split
#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
struct CliArgs {
    /// SEG-Y file, or a directory of them
    input: PathBuf,

    /// Directory receiving the part-NNNNN.parquet files
    output: PathBuf,

    /// TOML job configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    workers: Option<usize>,

    #[arg(long)]
    max_attempts: Option<u32>,

    /// Fixed number of traces per split
    #[arg(long)]
    split_traces: Option<u64>,
}

impl CliArgs {
    /// Command line flags win over file and environment settings
    fn job_config(&self) -> segy_rs::Result<JobConfig> {
        let mut config = JobConfig::load(self.config.as_deref())?;
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(traces) = self.split_traces {
            config.split = SplitPolicy::FixedTraces { traces };
        }
        Ok(config)
    }
}

/// Info by default; `filters` (RUST_LOG syntax) refine or replace it
fn logging_builder(filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info).format_timestamp_millis();
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    builder
}

fn setup_logging() {
    let filters = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    logging_builder(filters.as_deref()).init();
}

fn run(args: &CliArgs) -> segy_rs::Result<()> {
    let config = args.job_config()?;
    info!("Job config: {:?}", config);

    let report = Converter::new(LocalStorage::new(), config).run(&args.input, &args.output)?;
    info!(
        "Done: {} file(s), {} split(s), {} traces, {} part file(s) in {}",
        report.files,
        report.splits,
        report.traces,
        report.outputs.len(),
        args.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    setup_logging();
    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
