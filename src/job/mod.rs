// src/job/mod.rs
//! SEG-Y to Parquet conversion jobs.
//!
//! A job plans every input file up front (so a file-global problem such as an
//! unsupported sample format aborts before any output is written), then
//! converts each split independently into its own Parquet part file.

mod config;
mod converter;

#[cfg(feature = "async")]
mod async_converter;

pub use config::JobConfig;
pub use converter::{part_path, split_tasks, Converter, JobReport, SplitOutcome, SplitTask};

#[cfg(feature = "async")]
pub use async_converter::AsyncConverter;
