// src/job/config.rs
use crate::error::{SegyError, Result};
use crate::split::SplitPolicy;
use crate::writer::{OutputCompression, ParquetOptions};
use config::Config as CConfig;
use serde::Deserialize;
use std::path::Path;

/// Environment variables with this prefix override file settings,
/// e.g. `SEGY2PARQUET_WORKERS=8` or `SEGY2PARQUET_SPLIT__KIND=fixed_traces`.
pub const ENV_PREFIX: &str = "SEGY2PARQUET";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Worker threads converting splits
    pub workers: usize,
    /// Attempts per split for retryable (I/O) failures
    pub max_attempts: u32,
    /// Rows per Parquet record batch
    pub batch_rows: usize,
    pub compression: OutputCompression,
    pub split: SplitPolicy,
}

impl Default for JobConfig {
    fn default() -> Self {
        JobConfig {
            workers: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
            max_attempts: 3,
            batch_rows: 1024,
            compression: OutputCompression::default(),
            split: SplitPolicy::default(),
        }
    }
}

impl JobConfig {
    pub fn from_str(toml_str: &str) -> Result<JobConfig> {
        CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .build()
            .map_err(|e| SegyError::Config(e.to_string()))?
            .try_deserialize::<JobConfig>()
            .map_err(|e| SegyError::Config(e.to_string()))
    }

    /// Load from an optional config file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<JobConfig> {
        let mut builder = CConfig::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SegyError::Config(e.to_string()))?
            .try_deserialize::<JobConfig>()
            .map_err(|e| SegyError::Config(e.to_string()))
    }

    pub fn parquet_options(&self) -> ParquetOptions {
        ParquetOptions {
            batch_rows: self.batch_rows,
            compression: self.compression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let conf = JobConfig::default();
        assert!(conf.workers >= 1);
        assert_eq!(conf.max_attempts, 3);
        assert_eq!(conf.batch_rows, 1024);
        assert_eq!(conf.compression, OutputCompression::Snappy);
        assert_eq!(conf.split, SplitPolicy::TracesPerRecord { multiplier: 10 });
    }

    #[test]
    fn test_load_full_toml() {
        let toml = r#"
        workers = 2
        max_attempts = 5
        batch_rows = 64
        compression = "uncompressed"

        [split]
        kind = "fixed_traces"
        traces = 500
        "#;
        let conf = JobConfig::from_str(toml).unwrap();
        assert_eq!(
            conf,
            JobConfig {
                workers: 2,
                max_attempts: 5,
                batch_rows: 64,
                compression: OutputCompression::Uncompressed,
                split: SplitPolicy::FixedTraces { traces: 500 },
            }
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let conf = JobConfig::from_str("max_attempts = 1").unwrap();
        assert_eq!(conf.max_attempts, 1);
        assert_eq!(conf.batch_rows, 1024);
        assert_eq!(conf.split, SplitPolicy::default());
    }

    #[test]
    fn test_target_bytes_policy() {
        let toml = r#"
        [split]
        kind = "target_bytes"
        bytes = 67108864
        "#;
        let conf = JobConfig::from_str(toml).unwrap();
        assert_eq!(conf.split, SplitPolicy::TargetBytes { bytes: 64 * 1024 * 1024 });
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(JobConfig::from_str("threads = 3"), Err(SegyError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.toml");
        std::fs::write(&path, "batch_rows = 16\n").unwrap();

        let conf = JobConfig::load(Some(&path)).unwrap();
        assert_eq!(conf.batch_rows, 16);
        assert_eq!(conf.parquet_options().batch_rows, 16);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(JobConfig::load(Some(&path)).is_err());
    }
}
