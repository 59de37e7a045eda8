// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegyError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported sample format code: {0}")]
    UnsupportedFormat(i16),

    #[error("Truncated trace header: expected 240 bytes, found {len}")]
    TruncatedHeader { len: usize },

    #[error("Truncated samples: expected {expected}, buffer holds {decoded}")]
    TruncatedSamples { expected: usize, decoded: usize },

    #[error("Truncated trace record at offset {offset}: expected {expected} bytes, {available} available")]
    TruncatedRecord { offset: u64, expected: u64, available: u64 },

    #[error("{path} @ {offset}: {source}")]
    Decode {
        path: String,
        offset: u64,
        #[source]
        source: Box<SegyError>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot load config: {0}")]
    Config(String),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Worker failed: {0}")]
    Worker(String),

    #[error("Split {path} @ {offset} failed after {attempts} attempt(s): {source}")]
    SplitFailed {
        path: String,
        offset: u64,
        attempts: u32,
        #[source]
        source: Box<SegyError>,
    },
}

impl SegyError {
    /// Attach the file and byte offset a failure was observed at.
    pub fn at(self, path: impl Into<String>, offset: u64) -> Self {
        SegyError::Decode {
            path: path.into(),
            offset,
            source: Box::new(self),
        }
    }

    /// Whether re-running the whole split could succeed.
    ///
    /// Only I/O failures qualify; decode errors are a pure function of the
    /// split's bytes and would fail again.
    pub fn is_retryable(&self) -> bool {
        match self {
            SegyError::Io(_) => true,
            SegyError::Decode { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Innermost error, with context wrappers removed.
    pub fn root(&self) -> &SegyError {
        match self {
            SegyError::Decode { source, .. } | SegyError::SplitFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SegyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_follows_wrapped_source() {
        let io = SegyError::Io(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert!(io.is_retryable());
        assert!(io.at("a.sgy", 3600).is_retryable());

        let decode = SegyError::TruncatedRecord { offset: 3600, expected: 256, available: 10 };
        assert!(!decode.at("a.sgy", 3600).is_retryable());
        assert!(!SegyError::UnsupportedFormat(6).is_retryable());
    }

    #[test]
    fn test_root_unwraps_context() {
        let err = SegyError::UnsupportedFormat(7).at("b.sgy", 3840);
        assert!(matches!(err.root(), SegyError::UnsupportedFormat(7)));
        assert_eq!(err.to_string(), "b.sgy @ 3840: Unsupported sample format code: 7");
    }
}
