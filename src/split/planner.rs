// src/split/planner.rs
use crate::error::Result;
use crate::header::{FileHeader, FILE_HEADER_SIZE};
use crate::split::Storage;
use crate::types::FormatParameters;
use log::{debug, info};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A trace-aligned byte range of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub path: PathBuf,
    /// Position of this split within its file's plan
    pub index: usize,
    pub offset: u64,
    pub length: u64,
    /// Locality hints from the storage layer
    pub hosts: Vec<String>,
}

impl Split {
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whole trace records covered by this split
    pub fn trace_count(&self, params: &FormatParameters) -> u64 {
        params.records_in(self.length)
    }
}

/// How many trace records go into one split.
///
/// Every policy yields a positive whole number of records, so split sizes are
/// always non-zero multiples of the trace record size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitPolicy {
    /// The header's traces-per-record hint (2736 when unset) times `multiplier`
    TracesPerRecord { multiplier: u64 },
    /// A fixed number of records
    FixedTraces { traces: u64 },
    /// As many whole records as fit in `bytes`, at least one
    TargetBytes { bytes: u64 },
}

impl Default for SplitPolicy {
    fn default() -> Self {
        SplitPolicy::TracesPerRecord { multiplier: 10 }
    }
}

impl SplitPolicy {
    pub fn records_per_split(&self, params: &FormatParameters) -> u64 {
        let records = match self {
            SplitPolicy::TracesPerRecord { multiplier } => {
                let per_record = if params.traces_per_record == 0 {
                    FileHeader::DEFAULT_TRACES_PER_RECORD
                } else {
                    params.traces_per_record
                };
                (per_record as u64).saturating_mul(*multiplier)
            }
            SplitPolicy::FixedTraces { traces } => *traces,
            SplitPolicy::TargetBytes { bytes } => bytes / params.trace_record_size,
        };
        records.max(1)
    }

    /// Split length in bytes, always a whole number of records.
    ///
    /// Record counts too large to express in bytes are clamped to the
    /// largest whole-record size that fits in a `u64`.
    pub fn split_size(&self, params: &FormatParameters) -> u64 {
        let record = params.trace_record_size;
        self.records_per_split(params).min(u64::MAX / record) * record
    }
}

/// Everything planned for one input file.
#[derive(Debug, Clone)]
pub struct FilePlan {
    pub path: PathBuf,
    pub file_length: u64,
    pub header: FileHeader,
    /// Shared read-only by every reader of this file's splits
    pub params: Arc<FormatParameters>,
    pub splits: Vec<Split>,
}

impl FilePlan {
    pub fn data_length(&self) -> u64 {
        self.splits.iter().map(|s| s.length).sum()
    }

    pub fn trace_count(&self) -> u64 {
        self.params.records_in(self.data_length())
    }
}

/// Byte ranges `(offset, length)` covering the trace data of a file.
///
/// Ranges start at the end of the file header and are `split_size` long
/// except the last, which takes the remainder. A file with no trace data
/// gets a single empty range.
pub fn split_ranges(file_length: u64, split_size: u64) -> Vec<(u64, u64)> {
    let header = FILE_HEADER_SIZE as u64;
    if file_length <= header {
        return vec![(file_length, 0)];
    }

    let split_size = split_size.max(1);
    let mut ranges = Vec::new();
    let mut offset = header;
    let mut remaining = file_length - header;

    while remaining > split_size {
        ranges.push((offset, split_size));
        offset += split_size;
        remaining -= split_size;
    }
    ranges.push((offset, remaining));

    ranges
}

/// Plans trace-aligned splits for SEG-Y files.
pub struct SplitPlanner<'a, S: Storage> {
    storage: &'a S,
    policy: SplitPolicy,
}

impl<'a, S: Storage> SplitPlanner<'a, S> {
    pub fn new(storage: &'a S, policy: SplitPolicy) -> Self {
        SplitPlanner { storage, policy }
    }

    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    /// Read the file header of `path` and partition its trace data.
    ///
    /// Fails with [`SegyError::UnsupportedFormat`](crate::SegyError::UnsupportedFormat)
    /// before any split is produced when the file's sample format cannot be
    /// decoded.
    pub fn plan(&self, path: impl AsRef<Path>) -> Result<FilePlan> {
        let path = path.as_ref();
        let file_length = self.storage.length(path)?;

        let name = path.display().to_string();
        let header = {
            let mut reader = self.storage.open_for_read(path)?;
            FileHeader::read(&mut reader).map_err(|e| e.at(name.as_str(), 0))?
        };
        let params = FormatParameters::from_file_header(&header)
            .map_err(|e| e.at(name.as_str(), FileHeader::FORMAT_CODE_OFFSET as u64))?;

        // never larger than the file's whole records, so huge policies stay in range
        let data_records = params.records_in(file_length.saturating_sub(FILE_HEADER_SIZE as u64));
        let split_size = self
            .policy
            .split_size(&params)
            .min(data_records.max(1) * params.trace_record_size);
        debug!(
            "{}: {} samples/trace, format {} ({}), record {} bytes, split {} bytes",
            path.display(),
            params.sample_count,
            params.format_code,
            params.format.name(),
            params.trace_record_size,
            split_size
        );

        let mut splits = Vec::new();
        for (index, (offset, length)) in split_ranges(file_length, split_size).into_iter().enumerate() {
            let hosts = self.storage.block_locations(path, offset, length)?;
            splits.push(Split {
                path: path.to_path_buf(),
                index,
                offset,
                length,
                hosts,
            });
        }

        info!(
            "Planned {} split(s) for {} ({} bytes)",
            splits.len(),
            path.display(),
            file_length
        );

        Ok(FilePlan {
            path: path.to_path_buf(),
            file_length,
            header,
            params: Arc::new(params),
            splits,
        })
    }
}
