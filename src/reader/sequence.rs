// src/reader/sequence.rs
use crate::error::{SegyError, Result};
use crate::split::Split;
use crate::trace::{Trace, TraceDecoder};
use crate::types::FormatParameters;
use log::trace;
use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

/// Forward-only reader of the traces inside one split.
///
/// The cursor is tracked here rather than queried from the stream, so any
/// `Read + Seek` source works. A split whose length is not a whole number of
/// trace records ends with a [`SegyError::TruncatedRecord`] error instead of
/// silently dropping the partial record.
///
/// # Example
///
/// ```no_run
/// use segy_rs::split::{LocalStorage, SplitPlanner, SplitPolicy, Storage};
/// use segy_rs::reader::TraceSequenceReader;
///
/// let storage = LocalStorage::new();
/// let plan = SplitPlanner::new(&storage, SplitPolicy::default()).plan("survey.sgy").unwrap();
///
/// for split in &plan.splits {
///     let source = storage.open_for_read(&split.path).unwrap();
///     let reader = TraceSequenceReader::new(source, split, plan.params.clone()).unwrap();
///     for trace in reader {
///         let trace = trace.unwrap();
///         println!("trace {} has {} samples", trace.header.trace_id, trace.samples.len());
///     }
/// }
/// ```
pub struct TraceSequenceReader<R: Read + Seek> {
    source: R,
    params: Arc<FormatParameters>,
    path: String,
    start: u64,
    end: u64,
    position: u64,
    traces_read: u64,
    record: Vec<u8>,
    failed: bool,
}

impl<R: Read + Seek> TraceSequenceReader<R> {
    /// Create a reader over `split`, seeking `source` to the split start
    pub fn new(mut source: R, split: &Split, params: Arc<FormatParameters>) -> Result<Self> {
        source.seek(SeekFrom::Start(split.offset))?;
        let record = vec![0u8; params.trace_record_size as usize];

        Ok(TraceSequenceReader {
            source,
            params,
            path: split.path.display().to_string(),
            start: split.offset,
            end: split.end(),
            position: split.offset,
            traces_read: 0,
            record,
            failed: false,
        })
    }

    /// Read and decode the next trace, or `None` at the end of the split
    pub fn next_trace(&mut self) -> Result<Option<Trace>> {
        if self.failed || self.position >= self.end {
            return Ok(None);
        }

        match self.read_record() {
            Ok(trace) => {
                self.position += self.params.trace_record_size;
                self.traces_read += 1;
                Ok(Some(trace))
            }
            Err(e) => {
                self.failed = true;
                Err(e.at(self.path.clone(), self.position))
            }
        }
    }

    fn read_record(&mut self) -> Result<Trace> {
        let record_size = self.params.trace_record_size;
        let available = self.end - self.position;
        if available < record_size {
            return Err(SegyError::TruncatedRecord {
                offset: self.position,
                expected: record_size,
                available,
            });
        }

        if let Err(e) = self.source.read_exact(&mut self.record) {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                return Err(SegyError::TruncatedRecord {
                    offset: self.position,
                    expected: record_size,
                    available: 0,
                });
            }
            return Err(e.into());
        }

        let trace = TraceDecoder::decode_with(&self.record, &self.params)?;
        trace!("{} @ {}: trace {}", self.path, self.position, trace.header.trace_id);
        Ok(trace)
    }

    /// Format parameters shared with the other readers of this file
    pub fn params(&self) -> &Arc<FormatParameters> {
        &self.params
    }

    /// Absolute byte offset of the next record
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn traces_read(&self) -> u64 {
        self.traces_read
    }

    /// Bytes left in the split
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.position)
    }

    pub fn has_more(&self) -> bool {
        !self.failed && self.position < self.end
    }

    /// Progress through the split as a percentage (0.0 to 100.0)
    pub fn progress_percent(&self) -> f64 {
        let length = self.end - self.start;
        if length == 0 {
            return 100.0;
        }
        ((self.position - self.start) as f64 / length as f64) * 100.0
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read + Seek> Iterator for TraceSequenceReader<R> {
    type Item = Result<Trace>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_trace().transpose()
    }
}
