// src/trace.rs
use crate::error::{SegyError, Result};
use crate::header::{TraceHeader, TRACE_HEADER_SIZE};
use crate::sample::SampleCodec;
use crate::types::{FormatParameters, SampleFormat};

/// One decoded trace record: its header and samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub header: TraceHeader,
    pub samples: Vec<f64>,
}

impl Trace {
    pub fn new(header: TraceHeader, samples: Vec<f64>) -> Self {
        Trace { header, samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

/// Turns one contiguous trace record buffer into a [`Trace`].
pub struct TraceDecoder;

impl TraceDecoder {
    /// Decode a record of `240 + sample_count * width` bytes.
    ///
    /// Bytes past the last sample are ignored.
    pub fn decode(buf: &[u8], sample_count: usize, format_code: i16) -> Result<Trace> {
        let format = SampleFormat::from_code(format_code);
        // the format check comes first: it is a file-wide configuration error
        let width = format.byte_width()?;
        let header = TraceHeader::decode(buf)?;

        let mut sample_bytes = &buf[TRACE_HEADER_SIZE..];
        let available = sample_bytes.len() / width;
        if available < sample_count {
            return Err(SegyError::TruncatedSamples {
                expected: sample_count,
                decoded: available,
            });
        }

        let samples = SampleCodec::decode_many(format, &mut sample_bytes, sample_count)?;
        Ok(Trace::new(header, samples))
    }

    pub fn decode_with(buf: &[u8], params: &FormatParameters) -> Result<Trace> {
        Self::decode(buf, params.sample_count, params.format_code)
    }
}
