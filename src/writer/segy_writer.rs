// src/writer/segy_writer.rs
use crate::error::{SegyError, Result};
use crate::header::{FileHeader, TraceHeader, TRACE_HEADER_SIZE};
use crate::sample::SampleCodec;
use crate::trace::Trace;
use crate::types::SampleFormat;
use bytes::{BufMut, BytesMut};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes SEG-Y files: the 3600-byte file header followed by fixed-size
/// trace records in the header's sample format.
///
/// # Example
///
/// ```
/// use segy_rs::header::{FileHeader, TraceHeader};
/// use segy_rs::writer::SegyWriter;
///
/// let header = FileHeader { sample_count: 3, format_code: 5, ..Default::default() };
/// let mut writer = SegyWriter::new(Vec::new(), &header).unwrap();
/// writer.write_trace(&TraceHeader { trace_id: 1, ..Default::default() }, &[0.0, 1.0, 2.0]).unwrap();
///
/// let bytes = writer.finish().unwrap();
/// assert_eq!(bytes.len(), 3600 + 240 + 3 * 4);
/// ```
pub struct SegyWriter<W: Write> {
    writer: W,
    format: SampleFormat,
    sample_count: usize,
    record: BytesMut,
    traces_written: u64,
}

impl SegyWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>, header: &FileHeader) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), header)
    }
}

impl<W: Write> SegyWriter<W> {
    /// Write `header` and prepare to append traces.
    ///
    /// Fails with [`SegyError::UnsupportedFormat`] when the header's format
    /// code cannot be encoded.
    pub fn new(mut writer: W, header: &FileHeader) -> Result<Self> {
        let format = header.format();
        let width = format.byte_width()?;
        let sample_count = header.sample_count as usize;

        writer.write_all(&header.encode())?;

        Ok(SegyWriter {
            writer,
            format,
            sample_count,
            record: BytesMut::with_capacity(TRACE_HEADER_SIZE + sample_count * width),
            traces_written: 0,
        })
    }

    /// Append one trace record. `samples` must hold exactly the header's
    /// sample count.
    pub fn write_trace(&mut self, header: &TraceHeader, samples: &[f64]) -> Result<()> {
        if samples.len() != self.sample_count {
            return Err(SegyError::InvalidInput(format!(
                "trace {} has {} samples, file declares {}",
                header.trace_id,
                samples.len(),
                self.sample_count
            )));
        }

        self.record.clear();
        self.record.put_slice(&header.encode());
        {
            let mut out = (&mut self.record).writer();
            for &value in samples {
                SampleCodec::encode(self.format, value, &mut out)?;
            }
        }

        self.writer.write_all(&self.record)?;
        self.traces_written += 1;
        Ok(())
    }

    pub fn write(&mut self, trace: &Trace) -> Result<()> {
        self.write_trace(&trace.header, &trace.samples)
    }

    pub fn traces_written(&self) -> u64 {
        self.traces_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
