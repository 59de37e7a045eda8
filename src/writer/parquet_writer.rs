// src/writer/parquet_writer.rs
use crate::error::Result;
use crate::row::{trace_schema, RowBatchBuilder, TraceRow};
use crate::trace::Trace;
use log::debug;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::Deserialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputCompression {
    #[default]
    Snappy,
    Uncompressed,
}

impl From<OutputCompression> for Compression {
    fn from(value: OutputCompression) -> Self {
        match value {
            OutputCompression::Snappy => Compression::SNAPPY,
            OutputCompression::Uncompressed => Compression::UNCOMPRESSED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParquetOptions {
    /// Rows buffered before a record batch is handed to the Parquet writer
    pub batch_rows: usize,
    pub compression: OutputCompression,
}

impl Default for ParquetOptions {
    fn default() -> Self {
        ParquetOptions {
            batch_rows: 1024,
            compression: OutputCompression::Snappy,
        }
    }
}

/// Writes trace rows to one Parquet file laid out as [`trace_schema`].
pub struct TraceParquetWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    rows: RowBatchBuilder,
    batch_rows: usize,
    rows_written: u64,
}

impl TraceParquetWriter<File> {
    pub fn create(path: impl AsRef<Path>, options: &ParquetOptions) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(file, options)
    }
}

impl<W: Write + Send> TraceParquetWriter<W> {
    pub fn new(sink: W, options: &ParquetOptions) -> Result<Self> {
        let props = WriterProperties::builder()
            .set_compression(options.compression.into())
            .build();
        let writer = ArrowWriter::try_new(sink, trace_schema(), Some(props))?;
        let batch_rows = options.batch_rows.max(1);

        Ok(TraceParquetWriter {
            writer,
            rows: RowBatchBuilder::with_capacity(batch_rows),
            batch_rows,
            rows_written: 0,
        })
    }

    pub fn write_row(&mut self, row: &TraceRow) -> Result<()> {
        self.rows.append(row);
        self.rows_written += 1;
        if self.rows.len() >= self.batch_rows {
            self.flush_batch()?;
        }
        Ok(())
    }

    pub fn write_trace(&mut self, trace: Trace) -> Result<()> {
        self.write_row(&TraceRow::from(trace))
    }

    /// Hand buffered rows to the Parquet writer
    pub fn flush_batch(&mut self) -> Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let batch = self.rows.finish()?;
        debug!("Writing batch of {} rows", batch.num_rows());
        self.writer.write(&batch)?;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush remaining rows, write the file footer and return the row count
    pub fn close(mut self) -> Result<u64> {
        self.flush_batch()?;
        self.writer.close()?;
        Ok(self.rows_written)
    }
}
