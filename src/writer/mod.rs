// src/writer/mod.rs
mod parquet_writer;
mod segy_writer;

pub use parquet_writer::{OutputCompression, ParquetOptions, TraceParquetWriter};
pub use segy_writer::SegyWriter;
