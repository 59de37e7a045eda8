// src/lib.rs
//! # segy-rs
//!
//! A Rust library for decoding SEG-Y seismic trace files, partitioning them into
//! trace-aligned splits for parallel processing, and converting them to Parquet.
//!
//! ## Features
//!
//! - 🧮 **Sample Formats**: IBM hexadecimal float, 32/16-bit integers, IEEE float and bytes
//! - ✂️ **Trace-Aligned Splits**: No split ever starts or ends inside a trace record
//! - 🧵 **Parallel Conversion**: Thread pool or tokio driven, one Parquet part per split
//! - 🔁 **Retries**: Transient I/O failures re-run the whole split
//! - 📦 **Pluggable Storage**: Local files, memory-mapped files or in-memory data
//!
//! ## Quick Start
//!
//! ### Reading Traces
//!
//! ```rust,no_run
//! use segy_rs::*;
//!
//! fn main() -> Result<()> {
//!     let storage = LocalStorage::new();
//!     let plan = SplitPlanner::new(&storage, SplitPolicy::default()).plan("survey.sgy")?;
//!     println!("{} traces of {} samples", plan.trace_count(), plan.params.sample_count);
//!
//!     for split in &plan.splits {
//!         let source = storage.open_for_read(&split.path)?;
//!         for trace in TraceSequenceReader::new(source, split, plan.params.clone())? {
//!             let trace = trace?;
//!             println!("iline {} xline {}", trace.header.iline_id, trace.header.xline_id);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Converting to Parquet
//!
//! ```rust,no_run
//! use segy_rs::*;
//!
//! fn main() -> Result<()> {
//!     let converter = Converter::new(LocalStorage::new(), JobConfig::default());
//!     let report = converter.run("surveys/", "parquet/")?;
//!     println!("{} traces in {} files", report.traces, report.outputs.len());
//!     Ok(())
//! }
//! ```
//!
//! ### Async Conversion
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! use segy_rs::*;
//!
//! # #[cfg(feature = "async")]
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let converter = AsyncConverter::new(LocalStorage::new(), JobConfig::default());
//!     converter.run("surveys/", "parquet/").await?;
//!     Ok(())
//! }
//! # #[cfg(not(feature = "async"))]
//! # fn main() {}
//! ```

// Modules
pub mod error;
pub mod types;
pub mod header;
pub mod sample;
pub mod trace;
pub mod split;
pub mod reader;
pub mod row;
pub mod writer;
pub mod job;

mod utils;

pub use error::{SegyError, Result};

pub use types::{FormatParameters, SampleFormat};

pub use header::{FileHeader, TraceHeader, FILE_HEADER_SIZE, TRACE_HEADER_SIZE};

pub use sample::SampleCodec;

pub use trace::{Trace, TraceDecoder};

pub use split::{FilePlan, LocalStorage, MemoryStorage, Split, SplitPlanner, SplitPolicy, Storage};

#[cfg(feature = "mmap")]
pub use split::MmapStorage;

pub use reader::TraceSequenceReader;

pub use row::{trace_schema, TraceRow};

pub use writer::{SegyWriter, TraceParquetWriter};

pub use job::{Converter, JobConfig, JobReport};

#[cfg(feature = "async")]
pub use job::AsyncConverter;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use segy_rs::prelude::*;
    //! ```

    pub use crate::error::{SegyError, Result};
    pub use crate::split::{LocalStorage, SplitPlanner, SplitPolicy, Storage};
    pub use crate::reader::TraceSequenceReader;
    pub use crate::trace::Trace;
    pub use crate::job::{Converter, JobConfig};

    #[cfg(feature = "async")]
    pub use crate::job::AsyncConverter;
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!LIBRARY_VERSION.is_empty());
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(FILE_HEADER_SIZE, 3600);
        assert_eq!(TRACE_HEADER_SIZE, 240);
    }

    #[test]
    fn test_byte_widths() {
        assert_eq!(SampleCodec::byte_width(1).unwrap(), 4);
        assert_eq!(SampleCodec::byte_width(2).unwrap(), 4);
        assert_eq!(SampleCodec::byte_width(3).unwrap(), 2);
        assert_eq!(SampleCodec::byte_width(5).unwrap(), 4);
        assert_eq!(SampleCodec::byte_width(8).unwrap(), 1);
        assert!(SampleCodec::byte_width(4).is_err());
    }

    #[test]
    fn test_plan_and_read_through_root_exports() {
        let header = FileHeader { sample_count: 2, format_code: 8, ..Default::default() };
        let mut writer = SegyWriter::new(Vec::new(), &header).unwrap();
        writer.write_trace(&TraceHeader { trace_id: 9, ..Default::default() }, &[4.0, 250.0]).unwrap();

        let mut storage = MemoryStorage::new();
        storage.insert("/one.sgy", writer.finish().unwrap());

        let plan = SplitPlanner::new(&storage, SplitPolicy::default()).plan("/one.sgy").unwrap();
        let source = storage.open_for_read(&plan.splits[0].path).unwrap();
        let traces: Vec<Trace> = TraceSequenceReader::new(source, &plan.splits[0], plan.params.clone())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].header.trace_id, 9);
        assert_eq!(traces[0].samples, vec![4.0, 250.0]);
        assert_eq!(TraceRow::from(&traces[0]).trace_id, 9);
    }
}
