// src/split/mod.rs
//! Trace-aligned partitioning of SEG-Y files.
//!
//! [`SplitPlanner`] reads a file's binary header once, derives the
//! [`FormatParameters`](crate::types::FormatParameters) every reader of that
//! file needs, and cuts the trace data into byte ranges that never divide a
//! trace record. Storage access goes through the [`Storage`] capability trait.

mod planner;
mod storage;

pub use planner::{split_ranges, FilePlan, Split, SplitPlanner, SplitPolicy};
pub use storage::{LocalStorage, MemoryStorage, Storage};

#[cfg(feature = "mmap")]
pub use storage::MmapStorage;
