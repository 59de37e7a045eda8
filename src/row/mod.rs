// src/row/mod.rs
//! Projection of decoded traces into columnar rows.
//!
//! The row layout is the compatibility contract with the Parquet output and is
//! defined once, in [`trace_schema`].

mod batch;
mod schema;

pub use batch::{RowBatchBuilder, TraceRow};
pub use schema::{trace_schema, COLUMN_NAMES};
