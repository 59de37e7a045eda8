// src/header/mod.rs
mod file_header;
mod trace_header;

pub use file_header::FileHeader;
pub use trace_header::TraceHeader;

/// Textual + binary file header, in bytes
pub const FILE_HEADER_SIZE: usize = 3600;

/// Per-trace header, in bytes
pub const TRACE_HEADER_SIZE: usize = 240;
