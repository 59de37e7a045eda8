// src/reader/mod.rs
mod sequence;

pub use sequence::TraceSequenceReader;
