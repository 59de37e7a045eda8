// src/sample/mod.rs
//! Sample value encodings.
//!
//! SEG-Y stores trace amplitudes in one file-global format chosen by the
//! binary header's format code. [`SampleCodec`] decodes a single value in any
//! supported format into an `f64` and encodes values back for writing.
//!
//! ```
//! use segy_rs::sample::SampleCodec;
//! use std::io::Cursor;
//!
//! // IBM hexadecimal float 0x42640000 is 100.0
//! let mut cursor = Cursor::new(vec![0x42u8, 0x64, 0x00, 0x00]);
//! assert_eq!(SampleCodec::decode_sample(1, &mut cursor).unwrap(), 100.0);
//! ```

mod codec;
mod ibm;

pub use codec::SampleCodec;
pub use ibm::{f32_to_ibm, ibm_to_f32};
