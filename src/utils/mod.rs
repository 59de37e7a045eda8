// src/utils/mod.rs
mod ebcdic;
mod endian;

pub(crate) use ebcdic::*;
pub(crate) use endian::*;
