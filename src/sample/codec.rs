// src/sample/codec.rs
use crate::error::{SegyError, Result};
use crate::sample::ibm::{f32_to_ibm, ibm_to_f32};
use crate::types::SampleFormat;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Decoding and encoding of individual SEG-Y samples.
///
/// All multi-byte encodings are big-endian. Every decoded value is reported
/// as `f64` regardless of the on-disk encoding.
pub struct SampleCodec;

impl SampleCodec {
    /// Width in bytes of one sample for `format_code`
    ///
    /// # Example
    ///
    /// ```
    /// use segy_rs::sample::SampleCodec;
    ///
    /// assert_eq!(SampleCodec::byte_width(3).unwrap(), 2);
    /// assert_eq!(SampleCodec::byte_width(99).unwrap(), 4); // legacy fallback
    /// assert!(SampleCodec::byte_width(6).is_err());
    /// ```
    pub fn byte_width(format_code: i16) -> Result<usize> {
        SampleFormat::from_code(format_code).byte_width()
    }

    /// Read exactly one sample of `format_code` from `reader`
    pub fn decode_sample<R: Read>(format_code: i16, reader: &mut R) -> Result<f64> {
        Self::decode(SampleFormat::from_code(format_code), reader)
    }

    /// Read exactly one sample of an already resolved format
    pub fn decode<R: Read>(format: SampleFormat, reader: &mut R) -> Result<f64> {
        match format {
            SampleFormat::IbmFloat => {
                let mut bytes = [0u8; 4];
                reader.read_exact(&mut bytes)?;
                Ok(ibm_to_f32(bytes) as f64)
            }
            SampleFormat::Int32 => Ok(reader.read_i32::<BigEndian>()? as f64),
            SampleFormat::Int16 => Ok(reader.read_i16::<BigEndian>()? as f64),
            SampleFormat::IeeeFloat => Ok(reader.read_f32::<BigEndian>()? as f64),
            SampleFormat::Byte => Ok(reader.read_u8()? as f64),
            SampleFormat::FixedPointWithGain | SampleFormat::Reserved(_) => {
                Err(SegyError::UnsupportedFormat(format.code()))
            }
            // Unknown codes are read as 4-byte integers, matching the width fallback
            SampleFormat::Unrecognized(_) => Ok(reader.read_i32::<BigEndian>()? as f64),
        }
    }

    /// Decode `count` consecutive samples
    pub fn decode_many<R: Read>(format: SampleFormat, reader: &mut R, count: usize) -> Result<Vec<f64>> {
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(Self::decode(format, reader)?);
        }
        Ok(samples)
    }

    /// Write one sample in `format`.
    ///
    /// Integer formats truncate toward zero and saturate at the type's
    /// bounds; float formats narrow to `f32`.
    pub fn encode<W: Write>(format: SampleFormat, value: f64, writer: &mut W) -> Result<()> {
        match format {
            SampleFormat::IbmFloat => writer.write_all(&f32_to_ibm(value as f32))?,
            SampleFormat::Int32 | SampleFormat::Unrecognized(_) => {
                writer.write_i32::<BigEndian>(value as i32)?
            }
            SampleFormat::Int16 => writer.write_i16::<BigEndian>(value as i16)?,
            SampleFormat::IeeeFloat => writer.write_f32::<BigEndian>(value as f32)?,
            SampleFormat::Byte => writer.write_u8(value as u8)?,
            SampleFormat::FixedPointWithGain | SampleFormat::Reserved(_) => {
                return Err(SegyError::UnsupportedFormat(format.code()));
            }
        }
        Ok(())
    }
}
