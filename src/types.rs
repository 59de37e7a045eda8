// src/types.rs
use crate::error::{SegyError, Result};
use crate::header::{FileHeader, TRACE_HEADER_SIZE};

/// SEG-Y data sample format (binary header bytes 3225-3226)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// 4-byte IBM hexadecimal floating point
    IbmFloat,
    /// 4-byte two's complement integer
    Int32,
    /// 2-byte two's complement integer
    Int16,
    /// 4-byte fixed point with gain (obsolete)
    FixedPointWithGain,
    /// 4-byte IEEE floating point
    IeeeFloat,
    /// 1-byte value, read unsigned
    Byte,
    /// Codes 6 and 7
    Reserved(i16),
    /// Anything else; decoded as a 4-byte integer
    Unrecognized(i16),
}

impl SampleFormat {
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => SampleFormat::IbmFloat,
            2 => SampleFormat::Int32,
            3 => SampleFormat::Int16,
            4 => SampleFormat::FixedPointWithGain,
            5 => SampleFormat::IeeeFloat,
            6 | 7 => SampleFormat::Reserved(code),
            8 => SampleFormat::Byte,
            other => SampleFormat::Unrecognized(other),
        }
    }

    pub fn code(&self) -> i16 {
        match self {
            SampleFormat::IbmFloat => 1,
            SampleFormat::Int32 => 2,
            SampleFormat::Int16 => 3,
            SampleFormat::FixedPointWithGain => 4,
            SampleFormat::IeeeFloat => 5,
            SampleFormat::Byte => 8,
            SampleFormat::Reserved(code) | SampleFormat::Unrecognized(code) => *code,
        }
    }

    /// Width of one sample in bytes.
    ///
    /// Fixed point with gain and the reserved codes 6/7 cannot be decoded and
    /// fail with [`SegyError::UnsupportedFormat`]. Unrecognized codes keep the
    /// legacy 4-byte width.
    pub fn byte_width(&self) -> Result<usize> {
        match self {
            SampleFormat::IbmFloat
            | SampleFormat::Int32
            | SampleFormat::IeeeFloat
            | SampleFormat::Unrecognized(_) => Ok(4),
            SampleFormat::Int16 => Ok(2),
            SampleFormat::Byte => Ok(1),
            SampleFormat::FixedPointWithGain | SampleFormat::Reserved(_) => {
                Err(SegyError::UnsupportedFormat(self.code()))
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        self.byte_width().is_ok()
    }

    pub fn name(&self) -> &'static str {
        match self {
            SampleFormat::IbmFloat => "ibm_f32",
            SampleFormat::Int32 => "i32",
            SampleFormat::Int16 => "i16",
            SampleFormat::FixedPointWithGain => "fixed_gain",
            SampleFormat::IeeeFloat => "f32",
            SampleFormat::Byte => "u8",
            SampleFormat::Reserved(_) => "reserved",
            SampleFormat::Unrecognized(_) => "unrecognized",
        }
    }
}

/// Per-file decoding parameters learned from the binary file header.
///
/// Computed once by the split planner and shared read-only (behind an `Arc`)
/// with every reader working on a split of the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatParameters {
    pub sample_count: usize,
    pub bytes_per_sample: usize,
    pub format: SampleFormat,
    pub format_code: i16,
    /// Trace header plus samples, in bytes
    pub trace_record_size: u64,
    /// Raw traces-per-record hint, 0 when the header leaves it blank
    pub traces_per_record: u16,
}

impl FormatParameters {
    pub fn new(sample_count: usize, format_code: i16) -> Result<Self> {
        let format = SampleFormat::from_code(format_code);
        let bytes_per_sample = format.byte_width()?;
        let trace_record_size = (TRACE_HEADER_SIZE + sample_count * bytes_per_sample) as u64;

        Ok(FormatParameters {
            sample_count,
            bytes_per_sample,
            format,
            format_code,
            trace_record_size,
            traces_per_record: 0,
        })
    }

    pub fn from_file_header(header: &FileHeader) -> Result<Self> {
        let mut params = Self::new(header.sample_count as usize, header.format_code)?;
        params.traces_per_record = header.traces_per_record;
        Ok(params)
    }

    /// Number of whole trace records in `byte_len` bytes
    pub fn records_in(&self, byte_len: u64) -> u64 {
        byte_len / self.trace_record_size
    }
}
