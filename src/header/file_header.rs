// src/header/file_header.rs
use crate::error::Result;
use crate::header::FILE_HEADER_SIZE;
use crate::types::SampleFormat;
use crate::utils::{
    be_i16_at, be_u16_at, decode_ebcdic_lossy, encode_ebcdic, put_be_i16_at, put_be_u16_at,
    EBCDIC_SPACE,
};
use std::io::{Read, Seek, SeekFrom};

/// SEG-Y file header: the 3200-byte textual header and the handful of binary
/// header fields this crate consumes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileHeader {
    /// Textual header decoded from EBCDIC (unmapped bytes become spaces)
    pub text: String,
    /// Traces per ensemble/record, 0 when unset (bytes 3213-3214)
    pub traces_per_record: u16,
    /// Sample interval in microseconds (bytes 3217-3218)
    pub sample_interval: i16,
    /// Samples per trace (bytes 3221-3222)
    pub sample_count: u16,
    /// Data sample format code (bytes 3225-3226)
    pub format_code: i16,
}

impl FileHeader {
    pub const TEXT_SIZE: usize = 3200;
    pub const TRACES_PER_RECORD_OFFSET: usize = 3212;
    pub const SAMPLE_INTERVAL_OFFSET: usize = 3216;
    pub const SAMPLE_COUNT_OFFSET: usize = 3220;
    pub const FORMAT_CODE_OFFSET: usize = 3224;
    /// Used when the traces-per-record field is zero
    pub const DEFAULT_TRACES_PER_RECORD: u16 = 2736;

    /// Parse the header from its raw bytes.
    ///
    /// Input shorter than 3600 bytes is treated as zero-filled, so a file that
    /// ends inside its header yields zero for every missing field.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut padded = [0u8; FILE_HEADER_SIZE];
        let len = bytes.len().min(FILE_HEADER_SIZE);
        padded[..len].copy_from_slice(&bytes[..len]);

        let text_len = len.min(Self::TEXT_SIZE);
        FileHeader {
            text: decode_ebcdic_lossy(&padded[..text_len]),
            traces_per_record: be_u16_at(&padded, Self::TRACES_PER_RECORD_OFFSET),
            sample_interval: be_i16_at(&padded, Self::SAMPLE_INTERVAL_OFFSET),
            sample_count: be_u16_at(&padded, Self::SAMPLE_COUNT_OFFSET),
            format_code: be_i16_at(&padded, Self::FORMAT_CODE_OFFSET),
        }
    }

    /// Read the header from the start of a stream.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::with_capacity(FILE_HEADER_SIZE);
        reader.take(FILE_HEADER_SIZE as u64).read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn format(&self) -> SampleFormat {
        SampleFormat::from_code(self.format_code)
    }

    pub fn traces_per_record_or_default(&self) -> u16 {
        if self.traces_per_record == 0 {
            Self::DEFAULT_TRACES_PER_RECORD
        } else {
            self.traces_per_record
        }
    }

    /// Encode to the on-disk 3600-byte layout. The textual header is written
    /// in EBCDIC and padded with spaces.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; FILE_HEADER_SIZE];
        buf[..Self::TEXT_SIZE].fill(EBCDIC_SPACE);

        let text = encode_ebcdic(&self.text);
        let text_len = text.len().min(Self::TEXT_SIZE);
        buf[..text_len].copy_from_slice(&text[..text_len]);

        put_be_u16_at(&mut buf, Self::TRACES_PER_RECORD_OFFSET, self.traces_per_record);
        put_be_i16_at(&mut buf, Self::SAMPLE_INTERVAL_OFFSET, self.sample_interval);
        put_be_u16_at(&mut buf, Self::SAMPLE_COUNT_OFFSET, self.sample_count);
        put_be_i16_at(&mut buf, Self::FORMAT_CODE_OFFSET, self.format_code);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_binary_fields_at_offsets() {
        let mut bytes = vec![0u8; FILE_HEADER_SIZE];
        bytes[3212..3214].copy_from_slice(&24u16.to_be_bytes());
        bytes[3216..3218].copy_from_slice(&4000i16.to_be_bytes());
        bytes[3220..3222].copy_from_slice(&1501u16.to_be_bytes());
        bytes[3224..3226].copy_from_slice(&1i16.to_be_bytes());

        let header = FileHeader::from_bytes(&bytes);
        assert_eq!(header.traces_per_record, 24);
        assert_eq!(header.sample_interval, 4000);
        assert_eq!(header.sample_count, 1501);
        assert_eq!(header.format_code, 1);
        assert_eq!(header.format(), SampleFormat::IbmFloat);
    }

    #[test]
    fn test_sample_count_above_i16_range() {
        let mut bytes = vec![0u8; FILE_HEADER_SIZE];
        bytes[3220..3222].copy_from_slice(&40_000u16.to_be_bytes());
        assert_eq!(FileHeader::from_bytes(&bytes).sample_count, 40_000);
    }

    #[test]
    fn test_traces_per_record_default() {
        let header = FileHeader::default();
        assert_eq!(header.traces_per_record_or_default(), 2736);

        let header = FileHeader { traces_per_record: 60, ..Default::default() };
        assert_eq!(header.traces_per_record_or_default(), 60);
    }

    #[test]
    fn test_short_input_zero_filled() {
        let header = FileHeader::from_bytes(&[0x40; 100]);
        assert_eq!(header.sample_count, 0);
        assert_eq!(header.format_code, 0);
        assert_eq!(header.text.len(), 100);
    }

    #[test]
    fn test_encode_read_back() {
        let header = FileHeader {
            text: "C 1 SYNTHETIC SURVEY".to_string(),
            traces_per_record: 12,
            sample_interval: 2000,
            sample_count: 750,
            format_code: 5,
        };

        let mut bytes = header.encode();
        bytes.extend_from_slice(&[0xEE; 64]);
        let read = FileHeader::read(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(read.text.trim_end(), "C 1 SYNTHETIC SURVEY");
        assert_eq!(read.text.len(), FileHeader::TEXT_SIZE);
        assert_eq!(read.traces_per_record, 12);
        assert_eq!(read.sample_interval, 2000);
        assert_eq!(read.sample_count, 750);
        assert_eq!(read.format_code, 5);
    }
}
