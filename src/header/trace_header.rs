// src/header/trace_header.rs
use crate::error::{SegyError, Result};
use crate::header::TRACE_HEADER_SIZE;
use crate::utils::{be_i16_at, be_i32_at, put_be_i16_at, put_be_i32_at};

/// The decoded subset of a 240-byte SEG-Y trace header.
///
/// Values are passed through exactly as stored; nothing is range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceHeader {
    /// Trace sequence number within the file (bytes 5-8)
    pub trace_id: i32,
    /// Original field record number (bytes 9-12)
    pub field_record_number: i32,
    /// Source to receiver group distance, may be negative (bytes 37-40)
    pub dist_srg: i32,
    /// Source X coordinate (bytes 73-76)
    pub src_x: i32,
    /// Source Y coordinate (bytes 77-80)
    pub src_y: i32,
    /// Sample interval of this trace (bytes 117-118)
    pub sample_interval: i16,
    /// Inline number (bytes 189-192)
    pub iline_id: i32,
    /// Crossline number (bytes 193-196)
    pub xline_id: i32,
}

impl TraceHeader {
    pub const TRACE_ID_OFFSET: usize = 4;
    pub const FIELD_RECORD_OFFSET: usize = 8;
    pub const DIST_SRG_OFFSET: usize = 36;
    pub const SRC_X_OFFSET: usize = 72;
    pub const SRC_Y_OFFSET: usize = 76;
    pub const SAMPLE_INTERVAL_OFFSET: usize = 116;
    pub const ILINE_OFFSET: usize = 188;
    pub const XLINE_OFFSET: usize = 192;

    /// Decode the header fields from the start of `buf`.
    ///
    /// Bytes past the first 240 are ignored.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < TRACE_HEADER_SIZE {
            return Err(SegyError::TruncatedHeader { len: buf.len() });
        }

        Ok(TraceHeader {
            trace_id: be_i32_at(buf, Self::TRACE_ID_OFFSET),
            field_record_number: be_i32_at(buf, Self::FIELD_RECORD_OFFSET),
            dist_srg: be_i32_at(buf, Self::DIST_SRG_OFFSET),
            src_x: be_i32_at(buf, Self::SRC_X_OFFSET),
            src_y: be_i32_at(buf, Self::SRC_Y_OFFSET),
            sample_interval: be_i16_at(buf, Self::SAMPLE_INTERVAL_OFFSET),
            iline_id: be_i32_at(buf, Self::ILINE_OFFSET),
            xline_id: be_i32_at(buf, Self::XLINE_OFFSET),
        })
    }

    /// Encode into a 240-byte header; undecoded fields are zero.
    pub fn encode(&self) -> [u8; TRACE_HEADER_SIZE] {
        let mut buf = [0u8; TRACE_HEADER_SIZE];
        put_be_i32_at(&mut buf, Self::TRACE_ID_OFFSET, self.trace_id);
        put_be_i32_at(&mut buf, Self::FIELD_RECORD_OFFSET, self.field_record_number);
        put_be_i32_at(&mut buf, Self::DIST_SRG_OFFSET, self.dist_srg);
        put_be_i32_at(&mut buf, Self::SRC_X_OFFSET, self.src_x);
        put_be_i32_at(&mut buf, Self::SRC_Y_OFFSET, self.src_y);
        put_be_i16_at(&mut buf, Self::SAMPLE_INTERVAL_OFFSET, self.sample_interval);
        put_be_i32_at(&mut buf, Self::ILINE_OFFSET, self.iline_id);
        put_be_i32_at(&mut buf, Self::XLINE_OFFSET, self.xline_id);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> TraceHeader {
        TraceHeader {
            trace_id: 17,
            field_record_number: 1001,
            dist_srg: -2500,
            src_x: 431_250,
            src_y: 6_120_980,
            sample_interval: 2000,
            iline_id: 1200,
            xline_id: 845,
        }
    }

    #[test]
    fn test_decode_hand_built_buffer() {
        let mut buf = vec![0u8; 240];
        buf[4..8].copy_from_slice(&17i32.to_be_bytes());
        buf[8..12].copy_from_slice(&1001i32.to_be_bytes());
        buf[36..40].copy_from_slice(&[0xFF, 0xFF, 0xF6, 0x3C]); // -2500
        buf[72..76].copy_from_slice(&431_250i32.to_be_bytes());
        buf[76..80].copy_from_slice(&6_120_980i32.to_be_bytes());
        buf[116..118].copy_from_slice(&2000i16.to_be_bytes());
        buf[188..192].copy_from_slice(&1200i32.to_be_bytes());
        buf[192..196].copy_from_slice(&845i32.to_be_bytes());

        let header = TraceHeader::decode(&buf).unwrap();
        assert_eq!(header, sample_header());
        assert!(header.dist_srg < 0);
    }

    #[test]
    fn test_encode_places_fields_at_offsets() {
        let buf = sample_header().encode();
        assert_eq!(&buf[4..8], &17i32.to_be_bytes());
        assert_eq!(&buf[36..40], &(-2500i32).to_be_bytes());
        assert_eq!(&buf[116..118], &2000i16.to_be_bytes());
        assert_eq!(TraceHeader::decode(&buf).unwrap(), sample_header());
    }

    #[test]
    fn test_negative_sample_interval_passes_through() {
        let mut buf = [0u8; 240];
        buf[116] = 0x80;
        buf[117] = 0x01;
        assert_eq!(TraceHeader::decode(&buf).unwrap().sample_interval, i16::MIN + 1);
    }

    #[test]
    fn test_short_buffer_is_truncated_header() {
        let buf = [0u8; 239];
        match TraceHeader::decode(&buf) {
            Err(SegyError::TruncatedHeader { len }) => assert_eq!(len, 239),
            other => panic!("expected TruncatedHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_bytes_ignored() {
        let mut buf = sample_header().encode().to_vec();
        buf.extend_from_slice(&[0xAB; 16]);
        assert_eq!(TraceHeader::decode(&buf).unwrap(), sample_header());
    }
}
