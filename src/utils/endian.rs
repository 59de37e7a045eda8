// src/utils/endian.rs
use byteorder::{BigEndian, ByteOrder};

// Fixed-offset big-endian field access. Callers guarantee `offset + width <= buf.len()`.

pub fn be_i32_at(buf: &[u8], offset: usize) -> i32 {
    BigEndian::read_i32(&buf[offset..offset + 4])
}

pub fn be_i16_at(buf: &[u8], offset: usize) -> i16 {
    BigEndian::read_i16(&buf[offset..offset + 2])
}

pub fn be_u16_at(buf: &[u8], offset: usize) -> u16 {
    BigEndian::read_u16(&buf[offset..offset + 2])
}

pub fn put_be_i32_at(buf: &mut [u8], offset: usize, value: i32) {
    BigEndian::write_i32(&mut buf[offset..offset + 4], value);
}

pub fn put_be_i16_at(buf: &mut [u8], offset: usize, value: i16) {
    BigEndian::write_i16(&mut buf[offset..offset + 2], value);
}

pub fn put_be_u16_at(buf: &mut [u8], offset: usize, value: u16) {
    BigEndian::write_u16(&mut buf[offset..offset + 2], value);
}
