// src/utils/ebcdic.rs
//! EBCDIC (code page 037) conversion for the SEG-Y textual header.
//!
//! Only the printable subset found in textual headers is mapped; anything
//! else becomes a space.

pub const EBCDIC_SPACE: u8 = 0x40;

pub fn ascii_to_ebcdic(c: u8) -> u8 {
    match c {
        b'a'..=b'i' => 0x81 + (c - b'a'),
        b'j'..=b'r' => 0x91 + (c - b'j'),
        b's'..=b'z' => 0xA2 + (c - b's'),
        b'A'..=b'I' => 0xC1 + (c - b'A'),
        b'J'..=b'R' => 0xD1 + (c - b'J'),
        b'S'..=b'Z' => 0xE2 + (c - b'S'),
        b'0'..=b'9' => 0xF0 + (c - b'0'),
        b'.' => 0x4B,
        b'<' => 0x4C,
        b'(' => 0x4D,
        b'+' => 0x4E,
        b'|' => 0x4F,
        b'&' => 0x50,
        b'!' => 0x5A,
        b'$' => 0x5B,
        b'*' => 0x5C,
        b')' => 0x5D,
        b';' => 0x5E,
        b'-' => 0x60,
        b'/' => 0x61,
        b',' => 0x6B,
        b'%' => 0x6C,
        b'_' => 0x6D,
        b'>' => 0x6E,
        b'?' => 0x6F,
        b':' => 0x7A,
        b'#' => 0x7B,
        b'@' => 0x7C,
        b'\'' => 0x7D,
        b'=' => 0x7E,
        b'"' => 0x7F,
        _ => EBCDIC_SPACE,
    }
}

pub fn ebcdic_to_ascii(c: u8) -> u8 {
    match c {
        0x81..=0x89 => b'a' + (c - 0x81),
        0x91..=0x99 => b'j' + (c - 0x91),
        0xA2..=0xA9 => b's' + (c - 0xA2),
        0xC1..=0xC9 => b'A' + (c - 0xC1),
        0xD1..=0xD9 => b'J' + (c - 0xD1),
        0xE2..=0xE9 => b'S' + (c - 0xE2),
        0xF0..=0xF9 => b'0' + (c - 0xF0),
        0x4B => b'.',
        0x4C => b'<',
        0x4D => b'(',
        0x4E => b'+',
        0x4F => b'|',
        0x50 => b'&',
        0x5A => b'!',
        0x5B => b'$',
        0x5C => b'*',
        0x5D => b')',
        0x5E => b';',
        0x60 => b'-',
        0x61 => b'/',
        0x6B => b',',
        0x6C => b'%',
        0x6D => b'_',
        0x6E => b'>',
        0x6F => b'?',
        0x7A => b':',
        0x7B => b'#',
        0x7C => b'@',
        0x7D => b'\'',
        0x7E => b'=',
        0x7F => b'"',
        _ => b' ',
    }
}

pub fn encode_ebcdic(text: &str) -> Vec<u8> {
    text.bytes().map(ascii_to_ebcdic).collect()
}

pub fn decode_ebcdic_lossy(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| ebcdic_to_ascii(b) as char).collect()
}
