// src/sample/ibm.rs

/// Decode a big-endian IBM System/360 single precision float.
///
/// Layout: sign bit, 7-bit excess-64 base-16 exponent, 24-bit fraction.
/// The value is `sign * 16^(exp - 64) * 0.fraction`, evaluated here as
/// `sign * 16^(exp - 64 - 6) * fraction` in `f64` and narrowed to `f32`.
/// A zero fraction is exactly `0.0` whatever the sign and exponent bits say.
pub fn ibm_to_f32(bytes: [u8; 4]) -> f32 {
    let [a, b, c, d] = bytes;
    let mantissa = (b as i32) << 16 | (c as i32) << 8 | d as i32;
    if mantissa == 0 {
        return 0.0;
    }

    let sign = -((((a & 0x80) >> 6) as i32) - 1);
    let exponent = (a & 0x7F) as i32 - 64;
    (sign as f64 * 16f64.powi(exponent - 6) * mantissa as f64) as f32
}

/// Encode an `f32` as a big-endian IBM float, truncating the fraction.
///
/// Infinities saturate to the largest IBM magnitude. NaN encodes as zero.
pub fn f32_to_ibm(value: f32) -> [u8; 4] {
    if value == 0.0 || value.is_nan() {
        return [0; 4];
    }

    let sign: u8 = if value.is_sign_negative() { 0x80 } else { 0 };
    if value.is_infinite() {
        return [sign | 0x7F, 0xFF, 0xFF, 0xFF];
    }

    let mut fraction = (value as f64).abs();
    let mut exponent: i32 = 64;

    while fraction >= 1.0 {
        fraction /= 16.0;
        exponent += 1;
    }
    while fraction < 1.0 / 16.0 {
        fraction *= 16.0;
        exponent -= 1;
    }

    let mantissa = ((fraction * (1u32 << 24) as f64) as u32).min(0x00FF_FFFF);
    [
        sign | exponent as u8,
        (mantissa >> 16) as u8,
        (mantissa >> 8) as u8,
        mantissa as u8,
    ]
}
