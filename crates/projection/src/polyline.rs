//! Encoded polyline format (precision 5).
//!
//! Each coordinate is quantized to 1e-5 degrees, delta-encoded against the
//! previous point, zig-zag mapped so the sign lives in the low bit, then
//! emitted as 5-bit groups offset into printable ASCII (`?` = 63). A set
//! `0x20` bit marks that another group follows.

use thiserror::Error;

/// Quantization factor for 5 decimal places.
const FACTOR: f64 = 1e5;

/// Printable ASCII offset for each 5-bit group.
const ASCII_OFFSET: u8 = 63;

const CONTINUATION_BIT: u64 = 0x20;
const CHUNK_MASK: u64 = 0x1f;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolylineError {
    #[error("invalid polyline character {0:?} at byte {1}")]
    InvalidCharacter(char, usize),

    #[error("polyline ends in the middle of a value")]
    Truncated,

    #[error("polyline has a latitude without a longitude")]
    UnpairedCoordinate,
}

/// Encode (lat, lng) pairs into a polyline token.
pub fn encode(points: &[(f64, f64)]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for &(lat, lng) in points {
        let lat = quantize(lat);
        let lng = quantize(lng);
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Decode a polyline token back into (lat, lng) pairs.
pub fn decode(encoded: &str) -> Result<Vec<(f64, f64)>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut values = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        let mut shift = 0u32;
        let mut result = 0u64;
        loop {
            let byte = *bytes.get(index).ok_or(PolylineError::Truncated)?;
            if !(ASCII_OFFSET..=126).contains(&byte) || shift > 60 {
                return Err(PolylineError::InvalidCharacter(byte as char, index));
            }
            index += 1;
            let chunk = (byte - ASCII_OFFSET) as u64;
            result |= (chunk & CHUNK_MASK) << shift;
            shift += 5;
            if chunk & CONTINUATION_BIT == 0 {
                break;
            }
        }
        values.push(unzigzag(result));
    }

    if values.len() % 2 != 0 {
        return Err(PolylineError::UnpairedCoordinate);
    }

    let mut lat = 0i64;
    let mut lng = 0i64;
    Ok(values
        .chunks_exact(2)
        .map(|pair| {
            lat += pair[0];
            lng += pair[1];
            (lat as f64 / FACTOR, lng as f64 / FACTOR)
        })
        .collect())
}

/// Round half away from zero, matching the reference encoders.
fn quantize(degrees: f64) -> i64 {
    (degrees * FACTOR).round() as i64
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = zigzag(delta);
    while value >= CONTINUATION_BIT {
        out.push((((value & CHUNK_MASK) | CONTINUATION_BIT) as u8 + ASCII_OFFSET) as char);
        value >>= 5;
    }
    out.push((value as u8 + ASCII_OFFSET) as char);
}

fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
