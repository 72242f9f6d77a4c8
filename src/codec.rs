//! Scalar codec
//!
//! Encoding and decoding of primitive values to the raw byte strings the
//! engine stores.
//!
//! ## Value Format
//!
//! ```text
//! bool   ┌──────────┐
//!        │ 0x00/01  │                      decode: nonzero = true
//!        └──────────┘
//! i32    ┌──────────────────────┐
//! f32    │   4 bytes, big-endian │         f32: IEEE-754 bit pattern
//!        └──────────────────────┘
//! i64    ┌──────────────────────────────────────┐
//! f64    │           8 bytes, big-endian         │
//!        └──────────────────────────────────────┘
//! string raw UTF-8, no length prefix (the engine stores lengths)
//! ```
//!
//! The byte order is part of the on-disk format: values written by one
//! process are read back by the next, so it must never change.
//!
//! Decoding requires the exact width of the type. Short or long input and
//! invalid UTF-8 are rejected with [`PathKvError::Decode`].

use bytes::{Buf, BufMut};

use crate::error::{PathKvError, Result};

/// Encoded size of a bool
pub const BOOL_SIZE: usize = 1;

/// Encoded size of an i32
pub const I32_SIZE: usize = 4;

/// Encoded size of an i64
pub const I64_SIZE: usize = 8;

/// Encoded size of an f32
pub const F32_SIZE: usize = 4;

/// Encoded size of an f64
pub const F64_SIZE: usize = 8;

// =============================================================================
// Fixed-width Scalars
// =============================================================================

pub fn encode_bool(value: bool) -> Vec<u8> {
    vec![value as u8]
}

pub fn decode_bool(bytes: &[u8]) -> Result<bool> {
    check_width("bool", bytes, BOOL_SIZE)?;
    Ok(bytes[0] != 0)
}

pub fn encode_i32(value: i32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(I32_SIZE);
    buf.put_i32(value);
    buf
}

pub fn decode_i32(bytes: &[u8]) -> Result<i32> {
    check_width("i32", bytes, I32_SIZE)?;
    let mut buf = bytes;
    Ok(buf.get_i32())
}

pub fn encode_i64(value: i64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(I64_SIZE);
    buf.put_i64(value);
    buf
}

pub fn decode_i64(bytes: &[u8]) -> Result<i64> {
    check_width("i64", bytes, I64_SIZE)?;
    let mut buf = bytes;
    Ok(buf.get_i64())
}

pub fn encode_f32(value: f32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(F32_SIZE);
    buf.put_f32(value);
    buf
}

pub fn decode_f32(bytes: &[u8]) -> Result<f32> {
    check_width("f32", bytes, F32_SIZE)?;
    let mut buf = bytes;
    Ok(buf.get_f32())
}

pub fn encode_f64(value: f64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(F64_SIZE);
    buf.put_f64(value);
    buf
}

pub fn decode_f64(bytes: &[u8]) -> Result<f64> {
    check_width("f64", bytes, F64_SIZE)?;
    let mut buf = bytes;
    Ok(buf.get_f64())
}

// =============================================================================
// Strings
// =============================================================================

pub fn encode_str(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

pub fn decode_str(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| PathKvError::Decode(format!("string: invalid UTF-8 ({})", e.utf8_error())))
}

fn check_width(type_name: &str, bytes: &[u8], width: usize) -> Result<()> {
    if bytes.len() != width {
        return Err(PathKvError::Decode(format!(
            "{}: expected {} bytes, got {}",
            type_name,
            width,
            bytes.len()
        )));
    }
    Ok(())
}

// =============================================================================
// Scalar Trait
// =============================================================================

/// A value the codec knows how to store
///
/// Lets typed store helpers be generic over the supported primitives.
pub trait Scalar: Sized {
    fn encode(&self) -> Vec<u8>;

    fn decode(bytes: &[u8]) -> Result<Self>;
}

impl Scalar for bool {
    fn encode(&self) -> Vec<u8> {
        encode_bool(*self)
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        decode_bool(bytes)
    }
}

impl Scalar for i32 {
    fn encode(&self) -> Vec<u8> {
        encode_i32(*self)
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        decode_i32(bytes)
    }
}

impl Scalar for i64 {
    fn encode(&self) -> Vec<u8> {
        encode_i64(*self)
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        decode_i64(bytes)
    }
}

impl Scalar for f32 {
    fn encode(&self) -> Vec<u8> {
        encode_f32(*self)
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        decode_f32(bytes)
    }
}

impl Scalar for f64 {
    fn encode(&self) -> Vec<u8> {
        encode_f64(*self)
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        decode_f64(bytes)
    }
}

impl Scalar for String {
    fn encode(&self) -> Vec<u8> {
        encode_str(self)
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        decode_str(bytes)
    }
}
