//! # Call Arguments
//!
//! An explicit union of everything a caller may pass to a remote routine,
//! and the per-kind rules that render it into the `params` clause.
//!
//! ## Format
//!
//! - **Scalars**: `<tag>\<decimal>\`
//! - **Booleans**: `<tag>/<0|1>\`
//! - **Blobs**: `<tag>/<length>\<uppercase hex>\`
//!
//! Integer and byte arrays are sent in little-endian element order, float
//! arrays in big-endian element order. The remote side has always read them
//! that way; do not unify them without checking a live target.

use std::fmt::Write;

use crate::types::WireTag;

/// A value passed to a remote routine.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Int32(i32),
    /// Sent as the `i32` with the same bit pattern.
    Uint32(u32),
    Bool(bool),
    Byte(u8),
    Float32(f32),
    Float64(f64),
    /// Each UTF-16 code unit is sent as its low byte.
    Text(String),
    Int32Array(Vec<i32>),
    Uint32Array(Vec<u32>),
    Float32Array(Vec<f32>),
    ByteArray(Vec<u8>),
    /// Anything else, sent as a raw 64-bit pattern.
    RawBits64(u64),
}

impl Argument {
    /// The wire tag this argument is encoded under.
    ///
    /// Depends only on the argument, never on the call's declared result.
    pub fn tag(&self) -> WireTag {
        match self {
            Argument::Int32(_) | Argument::Uint32(_) | Argument::Bool(_) | Argument::Byte(_) => WireTag::Int32,
            Argument::Float32(_) | Argument::Float64(_) => WireTag::Float,
            Argument::Text(_)
            | Argument::Int32Array(_)
            | Argument::Uint32Array(_)
            | Argument::Float32Array(_)
            | Argument::ByteArray(_) => WireTag::ByteArray,
            Argument::RawBits64(_) => WireTag::Uint64,
        }
    }

    /// Appends the wire form of this argument to `out`.
    pub fn encode(&self, out: &mut String) {
        let tag = self.tag();
        // Writing into a String cannot fail.
        let _ = match self {
            Argument::Int32(v) => write!(out, "{}\\{}\\", tag, v),
            Argument::Uint32(v) => write!(out, "{}\\{}\\", tag, *v as i32),
            Argument::Bool(b) => write!(out, "{}/{}\\", tag, u8::from(*b)),
            Argument::Byte(v) => write!(out, "{}\\{}\\", tag, v),
            Argument::Float32(v) => write!(out, "{}\\{}\\", tag, v),
            Argument::Float64(v) => write!(out, "{}\\{}\\", tag, v),
            Argument::Text(s) => {
                let bytes = low_bytes(s);
                write!(out, "{}/{}\\{}\\", tag, bytes.len(), hex::encode_upper(&bytes))
            }
            Argument::Int32Array(items) => {
                let bytes: Vec<u8> = items.iter().flat_map(|v| v.to_le_bytes()).collect();
                write_blob(out, tag, &bytes)
            }
            Argument::Uint32Array(items) => {
                let bytes: Vec<u8> = items.iter().flat_map(|v| v.to_le_bytes()).collect();
                write_blob(out, tag, &bytes)
            }
            Argument::Float32Array(items) => {
                let bytes: Vec<u8> = items.iter().flat_map(|v| v.to_be_bytes()).collect();
                write_blob(out, tag, &bytes)
            }
            Argument::ByteArray(bytes) => write_blob(out, tag, bytes),
            Argument::RawBits64(v) => write!(out, "{}\\{}\\", tag, v),
        };
    }
}

fn write_blob(out: &mut String, tag: WireTag, bytes: &[u8]) -> std::fmt::Result {
    write!(out, "{}/{}\\{}\\", tag, bytes.len(), hex::encode_upper(bytes))
}

/// Truncates every UTF-16 code unit of `s` to its low byte.
///
/// Characters outside the Basic Multilingual Plane take two bytes, one per
/// surrogate.
pub fn low_bytes(s: &str) -> Vec<u8> {
    s.encode_utf16().map(|unit| unit as u8).collect()
}

impl From<i32> for Argument {
    fn from(v: i32) -> Self { Argument::Int32(v) }
}

impl From<u32> for Argument {
    fn from(v: u32) -> Self { Argument::Uint32(v) }
}

impl From<bool> for Argument {
    fn from(v: bool) -> Self { Argument::Bool(v) }
}

impl From<u8> for Argument {
    fn from(v: u8) -> Self { Argument::Byte(v) }
}

impl From<f32> for Argument {
    fn from(v: f32) -> Self { Argument::Float32(v) }
}

impl From<f64> for Argument {
    fn from(v: f64) -> Self { Argument::Float64(v) }
}

impl From<&str> for Argument {
    fn from(v: &str) -> Self { Argument::Text(v.to_string()) }
}

impl From<String> for Argument {
    fn from(v: String) -> Self { Argument::Text(v) }
}

impl From<Vec<i32>> for Argument {
    fn from(v: Vec<i32>) -> Self { Argument::Int32Array(v) }
}

impl From<Vec<u32>> for Argument {
    fn from(v: Vec<u32>) -> Self { Argument::Uint32Array(v) }
}

impl From<Vec<f32>> for Argument {
    fn from(v: Vec<f32>) -> Self { Argument::Float32Array(v) }
}

impl From<Vec<u8>> for Argument {
    fn from(v: Vec<u8>) -> Self { Argument::ByteArray(v) }
}

impl From<&[u8]> for Argument {
    fn from(v: &[u8]) -> Self { Argument::ByteArray(v.to_vec()) }
}

// Widths without a dedicated tag travel as 64-bit patterns, sign-extended.

impl From<i16> for Argument {
    fn from(v: i16) -> Self { Argument::RawBits64(v as i64 as u64) }
}

impl From<u16> for Argument {
    fn from(v: u16) -> Self { Argument::RawBits64(v as u64) }
}

impl From<i64> for Argument {
    fn from(v: i64) -> Self { Argument::RawBits64(v as u64) }
}

impl From<u64> for Argument {
    fn from(v: u64) -> Self { Argument::RawBits64(v) }
}

/// Builds a `Vec<Argument>` from heterogeneous values.
///
/// ```
/// let args = jrpack::args![1u32, "hello", true, vec![1.0f32, 2.0]];
/// assert_eq!(args.len(), 4);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Argument>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Argument::from($arg)),+]
    };
}
