//! # Reply Decoding
//!
//! A final reply is a single line `<token> <payload>`. The payload starts
//! right after the first space and is read according to the call's wire tag
//! and the caller's declared result type.
//!
//! ## Payload Forms
//! - **Int32, Byte, Uint64**: one hexadecimal number.
//! - **Float**: one decimal number.
//! - **Utf8Text**: the text itself.
//! - **Int32Array**: `,`-separated hexadecimal numbers, terminated by `;`.
//! - **Float32Array, ByteArray, Uint64Array**: `,`-separated decimal numbers, terminated by `;`.
//!
//! Arrays stop at the declared element count or at the terminator, whichever
//! comes first. Stopping early is normal and yields a shorter result.

use std::str::FromStr;

use crate::error::Result;
use crate::error::malformed;
use crate::types::Kind;
use crate::types::ResultType;
use crate::types::WireTag;
use crate::value::Value;

/// Returns the payload of a reply: everything after the first space.
pub fn payload(reply: &str) -> Result<&str> {
    match reply.find(' ') {
        Some(idx) => Ok(&reply[idx + 1..]),
        None => Err(malformed(format!("no payload in reply {:?}", reply))),
    }
}

/// Decodes a final reply into a value of the declared type.
///
/// `count` is the declared element count for array results and is ignored
/// otherwise.
pub fn decode_reply(reply: &str, tag: WireTag, ty: ResultType, count: u32) -> Result<Value> {
    if tag == WireTag::Void || ty == ResultType::Void {
        return Ok(Value::Void);
    }
    let body = payload(reply)?;

    match (tag, ty) {
        (WireTag::Int32, ResultType::Scalar(kind)) => {
            let raw = parse_hex_u32(body)?;
            match kind {
                Kind::I32 => Ok(Value::I32(raw as i32)),
                Kind::U32 => Ok(Value::U32(raw)),
                Kind::I16 => Ok(Value::I16(raw as u16 as i16)),
                Kind::U16 => Ok(Value::U16(raw as u16)),
                Kind::U8 => Ok(Value::U8(raw as u8)),
                Kind::Bool => Ok(Value::Bool(raw != 0)),
                _ => Err(mismatch(tag, ty)),
            }
        }
        (WireTag::Byte, ResultType::Scalar(kind)) => {
            let raw = parse_hex_u8(body)?;
            match kind {
                Kind::U8 => Ok(Value::U8(raw)),
                Kind::Bool => Ok(Value::Bool(raw != 0)),
                _ => Err(mismatch(tag, ty)),
            }
        }
        (WireTag::Uint64, ResultType::Scalar(kind)) => {
            let raw = parse_hex_u64(body)?;
            match kind {
                Kind::U64 => Ok(Value::U64(raw)),
                Kind::I64 => Ok(Value::I64(raw as i64)),
                Kind::Bool => Ok(Value::Bool(raw != 0)),
                _ => Err(mismatch(tag, ty)),
            }
        }
        (WireTag::Float, ResultType::Scalar(kind)) => match kind {
            Kind::F32 => Ok(Value::F32(parse_decimal(body)?)),
            Kind::F64 => Ok(Value::F64(parse_decimal(body)?)),
            _ => Err(mismatch(tag, ty)),
        },
        (WireTag::Utf8Text, ResultType::Scalar(Kind::Text)) => Ok(Value::Text(body.to_string())),
        (WireTag::Utf8Text, ResultType::Array(Kind::Text)) => {
            let items = tokens(body, count)?;
            Ok(Value::TextArray(items.into_iter().map(str::to_string).collect()))
        }
        (WireTag::Int32Array, ResultType::Array(kind)) => {
            let raw = tokens(body, count)?
                .into_iter()
                .map(parse_hex_u32)
                .collect::<Result<Vec<u32>>>()?;
            match kind {
                Kind::I32 => Ok(Value::I32Array(raw.into_iter().map(|v| v as i32).collect())),
                Kind::U32 => Ok(Value::U32Array(raw)),
                Kind::I16 => Ok(Value::I16Array(raw.into_iter().map(|v| v as u16 as i16).collect())),
                Kind::U16 => Ok(Value::U16Array(raw.into_iter().map(|v| v as u16).collect())),
                _ => Err(mismatch(tag, ty)),
            }
        }
        (WireTag::Float32Array, ResultType::Array(kind)) => {
            let items = tokens(body, count)?;
            match kind {
                Kind::F32 => Ok(Value::F32Array(parse_all(items)?)),
                Kind::F64 => Ok(Value::F64Array(parse_all(items)?)),
                _ => Err(mismatch(tag, ty)),
            }
        }
        (WireTag::ByteArray, ResultType::Array(Kind::U8)) => {
            Ok(Value::U8Array(parse_all(tokens(body, count)?)?))
        }
        (WireTag::Uint64Array, ResultType::Array(kind)) => {
            let raw = tokens(body, count)?
                .into_iter()
                .map(parse_decimal_bits64)
                .collect::<Result<Vec<u64>>>()?;
            match kind {
                Kind::U64 => Ok(Value::U64Array(raw)),
                Kind::I64 => Ok(Value::I64Array(raw.into_iter().map(|v| v as i64).collect())),
                Kind::Bool => Ok(Value::BoolArray(raw.into_iter().map(|v| v != 0).collect())),
                _ => Err(mismatch(tag, ty)),
            }
        }
        _ => Err(mismatch(tag, ty)),
    }
}

/// Splits an array payload into at most `count` element tokens.
///
/// Everything from the first `;` on is ignored. Surplus elements past
/// `count` are dropped.
pub fn tokens(body: &str, count: u32) -> Result<Vec<&str>> {
    let body = match body.find(';') {
        Some(end) => &body[..end],
        None => body,
    };
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut items = Vec::with_capacity(count as usize);
    for item in body.split(',').take(count as usize) {
        let item = item.trim();
        if item.is_empty() {
            return Err(malformed(format!("empty element in {:?}", body)));
        }
        items.push(item);
    }
    Ok(items)
}

fn parse_hex_u32(s: &str) -> Result<u32> {
    u32::from_str_radix(s.trim(), 16).map_err(|_| malformed(format!("{:?} is not a 32-bit hex value", s)))
}

fn parse_hex_u8(s: &str) -> Result<u8> {
    u8::from_str_radix(s.trim(), 16).map_err(|_| malformed(format!("{:?} is not a hex byte", s)))
}

fn parse_hex_u64(s: &str) -> Result<u64> {
    u64::from_str_radix(s.trim(), 16).map_err(|_| malformed(format!("{:?} is not a 64-bit hex value", s)))
}

fn parse_decimal<T: FromStr>(s: &str) -> Result<T> {
    s.trim().parse().map_err(|_| malformed(format!("{:?} is not a decimal number", s)))
}

/// Unsigned decimal, or a negative decimal taken as its two's-complement bits.
fn parse_decimal_bits64(s: &str) -> Result<u64> {
    let s = s.trim();
    if let Ok(v) = s.parse::<u64>() {
        return Ok(v);
    }
    s.parse::<i64>()
        .map(|v| v as u64)
        .map_err(|_| malformed(format!("{:?} is not a 64-bit decimal value", s)))
}

fn parse_all<T: FromStr>(items: Vec<&str>) -> Result<Vec<T>> {
    items.into_iter().map(parse_decimal).collect()
}

fn mismatch(tag: WireTag, ty: ResultType) -> crate::error::Error {
    malformed(format!("a type {} reply cannot be read as {}", tag, ty))
}
