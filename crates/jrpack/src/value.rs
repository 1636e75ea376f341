//! # Decoded Values

use crate::types::Kind;
use crate::types::ResultType;

/// A typed result decoded from a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Void,
    Bool(bool),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Text(String),
    BoolArray(Vec<bool>),
    U8Array(Vec<u8>),
    I16Array(Vec<i16>),
    U16Array(Vec<u16>),
    I32Array(Vec<i32>),
    U32Array(Vec<u32>),
    I64Array(Vec<i64>),
    U64Array(Vec<u64>),
    F32Array(Vec<f32>),
    F64Array(Vec<f64>),
    TextArray(Vec<String>),
}

impl Value {
    /// The shape this value answers.
    pub fn result_type(&self) -> ResultType {
        use ResultType::Array;
        use ResultType::Scalar;
        match self {
            Value::Void => ResultType::Void,
            Value::Bool(_) => Scalar(Kind::Bool),
            Value::U8(_) => Scalar(Kind::U8),
            Value::I16(_) => Scalar(Kind::I16),
            Value::U16(_) => Scalar(Kind::U16),
            Value::I32(_) => Scalar(Kind::I32),
            Value::U32(_) => Scalar(Kind::U32),
            Value::I64(_) => Scalar(Kind::I64),
            Value::U64(_) => Scalar(Kind::U64),
            Value::F32(_) => Scalar(Kind::F32),
            Value::F64(_) => Scalar(Kind::F64),
            Value::Text(_) => Scalar(Kind::Text),
            Value::BoolArray(_) => Array(Kind::Bool),
            Value::U8Array(_) => Array(Kind::U8),
            Value::I16Array(_) => Array(Kind::I16),
            Value::U16Array(_) => Array(Kind::U16),
            Value::I32Array(_) => Array(Kind::I32),
            Value::U32Array(_) => Array(Kind::U32),
            Value::I64Array(_) => Array(Kind::I64),
            Value::U64Array(_) => Array(Kind::U64),
            Value::F32Array(_) => Array(Kind::F32),
            Value::F64Array(_) => Array(Kind::F64),
            Value::TextArray(_) => Array(Kind::Text),
        }
    }

    /// A byte result read as a character.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::U8(b) => Some(char::from(*b)),
            _ => None,
        }
    }

    /// A text result as a character sequence.
    pub fn into_chars(self) -> Option<Vec<char>> {
        match self {
            Value::Text(s) => Some(s.chars().collect()),
            _ => None,
        }
    }

    /// Number of elements in an array result, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::BoolArray(v) => Some(v.len()),
            Value::U8Array(v) => Some(v.len()),
            Value::I16Array(v) => Some(v.len()),
            Value::U16Array(v) => Some(v.len()),
            Value::I32Array(v) => Some(v.len()),
            Value::U32Array(v) => Some(v.len()),
            Value::I64Array(v) => Some(v.len()),
            Value::U64Array(v) => Some(v.len()),
            Value::F32Array(v) => Some(v.len()),
            Value::F64Array(v) => Some(v.len()),
            Value::TextArray(v) => Some(v.len()),
            _ => None,
        }
    }
}
