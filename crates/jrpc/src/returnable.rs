//! # Typed Results
//!
//! Maps Rust types onto declared result shapes so calls can be written as
//! `client.call::<u32>(..)`. Only shapes the target can return are covered;
//! there is deliberately no impl for `i8`.

use jrpack::Kind;
use jrpack::Value;

/// A Rust type a remote routine can return.
pub trait Returnable: Sized {
    const KIND: Kind;

    /// Extracts a scalar of this type.
    fn from_value(value: Value) -> Option<Self>;

    /// Extracts an array of this type.
    fn from_array(value: Value) -> Option<Vec<Self>>;
}

macro_rules! impl_returnable {
    ($($ty:ty => $kind:ident, $scalar:ident, $array:ident;)*) => {$(
        impl Returnable for $ty {
            const KIND: Kind = Kind::$kind;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$scalar(v) => Some(v),
                    _ => None,
                }
            }

            fn from_array(value: Value) -> Option<Vec<Self>> {
                match value {
                    Value::$array(v) => Some(v),
                    _ => None,
                }
            }
        }
    )*};
}

impl_returnable! {
    bool => Bool, Bool, BoolArray;
    u8 => U8, U8, U8Array;
    i16 => I16, I16, I16Array;
    u16 => U16, U16, U16Array;
    i32 => I32, I32, I32Array;
    u32 => U32, U32, U32Array;
    i64 => I64, I64, I64Array;
    u64 => U64, U64, U64Array;
    f32 => F32, F32, F32Array;
    f64 => F64, F64, F64Array;
    String => Text, Text, TextArray;
}
