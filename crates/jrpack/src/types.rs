//! # Type Registry
//!
//! The protocol identifies the shape of every argument and every result with a
//! small integer, the wire tag. The numbers are fixed by the remote side.
//!
//! ## Invariants
//! - **Fixed Numbering**: `WireTag as u32` is exactly what goes on the wire.
//! - **Closed Results**: only the shapes in `ResultType::is_permitted` may be requested.

use std::fmt;

/// Identifies the shape of an encoded value.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireTag {
    Void = 0,
    Int32 = 1,
    Utf8Text = 2,
    Float = 3,
    Byte = 4,
    Int32Array = 5,
    Float32Array = 6,
    ByteArray = 7,
    Uint64 = 8,
    Uint64Array = 9,
}

impl WireTag {
    /// Returns the tag for a wire number, or `None` if unknown.
    pub fn from_u32(n: u32) -> Option<Self> {
        match n {
            0 => Some(WireTag::Void),
            1 => Some(WireTag::Int32),
            2 => Some(WireTag::Utf8Text),
            3 => Some(WireTag::Float),
            4 => Some(WireTag::Byte),
            5 => Some(WireTag::Int32Array),
            6 => Some(WireTag::Float32Array),
            7 => Some(WireTag::ByteArray),
            8 => Some(WireTag::Uint64),
            9 => Some(WireTag::Uint64Array),
            _ => None,
        }
    }

    /// The wire number.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn is_array(self) -> bool {
        matches!(self, WireTag::Int32Array | WireTag::Float32Array | WireTag::ByteArray | WireTag::Uint64Array)
    }
}

impl fmt::Display for WireTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Element kind of a declared result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Text,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::U8 => "u8",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::U16 => "u16",
            Kind::I32 => "i32",
            Kind::U32 => "u32",
            Kind::I64 => "i64",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Text => "string",
        }
    }
}

/// The statically declared shape of a call's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultType {
    Void,
    Scalar(Kind),
    /// One-dimensional array; the element count travels separately.
    Array(Kind),
}

impl ResultType {
    /// Whether the remote side can return this shape.
    ///
    /// Void, bool, byte, 16/32/64-bit integers of both signs, float, double,
    /// text, and one-dimensional arrays of each. Signed bytes are not.
    pub fn is_permitted(self) -> bool {
        match self {
            ResultType::Void => true,
            ResultType::Scalar(kind) | ResultType::Array(kind) => kind != Kind::I8,
        }
    }

    /// The tag announced in the `type=` clause for this result.
    pub fn wire_tag(self) -> WireTag {
        match self {
            ResultType::Void => WireTag::Void,
            ResultType::Scalar(kind) => match kind {
                Kind::I16 | Kind::U16 | Kind::I32 | Kind::U32 => WireTag::Int32,
                Kind::Text => WireTag::Utf8Text,
                Kind::F32 | Kind::F64 => WireTag::Float,
                Kind::U8 | Kind::I8 => WireTag::Byte,
                Kind::Bool | Kind::I64 | Kind::U64 => WireTag::Uint64,
            },
            ResultType::Array(kind) => match kind {
                Kind::I16 | Kind::U16 | Kind::I32 | Kind::U32 => WireTag::Int32Array,
                Kind::Text => WireTag::Utf8Text,
                Kind::F32 | Kind::F64 => WireTag::Float32Array,
                Kind::U8 | Kind::I8 => WireTag::ByteArray,
                Kind::Bool | Kind::I64 | Kind::U64 => WireTag::Uint64Array,
            },
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultType::Void => write!(f, "void"),
            ResultType::Scalar(kind) => write!(f, "{}", kind.name()),
            ResultType::Array(kind) => write!(f, "{}[]", kind.name()),
        }
    }
}
