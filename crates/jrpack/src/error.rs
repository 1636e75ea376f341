//! # Error Definitions
//!
//! Failures raised while building commands or reading replies. None of these
//! involve I/O; they are all detected on strings and buffers already in hand.

/// Wire format failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The call carried more arguments than the target accepts.
    TooManyArguments(usize),
    /// The reply payload could not be parsed for the requested shape.
    MalformedResponse(String),
    /// A byte buffer is not a whole number of elements of the given width.
    InvalidBufferShape { len: usize, width: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyArguments(n) => {
                write!(f, "Too many arguments: {} (at most {})", n, crate::MAX_ARGUMENTS)
            }
            Self::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            Self::InvalidBufferShape { len, width } => {
                write!(f, "Buffer of {} bytes is not a multiple of {}-byte elements", len, width)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for wire operations.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn malformed(msg: impl Into<String>) -> Error {
    Error::MalformedResponse(msg.into())
}
