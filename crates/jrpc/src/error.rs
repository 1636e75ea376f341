//! # Error Definitions
//!
//! Everything a remote call or memory access can fail with.

use std::fmt;
use std::time::Duration;

use jrpack::ResultType;

use crate::transport::TransportError;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested result shape cannot be returned by the target.
    InvalidReturnType(ResultType),
    /// Building the command or reading the reply failed.
    Wire(jrpack::Error),
    /// The target answered, but without the feature handler installed.
    RemoteProtocolMissing,
    /// The target reported a failure.
    Remote(String),
    /// A deferred reply did not resolve within the poll budget.
    PollTimeout { polls: u32, elapsed: Duration },
    /// The link failed. Passed through unchanged.
    Transport(TransportError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReturnType(ty) => write!(
                f,
                "Invalid return type {}; supported: bool, byte, short, int, long, ushort, uint, ulong, float, double, string and arrays of them",
                ty
            ),
            Self::Wire(e) => write!(f, "Wire error: {}", e),
            Self::RemoteProtocolMissing => write!(f, "The feature handler is not installed on the target"),
            Self::Remote(msg) => write!(f, "Remote error: {}", msg),
            Self::PollTimeout { polls, elapsed } => {
                write!(f, "Deferred reply unresolved after {} polls ({:?})", polls, elapsed)
            }
            Self::Transport(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jrpack::Error> for Error {
    fn from(e: jrpack::Error) -> Self {
        Self::Wire(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
