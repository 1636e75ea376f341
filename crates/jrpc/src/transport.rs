//! # Transport Abstraction
//!
//! A minimal, blocking interface to the debug link.
//!
//! ## Philosophy
//!
//! - **Text and Bytes**: the Transport moves command lines and raw memory. It
//!   knows nothing about wire tags, arguments, or replies.
//! - **Request-Response**: one command in, one reply line out.
//! - **Owned Link**: connection setup, retries, and timeouts on the link itself
//!   belong to the implementor.

use std::fmt;

use crate::error::Error;

/// Errors that occur at the link layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The target is unreachable or the connection was dropped.
    ConnectionLost(String),
    /// The link gave up waiting for the target.
    Timeout,
    /// Generic I/O error or internal transport failure.
    Io(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionLost(msg) => write!(f, "Connection lost: {}", msg),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

pub type Result<T> = std::result::Result<T, TransportError>;

/// A link to a debug target.
///
/// # Invariants
/// - `send_command` returns the reply line verbatim; it must not interpret it.
/// - `read_memory` returns the bytes exactly as stored on the target.
/// - `write_memory` returns the number of bytes the target accepted.
pub trait Transport {
    /// Sends one command line and waits for its reply line.
    fn send_command(&mut self, command: &str) -> Result<String>;

    /// Reads `length` bytes starting at `address`.
    fn read_memory(&mut self, address: u32, length: u32) -> Result<Vec<u8>>;

    /// Writes `data` starting at `address`.
    fn write_memory(&mut self, address: u32, data: &[u8]) -> Result<u32>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_command(&mut self, command: &str) -> Result<String> {
        (**self).send_command(command)
    }

    fn read_memory(&mut self, address: u32, length: u32) -> Result<Vec<u8>> {
        (**self).read_memory(address, length)
    }

    fn write_memory(&mut self, address: u32, data: &[u8]) -> Result<u32> {
        (**self).write_memory(address, data)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_command(&mut self, command: &str) -> Result<String> {
        (**self).send_command(command)
    }

    fn read_memory(&mut self, address: u32, length: u32) -> Result<Vec<u8>> {
        (**self).read_memory(address, length)
    }

    fn write_memory(&mut self, address: u32, data: &[u8]) -> Result<u32> {
        (**self).write_memory(address, data)
    }
}

/// Marks a reply as a failure reported by the target.
pub const ERROR_MARKER: &str = "error=";

/// Appears in replies from a target without the feature handler loaded.
pub const MISSING_HANDLER_MARKER: &str = "DEBUG";

/// Where the target's error text starts in an error reply (`"NNN- error="`).
const ERROR_TEXT_OFFSET: usize = 11;

/// Rejects replies that report a remote failure.
///
/// An `error=` reply becomes `Error::Remote` carrying the text after the
/// status prefix, starting at the first character boundary at or past it.
/// A reply mentioning `DEBUG` means the feature handler is not installed on
/// the target.
pub fn screen_reply(reply: String) -> crate::error::Result<String> {
    if reply.contains(ERROR_MARKER) {
        let msg = (ERROR_TEXT_OFFSET..reply.len())
            .find(|&i| reply.is_char_boundary(i))
            .map_or("", |start| &reply[start..]);
        return Err(Error::Remote(msg.to_string()));
    }
    if reply.contains(MISSING_HANDLER_MARKER) {
        return Err(Error::RemoteProtocolMissing);
    }
    Ok(reply)
}
