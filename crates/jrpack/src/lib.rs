//! # Jrpack
//!
//! The wire format of the console feature RPC protocol.
//!
//! ## Philosophy
//!
//! - **Text Frames**: calls are single ASCII command lines, replies are `<token> <payload>`.
//! - **Closed Types**: every argument and result maps to one of ten fixed wire tags.
//! - **No I/O**: this crate builds strings and reads strings. Moving them is someone else's job.
//!
//! ## Layout
//!
//! - `types`: wire tags and declared result shapes.
//! - `arg`: call arguments and their encoding.
//! - `command`: call frames, system service frames, poll frames.
//! - `decode`: reply payload decoding.
//! - `order`: byte order of target memory.

mod arg;
mod command;
mod decode;
mod error;
pub mod order;
mod types;
mod value;

#[cfg(test)]
mod tests;

pub use crate::error::Error;
pub use crate::error::Result;

pub use crate::types::Kind;
pub use crate::types::ResultType;
pub use crate::types::WireTag;

pub use crate::arg::Argument;
pub use crate::arg::low_bytes;

pub use crate::command::BUF_ADDR_TOKEN;
pub use crate::command::COMMAND_VERB;
pub use crate::command::Call;
pub use crate::command::Feature;
pub use crate::command::FeatureCall;
pub use crate::command::MAX_ARGUMENTS;
pub use crate::command::PROTOCOL_VERSION;
pub use crate::command::Target;
pub use crate::command::ThreadContext;
pub use crate::command::poll_command;

pub use crate::decode::decode_reply;
pub use crate::decode::payload;
pub use crate::decode::tokens;

pub use crate::value::Value;
