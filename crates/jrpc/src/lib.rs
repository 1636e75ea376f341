//! # Jrpc
//!
//! Blocking remote procedure calls into a debug target over its feature handler.
//!
//! ```text
//! Client::call ──▶ jrpack::Call::encode ──▶ Transport::send_command
//!                                              │
//!   decode_reply ◀── poll::resolve ◀── screen_reply
//! ```
//!
//! ## Layout
//!
//! - `transport`: the link to the target, plus reply screening.
//! - `client`: validated, typed calls.
//! - `features`: fixed system services (CPU key, LEDs, temperatures, ...).
//! - `memory`: typed reads and writes of target memory.
//! - `mock_transport`: scripted transports for tests.

pub mod client;
pub mod config;
pub mod error;
pub mod features;
pub mod memory;
pub mod mock_transport;
pub mod poll;
pub mod returnable;
pub mod transport;


pub use jrpack;
pub use jrpack::Argument;
pub use jrpack::Kind;
pub use jrpack::ResultType;
pub use jrpack::Target;
pub use jrpack::ThreadContext;
pub use jrpack::Value;
pub use jrpack::WireTag;
pub use jrpack::args;

pub use crate::client::Client;
pub use crate::config::ClientConfig;
pub use crate::config::PollConfig;
pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::features::ConstantWrite;
pub use crate::features::LedState;
pub use crate::features::TemperatureSensor;
pub use crate::memory::Memory;
pub use crate::returnable::Returnable;
pub use crate::transport::Transport;
pub use crate::transport::TransportError;
