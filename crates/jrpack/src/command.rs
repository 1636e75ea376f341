//! # Command Frames
//!
//! Builds the textual commands sent to the target.
//!
//! ## Grammar
//!
//! ```text
//! consolefeatures ver=<version> type=<tag> [system] [module="<name>" ord=<ordinal>] as=<arraySize> params="A\<addressHex>\A\<argCount>\<args>\"
//! ```
//!
//! ## Invariants
//! - **Fail Before Output**: argument count is validated before any text is produced.
//! - **Uppercase Hex**: addresses are rendered without prefix or padding.

use std::fmt::Write;

use crate::arg::Argument;
use crate::arg::low_bytes;
use crate::error::Error;
use crate::error::Result;
use crate::types::WireTag;

/// Protocol revision announced in every call.
pub const PROTOCOL_VERSION: u32 = 2;

/// The target rejects calls with more arguments than this.
pub const MAX_ARGUMENTS: usize = 37;

/// The command verb every frame starts with.
pub const COMMAND_VERB: &str = "consolefeatures";

/// Marker a deferred reply carries in place of its payload.
pub const BUF_ADDR_TOKEN: &str = "buf_addr=";

/// Which execution context runs the routine on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadContext {
    /// Privileged context. Emits the `system` marker.
    #[default]
    System,
    /// The running title's context.
    Title,
}

/// The routine being invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An absolute address.
    Address(u32),
    /// An export of a loaded module, by ordinal.
    Ordinal { module: String, ordinal: u32 },
}

impl Target {
    pub fn ordinal(module: impl Into<String>, ordinal: u32) -> Self {
        Target::Ordinal { module: module.into(), ordinal }
    }
}

impl From<u32> for Target {
    fn from(address: u32) -> Self {
        Target::Address(address)
    }
}

/// Encodes an outbound call frame.
pub struct Call<'a> {
    pub thread: ThreadContext,
    pub target: &'a Target,
    pub tag: WireTag,
    pub array_size: u32,
    pub args: &'a [Argument],
}

impl<'a> Call<'a> {
    pub fn new(thread: ThreadContext, target: &'a Target, tag: WireTag, array_size: u32, args: &'a [Argument]) -> Self {
        Self { thread, target, tag, array_size, args }
    }

    /// Render this call as a command line.
    ///
    /// # Errors
    /// Returns `Error::TooManyArguments` if more than `MAX_ARGUMENTS` were given.
    pub fn encode(&self) -> Result<String> {
        if self.args.len() > MAX_ARGUMENTS {
            return Err(Error::TooManyArguments(self.args.len()));
        }

        let mut out = String::with_capacity(128);
        let _ = write!(out, "{} ver={} type={}", COMMAND_VERB, PROTOCOL_VERSION, self.tag);
        if self.thread == ThreadContext::System {
            out.push_str(" system");
        }
        let address = match self.target {
            Target::Address(address) => *address,
            Target::Ordinal { module, ordinal } => {
                let _ = write!(out, " module=\"{}\" ord={}", module, ordinal);
                0
            }
        };
        let _ = write!(out, " as={}", self.array_size);

        write_params(&mut out, address, self.args.len());
        for arg in self.args {
            arg.encode(&mut out);
        }
        out.push('"');
        Ok(out)
    }
}

/// Fixed system services exposed by the target, by call type code.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    ResolveFunction = 9,
    CpuKey = 10,
    Shutdown = 11,
    Notify = 12,
    KernelVersion = 13,
    SetLeds = 14,
    Temperature = 15,
    TitleId = 16,
    ConsoleType = 17,
    ConstantMemorySet = 18,
}

/// Encodes a system service command.
///
/// These frames carry no thread marker and no array size, and send strings
/// under the text tag rather than as byte blobs.
#[derive(Debug, Clone)]
pub struct FeatureCall {
    feature: Feature,
    address: u32,
    count: usize,
    params: String,
}

impl FeatureCall {
    pub fn new(feature: Feature) -> Self {
        Self { feature, address: 0, count: 0, params: String::new() }
    }

    /// Sets the address slot of the `params` clause.
    pub fn at(mut self, address: u32) -> Self {
        self.address = address;
        self
    }

    pub fn int(mut self, v: i32) -> Self {
        let _ = write!(self.params, "{}\\{}\\", WireTag::Int32, v);
        self.count += 1;
        self
    }

    /// Sent as the `i32` with the same bit pattern.
    pub fn uint(self, v: u32) -> Self {
        self.int(v as i32)
    }

    /// Sent as the plain unsigned decimal, under the `Int32` tag.
    pub fn unsigned(mut self, v: u32) -> Self {
        let _ = write!(self.params, "{}\\{}\\", WireTag::Int32, v);
        self.count += 1;
        self
    }

    pub fn text(mut self, s: &str) -> Self {
        let bytes = low_bytes(s);
        let _ = write!(self.params, "{}/{}\\{}\\", WireTag::Utf8Text, bytes.len(), hex::encode_upper(&bytes));
        self.count += 1;
        self
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(64 + self.params.len());
        let _ = write!(out, "{} ver={} type={}", COMMAND_VERB, PROTOCOL_VERSION, self.feature as u32);
        write_params(&mut out, self.address, self.count);
        out.push_str(&self.params);
        out.push('"');
        out
    }
}

/// The follow-up command that fetches a deferred reply.
pub fn poll_command(address: u32) -> String {
    format!("{} {}0x{:X}", COMMAND_VERB, BUF_ADDR_TOKEN, address)
}

fn write_params(out: &mut String, address: u32, count: usize) {
    let _ = write!(out, " params=\"A\\{:X}\\A\\{}\\", address, count);
}
