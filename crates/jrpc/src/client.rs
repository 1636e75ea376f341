//! # RPC Client
//!
//! The `Client` owns a link to one target and runs remote calls over it:
//! validate the result type, encode the command, send it, screen the reply,
//! follow deferred replies, decode.
//!
//! Methods take `&mut self`, so a client has at most one call in flight.
//! Share it across threads behind a lock.

use jrpack::Argument;
use jrpack::Call;
use jrpack::ResultType;
use jrpack::Target;
use jrpack::ThreadContext;
use jrpack::Value;
use jrpack::decode_reply;
use jrpack::order::Word;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::error::Result;
use crate::memory::Memory;
use crate::poll;
use crate::returnable::Returnable;
use crate::transport::Transport;
use crate::transport::screen_reply;

/// RPC client for one debug target.
pub struct Client<T: Transport> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The underlying link. Typed memory access lives here, via `Memory`.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Sends a raw command line and screens the reply for remote failures.
    pub fn send(&mut self, command: &str) -> Result<String> {
        tracing::debug!(command, "sending");
        let reply = self.transport.send_command(command)?;
        tracing::trace!(reply = reply.as_str(), "received");
        screen_reply(reply)
    }

    /// Invokes a remote routine and decodes its result.
    ///
    /// `array_size` is the declared element count for array results; pass 0
    /// for scalars.
    ///
    /// # Errors
    /// - `Error::InvalidReturnType` before anything is sent if `ty` is not permitted.
    /// - `Error::Wire(TooManyArguments)` before anything is sent for more than 37 arguments.
    /// - Any remote, poll, transport, or decode failure, as it happens.
    #[tracing::instrument(level = "debug", skip(self, args), fields(argc = args.len()))]
    pub fn invoke(
        &mut self,
        thread: ThreadContext,
        target: &Target,
        ty: ResultType,
        array_size: u32,
        args: &[Argument],
    ) -> Result<Value> {
        if !ty.is_permitted() {
            return Err(Error::InvalidReturnType(ty));
        }

        let tag = ty.wire_tag();
        let command = Call::new(thread, target, tag, array_size, args).encode()?;

        let first = self.send(&command)?;
        let poll_config = self.config.poll;
        let reply = poll::resolve(|cmd| self.send(cmd), first, &poll_config)?;

        Ok(decode_reply(&reply, tag, ty, array_size)?)
    }

    /// Calls a routine returning a scalar.
    pub fn call<R: Returnable>(
        &mut self,
        thread: ThreadContext,
        target: impl Into<Target>,
        args: &[Argument],
    ) -> Result<R> {
        let ty = ResultType::Scalar(R::KIND);
        let value = self.invoke(thread, &target.into(), ty, 0, args)?;
        R::from_value(value).ok_or_else(|| unexpected(ty))
    }

    /// Calls a routine returning up to `count` elements.
    ///
    /// A `count` of zero returns an empty array without contacting the target.
    pub fn call_array<R: Returnable>(
        &mut self,
        thread: ThreadContext,
        target: impl Into<Target>,
        count: u32,
        args: &[Argument],
    ) -> Result<Vec<R>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let ty = ResultType::Array(R::KIND);
        let value = self.invoke(thread, &target.into(), ty, count, args)?;
        R::from_array(value).ok_or_else(|| unexpected(ty))
    }

    pub fn call_string(
        &mut self,
        thread: ThreadContext,
        target: impl Into<Target>,
        args: &[Argument],
    ) -> Result<String> {
        self.call::<String>(thread, target, args)
    }

    pub fn call_void(
        &mut self,
        thread: ThreadContext,
        target: impl Into<Target>,
        args: &[Argument],
    ) -> Result<()> {
        self.invoke(thread, &target.into(), ResultType::Void, 0, args)?;
        Ok(())
    }

    /// Calls a routine that returns a pointer, then reads `count` words there.
    pub fn call_indirect<W: Word>(
        &mut self,
        thread: ThreadContext,
        target: impl Into<Target>,
        count: u32,
        args: &[Argument],
    ) -> Result<Vec<W>> {
        let address = self.call::<u32>(thread, target, args)?;
        if count == 0 {
            return Ok(Vec::new());
        }
        self.transport.read_words(address, count)
    }
}

fn unexpected(ty: ResultType) -> Error {
    Error::Wire(jrpack::Error::MalformedResponse(format!("reply did not decode as {}", ty)))
}
