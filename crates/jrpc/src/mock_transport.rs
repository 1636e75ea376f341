//! Mock transports for testing.
//!
//! Neither talks to a real target. `MockTransport` plays back scripted replies
//! and keeps a sparse byte map as target memory; `CallTransport` hands every
//! command to a closure.

use std::collections::HashMap;
use std::collections::VecDeque;

use crate::transport;
use crate::transport::Transport;
use crate::transport::TransportError;

/// A scripted transport.
///
/// Replies are returned in the order they were queued. Once the script runs
/// out, every command fails with `ConnectionLost`. Memory is a byte map where
/// unset addresses read as zero.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: VecDeque<transport::Result<String>>,
    commands: Vec<String>,
    memory: HashMap<u32, u8>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply line.
    pub fn reply(mut self, line: impl Into<String>) -> Self {
        self.replies.push_back(Ok(line.into()));
        self
    }

    /// Queues a link failure.
    pub fn fail(mut self, error: TransportError) -> Self {
        self.replies.push_back(Err(error));
        self
    }

    /// Seeds target memory with bytes as they would be stored on the target.
    pub fn load(mut self, address: u32, bytes: &[u8]) -> Self {
        for (i, b) in bytes.iter().enumerate() {
            self.memory.insert(address.wrapping_add(i as u32), *b);
        }
        self
    }

    /// Commands sent so far, oldest first.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn sent(&self) -> usize {
        self.commands.len()
    }

    /// Raw target memory.
    pub fn memory_at(&self, address: u32, length: u32) -> Vec<u8> {
        (0..length)
            .map(|i| self.memory.get(&address.wrapping_add(i)).copied().unwrap_or(0))
            .collect()
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.len()
    }
}

impl Transport for MockTransport {
    fn send_command(&mut self, command: &str) -> transport::Result<String> {
        self.commands.push(command.to_string());
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::ConnectionLost("script exhausted".into())))
    }

    fn read_memory(&mut self, address: u32, length: u32) -> transport::Result<Vec<u8>> {
        Ok(self.memory_at(address, length))
    }

    fn write_memory(&mut self, address: u32, data: &[u8]) -> transport::Result<u32> {
        for (i, b) in data.iter().enumerate() {
            self.memory.insert(address.wrapping_add(i as u32), *b);
        }
        Ok(data.len() as u32)
    }
}

/// A request-response mock that delegates every command to a handler.
///
/// Memory access is not supported and fails with an I/O error.
pub struct CallTransport<F>
where
    F: FnMut(&str) -> transport::Result<String>,
{
    handler: F,
}

impl<F> CallTransport<F>
where
    F: FnMut(&str) -> transport::Result<String>,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F> Transport for CallTransport<F>
where
    F: FnMut(&str) -> transport::Result<String>,
{
    fn send_command(&mut self, command: &str) -> transport::Result<String> {
        (self.handler)(command)
    }

    fn read_memory(&mut self, _address: u32, _length: u32) -> transport::Result<Vec<u8>> {
        Err(TransportError::Io("CallTransport has no memory".into()))
    }

    fn write_memory(&mut self, _address: u32, _data: &[u8]) -> transport::Result<u32> {
        Err(TransportError::Io("CallTransport has no memory".into()))
    }
}
