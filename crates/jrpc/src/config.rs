//! # Client Configuration
//!
//! Tunables for the call facade. Everything has a default that matches the
//! target's usual behavior; override with the `with_*` builders.

use std::time::Duration;

/// Pause between polls of a deferred reply.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Total time a single call may spend polling.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30);

/// Bounds on the deferred reply poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
    /// Upper bound on follow-up commands, `None` for no count limit.
    pub max_polls: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
            max_polls: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientConfig {
    pub poll: PollConfig,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll.interval = interval;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll.timeout = timeout;
        self
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.poll.max_polls = Some(max_polls);
        self
    }
}
