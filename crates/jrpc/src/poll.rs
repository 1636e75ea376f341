//! # Deferred Replies
//!
//! A routine with a large or slow result answers with `buf_addr=<hex>` instead
//! of a payload. The result is fetched by re-sending `consolefeatures
//! buf_addr=0x<hex>` until a reply without the token arrives.
//!
//! ## Invariants
//! - **Bounded**: polling stops with `Error::PollTimeout` once the configured
//!   time or poll count is spent.
//! - **Blocking**: the caller's thread sleeps between polls, never past the
//!   deadline. No poll is sent once the timeout has passed.

use std::time::Duration;
use std::time::Instant;

use jrpack::BUF_ADDR_TOKEN;
use jrpack::poll_command;

use crate::config::PollConfig;
use crate::error::Error;
use crate::error::Result;

/// Extracts the address from a deferred reply.
///
/// Returns `Ok(None)` for a final reply.
pub fn deferred_address(reply: &str) -> Result<Option<u32>> {
    let Some(idx) = reply.find(BUF_ADDR_TOKEN) else {
        return Ok(None);
    };
    let rest = &reply[idx + BUF_ADDR_TOKEN.len()..];
    let rest = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .unwrap_or(rest);
    let end = rest.find(|c: char| !c.is_ascii_hexdigit()).unwrap_or(rest.len());

    u32::from_str_radix(&rest[..end], 16).map(Some).map_err(|_| {
        Error::Wire(jrpack::Error::MalformedResponse(format!("bad deferred address in {:?}", reply)))
    })
}

/// Follows deferred replies until a final one arrives.
///
/// `send` issues one command and returns its screened reply.
pub fn resolve<F>(mut send: F, first: String, config: &PollConfig) -> Result<String>
where
    F: FnMut(&str) -> Result<String>,
{
    let start = Instant::now();
    let mut polls = 0u32;
    let mut reply = first;

    while let Some(address) = deferred_address(&reply)? {
        let elapsed = start.elapsed();
        let over_count = config.max_polls.is_some_and(|max| polls >= max);
        if over_count || elapsed >= config.timeout {
            return Err(timed_out(polls, elapsed, address));
        }

        // Never sleep past the deadline.
        std::thread::sleep(config.interval.min(config.timeout - elapsed));
        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            return Err(timed_out(polls, elapsed, address));
        }

        tracing::debug!(polls, address = %format!("{:#X}", address), "polling deferred reply");
        reply = send(&poll_command(address))?;
        polls += 1;
    }

    Ok(reply)
}

fn timed_out(polls: u32, elapsed: Duration, address: u32) -> Error {
    tracing::warn!(polls, ?elapsed, address = %format!("{:#X}", address), "deferred reply did not resolve");
    Error::PollTimeout { polls, elapsed }
}
