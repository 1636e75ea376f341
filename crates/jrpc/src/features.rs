//! # Console Features
//!
//! Fixed system services of the feature handler, addressed by call type code
//! rather than by routine address.

use jrpack::Feature;
use jrpack::FeatureCall;
use jrpack::Kind;
use jrpack::ResultType;
use jrpack::Value;
use jrpack::WireTag;
use jrpack::decode_reply;
use jrpack::payload;

use crate::client::Client;
use crate::error::Error;
use crate::error::Result;
use crate::transport::Transport;

/// Color of one ring-of-light quadrant.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedState {
    #[default]
    Off = 0x00,
    Red = 0x08,
    Green = 0x80,
    Orange = 0x88,
}

/// Temperature sensors the target can report.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureSensor {
    Cpu = 0,
    Gpu = 1,
    Edram = 2,
    Motherboard = 3,
}

/// A value the target rewrites continuously at an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantWrite {
    pub address: u32,
    pub value: u32,
    /// Only write while the current value equals this.
    pub if_value: Option<u32>,
    /// Only write while this title is running.
    pub title_id: Option<u32>,
}

impl ConstantWrite {
    pub fn new(address: u32, value: u32) -> Self {
        Self { address, value, if_value: None, title_id: None }
    }

    pub fn if_value(mut self, if_value: u32) -> Self {
        self.if_value = Some(if_value);
        self
    }

    pub fn title_id(mut self, title_id: u32) -> Self {
        self.title_id = Some(title_id);
        self
    }
}

impl<T: Transport> Client<T> {
    fn feature(&mut self, call: FeatureCall) -> Result<String> {
        tracing::debug!(feature = ?call.feature(), "feature call");
        self.send(&call.encode())
    }

    fn feature_hex(&mut self, call: FeatureCall) -> Result<u32> {
        let reply = self.feature(call)?;
        match decode_reply(&reply, WireTag::Int32, ResultType::Scalar(Kind::U32), 0)? {
            Value::U32(v) => Ok(v),
            other => Err(Error::Wire(jrpack::Error::MalformedResponse(format!("unexpected {:?}", other)))),
        }
    }

    fn feature_text(&mut self, call: FeatureCall) -> Result<String> {
        let reply = self.feature(call)?;
        Ok(payload(&reply)?.to_string())
    }

    /// Address of a module export, by ordinal.
    pub fn resolve_function(&mut self, module: &str, ordinal: u32) -> Result<u32> {
        self.feature_hex(FeatureCall::new(Feature::ResolveFunction).text(module).unsigned(ordinal))
    }

    /// The target's CPU key as reported, usually 32 hex digits.
    pub fn cpu_key(&mut self) -> Result<String> {
        self.feature_text(FeatureCall::new(Feature::CpuKey))
    }

    /// Asks the target to power off. Best effort: failures are logged and dropped,
    /// since the link usually goes down before a reply arrives.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.feature(FeatureCall::new(Feature::Shutdown)) {
            tracing::warn!(error = %e, "shutdown request failed");
        }
    }

    /// Shows a notification toast with the given icon id.
    pub fn notify(&mut self, text: &str, icon: u32) -> Result<()> {
        self.feature(FeatureCall::new(Feature::Notify).text(text).unsigned(icon))?;
        Ok(())
    }

    /// Kernel build number. This one is reported in decimal.
    pub fn kernel_version(&mut self) -> Result<u32> {
        let reply = self.feature(FeatureCall::new(Feature::KernelVersion))?;
        let body = payload(&reply)?;
        body.trim().parse().map_err(|_| {
            Error::Wire(jrpack::Error::MalformedResponse(format!("{:?} is not a kernel version", body)))
        })
    }

    /// Sets the four quadrants: top left, top right, bottom left, bottom right.
    pub fn set_leds(&mut self, leds: [LedState; 4]) -> Result<()> {
        let call = leds
            .into_iter()
            .fold(FeatureCall::new(Feature::SetLeds), |call, led| call.unsigned(led as u32));
        self.feature(call)?;
        Ok(())
    }

    pub fn temperature(&mut self, sensor: TemperatureSensor) -> Result<u32> {
        self.feature_hex(FeatureCall::new(Feature::Temperature).int(sensor as i32))
    }

    /// Id of the title currently running.
    pub fn current_title_id(&mut self) -> Result<u32> {
        self.feature_hex(FeatureCall::new(Feature::TitleId))
    }

    /// Hardware revision name.
    pub fn console_type(&mut self) -> Result<String> {
        self.feature_text(FeatureCall::new(Feature::ConsoleType))
    }

    pub fn constant_memory_set(&mut self, write: ConstantWrite) -> Result<()> {
        let call = FeatureCall::new(Feature::ConstantMemorySet)
            .at(write.address)
            .uint(write.value)
            .int(i32::from(write.if_value.is_some()))
            .unsigned(write.if_value.unwrap_or(0))
            .int(i32::from(write.title_id.is_some()))
            .uint(write.title_id.unwrap_or(0));
        self.feature(call)?;
        Ok(())
    }
}
