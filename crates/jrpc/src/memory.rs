//! # Typed Memory Access
//!
//! Reads and writes numbers, flags, and text in target memory on top of any
//! `Transport`.
//!
//! ## Invariants
//! - **Byte Order**: multi-byte values are group-reversed right after a read
//!   and right before a write (see `jrpack::order`).
//! - **Exact Spans**: a read that returns fewer bytes than asked for is an
//!   error, never a shorter value.

use jrpack::low_bytes;
use jrpack::order::Word;
use jrpack::order::words_from_target;
use jrpack::order::words_to_target;

use crate::error::Result;
use crate::transport::Transport;
use crate::transport::TransportError;

macro_rules! typed_access {
    ($($ty:ty => $read:ident, $write:ident, $read_array:ident, $write_array:ident;)*) => {$(
        fn $read(&mut self, address: u32) -> Result<$ty> {
            self.read_word(address)
        }

        fn $write(&mut self, address: u32, value: $ty) -> Result<()> {
            self.write_words(address, &[value])
        }

        fn $read_array(&mut self, address: u32, count: u32) -> Result<Vec<$ty>> {
            self.read_words(address, count)
        }

        fn $write_array(&mut self, address: u32, values: &[$ty]) -> Result<()> {
            self.write_words(address, values)
        }
    )*};
}

/// Typed memory access, available on every `Transport`.
pub trait Memory: Transport {
    /// Reads exactly `length` bytes.
    fn read_bytes(&mut self, address: u32, length: u32) -> Result<Vec<u8>> {
        let data = self.read_memory(address, length)?;
        tracing::trace!(address = %format!("{:#X}", address), length, got = data.len(), "read memory");
        if data.len() != length as usize {
            return Err(TransportError::Io(format!(
                "short read at {:#X}: wanted {} bytes, got {}",
                address,
                length,
                data.len()
            ))
            .into());
        }
        Ok(data)
    }

    /// Writes all of `data`.
    fn write_bytes(&mut self, address: u32, data: &[u8]) -> Result<()> {
        let written = self.write_memory(address, data)?;
        tracing::trace!(address = %format!("{:#X}", address), length = data.len(), written, "wrote memory");
        if written as usize != data.len() {
            return Err(TransportError::Io(format!(
                "short write at {:#X}: sent {} bytes, target took {}",
                address,
                data.len(),
                written
            ))
            .into());
        }
        Ok(())
    }

    fn read_words<W: Word>(&mut self, address: u32, count: u32) -> Result<Vec<W>> {
        let length = count as usize * W::WIDTH;
        let length = u32::try_from(length)
            .map_err(|_| TransportError::Io(format!("read of {} bytes is too large", length)))?;
        let buf = self.read_bytes(address, length)?;
        Ok(words_from_target(buf)?)
    }

    fn read_word<W: Word>(&mut self, address: u32) -> Result<W> {
        let buf = self.read_bytes(address, W::WIDTH as u32)?;
        let mut words = words_from_target::<W>(buf)?;
        words
            .pop()
            .ok_or_else(|| TransportError::Io(format!("empty read at {:#X}", address)).into())
    }

    fn write_words<W: Word>(&mut self, address: u32, values: &[W]) -> Result<()> {
        let buf = words_to_target(values)?;
        self.write_bytes(address, &buf)
    }

    /// Any non-zero byte reads as `true`.
    fn read_bool(&mut self, address: u32) -> Result<bool> {
        Ok(self.read_u8(address)? != 0)
    }

    fn read_bool_array(&mut self, address: u32, count: u32) -> Result<Vec<bool>> {
        Ok(self.read_bytes(address, count)?.into_iter().map(|b| b != 0).collect())
    }

    fn write_bool(&mut self, address: u32, value: bool) -> Result<()> {
        self.write_bytes(address, &[u8::from(value)])
    }

    fn write_bool_array(&mut self, address: u32, values: &[bool]) -> Result<()> {
        let buf: Vec<u8> = values.iter().map(|v| u8::from(*v)).collect();
        self.write_bytes(address, &buf)
    }

    typed_access! {
        u8 => read_u8, write_u8, read_u8_array, write_u8_array;
        i8 => read_i8, write_i8, read_i8_array, write_i8_array;
        i16 => read_i16, write_i16, read_i16_array, write_i16_array;
        u16 => read_u16, write_u16, read_u16_array, write_u16_array;
        i32 => read_i32, write_i32, read_i32_array, write_i32_array;
        u32 => read_u32, write_u32, read_u32_array, write_u32_array;
        i64 => read_i64, write_i64, read_i64_array, write_i64_array;
        u64 => read_u64, write_u64, read_u64_array, write_u64_array;
        f32 => read_f32, write_f32, read_f32_array, write_f32_array;
        f64 => read_f64, write_f64, read_f64_array, write_f64_array;
    }

    /// Reads `length` bytes as UTF-8. Invalid sequences become U+FFFD.
    fn read_string(&mut self, address: u32, length: u32) -> Result<String> {
        let buf = self.read_bytes(address, length)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Writes the low byte of each UTF-16 code unit followed by a NUL.
    fn write_string(&mut self, address: u32, text: &str) -> Result<()> {
        let mut buf = low_bytes(text);
        buf.push(0);
        self.write_bytes(address, &buf)
    }

    /// Writes `text` as big-endian UTF-16 code units of its low bytes, with a
    /// two-byte terminator.
    fn write_wide_string(&mut self, address: u32, text: &str) -> Result<()> {
        let mut buf = Vec::with_capacity(text.len() * 2 + 2);
        for b in low_bytes(text) {
            buf.push(0);
            buf.push(b);
        }
        buf.extend_from_slice(&[0, 0]);
        self.write_bytes(address, &buf)
    }
}

impl<T: Transport + ?Sized> Memory for T {}
