//! # Byte Order
//!
//! Target memory holds numbers most-significant byte first. Buffers coming
//! off the transport are group-reversed immediately after a read and
//! immediately before a write, then interpreted as little-endian words.
//!
//! ## Invariants
//! - **Whole Groups**: a buffer is only ever reversed in whole element-width groups.

use crate::error::Error;
use crate::error::Result;

/// Reverses every `width`-byte group of `buf` in place.
///
/// # Errors
/// Returns `Error::InvalidBufferShape` if `buf.len()` is not a multiple of
/// `width`. The buffer is left untouched in that case.
pub fn swap_groups(buf: &mut [u8], width: usize) -> Result<()> {
    if width == 0 || buf.len() % width != 0 {
        return Err(Error::InvalidBufferShape { len: buf.len(), width });
    }
    for group in buf.chunks_exact_mut(width) {
        group.reverse();
    }
    Ok(())
}

/// A fixed-width number that can live in target memory.
pub trait Word: Copy {
    const WIDTH: usize;

    /// Reads from exactly `WIDTH` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Appends `WIDTH` little-endian bytes.
    fn put_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_word {
    ($($ty:ty),*) => {$(
        impl Word for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();

            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_le_bytes(raw)
            }

            fn put_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

impl_word!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Converts a buffer read from the target into words.
pub fn words_from_target<T: Word>(mut buf: Vec<u8>) -> Result<Vec<T>> {
    swap_groups(&mut buf, T::WIDTH)?;
    Ok(buf.chunks_exact(T::WIDTH).map(T::from_le_slice).collect())
}

/// Lays out words the way the target expects them.
pub fn words_to_target<T: Word>(items: &[T]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(items.len() * T::WIDTH);
    for item in items {
        item.put_le(&mut buf);
    }
    swap_groups(&mut buf, T::WIDTH)?;
    Ok(buf)
}
