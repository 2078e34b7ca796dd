//! Fixed-buffer serialization primitives.
//!
//! This module provides the [`FixedBufferSerializer`] and
//! [`FixedBufferDeserializer`] types on which every CIP request and response
//! in this library is built. Both operate on a caller-owned byte region with
//! a monotonically advancing cursor and a *sticky* error flag.
//!
//! # Sticky Errors
//!
//! A failed bounds check poisons the cursor: the error flag is set and every
//! subsequent operation fails without touching the buffer. This lets callers
//! encode or decode a whole structured message linearly and check for
//! failure once at the end instead of propagating a result after every
//! field:
//!
//! ```
//! use omron_cip::{Endian, FixedBufferDeserializer};
//!
//! let data = [0x04, 0x00, 0x00, 0x00, 0xC4];
//! let mut de = FixedBufferDeserializer::new(&data, Endian::Little);
//! let size = de.read_u32();
//! let code = de.read_u8();
//! assert!(!de.has_error());
//! assert_eq!((size, code), (4, 0xC4));
//! ```
//!
//! On underflow, reads return zero-initialized values and never touch bytes
//! outside the region. Only [`reset`](FixedBufferDeserializer::reset) clears
//! the flag.
//!
//! # Endianness
//!
//! The byte order is a construction-time parameter. Multi-byte integers are
//! converted on write and read; floats follow the same policy through their
//! bit representation. Literal byte sequences written with
//! [`write_bytes`](FixedBufferSerializer::write_bytes) are copied verbatim.
//! All CIP traffic in this library is little-endian; big-endian support is
//! latent and exercised by the unit tests.

/// Byte order for multi-byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Least significant byte first (CIP wire order).
    Little,
    /// Most significant byte first.
    Big,
}

macro_rules! write_int_fn {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self, v: $ty) -> bool {
            let bytes = match self.endian {
                Endian::Little => v.to_le_bytes(),
                Endian::Big => v.to_be_bytes(),
            };
            self.write_bytes(&bytes)
        }
    };
}

macro_rules! read_int_fn {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self) -> $ty {
            let mut bytes = [0u8; std::mem::size_of::<$ty>()];
            self.read_bytes(&mut bytes);
            match self.endian {
                Endian::Little => <$ty>::from_le_bytes(bytes),
                Endian::Big => <$ty>::from_be_bytes(bytes),
            }
        }
    };
}

/// Serializer writing into a caller-owned byte region.
///
/// The serialized message is the prefix `[0..cursor)` of the region,
/// available through [`serialized_buffer`](Self::serialized_buffer).
///
/// # Example
///
/// ```
/// use omron_cip::{Endian, FixedBufferSerializer};
///
/// let mut buf = [0u8; 8];
/// let mut ser = FixedBufferSerializer::new(&mut buf, Endian::Little);
/// ser.write_u8(0x01);
/// ser.write_u16(0x6A02);
/// assert!(!ser.has_error());
/// assert_eq!(ser.serialized_buffer(), &[0x01, 0x02, 0x6A]);
/// ```
#[derive(Debug)]
pub struct FixedBufferSerializer<'a> {
    buffer: &'a mut [u8],
    cursor: usize,
    has_error: bool,
    endian: Endian,
}

impl<'a> FixedBufferSerializer<'a> {
    /// Creates a serializer over `buffer` with the given byte order.
    pub fn new(buffer: &'a mut [u8], endian: Endian) -> Self {
        Self {
            buffer,
            cursor: 0,
            has_error: false,
            endian,
        }
    }

    /// Returns the configured byte order.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Returns whether a previous operation failed.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Returns the serialized prefix `[0..cursor)`.
    pub fn serialized_buffer(&self) -> &[u8] {
        &self.buffer[..self.cursor]
    }

    /// Returns the number of unwritten bytes after the cursor.
    pub fn remaining_bytes(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Rewinds the cursor and clears the error flag.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.has_error = false;
    }

    fn can_write(&mut self, num: usize) -> bool {
        if self.has_error {
            return false;
        }
        if self.buffer.len() - self.cursor < num {
            self.has_error = true;
            return false;
        }
        true
    }

    /// Copies `src` verbatim, with no endian conversion.
    ///
    /// Use this for literal byte sequences (request paths, magic bytes) and
    /// for string contents; a length prefix is the caller's concern.
    pub fn write_bytes(&mut self, src: &[u8]) -> bool {
        if !self.can_write(src.len()) {
            return false;
        }
        self.buffer[self.cursor..self.cursor + src.len()].copy_from_slice(src);
        self.cursor += src.len();
        true
    }

    /// Advances the cursor by `off` bytes without writing, with the same
    /// bounds semantics as a write. The skipped bytes keep whatever the
    /// buffer held.
    pub fn advance(&mut self, off: usize) -> bool {
        if !self.can_write(off) {
            return false;
        }
        self.cursor += off;
        true
    }

    write_int_fn!(
        /// Writes one byte.
        write_u8, u8
    );
    write_int_fn!(
        /// Writes a 16-bit integer in the configured byte order.
        write_u16, u16
    );
    write_int_fn!(
        /// Writes a 32-bit integer in the configured byte order.
        write_u32, u32
    );
    write_int_fn!(
        /// Writes a 64-bit integer in the configured byte order.
        write_u64, u64
    );

    /// Writes a 32-bit float through its bit representation.
    pub fn write_f32(&mut self, v: f32) -> bool {
        self.write_u32(v.to_bits())
    }

    /// Writes a 64-bit float through its bit representation.
    pub fn write_f64(&mut self, v: f64) -> bool {
        self.write_u64(v.to_bits())
    }
}

/// Deserializer reading from a caller-owned byte region.
///
/// Reads advance the cursor monotonically. On underflow the sticky error
/// flag is set and the read returns a zero-initialized value; bytes outside
/// the region are never accessed.
///
/// # Example
///
/// ```
/// use omron_cip::{Endian, FixedBufferDeserializer};
///
/// let data = [0xC4, 0x00];
/// let mut de = FixedBufferDeserializer::new(&data, Endian::Little);
/// assert_eq!(de.read_u16(), 0x00C4);
/// assert_eq!(de.read_u16(), 0); // underflow
/// assert!(de.has_error());
/// ```
#[derive(Debug)]
pub struct FixedBufferDeserializer<'a> {
    buffer: &'a [u8],
    cursor: usize,
    has_error: bool,
    endian: Endian,
}

impl<'a> FixedBufferDeserializer<'a> {
    /// Creates a deserializer over `buffer` with the given byte order.
    pub fn new(buffer: &'a [u8], endian: Endian) -> Self {
        Self {
            buffer,
            cursor: 0,
            has_error: false,
            endian,
        }
    }

    /// Returns the configured byte order.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Returns whether a previous operation failed.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Returns the unread suffix `[cursor..]`.
    pub fn remaining_buffer(&self) -> &'a [u8] {
        &self.buffer[self.cursor..]
    }

    /// Rewinds the cursor and clears the error flag.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.has_error = false;
    }

    fn can_read(&mut self, num: usize) -> bool {
        if self.has_error {
            return false;
        }
        if self.buffer.len() - self.cursor < num {
            self.has_error = true;
            return false;
        }
        true
    }

    /// Copies the next `dst.len()` bytes into `dst`. On underflow `dst` is
    /// left untouched and the error flag is set.
    pub fn read_bytes(&mut self, dst: &mut [u8]) -> bool {
        if !self.can_read(dst.len()) {
            return false;
        }
        dst.copy_from_slice(&self.buffer[self.cursor..self.cursor + dst.len()]);
        self.cursor += dst.len();
        true
    }

    /// Skips `off` bytes, with the same bounds semantics as a read.
    pub fn advance(&mut self, off: usize) -> bool {
        if !self.can_read(off) {
            return false;
        }
        self.cursor += off;
        true
    }

    read_int_fn!(
        /// Reads one byte, or 0 on underflow.
        read_u8, u8
    );
    read_int_fn!(
        /// Reads a 16-bit integer in the configured byte order, or 0 on underflow.
        read_u16, u16
    );
    read_int_fn!(
        /// Reads a 32-bit integer in the configured byte order, or 0 on underflow.
        read_u32, u32
    );
    read_int_fn!(
        /// Reads a 64-bit integer in the configured byte order, or 0 on underflow.
        read_u64, u64
    );

    /// Reads a 32-bit float through its bit representation.
    pub fn read_f32(&mut self) -> f32 {
        f32::from_bits(self.read_u32())
    }

    /// Reads a 64-bit float through its bit representation.
    pub fn read_f64(&mut self) -> f64 {
        f64::from_bits(self.read_u64())
    }

    /// Reads `len` raw bytes as a string, replacing invalid UTF-8.
    ///
    /// Returns an empty string on underflow (with the error flag set).
    pub fn read_string(&mut self, len: usize) -> String {
        let mut bytes = vec![0u8; len];
        if !self.read_bytes(&mut bytes) {
            return String::new();
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
