/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A bounds checked cursor over an in-memory byte buffer
//!
//! All reads come in two flavours, one returning a `Result` and
//! one returning zero when the buffer is exhausted, the latter
//! is meant for places where length was confirmed beforehand via
//! [`ByteCursor::has`].
use core::fmt::{Debug, Display, Formatter};

/// Errors possible when reading from a [`ByteCursor`]
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum ByteIoError {
    /// The read wanted more bytes than are left
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes requested
    /// - 2nd argument is the number of bytes remaining
    NotEnoughBytes(usize, usize)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

/// A cursor over a borrowed byte slice
///
/// The lifetime parameter is from the buffer we are reading
pub struct ByteCursor<'a> {
    stream:   &'a [u8],
    position: usize
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

impl<'a> ByteCursor<'a> {
    pub const fn new(buf: &'a [u8]) -> ByteCursor<'a> {
        ByteCursor {
            stream:   buf,
            position: 0
        }
    }
    /// Skip `num` bytes ahead of the stream.
    ///
    /// Skipping past the end is allowed, subsequent reads will fail
    pub fn skip(&mut self, num: usize) {
        self.position = self.position.saturating_add(num);
    }
    /// Move back `num` bytes, stopping at the start of the stream
    pub fn rewind(&mut self, num: usize) {
        self.position = self.position.saturating_sub(num);
    }
    /// Set the absolute position of the cursor
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }
    pub const fn position(&self) -> usize {
        self.position
    }
    /// Bytes left between the cursor and the end of the stream
    pub const fn remaining(&self) -> usize {
        // Must be saturating to prevent underflow
        self.stream.len().saturating_sub(self.position)
    }
    /// Total length of the underlying buffer
    pub const fn len(&self) -> usize {
        self.stream.len()
    }
    pub const fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }
    pub const fn is_eof(&self) -> bool {
        self.position >= self.stream.len()
    }
    /// Return true if at least `num` bytes can be read from
    /// the current position
    pub fn has(&self, num: usize) -> bool {
        self.position
            .checked_add(num)
            .map_or(false, |end| end <= self.stream.len())
    }
    /// Return `num` bytes from the current position and advance
    /// past them
    pub fn get(&mut self, num: usize) -> Result<&'a [u8], ByteIoError> {
        let slice = self.peek_at(0, num)?;
        self.position += num;

        Ok(slice)
    }
    /// Look ahead `position` bytes and return a reference
    /// to `num_bytes` from that position, or an error if the
    /// peek would be out of bounds.
    ///
    /// This doesn't increment the position
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], ByteIoError> {
        let start = self.position.saturating_add(position);
        let end = start.saturating_add(num_bytes);

        match self.stream.get(start..end) {
            Some(bytes) => Ok(bytes),
            None => Err(ByteIoError::NotEnoughBytes(
                num_bytes,
                self.stream.len().saturating_sub(start)
            ))
        }
    }
    /// Read exactly `N` bytes into an array, e.g a four byte chunk tag
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        byte_store.copy_from_slice(self.get(N)?);

        Ok(byte_store)
    }
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        let [byte] = self.read_fixed_bytes_or_error::<1>()?;
        Ok(byte)
    }
    /// Read a single byte, returning zero when the stream is exhausted
    pub fn get_u8(&mut self) -> u8 {
        self.get_u8_err().unwrap_or(0)
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<'a> ByteCursor<'a> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type {
                self.$name2(mode).unwrap_or(0)
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, ByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space = self.read_fixed_bytes_or_error::<SIZE_OF_VAL>()?;

                match mode {
                    Mode::LE => Ok($int_type::from_le_bytes(space)),
                    Mode::BE => Ok($int_type::from_be_bytes(space))
                }
            }

            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name2(Mode::BE)
            }

            pub fn $name4(&mut self) -> Result<$int_type, ByteIoError> {
                self.$name2(Mode::LE)
            }

            pub fn $name5(&mut self) -> $int_type {
                self.$name(Mode::BE)
            }

            pub fn $name6(&mut self) -> $int_type {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(
    get_u16_inner_or_default,
    get_u16_inner_or_die,
    get_u16_be_err,
    get_u16_le_err,
    get_u16_be,
    get_u16_le,
    u16
);
get_single_type!(
    get_u32_inner_or_default,
    get_u32_inner_or_die,
    get_u32_be_err,
    get_u32_le_err,
    get_u32_be,
    get_u32_le,
    u32
);
get_single_type!(
    get_u64_inner_or_default,
    get_u64_inner_or_die,
    get_u64_be_err,
    get_u64_le_err,
    get_u64_be,
    get_u64_le,
    u64
);
