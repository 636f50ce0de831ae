/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when decoding a png
use alloc::format;
use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use relief_core::bytestream::ByteIoError;
use zune_inflate::errors::InflateDecodeErrors;

use crate::enums::ColorMode;

/// Possible errors that may occur during decoding
///
/// A failed decode reports exactly one of these, no partial
/// image is ever returned.
#[derive(Clone, Eq, PartialEq)]
pub enum PngDecodeErrors {
    /// The buffer does not start with the png magic bytes
    InvalidSignature,
    /// The chunk layout breaks the format's structural rules
    InvalidFormat(&'static str),
    /// A chunk runs past the end of the buffer or the last chunk
    /// is not `IEND`
    TruncatedOrUnterminated(String),
    /// Width or height is zero
    ///
    /// # Arguments
    /// - width
    /// - height
    InvalidDimensions(usize, usize),
    /// Width or height exceeds the configured maximum
    ///
    /// # Arguments
    /// - which dimension
    /// - the image value
    /// - the configured maximum
    TooLargeDimensions(&'static str, usize, usize),
    /// The colour type and bit depth combination is not allowed
    ///
    /// # Arguments
    /// - colour type byte
    /// - bit depth byte
    InvalidBitDepth(u8, u8),
    /// Indexed images need palette expansion, which isn't supported
    UnsupportedColorMode(ColorMode),
    /// Only non-interlaced images are supported
    UnsupportedInterlace(u8),
    /// Bit depths below 8 are valid but samples cannot be extracted
    UnsupportedBitDepth(u8),
    /// A scanline starts with a filter byte outside 0..=4
    UnsupportedFilterType(u8),
    /// The concatenated IDAT stream could not be inflated
    DecompressionError(String),
    /// The inflated stream doesn't match the header's dimensions
    ///
    /// # Arguments
    /// - expected size
    /// - found size
    DecodedSizeMismatch(usize, usize),
    /// A chunk's declared crc doesn't match its contents
    ///
    /// # Arguments
    /// - declared crc
    /// - calculated crc
    BadCrc(u32, u32)
}

impl Debug for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::InvalidFormat(reason) => writeln!(f, "Invalid png structure: {reason}"),
            Self::TruncatedOrUnterminated(reason) => {
                writeln!(f, "Truncated or unterminated png: {reason}")
            }
            Self::InvalidDimensions(width, height) => {
                writeln!(f, "Invalid dimensions {width}x{height}, width and height cannot be zero")
            }
            Self::TooLargeDimensions(dimension, found, max) => writeln!(
                f,
                "Image {dimension} {found}, larger than maximum configured {dimension} {max}, aborting"
            ),
            Self::InvalidBitDepth(color, depth) => {
                writeln!(f, "Bit depth {depth} is not allowed for colour type {color}")
            }
            Self::UnsupportedColorMode(color) => {
                writeln!(f, "Unsupported colour mode {color:?}")
            }
            Self::UnsupportedInterlace(method) => {
                writeln!(f, "Unsupported interlace method {method}, only 0 is supported")
            }
            Self::UnsupportedBitDepth(depth) => {
                writeln!(f, "Unsupported bit depth {depth}, only 8 and 16 bit samples can be extracted")
            }
            Self::UnsupportedFilterType(filter) => writeln!(f, "Unknown filter {filter}"),
            Self::DecompressionError(reason) => {
                writeln!(f, "Error decoding idat chunks {reason}")
            }
            Self::DecodedSizeMismatch(expected, found) => writeln!(
                f,
                "Decoded size mismatch, expected {expected} bytes but found {found}"
            ),
            Self::BadCrc(expected, found) => writeln!(
                f,
                "CRC does not match, expected {expected} but found {found}"
            )
        }
    }
}

impl Display for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PngDecodeErrors {}

impl From<InflateDecodeErrors> for PngDecodeErrors {
    fn from(val: InflateDecodeErrors) -> Self {
        Self::DecompressionError(String::from(format!("{val:?}").trim_end()))
    }
}

impl From<ByteIoError> for PngDecodeErrors {
    fn from(val: ByteIoError) -> Self {
        Self::TruncatedOrUnterminated(String::from(format!("{val:?}").trim_end()))
    }
}
