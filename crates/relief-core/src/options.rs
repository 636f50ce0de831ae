/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder options
//!
//! This module exposes a struct holding options every decoder
//! respects, options are plain values and are copied into the decoder
//! on construction so one `DecoderOptions` can be reused for many decodes.

/// Default flags, checksums in the container are read but not confirmed
fn default_flags() -> DecoderFlags {
    DecoderFlags {
        inflate_confirm_adler:    true,
        png_confirm_crc:          false,
        error_on_non_conformance: false
    }
}

/// Strict decoder flags
///
/// Confirms every checksum and errors out on anything
/// the format marks as invalid.
fn decoder_strict_mode() -> DecoderFlags {
    DecoderFlags {
        inflate_confirm_adler:    true,
        png_confirm_crc:          true,
        error_on_non_conformance: true
    }
}

/// Fast decoder options
///
/// Disables png adler and crc checking.
fn fast_options() -> DecoderFlags {
    DecoderFlags {
        inflate_confirm_adler:    false,
        png_confirm_crc:          false,
        error_on_non_conformance: false
    }
}

/// Decoder options that are flags
///
/// NOTE: When you extend this, add true or false to
/// all options above that return a `DecoderFlag`
#[derive(Copy, Debug, Clone, Eq, PartialEq)]
struct DecoderFlags {
    /// Whether the inflate decoder should confirm and report adler mismatch
    inflate_confirm_adler:    bool,
    /// Whether the PNG decoder should confirm crc
    png_confirm_crc:          bool,
    /// Whether the decoder should error out on image non-conformance
    error_on_non_conformance: bool
}

/// Decoder options
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    max_width:     usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    max_height:    usize,
    /// Maximum size in bytes a decompressed stream may grow to
    ///
    /// - Default value: 1 GiB
    deflate_limit: usize,
    /// Boolean flags that influence decoding
    flags:         DecoderFlags
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:     1 << 14,
            max_height:    1 << 14,
            deflate_limit: 1 << 30,
            flags:         default_flags()
        }
    }
}

/// Initializers
impl DecoderOptions {
    /// Create the decoder with options that confirm every checksum
    /// and reject non-conforming images
    pub fn new_safe() -> DecoderOptions {
        DecoderOptions::default().set_decoder_flags(decoder_strict_mode())
    }

    /// Create the decoder with options that skip checksum confirmation
    pub fn new_fast() -> DecoderOptions {
        DecoderOptions::default().set_decoder_flags(fast_options())
    }

    fn set_decoder_flags(mut self, flags: DecoderFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Global options respected by all decoders
impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// and reject non-conforming images
    pub const fn get_strict_mode(&self) -> bool {
        self.flags.error_on_non_conformance
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// This reduces the error tolerance level for the decoders, chunks and
    /// fields the format reserves will be rejected instead of skipped.
    ///
    /// Checksum confirmation is controlled separately
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.flags.error_on_non_conformance = yes;
        self
    }
}

/// PNG specific options
impl DecoderOptions {
    /// Whether the png decoder should confirm the CRC of every chunk
    pub const fn png_get_confirm_crc(&self) -> bool {
        self.flags.png_confirm_crc
    }

    /// Set whether the png decoder should confirm the CRC of every chunk
    pub fn png_set_confirm_crc(mut self, yes: bool) -> Self {
        self.flags.png_confirm_crc = yes;
        self
    }
}

/// Inflate specific options
impl DecoderOptions {
    /// Whether the inflate decoder should confirm the zlib adler32 checksum
    pub const fn inflate_get_confirm_adler(&self) -> bool {
        self.flags.inflate_confirm_adler
    }

    /// Set whether the inflate decoder should confirm the zlib adler32 checksum
    pub fn inflate_set_confirm_adler(mut self, yes: bool) -> Self {
        self.flags.inflate_confirm_adler = yes;
        self
    }

    /// Get the maximum number of bytes the inflate decoder may produce
    pub const fn inflate_get_limit(&self) -> usize {
        self.deflate_limit
    }

    /// Set the maximum number of bytes the inflate decoder may produce
    ///
    /// Streams that decompress to more bytes are treated as corrupt
    pub fn inflate_set_limit(mut self, limit: usize) -> Self {
        self.deflate_limit = limit;
        self
    }
}
