/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image bit depth information

/// The bit depth of decoded samples.
///
/// Depths below eight bits are a property of the encoded stream
/// only, decoded samples are always stored in one of these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BitDepth {
    /// Eight bit depth.
    ///
    /// Samples are stored in a [`u8`] and use the whole range from 0-255.
    Eight,
    /// Sixteen bit depth
    ///
    /// Samples are stored in a [`u16`] and use the whole range
    /// i.e 0-65535
    Sixteen
}

impl Default for BitDepth {
    fn default() -> Self {
        Self::Eight
    }
}

impl BitDepth {
    /// Get the max value a sample of this depth can hold
    #[rustfmt::skip]
    #[allow(clippy::zero_prefixed_literal)]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Eight   => (1 << 08) - 1,
            Self::Sixteen => u16::MAX,
        }
    }

    /// Get the number of bytes needed to store a single sample
    ///
    /// ```
    /// use relief_core::bit_depth::BitDepth;
    /// assert_eq!(BitDepth::Sixteen.size_of(), 2);
    /// ```
    pub const fn size_of(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Sixteen => 2
        }
    }

    /// Number of bits in a single sample
    pub const fn bits(self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16
        }
    }
}
