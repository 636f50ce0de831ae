/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoded image types
use alloc::vec::Vec;

use relief_core::bit_depth::BitDepth;
use relief_core::colorspace::ColorSpace;

use crate::enums::{ColorMode, FilterType};

/// A single pixel, its shape follows the image's colour mode
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Pixel<T> {
    Grayscale { v: T },
    Truecolor { r: T, g: T, b: T },
    GrayscaleAlpha { v: T, a: T },
    TruecolorAlpha { r: T, g: T, b: T, a: T }
}

impl<T: Sample> Pixel<T> {
    /// Build a pixel from consecutive samples
    ///
    /// `samples` must hold exactly `color.num_components()` values,
    /// returns `None` for indexed colour
    pub(crate) fn from_samples(color: ColorMode, samples: &[T]) -> Option<Pixel<T>> {
        match (color, samples) {
            (ColorMode::Grayscale, &[v]) => Some(Pixel::Grayscale { v }),
            (ColorMode::Truecolor, &[r, g, b]) => Some(Pixel::Truecolor { r, g, b }),
            (ColorMode::GrayscaleAlpha, &[v, a]) => Some(Pixel::GrayscaleAlpha { v, a }),
            (ColorMode::TruecolorAlpha, &[r, g, b, a]) => {
                Some(Pixel::TruecolorAlpha { r, g, b, a })
            }
            _ => None
        }
    }

    /// The alpha sample, if the pixel carries one
    pub fn alpha(&self) -> Option<T> {
        match *self {
            Pixel::GrayscaleAlpha { a, .. } | Pixel::TruecolorAlpha { a, .. } => Some(a),
            _ => None
        }
    }

    /// True when the pixel has an alpha sample equal to zero
    pub fn is_transparent(&self) -> bool {
        self.alpha().map_or(false, |a| Into::<u32>::into(a) == 0)
    }

    /// Brightness of the colour samples
    ///
    /// Grey values are returned as is, colour pixels average `r`,`g` and `b`.
    pub fn intensity(&self) -> u32 {
        match *self {
            Pixel::Grayscale { v } | Pixel::GrayscaleAlpha { v, .. } => v.into(),
            Pixel::Truecolor { r, g, b } | Pixel::TruecolorAlpha { r, g, b, .. } => {
                let (r, g, b): (u32, u32, u32) = (r.into(), g.into(), b.into());
                (r + g + b) / 3
            }
        }
    }
}

/// Sample types pixels can be built from
pub trait Sample: Copy + Default + Into<u32> {
    /// Width of one sample in the inflated stream
    const BYTES: usize;

    /// Read a big endian sample, `bytes` is exactly `BYTES` long
    fn from_be_slice(bytes: &[u8]) -> Self;
}

impl Sample for u8 {
    const BYTES: usize = 1;

    fn from_be_slice(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl Sample for u16 {
    const BYTES: usize = 2;

    fn from_be_slice(bytes: &[u8]) -> Self {
        u16::from_be_bytes([bytes[0], bytes[1]])
    }
}

/// Row major pixels at the image's bit depth
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DecodedPixels {
    U8(Vec<Pixel<u8>>),
    U16(Vec<Pixel<u16>>)
}

impl DecodedPixels {
    /// Return 8 bit pixels or `None` if the image is 16 bit
    pub fn u8(&self) -> Option<&[Pixel<u8>]> {
        match self {
            DecodedPixels::U8(data) => Some(data.as_slice()),
            DecodedPixels::U16(_) => None
        }
    }

    /// Return 16 bit pixels or `None` if the image is 8 bit
    pub fn u16(&self) -> Option<&[Pixel<u16>]> {
        match self {
            DecodedPixels::U8(_) => None,
            DecodedPixels::U16(data) => Some(data.as_slice())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DecodedPixels::U8(data) => data.len(),
            DecodedPixels::U16(data) => data.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per pixel transparency, `true` where alpha is zero
    pub fn transparency_mask(&self) -> Vec<bool> {
        match self {
            DecodedPixels::U8(data) => data.iter().map(Pixel::is_transparent).collect(),
            DecodedPixels::U16(data) => data.iter().map(Pixel::is_transparent).collect()
        }
    }

    /// Per pixel [`Pixel::intensity`]
    pub fn intensities(&self) -> Vec<u32> {
        match self {
            DecodedPixels::U8(data) => data.iter().map(Pixel::intensity).collect(),
            DecodedPixels::U16(data) => data.iter().map(Pixel::intensity).collect()
        }
    }
}

/// A fully decoded image
///
/// Only ever constructed at the end of a successful decode,
/// `pixels().len()` is always `width * height`
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DecodedImage {
    width:       usize,
    height:      usize,
    color:       ColorMode,
    depth:       BitDepth,
    pixels:      DecodedPixels,
    row_filters: Vec<FilterType>
}

impl DecodedImage {
    pub(crate) fn new(
        width: usize, height: usize, color: ColorMode, depth: BitDepth, pixels: DecodedPixels,
        row_filters: Vec<FilterType>
    ) -> DecodedImage {
        DecodedImage {
            width,
            height,
            color,
            depth,
            pixels,
            row_filters
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn color_mode(&self) -> ColorMode {
        self.color
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.color.colorspace()
    }

    pub const fn depth(&self) -> BitDepth {
        self.depth
    }

    pub const fn pixels(&self) -> &DecodedPixels {
        &self.pixels
    }

    pub fn into_pixels(self) -> DecodedPixels {
        self.pixels
    }

    /// Filter type each scanline declared, top to bottom
    pub fn row_filters(&self) -> &[FilterType] {
        &self.row_filters
    }
}
