/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A png decoder
//!
//! This features a small PNG reader which turns non-interlaced
//! 8 and 16 bit greyscale and truecolour images, with or without alpha,
//! into a grid of typed pixels.
//!
//! # Features
//! - Fast inflate decoder
//! - Unfiltering into a single pre-sized buffer
//! - Optional chunk crc verification
//! - `no_std` support with `alloc`
//!
//! # Usage
//! Add the library to `Cargo.toml`
//!
//! ```toml
//! relief-png="0.1"
//! ```
//!
//! #### Decode a buffer
//!
//! [`decode`] runs the whole pipeline and either returns the
//! image or exactly one error.
//!
//!```no_run
//! use relief_png::{decode, Pixel};
//!
//! let data = std::fs::read("heightmap.png").unwrap();
//! let image = decode(&data).unwrap();
//!
//! if let Some(pixels) = image.pixels().u8() {
//!     for pixel in pixels {
//!         if let Pixel::Grayscale { v } = pixel {
//!             // height of this cell
//!         }
//!     }
//! }
//! ```
//!
//! # Pixels depend on depth
//!
//! 8 bit images give [`Pixel<u8>`] and 16 bit ones [`Pixel<u16>`], both
//! are carried in [`DecodedPixels`].
//!
//! ```no_run
//! use relief_png::{DecodedPixels, PngDecoder};
//!
//! let decoder = PngDecoder::new(&[]);
//!
//! match decoder.decode().unwrap().into_pixels() {
//!     DecodedPixels::U8(px) => {
//!         // do something with images with 8 bit depths
//!     }
//!     DecodedPixels::U16(px) => {
//!         // do something with images with 16 bit depths
//!     }
//! }
//! ```
//!
//! # Extracting metadata
//!
//! Once headers have been decoded, metadata can be read without decoding
//! pixels, see [`PngDecoder::decode_headers`] and [`PngDecoder::get_header`]
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate
//! - [zune-png](https://crates.io/crates/zune-png) crate
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use decoder::{DecodeStage, PngDecoder};
pub use enums::{ChunkKind, ColorMode, FilterType};
pub use headers::ImageHeader;
pub use image::{DecodedImage, DecodedPixels, Pixel, Sample};
pub use relief_core;

use crate::error::PngDecodeErrors;

pub mod chunks;
mod constants;
#[cfg(feature = "crc")]
mod crc;
mod decoder;
mod enums;
pub mod error;
mod filters;
mod headers;
mod image;
mod pixels;

/// Decode a png held in memory with default options
///
/// This is shorthand for `PngDecoder::new(data).decode()`
pub fn decode(data: &[u8]) -> Result<DecodedImage, PngDecodeErrors> {
    PngDecoder::new(data).decode()
}
