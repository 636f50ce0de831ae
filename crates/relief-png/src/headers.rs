/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! IHDR parsing and validation
use relief_core::bit_depth::BitDepth;
use relief_core::bytestream::ByteCursor;
use relief_core::log::{info, warn};
use relief_core::options::DecoderOptions;

use crate::constants::IHDR_LENGTH;
use crate::enums::ColorMode;
use crate::error::PngDecodeErrors;

/// Image metadata carried by the `IHDR` chunk
///
/// Immutable once parsed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ImageHeader {
    pub width:              usize,
    pub height:             usize,
    /// Bits per sample, one of 1,2,4,8 or 16
    pub depth:              u8,
    pub color:              ColorMode,
    pub compression_method: u8,
    pub filter_method:      u8,
    pub interlace_method:   u8,
    scanline_bytes:         usize,
    inflated_bytes:         usize,
    pixel_count:            usize
}

impl ImageHeader {
    /// Build a header for a non-interlaced image with standard methods
    ///
    /// Fails with [`PngDecodeErrors::TooLargeDimensions`] when the
    /// image's byte sizes cannot be represented in a `usize`
    pub(crate) fn new(
        width: usize, height: usize, depth: u8, color: ColorMode
    ) -> Result<ImageHeader, PngDecodeErrors> {
        let too_large = || {
            let area = width.saturating_mul(height);
            PngDecodeErrors::TooLargeDimensions("size", area, usize::MAX)
        };
        let bits_per_pixel = usize::from(depth) * color.num_components();

        let scanline_bytes = width
            .checked_mul(bits_per_pixel)
            .and_then(|bits| bits.checked_add(7))
            .ok_or_else(too_large)?
            / 8;
        let inflated_bytes = scanline_bytes
            .checked_add(1)
            .and_then(|row| row.checked_mul(height))
            .ok_or_else(too_large)?;
        let pixel_count = width.checked_mul(height).ok_or_else(too_large)?;

        Ok(ImageHeader {
            width,
            height,
            depth,
            color,
            compression_method: 0,
            filter_method: 0,
            interlace_method: 0,
            scanline_bytes,
            inflated_bytes,
            pixel_count
        })
    }

    /// Bytes a single pixel occupies, at least one
    ///
    /// This is the distance filters look back for the left neighbour
    pub const fn bytes_per_pixel(&self) -> usize {
        let depth_bytes = (self.depth as usize + 7) / 8;
        depth_bytes * self.color.num_components()
    }

    /// Bytes in one scanline, excluding the filter byte
    pub const fn bytes_per_scanline(&self) -> usize {
        self.scanline_bytes
    }

    /// Size of the inflated IDAT stream, a filter byte plus
    /// a scanline for every row
    pub const fn inflated_size(&self) -> usize {
        self.inflated_bytes
    }

    /// `width * height`
    pub const fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Sample width for the depths pixels can be extracted from
    pub const fn bit_depth(&self) -> Option<BitDepth> {
        match self.depth {
            8 => Some(BitDepth::Eight),
            16 => Some(BitDepth::Sixteen),
            _ => None
        }
    }
}

/// Parse the 13 byte `IHDR` payload
///
/// Checks run in a fixed order, so an image with several
/// problems always reports the same one.
pub fn parse_header(
    payload: &[u8], options: &DecoderOptions
) -> Result<ImageHeader, PngDecodeErrors> {
    if payload.len() != IHDR_LENGTH {
        return Err(PngDecodeErrors::InvalidFormat("Bad IHDR length"));
    }
    let mut stream = ByteCursor::new(payload);

    let width = stream.get_u32_be_err()? as usize;
    let height = stream.get_u32_be_err()? as usize;
    let depth = stream.get_u8_err()?;
    let color_int = stream.get_u8_err()?;
    let compression_method = stream.get_u8_err()?;
    let filter_method = stream.get_u8_err()?;
    let interlace_method = stream.get_u8_err()?;

    if width == 0 || height == 0 {
        return Err(PngDecodeErrors::InvalidDimensions(width, height));
    }
    if width > options.get_max_width() {
        return Err(PngDecodeErrors::TooLargeDimensions(
            "width",
            width,
            options.get_max_width()
        ));
    }
    if height > options.get_max_height() {
        return Err(PngDecodeErrors::TooLargeDimensions(
            "height",
            height,
            options.get_max_height()
        ));
    }

    let color = match ColorMode::from_int(color_int) {
        Some(color) if color.allowed_depths().contains(&depth) => color,
        _ => return Err(PngDecodeErrors::InvalidBitDepth(color_int, depth))
    };

    if color == ColorMode::Indexed {
        return Err(PngDecodeErrors::UnsupportedColorMode(color));
    }

    if compression_method != 0 || filter_method != 0 {
        if options.get_strict_mode() {
            return Err(PngDecodeErrors::InvalidFormat(
                "Unknown compression or filter method"
            ));
        }
        warn!(
            "Non standard compression method {} or filter method {}, treating as 0",
            compression_method, filter_method
        );
    }

    if interlace_method != 0 {
        return Err(PngDecodeErrors::UnsupportedInterlace(interlace_method));
    }

    info!("Width: {}", width);
    info!("Height: {}", height);
    info!("Color type: {:?}", color);
    info!("Depth: {}", depth);

    Ok(ImageHeader {
        compression_method,
        filter_method,
        interlace_method,
        ..ImageHeader::new(width, height, depth, color)?
    })
}
