/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! IDAT handling, from compressed chunks to typed pixels
use alloc::format;
use alloc::vec::Vec;

use relief_core::bit_depth::BitDepth;
use relief_core::log::trace;
use relief_core::options::DecoderOptions;
use zune_inflate::{DeflateDecoder, DeflateOptions};

use crate::chunks::ChunkRecord;
use crate::enums::{ChunkKind, FilterType};
use crate::error::PngDecodeErrors;
use crate::filters::unfilter_scanlines;
use crate::headers::ImageHeader;
use crate::image::{DecodedPixels, Pixel, Sample};

/// Upper bound of the deflate expansion ratio
const MAX_DEFLATE_RATIO: usize = 1032;

/// Copy every IDAT payload, in file order, into one buffer
pub fn concat_pixel_data(data: &[u8], records: &[ChunkRecord]) -> Result<Vec<u8>, PngDecodeErrors> {
    let total = records
        .iter()
        .filter(|r| r.kind == ChunkKind::PixelData)
        .map(|r| r.payload_length as usize)
        .sum();

    let mut compressed = Vec::with_capacity(total);

    for record in records.iter().filter(|r| r.kind == ChunkKind::PixelData) {
        compressed.extend_from_slice(record.payload(data)?);
    }
    Ok(compressed)
}

/// Inflate the concatenated zlib stream
///
/// The result must hold exactly one filter byte and one scanline per row
pub fn inflate(
    compressed: &[u8], header: &ImageHeader, options: &DecoderOptions
) -> Result<Vec<u8>, PngDecodeErrors> {
    if compressed.is_empty() {
        return Err(PngDecodeErrors::DecompressionError(
            "No IDAT data present".into()
        ));
    }
    let expected = header.inflated_size();
    let limit = options.inflate_get_limit();

    if expected > limit {
        return Err(PngDecodeErrors::DecompressionError(format!(
            "Image needs {expected} inflated bytes, above the configured limit of {limit}"
        )));
    }
    // the header is only a claim, never reserve more than the
    // compressed stream could inflate to
    let size_hint = expected.min(compressed.len().saturating_mul(MAX_DEFLATE_RATIO));

    let deflate_options = DeflateOptions::default()
        .set_size_hint(size_hint)
        .set_limit(limit)
        .set_confirm_checksum(options.inflate_get_confirm_adler());

    let mut decoder = DeflateDecoder::new_with_options(compressed, deflate_options);

    let inflated = decoder.decode_zlib()?;

    trace!("Inflated {} bytes to {}", compressed.len(), inflated.len());

    if inflated.len() != expected {
        return Err(PngDecodeErrors::DecodedSizeMismatch(expected, inflated.len()));
    }
    Ok(inflated)
}

/// Slice unfiltered bytes into pixels of `T` sized samples
pub fn extract_pixels<T: Sample>(
    unfiltered: &[u8], header: &ImageHeader
) -> Result<Vec<Pixel<T>>, PngDecodeErrors> {
    let components = header.color.num_components();
    let pixel_bytes = components * T::BYTES;
    let expected = header.pixel_count();

    let mut samples = [T::default(); 4];
    let mut pixels = Vec::with_capacity(expected);

    for chunk in unfiltered.chunks_exact(pixel_bytes) {
        for (sample, bytes) in samples.iter_mut().zip(chunk.chunks_exact(T::BYTES)) {
            *sample = T::from_be_slice(bytes);
        }
        let pixel = Pixel::from_samples(header.color, &samples[..components])
            .ok_or(PngDecodeErrors::UnsupportedColorMode(header.color))?;

        pixels.push(pixel);
    }

    if pixels.len() != expected || unfiltered.len() % pixel_bytes != 0 {
        return Err(PngDecodeErrors::DecodedSizeMismatch(
            expected.saturating_mul(pixel_bytes),
            unfiltered.len()
        ));
    }
    Ok(pixels)
}

/// Run the whole pixel stage
///
/// Returns the pixel grid and the filter each row declared.
pub fn parse_pixels(
    data: &[u8], records: &[ChunkRecord], header: &ImageHeader, options: &DecoderOptions
) -> Result<(DecodedPixels, Vec<FilterType>), PngDecodeErrors> {
    // checked before doing any work, sub byte samples are never extracted
    let depth = header
        .bit_depth()
        .ok_or(PngDecodeErrors::UnsupportedBitDepth(header.depth))?;

    let compressed = concat_pixel_data(data, records)?;
    let inflated = inflate(&compressed, header, options)?;

    let (unfiltered, filters) = unfilter_scanlines(
        &inflated,
        header.bytes_per_scanline(),
        header.bytes_per_pixel(),
        header.height
    )?;

    let pixels = match depth {
        BitDepth::Eight => DecodedPixels::U8(extract_pixels(&unfiltered, header)?),
        BitDepth::Sixteen => DecodedPixels::U16(extract_pixels(&unfiltered, header)?)
    };
    Ok((pixels, filters))
}
