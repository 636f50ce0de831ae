/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;
use core::mem;

use relief_core::bit_depth::BitDepth;
use relief_core::colorspace::ColorSpace;
use relief_core::log::{trace, warn};
use relief_core::options::DecoderOptions;

use crate::chunks::{check_unknown_critical, scan_chunks, validate_signature, ChunkRecord};
use crate::constants::PNG_SIGNATURE_LEN;
use crate::enums::{ChunkKind, FilterType};
use crate::error::PngDecodeErrors;
use crate::headers::{parse_header, ImageHeader};
use crate::image::{DecodedImage, DecodedPixels};
use crate::pixels::parse_pixels;

/// Where a decoder is in its pipeline
///
/// Stages only move forward, any failure moves straight to
/// [`DecodeStage::Failed`] and stays there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStage {
    Start,
    SignatureChecked,
    ChunksScanned,
    HeaderParsed(ImageHeader),
    PixelsParsed(ImageHeader, DecodedPixels, Vec<FilterType>),
    Done(DecodedImage),
    Failed(PngDecodeErrors)
}

impl DecodeStage {
    fn name(&self) -> &'static str {
        match self {
            DecodeStage::Start => "Start",
            DecodeStage::SignatureChecked => "SignatureChecked",
            DecodeStage::ChunksScanned => "ChunksScanned",
            DecodeStage::HeaderParsed(..) => "HeaderParsed",
            DecodeStage::PixelsParsed(..) => "PixelsParsed",
            DecodeStage::Done(_) => "Done",
            DecodeStage::Failed(_) => "Failed"
        }
    }
}

/// A png decoder
///
/// Borrows the input for its lifetime, the decoded image it
/// hands out owns all of its data.
///
/// # Example
/// ```no_run
/// use relief_png::PngDecoder;
/// let data = std::fs::read("image.png").unwrap();
/// let mut decoder = PngDecoder::new(&data);
///
/// decoder.decode_headers().unwrap();
/// println!("{:?}", decoder.get_dimensions());
///
/// let image = decoder.decode().unwrap();
/// ```
pub struct PngDecoder<'a> {
    data:    &'a [u8],
    options: DecoderOptions,
    stage:   DecodeStage,
    chunks:  Vec<ChunkRecord>,
    header:  Option<ImageHeader>
}

impl<'a> PngDecoder<'a> {
    /// Create a decoder with default options
    pub fn new(data: &'a [u8]) -> PngDecoder<'a> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a> {
        PngDecoder {
            data,
            options,
            stage: DecodeStage::Start,
            chunks: Vec::new(),
            header: None
        }
    }

    /// The stage the decoder has reached
    pub const fn stage(&self) -> &DecodeStage {
        &self.stage
    }

    /// Chunk records, empty until the chunks have been scanned
    pub fn chunks(&self) -> &[ChunkRecord] {
        &self.chunks
    }

    /// Return the parsed header, or `None` if headers haven't been decoded
    pub const fn get_header(&self) -> Option<&ImageHeader> {
        self.header.as_ref()
    }

    /// Return `(width, height)`, or `None` if headers haven't been decoded
    pub fn get_dimensions(&self) -> Option<(usize, usize)> {
        self.header.map(|h| (h.width, h.height))
    }

    /// Return the sample depth of decoded pixels
    ///
    /// `None` if headers haven't been decoded
    pub fn get_depth(&self) -> Option<BitDepth> {
        self.header.and_then(|h| h.bit_depth())
    }

    pub fn get_colorspace(&self) -> Option<ColorSpace> {
        self.header.map(|h| h.color.colorspace())
    }

    /// Run the pipeline up to and including header parsing
    ///
    /// Calling this again after it succeeded does nothing
    pub fn decode_headers(&mut self) -> Result<(), PngDecodeErrors> {
        loop {
            match &self.stage {
                DecodeStage::Failed(err) => return Err(err.clone()),
                DecodeStage::Start | DecodeStage::SignatureChecked | DecodeStage::ChunksScanned => {
                    self.advance()
                }
                _ => return Ok(())
            }
        }
    }

    /// Decode the whole image
    ///
    /// On failure no partial image is returned.
    pub fn decode(mut self) -> Result<DecodedImage, PngDecodeErrors> {
        loop {
            match self.stage {
                DecodeStage::Done(image) => return Ok(image),
                DecodeStage::Failed(err) => return Err(err),
                _ => self.advance()
            }
        }
    }

    /// Move one stage forward
    fn advance(&mut self) {
        let stage = mem::replace(&mut self.stage, DecodeStage::Start);
        let from = stage.name();

        self.stage = match self.transition(stage) {
            Ok(next) => next,
            Err(err) => {
                warn!("Decoding failed after stage {}: {:?}", from, err);
                DecodeStage::Failed(err)
            }
        };
        trace!("Stage {} -> {}", from, self.stage.name());
    }

    fn transition(&mut self, stage: DecodeStage) -> Result<DecodeStage, PngDecodeErrors> {
        match stage {
            DecodeStage::Start => {
                validate_signature(self.data)?;
                Ok(DecodeStage::SignatureChecked)
            }
            DecodeStage::SignatureChecked => {
                let chunks = scan_chunks(self.data, PNG_SIGNATURE_LEN)?;

                check_unknown_critical(&chunks, self.options.get_strict_mode())?;

                #[cfg(feature = "crc")]
                {
                    if self.options.png_get_confirm_crc() {
                        crate::chunks::verify_checksums(self.data, &chunks)?;
                    }
                }
                self.chunks = chunks;
                Ok(DecodeStage::ChunksScanned)
            }
            DecodeStage::ChunksScanned => {
                // first chunk is IHDR, the scanner guarantees it
                let ihdr = self
                    .chunks
                    .first()
                    .ok_or(PngDecodeErrors::InvalidFormat("First chunk not IHDR"))?;
                let payload = ihdr.payload(self.data)?;
                let header = parse_header(payload, &self.options)?;

                if self.chunks.iter().any(|c| c.kind == ChunkKind::Palette) {
                    return Err(PngDecodeErrors::UnsupportedColorMode(header.color));
                }
                self.header = Some(header);
                Ok(DecodeStage::HeaderParsed(header))
            }
            DecodeStage::HeaderParsed(header) => {
                let (pixels, filters) =
                    parse_pixels(self.data, &self.chunks, &header, &self.options)?;

                Ok(DecodeStage::PixelsParsed(header, pixels, filters))
            }
            DecodeStage::PixelsParsed(header, pixels, filters) => {
                // both were validated when parsing pixels
                let depth = header
                    .bit_depth()
                    .ok_or(PngDecodeErrors::UnsupportedBitDepth(header.depth))?;

                if pixels.len() != header.pixel_count() {
                    return Err(PngDecodeErrors::DecodedSizeMismatch(
                        header.pixel_count(),
                        pixels.len()
                    ));
                }
                Ok(DecodeStage::Done(DecodedImage::new(
                    header.width,
                    header.height,
                    header.color,
                    depth,
                    pixels,
                    filters
                )))
            }
            // terminal stages are handled by the callers
            DecodeStage::Done(_) | DecodeStage::Failed(_) => Ok(stage)
        }
    }
}
