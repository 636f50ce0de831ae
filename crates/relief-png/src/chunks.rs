/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Signature validation and the structural chunk scan
//!
//! Scanning only records where every chunk lives, payloads are
//! interpreted later by the header and pixel parsers.
use alloc::format;
use alloc::vec::Vec;

use relief_core::bytestream::ByteCursor;
use relief_core::log::{trace, warn};

use crate::constants::{CHUNK_CRC_SIZE, CHUNK_HEADER_SIZE, PNG_SIGNATURE};
use crate::enums::{is_critical, ChunkKind};
use crate::error::PngDecodeErrors;

/// Location and metadata of a single chunk inside the buffer
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ChunkRecord {
    pub kind:           ChunkKind,
    /// The raw four byte chunk type, e.g `b"IDAT"`
    pub chunk_type:     [u8; 4],
    /// Offset of the first payload byte from the start of the buffer
    pub payload_start:  usize,
    pub payload_length: u32,
    pub crc:            u32
}

impl ChunkRecord {
    /// Offset one past the last payload byte
    pub const fn payload_end(&self) -> usize {
        self.payload_start + self.payload_length as usize
    }

    /// Borrow this chunk's payload from the buffer it was scanned from
    pub fn payload<'a>(&self, data: &'a [u8]) -> Result<&'a [u8], PngDecodeErrors> {
        data.get(self.payload_start..self.payload_end())
            .ok_or_else(|| {
                PngDecodeErrors::TruncatedOrUnterminated(format!(
                    "payload of chunk {} lies outside the buffer",
                    chunk_name(&self.chunk_type)
                ))
            })
    }
}

pub(crate) fn chunk_name(chunk_type: &[u8; 4]) -> &str {
    core::str::from_utf8(chunk_type).unwrap_or("XXXX")
}

/// Confirm the buffer starts with the png magic bytes
pub fn validate_signature(data: &[u8]) -> Result<(), PngDecodeErrors> {
    let signature = ByteCursor::new(data)
        .get_u64_be_err()
        .map_err(|_| PngDecodeErrors::InvalidSignature)?;

    if signature != PNG_SIGNATURE {
        return Err(PngDecodeErrors::InvalidSignature);
    }
    Ok(())
}

/// Walk every chunk from `start` to the end of `data`
///
/// Format is length - chunk type - [data] - crc, so each chunk
/// moves the cursor `12 + length` bytes.
///
/// The returned records cover the whole buffer and obey the ordering
/// rules in [`validate_order`].
pub fn scan_chunks(data: &[u8], start: usize) -> Result<Vec<ChunkRecord>, PngDecodeErrors> {
    if data.len() < 2 * CHUNK_HEADER_SIZE {
        return Err(PngDecodeErrors::InvalidFormat(
            "Buffer too small to contain a chunk"
        ));
    }
    let mut stream = ByteCursor::new(data);
    stream.set_position(start);

    let mut records = Vec::new();

    while !stream.is_eof() {
        if !stream.has(CHUNK_HEADER_SIZE) {
            return Err(PngDecodeErrors::TruncatedOrUnterminated(format!(
                "{} trailing bytes cannot hold a chunk header",
                stream.remaining()
            )));
        }
        let payload_length = stream.get_u32_be_err()?;
        let chunk_type = stream.read_fixed_bytes_or_error::<4>()?;
        let payload_start = stream.position();

        // u32 always fits a usize on the targets we support, the add can
        // still overflow on 32 bit ones
        let wanted = (payload_length as usize)
            .checked_add(CHUNK_CRC_SIZE)
            .unwrap_or(usize::MAX);

        if !stream.has(wanted) {
            return Err(PngDecodeErrors::TruncatedOrUnterminated(format!(
                "Not enough bytes for chunk {}, bytes requested are {}, but bytes present are {}",
                chunk_name(&chunk_type),
                wanted,
                stream.remaining()
            )));
        }
        stream.skip(payload_length as usize);
        let crc = stream.get_u32_be_err()?;

        let kind = ChunkKind::from_chunk_type(&chunk_type);

        trace!(
            "Chunk {} ({:?}) at {} with {} bytes",
            chunk_name(&chunk_type),
            kind,
            payload_start,
            payload_length
        );

        records.push(ChunkRecord {
            kind,
            chunk_type,
            payload_start,
            payload_length,
            crc
        });
    }

    validate_order(&records)?;

    Ok(records)
}

/// Enforce the structural ordering rules
///
/// - The last chunk is `IEND` and there is exactly one
/// - The first chunk is `IHDR` and there is exactly one
/// - `IDAT` chunks are consecutive
pub fn validate_order(records: &[ChunkRecord]) -> Result<(), PngDecodeErrors> {
    match records.last() {
        Some(last) if last.kind == ChunkKind::End => (),
        Some(last) => {
            return Err(PngDecodeErrors::TruncatedOrUnterminated(format!(
                "Last chunk is {}, expected IEND",
                chunk_name(&last.chunk_type)
            )))
        }
        None => {
            return Err(PngDecodeErrors::TruncatedOrUnterminated(
                "No chunks present".into()
            ))
        }
    }
    if records[0].kind != ChunkKind::Header {
        return Err(PngDecodeErrors::InvalidFormat("First chunk not IHDR"));
    }
    let count = |kind| records.iter().filter(|r| r.kind == kind).count();

    if count(ChunkKind::Header) != 1 {
        return Err(PngDecodeErrors::InvalidFormat("Multiple IHDR chunks"));
    }
    if count(ChunkKind::End) != 1 {
        return Err(PngDecodeErrors::InvalidFormat("Multiple IEND chunks"));
    }
    // every IDAT after the first run ended is out of place
    let idat_runs = records
        .windows(2)
        .filter(|w| w[0].kind != ChunkKind::PixelData && w[1].kind == ChunkKind::PixelData)
        .count();

    if idat_runs > 1 {
        return Err(PngDecodeErrors::InvalidFormat("IDAT chunks are not consecutive"));
    }
    Ok(())
}

/// Deal with chunks marked critical that the decoder doesn't know
///
/// In strict mode they are an error, otherwise they are skipped
/// like any ancillary chunk.
pub fn check_unknown_critical(
    records: &[ChunkRecord], strict: bool
) -> Result<(), PngDecodeErrors> {
    for record in records {
        if record.kind == ChunkKind::Unknown && is_critical(&record.chunk_type) {
            if strict {
                return Err(PngDecodeErrors::InvalidFormat(
                    "Unknown critical chunk in strict mode"
                ));
            }
            warn!(
                "Skipping unknown critical chunk {}",
                chunk_name(&record.chunk_type)
            );
        }
    }
    Ok(())
}

/// Confirm the declared crc of every chunk
#[cfg(feature = "crc")]
pub fn verify_checksums(data: &[u8], records: &[ChunkRecord]) -> Result<(), PngDecodeErrors> {
    use crate::crc::chunk_crc;

    for record in records {
        let calc_crc = chunk_crc(&record.chunk_type, record.payload(data)?);

        if calc_crc != record.crc {
            return Err(PngDecodeErrors::BadCrc(record.crc, calc_crc));
        }
    }
    Ok(())
}
