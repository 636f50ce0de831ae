/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Helpers for assembling png files by hand
#![allow(dead_code)]

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};

pub const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Append a chunk with a correct crc
pub fn chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], payload: &[u8]) {
    let mut crc = Crc::new();
    crc.update(chunk_type);
    crc.update(payload);

    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc.sum().to_be_bytes());
}

pub fn ihdr(width: u32, height: u32, depth: u8, color: u8, interlace: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(13);
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&[depth, color, 0, 0, interlace]);
    out
}

pub fn zlib(raw: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).unwrap();
    encoder.finish().unwrap()
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = i16::from(a) + i16::from(b) - i16::from(c);
    let pa = (p - i16::from(a)).abs();
    let pb = (p - i16::from(b)).abs();
    let pc = (p - i16::from(c)).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Filter raw scanlines with `filter` (0..=4) on every row
///
/// `row_bytes` is the scanline length and `bpp` the distance to the left
/// neighbour, output has a filter byte in front of every row.
pub fn filter_rows(raw: &[u8], row_bytes: usize, bpp: usize, filter: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len() + raw.len() / row_bytes);
    let zero = vec![0; row_bytes];

    for (y, row) in raw.chunks_exact(row_bytes).enumerate() {
        let above = if y == 0 {
            &zero[..]
        } else {
            &raw[(y - 1) * row_bytes..y * row_bytes]
        };
        out.push(filter);

        for x in 0..row_bytes {
            let a = if x >= bpp { row[x - bpp] } else { 0 };
            let b = above[x];
            let c = if x >= bpp { above[x - bpp] } else { 0 };

            let predicted = match filter {
                0 => 0,
                1 => a,
                2 => b,
                3 => ((u16::from(a) + u16::from(b)) / 2) as u8,
                4 => paeth(a, b, c),
                _ => panic!("unknown filter {filter}")
            };
            out.push(row[x].wrapping_sub(predicted));
        }
    }
    out
}

/// Build a png from an already filtered scanline stream
///
/// The compressed stream is split into `idat_count` IDAT chunks
pub fn build_png(
    width: u32, height: u32, depth: u8, color: u8, filtered: &[u8], idat_count: usize
) -> Vec<u8> {
    let compressed = zlib(filtered);
    let split = compressed.len().div_ceil(idat_count.max(1)).max(1);

    let mut out = SIGNATURE.to_vec();
    chunk(&mut out, b"IHDR", &ihdr(width, height, depth, color, 0));

    for piece in compressed.chunks(split) {
        chunk(&mut out, b"IDAT", piece);
    }
    chunk(&mut out, b"IEND", &[]);
    out
}

/// Encode raw samples with the `png` crate, letting it pick filters per row
pub fn encode_reference(
    width: u32, height: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        encoder.set_adaptive_filter(png::AdaptiveFilterType::Adaptive);

        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }
    out
}
