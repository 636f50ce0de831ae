/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline un-filtering
//!
//! Each handler reconstructs one row, `raw` is the filtered row without
//! its filter byte, `current` is where reconstructed bytes go and
//! `prev_row` is the already reconstructed row above.
//! `components` is the distance in bytes to the left neighbour.
use alloc::vec;
use alloc::vec::Vec;

use crate::enums::FilterType;
use crate::error::PngDecodeErrors;

/// Row filters after first row remapping
///
/// The row above the first one is all zeroes, so filters that read it
/// have cheaper versions there.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum RowFilter {
    None,
    Sub,
    Up,
    Average,
    Paeth,
    AvgFirst,
    PaethFirst
}

impl RowFilter {
    const fn new(filter: FilterType, first_row: bool) -> RowFilter {
        match (filter, first_row) {
            (FilterType::None, _) => RowFilter::None,
            (FilterType::Sub, _) => RowFilter::Sub,
            // up for the first row becomes a memcpy
            (FilterType::Up, true) => RowFilter::None,
            (FilterType::Up, false) => RowFilter::Up,
            (FilterType::Average, true) => RowFilter::AvgFirst,
            (FilterType::Average, false) => RowFilter::Average,
            (FilterType::Paeth, true) => RowFilter::PaethFirst,
            (FilterType::Paeth, false) => RowFilter::Paeth
        }
    }
}

/// Undo the filters of `height` scanlines
///
/// `data` holds one filter byte followed by `stride` filtered bytes per row.
/// Returns the reconstructed rows, packed back to back, and the filter
/// each row declared.
pub fn unfilter_scanlines(
    data: &[u8], stride: usize, components: usize, height: usize
) -> Result<(Vec<u8>, Vec<FilterType>), PngDecodeErrors> {
    let chunk_size = stride + 1;

    if data.len() < chunk_size * height {
        return Err(PngDecodeErrors::DecodedSizeMismatch(
            chunk_size * height,
            data.len()
        ));
    }
    // final size is known up front, rows are written in place
    let mut out = vec![0_u8; stride * height];
    let mut filters = Vec::with_capacity(height);

    let mut out_position = 0;

    for (row, in_stride) in data.chunks_exact(chunk_size).take(height).enumerate() {
        // prev is everything already reconstructed, current starts at this row
        let (prev, current) = out.split_at_mut(out_position);
        let current = &mut current[..stride];

        let prev_row = if row == 0 {
            &[][..]
        } else {
            &prev[out_position - stride..]
        };

        let filter_byte = in_stride[0];
        let raw = &in_stride[1..];

        let filter = FilterType::from_int(filter_byte)
            .ok_or(PngDecodeErrors::UnsupportedFilterType(filter_byte))?;

        filters.push(filter);

        match RowFilter::new(filter, row == 0) {
            RowFilter::None => current.copy_from_slice(raw),
            RowFilter::Sub => handle_sub(raw, current, components),
            RowFilter::Up => handle_up(prev_row, raw, current),
            RowFilter::Average => handle_avg(prev_row, raw, current, components),
            RowFilter::Paeth => handle_paeth(prev_row, raw, current, components),
            RowFilter::AvgFirst => handle_avg_first(raw, current, components),
            RowFilter::PaethFirst => handle_paeth_first(raw, current, components)
        }
        out_position += stride;
    }
    Ok((out, filters))
}

pub fn handle_sub(raw: &[u8], current: &mut [u8], components: usize) {
    let start = components.min(raw.len()).min(current.len());
    // handle leftmost pixel explicitly
    current[..start].copy_from_slice(&raw[..start]);

    // raw length is one row,so always keep it in check
    let end = current.len().min(raw.len());

    for i in start..end {
        let a = current[i - components];
        current[i] = raw[i].wrapping_add(a);
    }
}

pub fn handle_up(prev_row: &[u8], raw: &[u8], current: &mut [u8]) {
    for ((filt, recon), up) in raw.iter().zip(current).zip(prev_row) {
        *recon = (*filt).wrapping_add(*up)
    }
}

pub fn handle_avg(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    let end = current.len().min(raw.len()).min(prev_row.len());
    let start = components.min(end);

    for i in 0..start {
        current[i] = raw[i].wrapping_add(prev_row[i] >> 1);
    }

    for i in start..end {
        let a = current[i - components];
        let b = prev_row[i];

        // floor((a+b)/2) without leaving 8 bits
        let c = (a & b) + ((a ^ b) >> 1);

        current[i] = raw[i].wrapping_add(c);
    }
}

pub fn handle_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    let end = current.len().min(raw.len()).min(prev_row.len());
    let start = components.min(end);

    // left and upper left are zero, paeth picks up
    for i in 0..start {
        current[i] = raw[i].wrapping_add(prev_row[i]);
    }

    for i in start..end {
        let paeth_res = paeth(
            current[i - components],
            prev_row[i],
            prev_row[i - components]
        );
        current[i] = raw[i].wrapping_add(paeth_res)
    }
}

/// Average where the row above is zero
pub fn handle_avg_first(raw: &[u8], current: &mut [u8], components: usize) {
    let start = components.min(raw.len()).min(current.len());
    current[..start].copy_from_slice(&raw[..start]);

    let end = current.len().min(raw.len());

    for i in start..end {
        let avg = current[i - components] >> 1;
        current[i] = raw[i].wrapping_add(avg)
    }
}

/// Paeth where the row above is zero, which always predicts left
pub fn handle_paeth_first(raw: &[u8], current: &mut [u8], components: usize) {
    handle_sub(raw, current, components)
}

/// Paeth predictor, ties go to a, then b, then c
#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    // Branch free formulation from stb_image, equivalent to the
    // reference predictor
    let a = i32::from(a);
    let b = i32::from(b);
    let c = i32::from(c);
    let thresh = c * 3 - (a + b);
    let lo = if a < b { a } else { b };
    let hi = if a < b { b } else { a };

    let t0 = if hi <= thresh { lo } else { c };
    let t1 = if thresh <= lo { hi } else { t0 };
    t1 as u8
}
