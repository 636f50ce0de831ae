/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

mod common;

use common::{build_png, chunk, ihdr, zlib, SIGNATURE};
use relief_png::chunks::scan_chunks;
use relief_png::error::PngDecodeErrors;
use relief_png::relief_core::options::DecoderOptions;
use relief_png::{decode, ChunkKind, ColorMode, DecodeStage, FilterType, Pixel, PngDecoder};

fn gray_2x1(filtered: &[u8]) -> Vec<u8> {
    build_png(2, 1, 8, 0, filtered, 1)
}

#[test]
fn test_gray_no_filter() {
    let image = decode(&gray_2x1(&[0x00, 0x10, 0x20])).unwrap();

    assert_eq!(image.dimensions(), (2, 1));
    assert_eq!(image.color_mode(), ColorMode::Grayscale);
    assert_eq!(
        image.pixels().u8().unwrap(),
        [Pixel::Grayscale { v: 0x10 }, Pixel::Grayscale { v: 0x20 }]
    );
    assert_eq!(image.row_filters(), [FilterType::None]);
}

#[test]
fn test_gray_sub_filter() {
    let image = decode(&gray_2x1(&[0x01, 0x10, 0x05])).unwrap();

    assert_eq!(
        image.pixels().u8().unwrap(),
        [Pixel::Grayscale { v: 0x10 }, Pixel::Grayscale { v: 0x15 }]
    );
    assert_eq!(image.row_filters(), [FilterType::Sub]);
}

#[test]
fn test_unterminated() {
    let mut data = SIGNATURE.to_vec();
    chunk(&mut data, b"IHDR", &ihdr(2, 1, 8, 0, 0));
    chunk(&mut data, b"IDAT", &zlib(&[0, 1, 2]));

    assert!(matches!(
        decode(&data),
        Err(PngDecodeErrors::TruncatedOrUnterminated(_))
    ));

    // a trailing ancillary chunk after IEND is just as bad
    let mut data = gray_2x1(&[0, 1, 2]);
    chunk(&mut data, b"tEXt", b"comment");

    assert!(matches!(
        decode(&data),
        Err(PngDecodeErrors::TruncatedOrUnterminated(_))
    ));
}

#[test]
fn test_short_and_foreign_signatures() {
    for len in 0..8 {
        assert_eq!(
            decode(&SIGNATURE[..len]),
            Err(PngDecodeErrors::InvalidSignature)
        );
    }
    let mut data = gray_2x1(&[0, 1, 2]);
    data[1] = b'Q';
    assert_eq!(decode(&data), Err(PngDecodeErrors::InvalidSignature));
}

#[test]
fn test_length_past_end() {
    let mut data = gray_2x1(&[0, 1, 2]);
    // grow the IHDR's declared length
    data[8..12].copy_from_slice(&1000_u32.to_be_bytes());

    assert!(matches!(
        decode(&data),
        Err(PngDecodeErrors::TruncatedOrUnterminated(_))
    ));

    // chop the file in the middle of IEND
    let data = gray_2x1(&[0, 1, 2]);
    assert!(matches!(
        decode(&data[..data.len() - 3]),
        Err(PngDecodeErrors::TruncatedOrUnterminated(_))
    ));
}

#[test]
fn test_signature_only_is_invalid_format() {
    assert!(matches!(
        decode(&SIGNATURE),
        Err(PngDecodeErrors::InvalidFormat(_))
    ));
}

#[test]
fn test_split_idat_is_concatenated() {
    let (width, height) = (9_u32, 7_u32);
    let mut filtered = Vec::new();
    let mut expected = Vec::new();

    for y in 0..height {
        filtered.push(0);
        for x in 0..width * 3 {
            let value = (x * 7 + y * 13) as u8;
            filtered.push(value);
            expected.push(value);
        }
    }
    let single = decode(&build_png(width, height, 8, 2, &filtered, 1)).unwrap();
    let split = decode(&build_png(width, height, 8, 2, &filtered, 5)).unwrap();

    assert_eq!(single, split);

    let pixels = split.pixels().u8().unwrap();
    assert_eq!(pixels.len(), (width * height) as usize);
    assert_eq!(
        pixels[1],
        Pixel::Truecolor {
            r: expected[3],
            g: expected[4],
            b: expected[5]
        }
    );
}

#[test]
fn test_unknown_chunks_are_skipped() {
    let compressed = zlib(&[0, 0xAA, 0xBB]);

    let mut data = SIGNATURE.to_vec();
    chunk(&mut data, b"IHDR", &ihdr(2, 1, 8, 0, 0));
    chunk(&mut data, b"gAMA", &[0, 0, 0xB1, 0x8F]);
    chunk(&mut data, b"IDAT", &compressed);
    chunk(&mut data, b"tEXt", b"Title\0heights");
    chunk(&mut data, b"IEND", &[]);

    let image = decode(&data).unwrap();
    assert_eq!(
        image.pixels().u8().unwrap(),
        [Pixel::Grayscale { v: 0xAA }, Pixel::Grayscale { v: 0xBB }]
    );

    let records = scan_chunks(&data, SIGNATURE.len()).unwrap();
    assert_eq!(records[1].kind, ChunkKind::Unknown);
    assert_eq!(&records[1].chunk_type, b"gAMA");
}

#[test]
fn test_unknown_critical_chunk_in_strict_mode() {
    let mut data = SIGNATURE.to_vec();
    chunk(&mut data, b"IHDR", &ihdr(2, 1, 8, 0, 0));
    chunk(&mut data, b"ZZZZ", &[1, 2]);
    chunk(&mut data, b"IDAT", &zlib(&[0, 1, 2]));
    chunk(&mut data, b"IEND", &[]);

    assert!(decode(&data).is_ok());

    let strict = PngDecoder::new_with_options(&data, DecoderOptions::new_safe()).decode();
    assert!(matches!(strict, Err(PngDecodeErrors::InvalidFormat(_))));
}

#[test]
fn test_scanning_is_repeatable() {
    let data = build_png(4, 4, 16, 6, &vec![0; 4 * (1 + 4 * 8)], 3);

    let first = scan_chunks(&data, SIGNATURE.len()).unwrap();
    let second = scan_chunks(&data, SIGNATURE.len()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}

#[test]
fn test_sixteen_bit_rgba() {
    let mut filtered = vec![0];
    filtered.extend_from_slice(&[0x12, 0x34, 0x00, 0x01, 0xFF, 0xFF, 0x00, 0x00]);

    let image = decode(&build_png(1, 1, 16, 6, &filtered, 1)).unwrap();

    assert!(image.pixels().u8().is_none());
    assert_eq!(
        image.pixels().u16().unwrap(),
        [Pixel::TruecolorAlpha {
            r: 0x1234,
            g: 0x0001,
            b: 0xFFFF,
            a: 0
        }]
    );
    assert_eq!(image.pixels().transparency_mask(), [true]);
}

#[test]
fn test_rejected_headers() {
    let zero = build_png(0, 1, 8, 0, &[0], 1);
    assert_eq!(decode(&zero), Err(PngDecodeErrors::InvalidDimensions(0, 1)));

    let indexed = build_png(2, 1, 8, 3, &[0, 0, 0], 1);
    assert_eq!(
        decode(&indexed),
        Err(PngDecodeErrors::UnsupportedColorMode(ColorMode::Indexed))
    );

    let bad_depth = build_png(2, 1, 4, 2, &[0, 0, 0], 1);
    assert_eq!(decode(&bad_depth), Err(PngDecodeErrors::InvalidBitDepth(2, 4)));

    let mut interlaced = SIGNATURE.to_vec();
    chunk(&mut interlaced, b"IHDR", &ihdr(2, 1, 8, 0, 1));
    chunk(&mut interlaced, b"IDAT", &zlib(&[0, 1, 2]));
    chunk(&mut interlaced, b"IEND", &[]);
    assert_eq!(
        decode(&interlaced),
        Err(PngDecodeErrors::UnsupportedInterlace(1))
    );

    let sub_byte = build_png(8, 1, 1, 0, &[0, 0xFF], 1);
    assert_eq!(decode(&sub_byte), Err(PngDecodeErrors::UnsupportedBitDepth(1)));
}

#[test]
fn test_palette_chunk_is_unsupported() {
    let mut data = SIGNATURE.to_vec();
    chunk(&mut data, b"IHDR", &ihdr(2, 1, 8, 2, 0));
    chunk(&mut data, b"PLTE", &[0, 0, 0, 255, 255, 255]);
    chunk(&mut data, b"IDAT", &zlib(&[0; 7]));
    chunk(&mut data, b"IEND", &[]);

    assert_eq!(
        decode(&data),
        Err(PngDecodeErrors::UnsupportedColorMode(ColorMode::Truecolor))
    );
}

#[test]
fn test_pixel_stream_errors() {
    // one byte short
    let short = gray_2x1(&[0, 1]);
    assert_eq!(decode(&short), Err(PngDecodeErrors::DecodedSizeMismatch(3, 2)));

    let long = gray_2x1(&[0, 1, 2, 3]);
    assert_eq!(decode(&long), Err(PngDecodeErrors::DecodedSizeMismatch(3, 4)));

    let bad_filter = gray_2x1(&[9, 1, 2]);
    assert_eq!(decode(&bad_filter), Err(PngDecodeErrors::UnsupportedFilterType(9)));

    let mut garbage = SIGNATURE.to_vec();
    chunk(&mut garbage, b"IHDR", &ihdr(2, 1, 8, 0, 0));
    chunk(&mut garbage, b"IDAT", &[0xFF, 0xFF, 0x12, 0x34]);
    chunk(&mut garbage, b"IEND", &[]);
    assert!(matches!(
        decode(&garbage),
        Err(PngDecodeErrors::DecompressionError(_))
    ));

    let mut no_idat = SIGNATURE.to_vec();
    chunk(&mut no_idat, b"IHDR", &ihdr(2, 1, 8, 0, 0));
    chunk(&mut no_idat, b"IEND", &[]);
    assert!(matches!(
        decode(&no_idat),
        Err(PngDecodeErrors::DecompressionError(_))
    ));
}

#[test]
fn test_crc_is_opt_in() {
    let mut data = gray_2x1(&[0, 1, 2]);
    // corrupt the IHDR crc
    data[29] ^= 0xFF;

    assert!(decode(&data).is_ok());

    let options = DecoderOptions::default().png_set_confirm_crc(true);
    let result = PngDecoder::new_with_options(&data, options).decode();

    if cfg!(feature = "crc") {
        assert!(matches!(result, Err(PngDecodeErrors::BadCrc(_, _))));
    } else {
        assert!(result.is_ok());
    }
}

#[test]
fn test_headers_without_pixels() {
    // pixel data is broken, headers are still readable
    let data = gray_2x1(&[7, 1, 2]);
    let mut decoder = PngDecoder::new(&data);

    assert_eq!(decoder.get_dimensions(), None);
    decoder.decode_headers().unwrap();

    assert_eq!(decoder.get_dimensions(), Some((2, 1)));
    assert!(matches!(decoder.stage(), DecodeStage::HeaderParsed(_)));
    assert_eq!(decoder.chunks().len(), 3);
    // repeated calls don't move the decoder
    decoder.decode_headers().unwrap();
    assert!(matches!(decoder.stage(), DecodeStage::HeaderParsed(_)));

    assert_eq!(decoder.decode(), Err(PngDecodeErrors::UnsupportedFilterType(7)));
}

#[test]
fn test_failure_is_sticky() {
    let mut decoder = PngDecoder::new(b"not a png at all");

    assert_eq!(decoder.decode_headers(), Err(PngDecodeErrors::InvalidSignature));
    assert_eq!(
        decoder.stage(),
        &DecodeStage::Failed(PngDecodeErrors::InvalidSignature)
    );
    assert_eq!(decoder.decode_headers(), Err(PngDecodeErrors::InvalidSignature));
}

#[test]
fn test_too_large_dimensions() {
    let data = build_png(64, 1, 8, 0, &[0; 65], 1);
    let options = DecoderOptions::default().set_max_width(32);

    assert!(matches!(
        PngDecoder::new_with_options(&data, options).decode(),
        Err(PngDecodeErrors::TooLargeDimensions("width", 64, 32))
    ));
}

#[test]
fn test_raised_limits_with_huge_dimensions() {
    let data = build_png(u32::MAX, u32::MAX, 16, 6, &[0; 16], 1);
    let options = DecoderOptions::default()
        .set_max_width(usize::MAX)
        .set_max_height(usize::MAX);

    assert!(matches!(
        PngDecoder::new_with_options(&data, options).decode(),
        Err(PngDecodeErrors::TooLargeDimensions("size", _, _))
    ));
}

#[test]
fn test_claimed_size_above_inflate_limit() {
    // a few bytes claiming a 2 GiB image
    let data = build_png(16384, 16384, 16, 6, &[0; 16], 1);

    assert!(matches!(
        decode(&data),
        Err(PngDecodeErrors::DecompressionError(_))
    ));
}
