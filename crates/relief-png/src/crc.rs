/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 (ISO-HDLC) as used by png chunks

const CRC_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut n = 0;

    while n < 256 {
        let mut crc = n as u32;
        let mut k = 0;

        while k < 8 {
            crc = if crc & 1 != 0 {
                0xEDB8_8320 ^ (crc >> 1)
            } else {
                crc >> 1
            };
            k += 1;
        }
        table[n] = crc;
        n += 1;
    }
    table
}

/// Update a running crc with `bytes`.
///
/// Start with `u32::MAX` and invert the final value
pub fn crc32_update(bytes: &[u8], mut crc: u32) -> u32 {
    for byte in bytes {
        crc = CRC_TABLE[((crc ^ u32::from(*byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc
}

/// Compute the crc of a chunk over its type and payload
pub fn chunk_crc(chunk_type: &[u8], payload: &[u8]) -> u32 {
    !crc32_update(payload, crc32_update(chunk_type, u32::MAX))
}
