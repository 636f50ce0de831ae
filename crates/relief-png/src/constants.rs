/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// The eight magic bytes every png starts with, read as a big endian `u64`
pub const PNG_SIGNATURE: u64 = u64::from_be_bytes([137, 80, 78, 71, 13, 10, 26, 10]);

/// Length of the signature in bytes
pub const PNG_SIGNATURE_LEN: usize = 8;

/// Size of the length + chunk type prefix of every chunk
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Size of the trailing crc of every chunk
pub const CHUNK_CRC_SIZE: usize = 4;

/// Size of an IHDR payload
pub const IHDR_LENGTH: usize = 13;
