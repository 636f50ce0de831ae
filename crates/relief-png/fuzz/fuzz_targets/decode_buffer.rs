/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let opts = relief_core::options::DecoderOptions::new_fast();

    let decoder = relief_png::PngDecoder::new_with_options(data, opts);

    if let Ok(image) = decoder.decode() {
        assert_eq!(image.pixels().len(), image.width() * image.height());
    }
});
