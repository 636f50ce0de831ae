/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the relief decoders
//!
//! It currently contains
//!
//! - A bounds checked byte cursor with endian aware reads
//! - Colorspace and bit depth information shared by decoded images
//! - Decoder options
//! - A logging facade that compiles to nothing when the `log` feature is off
//!
//! This library is `#[no_std]` unless the `std` feature is enabled.
//!
//! # Features
//!  - `std`: Implements `std::error::Error` for the error types.
//!
//!  - `log`: Route the logging macros to the [log](https://crates.io/crates/log) crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]

pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
#[cfg(feature = "log")]
pub use log;
#[cfg(not(feature = "log"))]
pub mod log;
pub mod options;
