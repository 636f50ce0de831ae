/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Logging macros used when the `log` feature is disabled.
//!
//! They have the same call syntax as the `log` crate macros
//! but expand to code the optimizer removes.

// #[macro_export] is required to make macros works across crates
// but it always put the macro in the crate root.
// #[doc(hidden)] + "pub use" is a workaround to namespace a macro.
pub use crate::{__debug as debug, __error as error, __info as info, __trace as trace, __warn as warn};

// Arguments are type checked but never formatted.
#[doc(hidden)]
#[macro_export]
macro_rules! __swallow {
    ($($arg:tt)+) => {
        if false {
            let _ = core::format_args!($($arg)+);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __error {
    ($($arg:tt)+) => {
        $crate::__swallow!($($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __warn {
    ($($arg:tt)+) => {
        $crate::__swallow!($($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __info {
    ($($arg:tt)+) => {
        $crate::__swallow!($($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __debug {
    ($($arg:tt)+) => {
        $crate::__swallow!($($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __trace {
    ($($arg:tt)+) => {
        $crate::__swallow!($($arg)+)
    };
}
