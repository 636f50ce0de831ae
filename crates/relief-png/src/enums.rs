/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use relief_core::colorspace::ColorSpace;

/// Chunk kinds the decoder distinguishes, see table 5.3
/// of the PNG standard at https://www.w3.org/TR/2003/REC-PNG-20031110/
///
/// Everything that isn't needed to rebuild pixels is
/// kept as [`ChunkKind::Unknown`] and skipped.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ChunkKind {
    /// `IHDR`
    Header,
    /// `IDAT`
    PixelData,
    /// `PLTE`
    Palette,
    /// `IEND`
    End,
    /// Any other chunk type
    Unknown
}

impl ChunkKind {
    pub fn from_chunk_type(chunk_type: &[u8; 4]) -> ChunkKind {
        match chunk_type {
            b"IHDR" => ChunkKind::Header,
            b"IDAT" => ChunkKind::PixelData,
            b"PLTE" => ChunkKind::Palette,
            b"IEND" => ChunkKind::End,
            _ => ChunkKind::Unknown
        }
    }
}

/// Return true if the chunk type marks a chunk a decoder must
/// understand to display the image.
///
/// That is signalled by bit 5 of the first byte (an uppercase letter)
pub const fn is_critical(chunk_type: &[u8; 4]) -> bool {
    chunk_type[0] & (1 << 5) == 0
}

/// Per scanline filter types
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterType {
    pub const fn from_int(int: u8) -> Option<FilterType> {
        match int {
            0 => Some(FilterType::None),
            1 => Some(FilterType::Sub),
            2 => Some(FilterType::Up),
            3 => Some(FilterType::Average),
            4 => Some(FilterType::Paeth),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            FilterType::None => 0,
            FilterType::Sub => 1,
            FilterType::Up => 2,
            FilterType::Average => 3,
            FilterType::Paeth => 4
        }
    }
}

/// Colour types a png header can declare
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColorMode {
    Grayscale,
    Truecolor,
    Indexed,
    GrayscaleAlpha,
    TruecolorAlpha
}

impl ColorMode {
    pub const fn from_int(int: u8) -> Option<ColorMode> {
        match int {
            0 => Some(Self::Grayscale),
            2 => Some(Self::Truecolor),
            3 => Some(Self::Indexed),
            4 => Some(Self::GrayscaleAlpha),
            6 => Some(Self::TruecolorAlpha),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            Self::Grayscale => 0,
            Self::Truecolor => 2,
            Self::Indexed => 3,
            Self::GrayscaleAlpha => 4,
            Self::TruecolorAlpha => 6
        }
    }

    /// Number of samples making up a single pixel
    pub const fn num_components(self) -> usize {
        match self {
            Self::Grayscale | Self::Indexed => 1,
            Self::GrayscaleAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorAlpha => 4
        }
    }

    /// Bit depths the format allows for this colour type
    pub const fn allowed_depths(self) -> &'static [u8] {
        match self {
            Self::Grayscale => &[1, 2, 4, 8, 16],
            Self::Indexed => &[1, 2, 4, 8],
            Self::Truecolor | Self::GrayscaleAlpha | Self::TruecolorAlpha => &[8, 16]
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::GrayscaleAlpha | Self::TruecolorAlpha)
    }

    /// The colorspace pixels of this colour type decode to
    ///
    /// Palette entries are RGB triples
    pub const fn colorspace(self) -> ColorSpace {
        match self {
            Self::Grayscale => ColorSpace::Luma,
            Self::GrayscaleAlpha => ColorSpace::LumaA,
            Self::Truecolor | Self::Indexed => ColorSpace::RGB,
            Self::TruecolorAlpha => ColorSpace::RGBA
        }
    }
}
