// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Container decode/encode and the in-memory pixel matrix.
//!
//! Cover images arrive as JPEG, PNG, GIF, BMP or WebP bytes and are decoded
//! into a [`PixelMatrix`] of 8-bit RGB or RGBA samples. Stego output is always
//! written back as PNG: any lossy container would re-quantize the samples and
//! destroy the embedded LSBs.
//!
//! Normalization on load:
//! - grayscale is promoted to RGB (grayscale + alpha to RGBA),
//! - 16-bit and float samples are reduced to 8 bits,
//! - animated GIF/WebP contribute their first frame only.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageFormat, ImageReader};

use crate::stego::error::StegoError;

/// Container formats accepted as cover or stego input.
pub const ACCEPTED_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::WebP,
];

/// Decoded raster: `width × height` pixels, `channels` interleaved 8-bit
/// samples per pixel, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelMatrix {
    /// Wrap an interleaved sample buffer.
    ///
    /// Returns `None` unless `channels` is 3 or 4 and `data.len()` equals
    /// `width * height * channels`.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Option<Self> {
        if channels != 3 && channels != 4 {
            return None;
        }
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(channels as usize)?;
        if data.len() != expected {
            return None;
        }
        Some(Self { width, height, channels, data })
    }

    /// Convert a decoded image, keeping alpha if the source has it.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        if img.color().has_alpha() {
            Self { width, height, channels: 4, data: img.into_rgba8().into_raw() }
        } else {
            Self { width, height, channels: 3, data: img.into_rgb8().into_raw() }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel: 3 (RGB) or 4 (RGBA).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The interleaved sample buffer.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Samples of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * c;
        Some(&self.data[start..start + c])
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Decode container bytes into a [`PixelMatrix`].
///
/// Dimensions are read from the container header and checked before any
/// pixel data is decoded.
///
/// # Errors
/// - [`StegoError::UnsupportedFormat`] if the bytes are not one of
///   [`ACCEPTED_FORMATS`].
/// - [`StegoError::CorruptImage`] if the container is recognized but broken.
/// - [`StegoError::ImageTooLarge`] if the declared dimensions exceed the limits.
pub fn load(bytes: &[u8]) -> Result<PixelMatrix, StegoError> {
    let format = image::guess_format(bytes)
        .map_err(|_| StegoError::UnsupportedFormat("unrecognized container".into()))?;
    if !ACCEPTED_FORMATS.contains(&format) {
        return Err(StegoError::UnsupportedFormat(format!("{format:?}")));
    }

    let reader = || ImageReader::with_format(Cursor::new(bytes), format);
    let (width, height) = reader().into_dimensions().map_err(decode_error)?;
    super::validate_dimensions(width, height)?;

    let img = reader().decode().map_err(decode_error)?;
    Ok(PixelMatrix::from_dynamic(img))
}

fn decode_error(e: ImageError) -> StegoError {
    match e {
        ImageError::Unsupported(u) => StegoError::UnsupportedFormat(u.to_string()),
        other => StegoError::CorruptImage(other),
    }
}

/// Serialize a matrix as PNG (RGB8 or RGBA8, matching its channel count).
pub fn to_png(matrix: &PixelMatrix) -> Result<Vec<u8>, StegoError> {
    let color = if matrix.has_alpha() { ExtendedColorType::Rgba8 } else { ExtendedColorType::Rgb8 };
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(matrix.as_raw(), matrix.width, matrix.height, color)
        .map_err(StegoError::ImageWrite)?;
    Ok(out)
}
