// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Synthetic carrier images shared by the integration tests.

#![allow(dead_code)]

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Serialize `img` in `format`.
pub fn encode_as(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    if format == ImageFormat::Gif {
        // The GIF encoder quantizes from RGBA.
        DynamicImage::ImageRgba8(img.to_rgba8()).write_to(&mut buf, format).unwrap();
    } else {
        img.write_to(&mut buf, format).unwrap();
    }
    buf.into_inner()
}

/// Re-save `img` as JPEG at `quality`.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Vec<u8> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(&img.to_rgb8())
        .unwrap();
    out
}

/// Smooth diagonal gradient, photo-like low-frequency content.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 255 / (width + height).max(1)) as u8,
        ])
    });
    DynamicImage::ImageRgb8(img)
}

/// Uniform random samples from a fixed seed.
pub fn noise(width: u32, height: u32, seed: u8) -> DynamicImage {
    let mut rng = ChaCha20Rng::from_seed([seed; 32]);
    let img = RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]));
    DynamicImage::ImageRgb8(img)
}

/// 8×8-cell black and white checkerboard.
pub fn checkerboard(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
    });
    DynamicImage::ImageRgb8(img)
}

/// Single flat color.
pub fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Random RGB with a varying alpha ramp.
pub fn noise_rgba(width: u32, height: u32, seed: u8) -> DynamicImage {
    let mut rng = ChaCha20Rng::from_seed([seed; 32]);
    let img = RgbaImage::from_fn(width, height, |x, _| {
        Rgba([rng.gen(), rng.gen(), rng.gen(), (x * 255 / width.max(1)) as u8])
    });
    DynamicImage::ImageRgba8(img)
}

/// Reproducible ASCII message of exact byte length.
pub fn generate_message(len: usize) -> String {
    const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789 ";
    (0..len).map(|i| CHARS[i % CHARS.len()] as char).collect()
}

/// Overlapping sine waves around mid-gray: continuous tone, no flat areas.
pub fn waves(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let (fx, fy) = (x as f32, y as f32);
        Rgb([
            (128.0 + 90.0 * (fx / 7.0).sin()) as u8,
            (128.0 + 90.0 * (fy / 5.0).cos()) as u8,
            (128.0 + 60.0 * ((fx + fy) / 11.0).sin()) as u8,
        ])
    });
    DynamicImage::ImageRgb8(img)
}
