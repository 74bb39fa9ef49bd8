// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding.
//!
//! Messages are hidden in the least-significant bit of each R, G and B sample
//! of a lossless raster, in row-major order:
//!
//! - [`channel`]: the bit-slot ordering over a [`PixelMatrix`]
//! - [`frame`]: the length-prefixed wire format
//! - [`encode`] / [`decode`]: container in, container out
//!
//! Each sample changes by at most 1, which is what keeps the stego image
//! visually identical to the cover. The scheme does not survive lossy
//! re-encoding; stego output is always PNG.

pub mod error;
pub mod raster;
pub mod channel;
pub mod frame;
pub mod capacity;
mod pipeline;

use serde::{Deserialize, Serialize};

pub use error::StegoError;
pub use raster::PixelMatrix;

/// Maximum pixel dimension (width or height) accepted for encode and decode.
pub const MAX_DIMENSION: u32 = 8192;

/// Maximum total pixel count (width × height).
pub const MAX_PIXELS: u32 = 16_000_000;

/// Validate image dimensions.
///
/// # Errors
/// [`StegoError::ImageTooLarge`] if either dimension > 8192px or total pixels > 16M.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), StegoError> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION || width.checked_mul(height).map_or(true, |p| p > MAX_PIXELS) {
        return Err(StegoError::ImageTooLarge);
    }
    Ok(())
}

/// Outcome of inspecting an image.
///
/// `extracted_message` is the primary signal. `ai_analysis` is independent
/// enrichment and may be present whether or not a message was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// The embedded message, or `None` if the image carries no valid frame.
    pub extracted_message: Option<String>,
    /// Free-text analysis from the AI collaborator, if it ran and succeeded.
    pub ai_analysis: Option<String>,
}

pub use pipeline::{decode, embed, encode, extract, extract_message};
pub use capacity::{capacity, estimate_capacity, CapacityInfo};
