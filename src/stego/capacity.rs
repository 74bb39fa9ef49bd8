// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Capacity estimation.
//!
//! Capacity is exact for LSB embedding: every R, G and B sample holds one bit,
//! the first 32 bits hold the length prefix, and the rest hold whole payload
//! bytes. Always computed from the image at hand, never cached.

use serde::Serialize;

use crate::stego::error::StegoError;
use crate::stego::frame::{max_payload_bytes, HEADER_BITS};
use crate::stego::raster::{self, PixelMatrix};

/// Embedding capacity of one carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityInfo {
    pub width: u32,
    pub height: u32,
    /// All LSB slots: `width * height * 3`.
    pub usable_bits: usize,
    /// Slots left after the length prefix.
    pub payload_bit_budget: usize,
    /// Largest message (UTF-8 bytes) that fits.
    pub max_message_bytes: usize,
}

/// Capacity of an already-decoded carrier.
pub fn estimate_capacity(matrix: &PixelMatrix) -> CapacityInfo {
    let usable_bits = matrix.usable_bits();
    CapacityInfo {
        width: matrix.width(),
        height: matrix.height(),
        usable_bits,
        payload_bit_budget: usable_bits.saturating_sub(HEADER_BITS),
        max_message_bytes: max_payload_bytes(usable_bits),
    }
}

/// Decode `image_bytes` and report its capacity.
///
/// # Errors
/// Same container errors as [`raster::load`].
pub fn capacity(image_bytes: &[u8]) -> Result<CapacityInfo, StegoError> {
    let matrix = raster::load(image_bytes)?;
    Ok(estimate_capacity(&matrix))
}
