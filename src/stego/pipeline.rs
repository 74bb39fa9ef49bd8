// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! LSB encode/decode pipeline.
//!
//! Encode:
//! 1. Decode the cover container into a [`PixelMatrix`]
//! 2. Frame the message (length prefix + bytes), rejecting oversized input
//! 3. Write the frame bits into a copy of the matrix, slot 0 onward
//! 4. Serialize the copy as PNG
//!
//! Decode runs steps 1 and 2 in reverse. Both directions are pure: no I/O,
//! no shared state, and the caller's cover is never mutated.

use tracing::debug;

use crate::stego::error::StegoError;
use crate::stego::frame;
use crate::stego::raster::{self, PixelMatrix};
use crate::stego::DetectionResult;

/// Embed raw `payload` bytes into a copy of `cover`.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] if the frame does not fit. The check runs
/// before any sample is touched.
pub fn embed(cover: &PixelMatrix, payload: &[u8]) -> Result<PixelMatrix, StegoError> {
    let bits = frame::frame(payload, cover.usable_bits())?;
    let mut stego = cover.clone();
    stego.write_bits(0, &bits)?;
    Ok(stego)
}

/// Extract the raw framed payload, or `None` if no plausible frame is present.
pub fn extract(stego: &PixelMatrix) -> Result<Option<Vec<u8>>, StegoError> {
    frame::unframe(stego)
}

/// Extract the embedded message as text.
///
/// A payload that is not valid UTF-8 is reported as `None`: mangled bytes
/// are not a message.
pub fn extract_message(stego: &PixelMatrix) -> Result<Option<String>, StegoError> {
    let Some(bytes) = extract(stego)? else {
        return Ok(None);
    };
    match String::from_utf8(bytes) {
        Ok(text) => Ok(Some(text)),
        Err(e) => {
            debug!(len = e.as_bytes().len(), "frame payload is not UTF-8, treating as no payload");
            Ok(None)
        }
    }
}

/// Encode a text message into a cover image.
///
/// # Arguments
/// - `image_bytes`: JPEG, PNG, GIF, BMP or WebP cover.
/// - `message`: non-empty UTF-8 text.
///
/// # Returns
/// PNG bytes of the stego image. The result must not be re-saved in a lossy
/// format before decoding.
///
/// # Errors
/// - [`StegoError::UnsupportedFormat`] / [`StegoError::CorruptImage`] if the
///   cover cannot be decoded.
/// - [`StegoError::ImageTooLarge`] if the cover exceeds the dimension limits.
/// - [`StegoError::EmptyMessage`] if `message` is empty.
/// - [`StegoError::MessageTooLarge`] with the cover's capacity if the message
///   does not fit.
pub fn encode(image_bytes: &[u8], message: &str) -> Result<Vec<u8>, StegoError> {
    let cover = raster::load(image_bytes)?;

    if message.is_empty() {
        return Err(StegoError::EmptyMessage);
    }

    let stego = embed(&cover, message.as_bytes())?;
    debug!(
        width = cover.width(),
        height = cover.height(),
        payload_bytes = message.len(),
        bits_written = frame::HEADER_BITS + message.len() * 8,
        usable_bits = cover.usable_bits(),
        "embedded message"
    );

    raster::to_png(&stego)
}

/// Decode the embedded message from a stego image, without AI enrichment.
///
/// An image with no embedded message decodes successfully with
/// `extracted_message == None`.
///
/// # Errors
/// Container errors only (see [`raster::load`]).
pub fn decode(image_bytes: &[u8]) -> Result<DetectionResult, StegoError> {
    let stego = raster::load(image_bytes)?;
    let extracted_message = extract_message(&stego)?;
    debug!(
        width = stego.width(),
        height = stego.height(),
        found = extracted_message.is_some(),
        "decoded image"
    );
    Ok(DetectionResult { extracted_message, ai_analysis: None })
}
