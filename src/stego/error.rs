// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the LSB steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from container decoding through
//! framing and PNG re-encoding. "No message found" is not an error: decode
//! reports it as `None`.

use core::fmt;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// The input bytes are not one of the accepted container formats
    /// (JPEG, PNG, GIF, BMP, WebP).
    UnsupportedFormat(String),
    /// The input bytes claim a supported format but could not be decoded.
    CorruptImage(image::ImageError),
    /// The image dimensions exceed the maximum allowed (8192px / 16MP).
    ImageTooLarge,
    /// The message is empty; a zero length prefix is reserved for "no payload".
    EmptyMessage,
    /// The message does not fit in the carrier. `max_bytes` is the largest
    /// message (in UTF-8 bytes) this carrier can hold.
    MessageTooLarge { max_bytes: usize },
    /// A bit index fell outside the addressable LSB slots. Indicates an
    /// internal arithmetic bug, never a user error.
    OutOfCapacity { index: usize, usable_bits: usize },
    /// The stego image could not be serialized as PNG.
    ImageWrite(image::ImageError),
}

impl StegoError {
    /// True for errors caused by the caller's input (bad image, oversized
    /// message), as opposed to internal failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_)
                | Self::CorruptImage(_)
                | Self::ImageTooLarge
                | Self::EmptyMessage
                | Self::MessageTooLarge { .. }
        )
    }
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(what) => write!(f, "unsupported image format: {what}"),
            Self::CorruptImage(e) => write!(f, "corrupt image: {e}"),
            Self::ImageTooLarge => write!(f, "image too large (max 8192px / 16MP)"),
            Self::EmptyMessage => write!(f, "message is empty"),
            Self::MessageTooLarge { max_bytes } => write!(
                f,
                "message too large for this image (this image can hold at most {max_bytes} bytes)"
            ),
            Self::OutOfCapacity { index, usable_bits } => write!(
                f,
                "bit index {index} out of capacity ({usable_bits} usable bits)"
            ),
            Self::ImageWrite(e) => write!(f, "failed to write PNG: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CorruptImage(e) | Self::ImageWrite(e) => Some(e),
            _ => None,
        }
    }
}
