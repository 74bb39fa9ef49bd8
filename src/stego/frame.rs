// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload frame construction and parsing.
//!
//! The frame is the exact bit sequence written into the carrier's LSB slots,
//! starting at slot 0:
//!
//! ```text
//! [32 bits ] payload length n (big-endian u32)
//! [8n bits ] payload bytes, MSB first within each byte
//! ```
//!
//! There is no terminator: the length prefix delimits the payload, so no
//! byte sequence in the message needs escaping.
//!
//! Every never-encoded image also "parses" as a frame, because its LSBs are
//! just noise. [`unframe`] therefore treats a zero length, or a length that
//! would run past the end of the carrier, as "no payload".

use crate::stego::channel::BitSource;
use crate::stego::error::StegoError;

/// Width of the length prefix in bits.
pub const LENGTH_PREFIX_BITS: usize = 32;

/// Fixed frame overhead in bits. Equal to the length prefix; kept separate so
/// capacity math reads in terms of "header".
pub const HEADER_BITS: usize = LENGTH_PREFIX_BITS;

/// Largest payload (in bytes) that fits in `usable_bits` LSB slots.
///
/// `floor((usable_bits - 32) / 8)`, or 0 if the carrier cannot even hold the
/// header.
pub fn max_payload_bytes(usable_bits: usize) -> usize {
    (usable_bits.saturating_sub(HEADER_BITS) / 8).min(u32::MAX as usize)
}

/// Build the frame bitstream for `payload`.
///
/// The size check runs before anything is produced, so callers that write
/// the returned bits have already passed the capacity gate.
///
/// # Errors
/// [`StegoError::MessageTooLarge`] if `32 + 8 * payload.len()` exceeds
/// `usable_bits`.
pub fn frame(payload: &[u8], usable_bits: usize) -> Result<Vec<u8>, StegoError> {
    let max_bytes = max_payload_bytes(usable_bits);
    if payload.len() > max_bytes {
        return Err(StegoError::MessageTooLarge { max_bytes });
    }
    let len = u32::try_from(payload.len()).map_err(|_| StegoError::MessageTooLarge { max_bytes })?;

    let mut bits = Vec::with_capacity(HEADER_BITS + payload.len() * 8);
    bits.extend(bytes_to_bits(&len.to_be_bytes()));
    bits.extend(bytes_to_bits(payload));
    Ok(bits)
}

/// Read the declared payload length from the first 32 bits of `source`.
///
/// Returns `None` if the source is shorter than the prefix.
pub fn read_length_prefix<S: BitSource + ?Sized>(source: &S) -> Result<Option<u32>, StegoError> {
    if source.total_bits() < LENGTH_PREFIX_BITS {
        return Ok(None);
    }
    let prefix = read_bits(source, 0, LENGTH_PREFIX_BITS)?;
    let mut be = [0u8; 4];
    be.copy_from_slice(&bits_to_bytes(&prefix));
    Ok(Some(u32::from_be_bytes(be)))
}

/// Parse a frame from `source`.
///
/// Returns `Ok(None)` when no plausible frame is present: the source is too
/// short, the declared length is 0, or `8 * n` exceeds the bits remaining
/// after the prefix. Otherwise returns exactly `n` bytes. UTF-8 validity is
/// not checked here.
pub fn unframe<S: BitSource + ?Sized>(source: &S) -> Result<Option<Vec<u8>>, StegoError> {
    let Some(n) = read_length_prefix(source)? else {
        return Ok(None);
    };
    let n = n as usize;
    let remaining = source.total_bits() - HEADER_BITS;
    if n == 0 || n.saturating_mul(8) > remaining {
        return Ok(None);
    }

    let bits = read_bits(source, HEADER_BITS, n * 8)?;
    Ok(Some(bits_to_bytes(&bits)))
}

fn read_bits<S: BitSource + ?Sized>(source: &S, start: usize, count: usize) -> Result<Vec<u8>, StegoError> {
    (start..start + count).map(|i| source.read_bit(i)).collect()
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Pack MSB-first bits into bytes. A short trailing chunk is zero-padded
/// on the right.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            let byte = chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1));
            byte << (8 - chunk.len())
        })
        .collect()
}
