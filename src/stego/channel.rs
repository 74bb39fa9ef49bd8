// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Pixel bit channel: a linear index over the writable LSB slots of a
//! [`PixelMatrix`].
//!
//! Slot order is row-major over pixels, then R, G, B within a pixel. Only
//! bit 0 of each color sample is addressable; alpha is never touched. Encoder
//! and decoder derive the same order from the image dimensions alone, so no
//! key or side channel is needed.

use crate::stego::error::StegoError;
use crate::stego::raster::PixelMatrix;

/// Color samples per pixel that carry payload bits (R, G, B).
pub const CHANNELS_USED: usize = 3;

/// Read-only, index-addressed source of bits (each 0 or 1).
pub trait BitSource {
    /// Number of addressable bits.
    fn total_bits(&self) -> usize;

    /// Read the bit at `index`.
    ///
    /// # Errors
    /// [`StegoError::OutOfCapacity`] if `index >= total_bits()`.
    fn read_bit(&self, index: usize) -> Result<u8, StegoError>;
}

impl PixelMatrix {
    /// Number of LSB slots: `width * height * 3`.
    pub fn usable_bits(&self) -> usize {
        self.pixel_count() * CHANNELS_USED
    }

    /// Byte offset in the sample buffer of the slot at `index`.
    fn slot_offset(&self, index: usize) -> Result<usize, StegoError> {
        let usable_bits = self.usable_bits();
        if index >= usable_bits {
            return Err(StegoError::OutOfCapacity { index, usable_bits });
        }
        let pixel = index / CHANNELS_USED;
        let channel = index % CHANNELS_USED;
        Ok(pixel * self.channels() as usize + channel)
    }

    /// Read the LSB at `index`.
    pub fn read_bit(&self, index: usize) -> Result<u8, StegoError> {
        let offset = self.slot_offset(index)?;
        Ok(self.as_raw()[offset] & 1)
    }

    /// Set the LSB at `index` to `bit & 1`. The 7 high bits are preserved,
    /// so the sample moves by at most 1.
    pub fn write_bit(&mut self, index: usize, bit: u8) -> Result<(), StegoError> {
        let offset = self.slot_offset(index)?;
        let sample = &mut self.data_mut()[offset];
        *sample = (*sample & !1) | (bit & 1);
        Ok(())
    }

    /// Write `bits` sequentially starting at slot `start`.
    ///
    /// The range is checked up front, so on error nothing has been written.
    pub fn write_bits(&mut self, start: usize, bits: &[u8]) -> Result<(), StegoError> {
        let usable_bits = self.usable_bits();
        let end = start.saturating_add(bits.len());
        if end > usable_bits {
            return Err(StegoError::OutOfCapacity { index: end - 1, usable_bits });
        }
        for (i, &bit) in bits.iter().enumerate() {
            self.write_bit(start + i, bit)?;
        }
        Ok(())
    }
}

impl BitSource for PixelMatrix {
    fn total_bits(&self) -> usize {
        self.usable_bits()
    }

    fn read_bit(&self, index: usize) -> Result<u8, StegoError> {
        PixelMatrix::read_bit(self, index)
    }
}

/// A plain bit vector (one bit per element, as produced by
/// [`bytes_to_bits`](crate::stego::frame::bytes_to_bits)).
impl BitSource for [u8] {
    fn total_bits(&self) -> usize {
        self.len()
    }

    fn read_bit(&self, index: usize) -> Result<u8, StegoError> {
        self.get(index)
            .map(|b| b & 1)
            .ok_or(StegoError::OutOfCapacity { index, usable_bits: self.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(width: u32, height: u32, fill: u8) -> PixelMatrix {
        let len = (width * height * 3) as usize;
        PixelMatrix::from_raw(width, height, 3, vec![fill; len]).unwrap()
    }

    #[test]
    fn usable_bits_counts_rgb_only() {
        assert_eq!(rgb(100, 100, 0).usable_bits(), 30_000);
        let rgba = PixelMatrix::from_raw(10, 10, 4, vec![0; 400]).unwrap();
        assert_eq!(rgba.usable_bits(), 300);
    }

    #[test]
    fn row_major_then_rgb_order() {
        let mut m = rgb(2, 2, 0);
        // Slot 4 = pixel 1 (x=1, y=0), green.
        m.write_bit(4, 1).unwrap();
        assert_eq!(m.pixel(1, 0), Some(&[0u8, 1, 0][..]));
        // Slot 6 = pixel 2 (x=0, y=1), red.
        m.write_bit(6, 1).unwrap();
        assert_eq!(m.pixel(0, 1), Some(&[1u8, 0, 0][..]));
    }

    #[test]
    fn alpha_is_skipped() {
        let mut m = PixelMatrix::from_raw(2, 1, 4, vec![0x80; 8]).unwrap();
        for i in 0..m.usable_bits() {
            m.write_bit(i, 1).unwrap();
        }
        assert_eq!(m.as_raw(), &[0x81, 0x81, 0x81, 0x80, 0x81, 0x81, 0x81, 0x80]);
    }

    #[test]
    fn write_preserves_high_bits() {
        let mut m = rgb(1, 1, 0b1010_1011);
        m.write_bit(0, 0).unwrap();
        m.write_bit(1, 1).unwrap();
        assert_eq!(m.as_raw(), &[0b1010_1010, 0b1010_1011, 0b1010_1011]);
        assert_eq!(m.read_bit(0).unwrap(), 0);
        assert_eq!(m.read_bit(1).unwrap(), 1);
    }

    #[test]
    fn out_of_capacity() {
        let mut m = rgb(2, 2, 0);
        assert!(matches!(
            m.write_bit(12, 1),
            Err(StegoError::OutOfCapacity { index: 12, usable_bits: 12 })
        ));
        assert!(matches!(m.read_bit(12), Err(StegoError::OutOfCapacity { .. })));
        assert!(m.read_bit(11).is_ok());
    }

    #[test]
    fn write_bits_is_all_or_nothing() {
        let mut m = rgb(1, 1, 0);
        assert!(m.write_bits(1, &[1, 1, 1]).is_err());
        assert_eq!(m.as_raw(), &[0, 0, 0]);
        m.write_bits(1, &[1, 1]).unwrap();
        assert_eq!(m.as_raw(), &[0, 1, 1]);
    }

    #[test]
    fn bit_vector_source() {
        let bits: &[u8] = &[1, 0, 3];
        assert_eq!(bits.total_bits(), 3);
        assert_eq!(bits.read_bit(2).unwrap(), 1);
        assert!(bits.read_bit(3).is_err());
    }
}
