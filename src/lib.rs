// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # phasm-lsb
//!
//! Pure-Rust LSB steganography for lossless carriers. Hides a short text
//! message in the least-significant bits of an image's RGB samples and
//! recovers it later.
//!
//! - **Encode**: any JPEG/PNG/GIF/BMP/WebP cover in, PNG out. Each sample
//!   changes by at most 1.
//! - **Decode**: reports the embedded message, or `None` for an image that
//!   carries nothing.
//! - **Detect** (async): decode plus optional free-text analysis from an
//!   external AI service, which never fails the decode.
//!
//! Not encryption and not a watermark: anyone who knows the scheme can read
//! the message, and lossy re-encoding destroys it.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use phasm_lsb::{encode, decode};
//!
//! let cover = std::fs::read("photo.jpg").unwrap();
//! let stego_png = encode(&cover, "secret message").unwrap();
//! let result = decode(&stego_png).unwrap();
//! assert_eq!(result.extracted_message.as_deref(), Some("secret message"));
//! ```

pub mod analysis;
pub mod config;
pub mod stego;

pub use stego::{encode, decode, embed, extract, extract_message, StegoError, DetectionResult, PixelMatrix};
pub use stego::{capacity, estimate_capacity, CapacityInfo};
pub use stego::{validate_dimensions, MAX_DIMENSION, MAX_PIXELS};
pub use analysis::{detect, analyze_with_timeout, AnalysisError, ImageAnalyzer};
#[cfg(feature = "gemini")]
pub use analysis::GeminiAnalyzer;
pub use config::{Config, AnalysisConfig, LimitsConfig, LimitError, ConfigError};
