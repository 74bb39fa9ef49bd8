// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Optional AI enrichment for detection.
//!
//! An [`ImageAnalyzer`] takes image bytes and returns a free-text description
//! (for example, whether the image looks like it carries hidden data). It is
//! slow, remote and unreliable, so [`detect`] treats it as best effort: the
//! call is bounded by a timeout, and any failure only leaves
//! [`DetectionResult::ai_analysis`] empty.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{instrument, warn};

use crate::stego::{self, DetectionResult, StegoError};

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiAnalyzer;

/// An external service that describes an image in free text.
pub trait ImageAnalyzer {
    /// Analyze `image_bytes` (any container the service accepts).
    fn analyze(&self, image_bytes: &[u8]) -> impl Future<Output = Result<String, AnalysisError>> + Send;
}

/// Failure of the analysis collaborator. Never escapes [`detect`].
#[derive(Debug)]
pub enum AnalysisError {
    /// No API key configured.
    MissingApiKey,
    /// Transport-level failure.
    #[cfg(feature = "gemini")]
    Http(reqwest::Error),
    /// The service answered with a non-success status.
    Status { status: u16, body: String },
    /// The service answered but returned no text.
    EmptyResponse,
    /// The call did not finish within the configured timeout.
    Timeout(Duration),
    /// Any other analyzer-specific failure.
    Other(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "no API key configured"),
            #[cfg(feature = "gemini")]
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Status { status, body } => write!(f, "service returned {status}: {body}"),
            Self::EmptyResponse => write!(f, "service returned no text"),
            Self::Timeout(d) => write!(f, "analysis timed out after {}ms", d.as_millis()),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "gemini")]
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "gemini")]
impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

/// Run `analyzer` with an upper bound on wall time.
pub async fn analyze_with_timeout<A: ImageAnalyzer>(
    analyzer: &A,
    image_bytes: &[u8],
    timeout: Duration,
) -> Result<String, AnalysisError> {
    match tokio::time::timeout(timeout, analyzer.analyze(image_bytes)).await {
        Ok(result) => result,
        Err(_) => Err(AnalysisError::Timeout(timeout)),
    }
}

/// Decode the embedded message and, if an analyzer is given, enrich the
/// result with its analysis.
///
/// The local decode and the analyzer call run concurrently and fill
/// independent fields. Analyzer errors and timeouts are logged and leave
/// `ai_analysis` as `None`.
///
/// # Errors
/// Only local decode failures (the image could not be decoded at all).
#[instrument(skip_all, fields(image_len = image_bytes.len()))]
pub async fn detect<A: ImageAnalyzer>(
    image_bytes: &[u8],
    analyzer: Option<&A>,
    timeout: Duration,
) -> Result<DetectionResult, StegoError> {
    let local = async { stego::decode(image_bytes) };
    let enrichment = async {
        let analyzer = analyzer?;
        match analyze_with_timeout(analyzer, image_bytes, timeout).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "AI analysis unavailable");
                None
            }
        }
    };

    let (local, ai_analysis) = tokio::join!(local, enrichment);
    let mut result = local?;
    result.ai_analysis = ai_analysis;
    Ok(result)
}
