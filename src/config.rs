// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Configuration for callers of the codec.
//!
//! The codec itself takes no configuration. These settings belong to the
//! layer around it: credentials and timeout for the AI analysis step, and
//! the upload/message limits a transport enforces before calling the codec.
//!
//! Sources, in increasing precedence: built-in defaults, a TOML file, then
//! environment variables (see [`Config::apply_env`]).

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub limits: LimitsConfig,
}

/// Settings for the AI analysis collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// API key. Never serialized back out.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the Generative Language API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model used for image analysis.
    #[serde(default = "default_model")]
    pub model: String,

    /// Question sent along with the image.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Upper bound on one analysis call, in whole seconds.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}

fn default_model() -> String {
    "gemini-2.0-flash".into()
}

fn default_prompt() -> String {
    "Does this image contain any hidden messages or steganography?".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            prompt: default_prompt(),
            timeout: default_timeout(),
        }
    }
}

impl AnalysisConfig {
    /// True when an API key is present and non-empty.
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Input limits enforced by the caller, not by the codec. The codec's own
/// limit is the carrier's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum message length in characters.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Maximum upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_message_chars() -> usize {
    1000
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_message_chars: default_max_message_chars(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl LimitsConfig {
    /// Reject messages longer than `max_message_chars` characters.
    pub fn check_message(&self, message: &str) -> Result<(), LimitError> {
        let chars = message.chars().count();
        if chars > self.max_message_chars {
            return Err(LimitError::MessageTooLong { chars, max: self.max_message_chars });
        }
        Ok(())
    }

    /// Reject uploads larger than `max_upload_bytes`.
    pub fn check_upload(&self, len: usize) -> Result<(), LimitError> {
        if len > self.max_upload_bytes {
            return Err(LimitError::UploadTooLarge { bytes: len, max: self.max_upload_bytes });
        }
        Ok(())
    }
}

/// A caller-side limit was exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    MessageTooLong { chars: usize, max: usize },
    UploadTooLarge { bytes: usize, max: usize },
}

impl fmt::Display for LimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MessageTooLong { chars, max } => {
                write!(f, "message is {chars} characters, limit is {max}")
            }
            Self::UploadTooLarge { bytes, max } => {
                write!(f, "upload is {bytes} bytes, limit is {max}")
            }
        }
    }
}

impl std::error::Error for LimitError {}

/// Errors while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// An environment override could not be parsed.
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(e) => write!(f, "invalid config: {e}"),
            Self::InvalidValue { key, value } => write!(f, "invalid value for {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl Config {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment.
    ///
    /// | variable | field |
    /// |---|---|
    /// | `PHASM_API_KEY`, else `api_key` | `analysis.api_key` |
    /// | `PHASM_API_URL` | `analysis.api_url` |
    /// | `PHASM_MODEL` | `analysis.model` |
    /// | `PHASM_TIMEOUT_SECS` | `analysis.timeout` |
    /// | `PHASM_MAX_MESSAGE_CHARS` | `limits.max_message_chars` |
    /// | `PHASM_MAX_UPLOAD_BYTES` | `limits.max_upload_bytes` |
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (same keys as [`apply_env`](Self::apply_env)).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("PHASM_API_KEY").or_else(|| lookup("api_key")) {
            self.analysis.api_key = Some(key);
        }
        if let Some(url) = lookup("PHASM_API_URL") {
            self.analysis.api_url = url;
        }
        if let Some(model) = lookup("PHASM_MODEL") {
            self.analysis.model = model;
        }
        if let Some(secs) = lookup("PHASM_TIMEOUT_SECS") {
            self.analysis.timeout = Duration::from_secs(parse_num("PHASM_TIMEOUT_SECS", secs)?);
        }
        if let Some(n) = lookup("PHASM_MAX_MESSAGE_CHARS") {
            self.limits.max_message_chars = parse_num("PHASM_MAX_MESSAGE_CHARS", n)?;
        }
        if let Some(n) = lookup("PHASM_MAX_UPLOAD_BYTES") {
            self.limits.max_upload_bytes = parse_num("PHASM_MAX_UPLOAD_BYTES", n)?;
        }
        Ok(())
    }
}

fn parse_num<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue { key, value })
}
