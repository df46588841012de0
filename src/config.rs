// In: src/config.rs

//! The single source of truth for all transcoder configuration.
//!
//! `TranscodeConfig` is created once at the application boundary (from a JSON file,
//! from command-line flags, or from `Default`) and then passed down through the
//! system as a shared, read-only `Arc<TranscodeConfig>`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::YuvDeltaError;
use crate::types::Resolution;

//==================================================================================
// I. Core Configuration Enums & Structs
//==================================================================================

/// Defines the trade-off between compression speed and final stream size.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompressionProfile {
    /// Prioritizes speed over size.
    Fast,

    /// A balance between speed and size.
    Balanced,

    /// **Default:** Prioritizes the smallest possible stream at the cost of CPU time.
    #[default]
    HighCompression,
}

impl CompressionProfile {
    /// The Zstd level used for this profile.
    pub fn zstd_level(&self) -> i32 {
        match self {
            CompressionProfile::Fast => 1,
            CompressionProfile::Balanced => 3,
            CompressionProfile::HighCompression => 19,
        }
    }

    /// Parses the snake_case profile name used in config files and on the command line.
    pub fn from_name(name: &str) -> Result<Self, YuvDeltaError> {
        match name {
            "fast" => Ok(CompressionProfile::Fast),
            "balanced" => Ok(CompressionProfile::Balanced),
            "high_compression" => Ok(CompressionProfile::HighCompression),
            other => Err(YuvDeltaError::Config(format!(
                "unknown compression profile '{}' (expected fast, balanced or high_compression)",
                other
            ))),
        }
    }
}

/// File names for the three output artifacts, relative to the output directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// The YUV420P stream straight out of color conversion.
    #[serde(default = "default_encoded_yuv")]
    pub encoded_yuv: String,

    /// The YUV420P stream after delta + compress + decompress + integrate.
    #[serde(default = "default_decoded_yuv")]
    pub decoded_yuv: String,

    /// The final reconstructed RGB24 stream.
    #[serde(default = "default_decoded_rgb")]
    pub decoded_rgb: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            encoded_yuv: default_encoded_yuv(),
            decoded_yuv: default_decoded_yuv(),
            decoded_rgb: default_decoded_rgb(),
        }
    }
}

fn default_encoded_yuv() -> String {
    "encoded.yuv".to_string()
}

fn default_decoded_yuv() -> String {
    "decoded.yuv".to_string()
}

fn default_decoded_rgb() -> String {
    "decoded.rgb24".to_string()
}

//==================================================================================
// II. The Unified TranscodeConfig
//==================================================================================

/// The single, unified configuration for one transcoding run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TranscodeConfig {
    /// Frame geometry. Both dimensions must be even.
    #[serde(default)]
    pub resolution: Resolution,

    /// The profile guiding the compressor's speed/size trade-off.
    #[serde(default)]
    pub profile: CompressionProfile,

    /// If true, the delta stream is also run-length encoded to report an RLE size.
    /// The RLE output is never persisted, so turning this off only skips a statistic.
    #[serde(default = "default_true")]
    pub collect_rle_stats: bool,

    /// Names of the output artifacts written by the binary.
    #[serde(default)]
    pub artifacts: ArtifactPaths,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            profile: CompressionProfile::default(),
            collect_rle_stats: true,
            artifacts: ArtifactPaths::default(),
        }
    }
}

impl TranscodeConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, YuvDeltaError> {
        let config: TranscodeConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, YuvDeltaError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks every setting that can be checked before any frame is read.
    pub fn validate(&self) -> Result<(), YuvDeltaError> {
        self.resolution.validate()
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}
