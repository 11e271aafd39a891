//! Sub-configuration structs with their defaults.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Side length, in pixels, of the square grid used by the resize transform.
pub const RESIZE_DIMENSION: u32 = 512;

/// Conversion defaults. CLI flags can only switch these on, never off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Convert images to single-channel luma before extraction
    pub grayscale: bool,

    /// Resample images to 512x512 before extraction
    pub resize: bool,

    /// Resampling filter used when resizing
    pub resize_filter: ResizeFilter,

    /// What to do when two candidates map to the same output file
    pub on_collision: CollisionPolicy,
}

/// Resampling filters exposed through configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    /// Bicubic
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    /// Map to the `image` crate's filter type.
    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Policy for candidates sharing a base name (`a.png` and `a.jpg`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later candidate overwrites the earlier output
    #[default]
    Overwrite,
    /// The later candidate fails and the earlier output is kept
    Reject,
}

/// Candidate discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Recognized image extensions, without the leading dot
    pub extensions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: ["png", "jpg", "jpeg", "bmp", "tiff", "gif"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Optional resource limits. Both are off unless set in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size_mb: Option<u64>,

    /// Maximum image dimension (width or height)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_image_dimension: Option<u32>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
