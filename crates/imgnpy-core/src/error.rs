//! Error types for the imgnpy conversion pipeline.
//!
//! Errors are split into two tiers: folder-level errors that stop a run
//! before any file is touched, and per-file errors that are recorded against
//! a single candidate while the batch carries on. Every per-file variant
//! names the path it concerns.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for imgnpy operations.
#[derive(Error, Debug)]
pub enum ConverterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source folder is missing or not a directory (fatal)
    #[error("The folder '{0}' does not exist.")]
    FolderNotFound(PathBuf),

    /// Source folder exists but could not be listed (fatal)
    #[error("Cannot list folder {path}: {message}")]
    ReadDir { path: PathBuf, message: String },

    /// Reading the file bytes failed
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Container format could not be determined
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Pixel buffer could not be turned into an array
    #[error("Array extraction failed for {path}: {message}")]
    Array { path: PathBuf, message: String },

    /// Writing the .npy file failed
    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Output path already produced by an earlier candidate in this run
    #[error("Output {output} already written from {previous} in this run")]
    OutputCollision {
        path: PathBuf,
        output: PathBuf,
        previous: PathBuf,
    },
}

impl PipelineError {
    /// Whether this error stops the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FolderNotFound(_) | Self::ReadDir { .. })
    }
}

/// Convenience type alias for imgnpy results.
pub type Result<T> = std::result::Result<T, ConverterError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
