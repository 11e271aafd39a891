//! imgnpy Core - converts folders of images into NumPy `.npy` arrays.
//!
//! Every recognized image directly inside a folder is decoded, optionally
//! converted to grayscale and/or resampled to 512x512, and written next to
//! the original as `<name>.npy`:
//!
//! ```text
//! Folder → Discover → Decode → [Grayscale] → [Resize] → Array → .npy
//! ```
//!
//! A file that fails at any stage is reported and skipped; only a missing
//! or unreadable folder stops the run.
//!
//! # Usage
//!
//! ```rust,no_run
//! use imgnpy_core::{Config, ConvertOptions, Converter};
//! use std::path::Path;
//!
//! fn main() -> imgnpy_core::Result<()> {
//!     let config = Config::load()?;
//!     let converter = Converter::new(&config);
//!     let options = ConvertOptions { grayscale: true, resize: false };
//!
//!     let report = converter.convert_folder(Path::new("./images"), &options, |outcome| {
//!         println!("{outcome}");
//!     })?;
//!     println!("{} saved, {} failed", report.saved(), report.failed());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

use std::path::Path;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ConverterError, PipelineError, PipelineResult, Result};
pub use pipeline::{Candidate, ConvertOptions, Converter, ImageArray};
pub use types::{BatchReport, ConversionOutcome, SavedArray};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert every image in `folder` using the default configuration.
pub fn convert(folder: impl AsRef<Path>, options: &ConvertOptions) -> Result<BatchReport> {
    let converter = Converter::new(&Config::default());
    Ok(converter.convert_folder(folder.as_ref(), options, |_| {})?)
}
