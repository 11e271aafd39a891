//! Conversion pipeline components.
//!
//! - **discovery**: Find candidate images directly inside a folder
//! - **decode**: Load and decode images from various formats
//! - **transform**: Optional grayscale and 512x512 resize
//! - **array**: Turn pixel buffers into dense arrays
//! - **npy**: Write arrays as NumPy `.npy` files
//! - **processor**: Orchestrates the full pipeline

pub mod array;
pub mod decode;
pub mod discovery;
pub mod npy;
pub mod processor;
pub mod transform;

// Re-exports for convenient access
pub use array::{ArrayError, ImageArray};
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{Candidate, FileDiscovery, NPY_EXTENSION};
pub use processor::{ConvertOptions, Converter};
pub use transform::{to_grayscale, Transformer};
