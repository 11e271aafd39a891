//! Optional grayscale and fixed-size resize transforms.

use image::DynamicImage;

use crate::config::{ConvertConfig, ResizeFilter, RESIZE_DIMENSION};

use super::processor::ConvertOptions;

/// Applies the transforms selected for a run.
pub struct Transformer {
    filter: ResizeFilter,
}

impl Transformer {
    /// Create a transformer using the configured resampling filter.
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            filter: config.resize_filter,
        }
    }

    /// Run grayscale then resize, each only when enabled.
    pub fn apply(&self, image: DynamicImage, options: &ConvertOptions) -> DynamicImage {
        let image = if options.grayscale {
            to_grayscale(image)
        } else {
            image
        };
        if options.resize {
            self.resize(&image)
        } else {
            image
        }
    }

    /// Resample to exactly 512x512, ignoring aspect ratio.
    pub fn resize(&self, image: &DynamicImage) -> DynamicImage {
        image.resize_exact(RESIZE_DIMENSION, RESIZE_DIMENSION, self.filter.filter_type())
    }
}

/// Convert to single-channel luma, leaving single-channel images untouched.
///
/// 8-bit sources become `Luma8`; deeper sources (16-bit and float) become
/// `Luma16`. Alpha is dropped.
pub fn to_grayscale(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageLuma16(_) => image,
        other => {
            let color = other.color();
            if color.bytes_per_pixel() == color.channel_count() {
                DynamicImage::ImageLuma8(other.to_luma8())
            } else {
                DynamicImage::ImageLuma16(other.to_luma16())
            }
        }
    }
}
