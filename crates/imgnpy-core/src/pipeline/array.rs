//! Pixel buffer → dense n-dimensional array.
//!
//! Single-channel images become `(height, width)` arrays, everything else
//! `(height, width, channels)` in channel-last order. The element type follows
//! the sample type of the image: `u8`, `u16` or `f32`.

use image::{ColorType, DynamicImage};
use ndarray::{ArrayD, IxDyn, ShapeError};
use thiserror::Error;

/// A dense array holding an image's samples.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageArray {
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    F32(ArrayD<f32>),
}

/// Errors raised while building an [`ImageArray`].
#[derive(Error, Debug)]
pub enum ArrayError {
    #[error("pixel buffer does not match shape: {0}")]
    Shape(#[from] ShapeError),

    #[error("unsupported color type {0:?}")]
    UnsupportedColor(ColorType),
}

impl ImageArray {
    /// Take ownership of the image's pixel buffer and reshape it.
    pub fn from_image(image: DynamicImage) -> Result<Self, ArrayError> {
        let shape = Self::shape_for(&image);
        let dim = IxDyn(&shape);

        let array = match image {
            DynamicImage::ImageLuma8(buf) => Self::U8(ArrayD::from_shape_vec(dim, buf.into_raw())?),
            DynamicImage::ImageLumaA8(buf) => {
                Self::U8(ArrayD::from_shape_vec(dim, buf.into_raw())?)
            }
            DynamicImage::ImageRgb8(buf) => Self::U8(ArrayD::from_shape_vec(dim, buf.into_raw())?),
            DynamicImage::ImageRgba8(buf) => {
                Self::U8(ArrayD::from_shape_vec(dim, buf.into_raw())?)
            }
            DynamicImage::ImageLuma16(buf) => {
                Self::U16(ArrayD::from_shape_vec(dim, buf.into_raw())?)
            }
            DynamicImage::ImageLumaA16(buf) => {
                Self::U16(ArrayD::from_shape_vec(dim, buf.into_raw())?)
            }
            DynamicImage::ImageRgb16(buf) => {
                Self::U16(ArrayD::from_shape_vec(dim, buf.into_raw())?)
            }
            DynamicImage::ImageRgba16(buf) => {
                Self::U16(ArrayD::from_shape_vec(dim, buf.into_raw())?)
            }
            DynamicImage::ImageRgb32F(buf) => {
                Self::F32(ArrayD::from_shape_vec(dim, buf.into_raw())?)
            }
            DynamicImage::ImageRgba32F(buf) => {
                Self::F32(ArrayD::from_shape_vec(dim, buf.into_raw())?)
            }
            other => return Err(ArrayError::UnsupportedColor(other.color())),
        };
        Ok(array)
    }

    /// Array shape for an image: `[h, w]` or `[h, w, c]`.
    fn shape_for(image: &DynamicImage) -> Vec<usize> {
        let height = image.height() as usize;
        let width = image.width() as usize;
        match image.color().channel_count() {
            1 => vec![height, width],
            channels => vec![height, width, channels as usize],
        }
    }

    /// Shape of the underlying array.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::U8(a) => a.shape(),
            Self::U16(a) => a.shape(),
            Self::F32(a) => a.shape(),
        }
    }

    /// NumPy name of the element type.
    pub fn dtype(&self) -> &'static str {
        match self {
            Self::U8(_) => "uint8",
            Self::U16(_) => "uint16",
            Self::F32(_) => "float32",
        }
    }
}
