//! Image decoding with format detection and optional size limits.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Image decoder. Limits left unset in the config are not enforced.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Original file size in bytes
    pub file_size: u64,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Read and decode an image file.
    ///
    /// The whole file is read up front so the handle is closed before
    /// decoding starts, whichever way decoding ends.
    pub fn decode(&self, path: &Path) -> Result<DecodedImage, PipelineError> {
        let metadata = std::fs::metadata(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(max_mb) = self.limits.max_file_size_mb {
            if metadata.len() > max_mb.saturating_mul(1024 * 1024) {
                return Err(PipelineError::FileTooLarge {
                    path: path.to_path_buf(),
                    size_mb: metadata.len() / (1024 * 1024),
                    max_mb,
                });
            }
        }

        let bytes = std::fs::read(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.decode_bytes(bytes, path)
    }

    /// Decode an image from an in-memory byte buffer.
    ///
    /// The format is sniffed from the content first and falls back to the
    /// extension of `path`, so a PNG saved as `.jpg` still decodes.
    pub fn decode_bytes(
        &self,
        bytes: Vec<u8>,
        path: &Path,
    ) -> Result<DecodedImage, PipelineError> {
        let file_size = bytes.len() as u64;
        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        let format = match reader.format() {
            Some(f) => f,
            None => {
                let f = ImageFormat::from_path(path).map_err(|_| {
                    PipelineError::UnsupportedFormat {
                        path: path.to_path_buf(),
                        format: path
                            .extension()
                            .and_then(|e| e.to_str())
                            .unwrap_or("unknown")
                            .to_string(),
                    }
                })?;
                reader.set_format(f);
                f
            }
        };

        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        if let Some(max_dim) = self.limits.max_image_dimension {
            if width > max_dim || height > max_dim {
                return Err(PipelineError::ImageTooLarge {
                    path: path.to_path_buf(),
                    width,
                    height,
                    max_dim,
                });
            }
        }

        tracing::trace!("Decoded {:?} as {:?} ({}x{})", path, format, width, height);
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
            file_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png_from_bytes() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let decoded = decoder
            .decode_bytes(png_bytes(64, 32), Path::new("cat.png"))
            .unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!((decoded.width, decoded.height), (64, 32));
        assert!(decoded.file_size > 0);
    }

    #[test]
    fn test_format_detected_by_content() {
        let dir = tempfile::tempdir().unwrap();
        let misnamed = dir.path().join("test_misnamed.jpg");
        std::fs::write(&misnamed, png_bytes(8, 8)).unwrap();

        let decoder = ImageDecoder::new(LimitsConfig::default());
        let result = decoder.decode(&misnamed).unwrap();
        assert_eq!(result.format, ImageFormat::Png);
    }

    #[test]
    fn test_empty_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.gif");
        std::fs::write(&path, b"").unwrap();

        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder.decode(&path).err().unwrap();
        assert!(matches!(err, PipelineError::Decode { .. }));
        assert!(err.to_string().contains("broken.gif"));
    }

    #[test]
    fn test_garbage_with_unknown_extension_is_unsupported() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder
            .decode_bytes(b"not an image".to_vec(), Path::new("thing.xyz"))
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder.decode(&dir.path().join("gone.png")).err().unwrap();
        assert!(matches!(err, PipelineError::Read { .. }));
    }

    #[test]
    fn test_dimension_limit() {
        let limits = LimitsConfig {
            max_image_dimension: Some(16),
            ..LimitsConfig::default()
        };
        let decoder = ImageDecoder::new(limits);
        let err = decoder
            .decode_bytes(png_bytes(32, 8), Path::new("wide.png"))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            PipelineError::ImageTooLarge {
                width: 32,
                height: 8,
                max_dim: 16,
                ..
            }
        ));
    }

    #[test]
    fn test_no_dimension_limit_by_default() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let decoded = decoder
            .decode_bytes(png_bytes(10_001, 2), Path::new("pano.png"))
            .unwrap();
        assert_eq!((decoded.width, decoded.height), (10_001, 2));
    }

    #[test]
    fn test_file_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        std::fs::write(&path, vec![0u8; 1024 * 1024 + 1]).unwrap();

        let limits = LimitsConfig {
            max_file_size_mb: Some(1),
            ..LimitsConfig::default()
        };
        let err = ImageDecoder::new(limits).decode(&path).err().unwrap();
        assert!(matches!(
            err,
            PipelineError::FileTooLarge {
                size_mb: 1,
                max_mb: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_huge_file_size_limit_does_not_overflow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, png_bytes(8, 8)).unwrap();

        let limits = LimitsConfig {
            max_file_size_mb: Some(18_000_000_000_000),
            ..LimitsConfig::default()
        };
        let decoded = ImageDecoder::new(limits).decode(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (8, 8));
    }
}
