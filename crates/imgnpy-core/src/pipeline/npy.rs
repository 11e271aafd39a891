//! NumPy `.npy` serialization of image arrays.
//!
//! Files are written in `.npy` format version 1.0, C order, and load back
//! with `numpy.load`.

use ndarray_npy::WriteNpyError;
use std::path::Path;

use super::array::ImageArray;

/// Write an array to `path`, replacing any existing file.
pub fn write_array(path: &Path, array: &ImageArray) -> Result<(), WriteNpyError> {
    match array {
        ImageArray::U8(a) => ndarray_npy::write_npy(path, a),
        ImageArray::U16(a) => ndarray_npy::write_npy(path, a),
        ImageArray::F32(a) => ndarray_npy::write_npy(path, a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Luma, Rgb, RgbImage};
    use ndarray::{Array2, Array3};

    #[test]
    fn test_write_rgb_reads_back_as_3d() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.npy");

        let mut img = RgbImage::new(64, 64);
        img.put_pixel(5, 7, Rgb([1, 2, 3]));
        let array = ImageArray::from_image(DynamicImage::ImageRgb8(img)).unwrap();
        write_array(&path, &array).unwrap();

        let loaded: Array3<u8> = ndarray_npy::read_npy(&path).unwrap();
        assert_eq!(loaded.shape(), &[64, 64, 3]);
        assert_eq!(loaded[[7, 5, 2]], 3);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.npy");
        std::fs::write(&path, b"stale contents").unwrap();

        let img = image::ImageBuffer::from_pixel(4, 2, Luma([9u16]));
        let array = ImageArray::from_image(DynamicImage::ImageLuma16(img)).unwrap();
        write_array(&path, &array).unwrap();

        let loaded: Array2<u16> = ndarray_npy::read_npy(&path).unwrap();
        assert_eq!(loaded.shape(), &[2, 4]);
        assert!(loaded.iter().all(|&v| v == 9));
    }

    #[test]
    fn test_file_starts_with_npy_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("magic.npy");
        let array = ImageArray::from_image(DynamicImage::new_luma8(2, 2)).unwrap();
        write_array(&path, &array).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..6], b"\x93NUMPY");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.npy");
        let array = ImageArray::from_image(DynamicImage::new_luma8(2, 2)).unwrap();
        assert!(write_array(&path, &array).is_err());
    }
}
