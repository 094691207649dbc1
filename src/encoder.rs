//! Image preparation for the vision endpoint.
//!
//! Every image is shrunk to fit an 800×800 box, flattened to RGB8 and
//! re-encoded as baseline JPEG before being base64'd into the request body.
//! Small images pass through at their original size.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::path::Path;

use crate::error::EncodingError;

/// Longest edge allowed in the encoded payload.
pub const MAX_DIMENSION: u32 = 800;

/// JPEG quality used for the re-encode.
pub const JPEG_QUALITY: u8 = 75;

/// Load, downscale, flatten and base64-encode the image at `path`.
///
/// # Errors
///
/// Returns an [`EncodingError`] carrying the underlying cause if the file
/// cannot be read, is not a decodable image, or fails to re-encode.
pub fn encode_image(path: &Path) -> Result<String, EncodingError> {
    let wrap = |source| EncodingError {
        path: path.to_path_buf(),
        source,
    };

    let mut img = image::open(path).map_err(wrap)?;

    if img.width().max(img.height()) > MAX_DIMENSION {
        let (w, h) = fit_within(img.width(), img.height(), MAX_DIMENSION);
        img = img.resize_exact(w, h, FilterType::Lanczos3);
    }

    let rgb = img.to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(wrap)?;

    Ok(BASE64.encode(&bytes))
}

/// Target size for fitting `width`×`height` inside a `max`×`max` box.
///
/// Aspect ratio is kept (rounded to the nearest pixel, never below 1).
/// Dimensions already inside the box are returned unchanged.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let scale = max as f64 / width.max(height) as f64;
    let scaled = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn decode(b64: &str) -> image::DynamicImage {
        let bytes = BASE64.decode(b64).unwrap();
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Jpeg
        );
        image::load_from_memory(&bytes).unwrap()
    }

    #[test]
    fn fit_within_keeps_small_sizes() {
        assert_eq!(fit_within(300, 200, 800), (300, 200));
        assert_eq!(fit_within(800, 800, 800), (800, 800));
    }

    #[test]
    fn fit_within_scales_longest_edge() {
        assert_eq!(fit_within(1600, 1000, 800), (800, 500));
        assert_eq!(fit_within(1000, 3000, 800), (267, 800));
        assert_eq!(fit_within(5000, 2, 800), (800, 1));
    }

    #[test]
    fn small_image_is_not_upscaled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.png");
        RgbImage::from_pixel(300, 200, Rgb([10, 200, 30]))
            .save(&path)
            .unwrap();

        let img = decode(&encode_image(&path).unwrap());
        assert_eq!(img.dimensions(), (300, 200));
    }

    #[test]
    fn large_image_is_downscaled_with_aspect_ratio() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.bmp");
        RgbImage::from_pixel(1700, 900, Rgb([0, 0, 255]))
            .save(&path)
            .unwrap();

        let img = decode(&encode_image(&path).unwrap());
        let (w, h) = img.dimensions();
        assert_eq!(w, 800);
        let expected_h = 900.0 * 800.0 / 1700.0;
        assert!((h as f64 - expected_h).abs() <= 1.0, "height {h}");
    }

    #[test]
    fn alpha_is_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 128]))
            .save(&path)
            .unwrap();

        let img = decode(&encode_image(&path).unwrap());
        assert_eq!(img.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn corrupt_image_is_an_encoding_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = encode_image(&path).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().contains("broken.jpg"));
    }

    #[test]
    fn missing_file_is_an_encoding_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.png");
        let err = encode_image(&path).unwrap_err();
        assert!(matches!(err.source, image::ImageError::IoError(_)));
    }
}
