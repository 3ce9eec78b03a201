//! In-memory encoding of processed results for download.
//!
//! Two output formats: PNG (lossless, image written unchanged) and JPEG
//! (lossy; any alpha channel is flattened first since JPEG cannot carry
//! one). Filenames are deterministic per mode so repeated downloads of
//! the same transform land on the same name.

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

use super::transform::ProcessingMode;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Offered download encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    /// MIME type the payload would be served under.
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Deterministic download name: `processed_<mode slug>.<ext>`.
pub fn download_filename(mode: ProcessingMode, format: ExportFormat) -> String {
    format!("processed_{}.{}", mode.slug(), format.extension())
}

/// Encode `image` into a byte buffer in the requested format.
pub fn encode(image: &DynamicImage, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let image = match format {
        ExportFormat::Png => image.clone(),
        ExportFormat::Jpeg => flatten_alpha(image),
    };

    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format.image_format())?;
    Ok(buf.into_inner())
}

/// Discard the alpha channel if present, keeping the base color mode.
fn flatten_alpha(image: &DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => {
            DynamicImage::ImageLuma8(image.to_luma8())
        }
        other if other.color().has_alpha() => DynamicImage::ImageRgb8(other.to_rgb8()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    fn decode(bytes: &[u8]) -> DynamicImage {
        image::load_from_memory(bytes).unwrap()
    }

    #[test]
    fn png_roundtrip_preserves_dimensions_and_pixels() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(9, 5, |x, y| {
            image::Rgb([(x * 20) as u8, (y * 40) as u8, 3])
        }));
        let bytes = encode(&img, ExportFormat::Png).unwrap();
        let back = decode(&bytes);
        assert_eq!((back.width(), back.height()), (9, 5));
        assert_eq!(back.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn jpeg_export_of_rgba_has_no_alpha_channel() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            6,
            6,
            image::Rgba([120, 50, 200, 99]),
        ));
        let bytes = encode(&img, ExportFormat::Jpeg).unwrap();
        let back = decode(&bytes);
        assert!(!back.color().has_alpha());
        assert_eq!((back.width(), back.height()), (6, 6));
    }

    #[test]
    fn jpeg_export_of_luma_stays_single_channel() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, image::Luma([90])));
        let bytes = encode(&img, ExportFormat::Jpeg).unwrap();
        let back = decode(&bytes);
        assert_eq!(back.color().channel_count(), 1);
    }

    #[test]
    fn png_export_keeps_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([10, 20, 30, 128]),
        ));
        let bytes = encode(&img, ExportFormat::Png).unwrap();
        assert!(decode(&bytes).color().has_alpha());
    }

    #[test]
    fn filenames_are_deterministic() {
        assert_eq!(
            download_filename(ProcessingMode::Grayscale, ExportFormat::Png),
            "processed_grayscale.png"
        );
        assert_eq!(
            download_filename(ProcessingMode::EdgeDetection, ExportFormat::Jpeg),
            "processed_edge_detection.jpg"
        );
        assert_eq!(
            download_filename(ProcessingMode::BrightnessAdjustment, ExportFormat::Jpeg),
            "processed_brightness_adjustment.jpg"
        );
    }

    #[test]
    fn mime_types_match_format() {
        assert_eq!(ExportFormat::Png.mime(), "image/png");
        assert_eq!(ExportFormat::Jpeg.mime(), "image/jpeg");
    }
}
