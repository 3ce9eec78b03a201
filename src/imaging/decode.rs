//! Input acquisition: raw uploaded bytes → decoded [`SourceImage`].
//!
//! Only formats with decoders compiled in (and accepted by the upload
//! dialog) are allowed through: PNG, JPEG, BMP, TIFF. Everything else —
//! including formats the `image` crate could technically decode — is
//! rejected up front so the allow-list here and the dialog filter in the
//! app stay in agreement.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unrecognized or unsupported image format")]
    UnsupportedFormat,
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Formats the tool accepts, with the extensions the upload dialog offers.
const ACCEPTED_FORMATS: &[(ImageFormat, &[&str])] = &[
    (ImageFormat::Png, &["png"]),
    (ImageFormat::Jpeg, &["jpg", "jpeg"]),
    (ImageFormat::Bmp, &["bmp"]),
    (ImageFormat::Tiff, &["tiff", "tif"]),
];

/// File extensions accepted by the upload dialog, in display order.
pub fn accepted_extensions() -> Vec<&'static str> {
    ACCEPTED_FORMATS
        .iter()
        .flat_map(|(_, exts)| exts.iter().copied())
        .collect()
}

/// How many channels a decoded image carries per pixel.
///
/// The displayed "color mode" collapses this to two cases: one luma
/// channel means grayscale, anything with color channels means color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Grayscale,
    GrayscaleAlpha,
    Color,
    ColorAlpha,
}

impl ColorMode {
    fn of(image: &DynamicImage) -> Self {
        match image.color().channel_count() {
            1 => ColorMode::Grayscale,
            2 => ColorMode::GrayscaleAlpha,
            3 => ColorMode::Color,
            _ => ColorMode::ColorAlpha,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorMode::Grayscale | ColorMode::GrayscaleAlpha => "Grayscale",
            ColorMode::Color | ColorMode::ColorAlpha => "Color",
        }
    }
}

/// A decoded upload: the image plus the metadata the information panel
/// shows. Immutable — a new upload replaces the whole value.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    format: ImageFormat,
    byte_len: usize,
}

impl SourceImage {
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::of(&self.image)
    }

    /// Channel count as shown in the information panel (alpha included).
    pub fn channels(&self) -> u8 {
        self.image.color().channel_count()
    }

    /// Source format tag, e.g. "PNG".
    pub fn format_label(&self) -> String {
        self.format.extensions_str()[0].to_uppercase()
    }

    /// Upload size in kilobytes, one decimal place.
    pub fn size_kb(&self) -> String {
        format!("{:.1}", self.byte_len as f64 / 1024.0)
    }
}

/// Decode an uploaded byte buffer into a [`SourceImage`].
///
/// The format is sniffed from the bytes themselves, not the filename, so
/// a text file renamed to `.png` still fails cleanly.
pub fn decode(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(DecodeError::UnsupportedFormat)?;
    if !ACCEPTED_FORMATS.iter().any(|(fmt, _)| *fmt == format) {
        return Err(DecodeError::UnsupportedFormat);
    }
    let image = reader.decode()?;
    Ok(SourceImage {
        image,
        format,
        byte_len: bytes.len(),
    })
}

/// Read a file from disk and decode it. Used by the CLI preload path.
pub fn decode_file(path: &Path) -> Result<SourceImage, DecodeError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}
