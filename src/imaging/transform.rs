//! The four processing policies and the dispatcher that selects one.
//!
//! Every interaction re-runs [`apply`] from scratch on the decoded source —
//! results are never cached across interactions. The policies:
//!
//! | Mode | Effect | Output channels |
//! |---|---|---|
//! | Original | identity | as source |
//! | Grayscale | luma reduction (no-op for gray sources) | 1 |
//! | Edge Detection | luma reduction → Sobel magnitude → quantize | 1 |
//! | Brightness Adjustment | per-channel scale + clamp, alpha untouched | as source |

use image::{DynamicImage, GrayImage};
use thiserror::Error;

use super::decode::SourceImage;
use super::edges::sobel_magnitude;
use super::quantize::{gray_from_f32, GrayF32};

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("cannot process an empty {0}×{1} image")]
    EmptyImage(u32, u32),
}

/// The processing-mode selector's fixed set, default [`Original`](Self::Original).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    #[default]
    Original,
    Grayscale,
    EdgeDetection,
    BrightnessAdjustment,
}

impl ProcessingMode {
    /// Selector order, matching the UI.
    pub const ALL: [ProcessingMode; 4] = [
        ProcessingMode::Original,
        ProcessingMode::Grayscale,
        ProcessingMode::EdgeDetection,
        ProcessingMode::BrightnessAdjustment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProcessingMode::Original => "Original",
            ProcessingMode::Grayscale => "Grayscale",
            ProcessingMode::EdgeDetection => "Edge Detection",
            ProcessingMode::BrightnessAdjustment => "Brightness Adjustment",
        }
    }

    /// Lowercased label with spaces as underscores; used in download names.
    pub fn slug(self) -> String {
        self.label().to_lowercase().replace(' ', "_")
    }
}

/// Brightness factor in [0.1, 3.0], clamped on construction. 1.0 is a no-op,
/// below darkens, above brightens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessFactor(f32);

impl BrightnessFactor {
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 3.0;
    pub const STEP: f32 = 0.1;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for BrightnessFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Output of one dispatcher run: the processed image and the mode that
/// produced it. Owned by the current interaction only.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    mode: ProcessingMode,
    image: DynamicImage,
    edge_plane: Option<GrayF32>,
}

impl ProcessedImage {
    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// The edge filter's raw [0,1] output, present for EdgeDetection only.
    ///
    /// Statistics read this plane rather than the rescaled display image,
    /// so edge-mode brightness/contrast stays on the filter's own scale.
    pub fn edge_plane(&self) -> Option<&GrayF32> {
        self.edge_plane.as_ref()
    }
}

/// Run the selected policy against the decoded source.
pub fn apply(
    mode: ProcessingMode,
    source: &SourceImage,
    factor: BrightnessFactor,
) -> Result<ProcessedImage, TransformError> {
    let input = source.image();
    if input.width() == 0 || input.height() == 0 {
        return Err(TransformError::EmptyImage(input.width(), input.height()));
    }

    let (image, edge_plane) = match mode {
        ProcessingMode::Original => (input.clone(), None),
        ProcessingMode::Grayscale => (DynamicImage::ImageLuma8(grayscale(input)), None),
        ProcessingMode::EdgeDetection => {
            // Luma-reduce, filter, then rescale for display; the raw plane
            // is kept because statistics are computed on it unrescaled.
            let plane = sobel_magnitude(&grayscale(input));
            let display = DynamicImage::ImageLuma8(gray_from_f32(&plane));
            (display, Some(plane))
        }
        ProcessingMode::BrightnessAdjustment => (brighten(input, factor), None),
    };

    Ok(ProcessedImage {
        mode,
        image,
        edge_plane,
    })
}

/// Luma reduction with the BT.601 weights (0.299 R + 0.587 G + 0.114 B).
/// Single-channel input passes through unchanged, so the operation is
/// idempotent; alpha is dropped.
pub fn grayscale(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        other => {
            let rgb = other.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
                image::Luma([luma.round().min(255.0) as u8])
            })
        }
    }
}

/// Multiplicative brightness on the original image in its own color mode.
/// Alpha is left untouched; color and luma channels are scaled and clamped.
fn brighten(image: &DynamicImage, factor: BrightnessFactor) -> DynamicImage {
    let f = factor.value();
    let scale = |v: u8| -> u8 { (v as f32 * f).round().clamp(0.0, 255.0) as u8 };

    match image {
        DynamicImage::ImageLuma8(gray) => {
            let mut out = gray.clone();
            for p in out.pixels_mut() {
                p.0[0] = scale(p.0[0]);
            }
            DynamicImage::ImageLuma8(out)
        }
        DynamicImage::ImageLumaA8(gray) => {
            let mut out = gray.clone();
            for p in out.pixels_mut() {
                p.0[0] = scale(p.0[0]);
            }
            DynamicImage::ImageLumaA8(out)
        }
        DynamicImage::ImageRgb8(rgb) => {
            let mut out = rgb.clone();
            for p in out.pixels_mut() {
                for c in &mut p.0 {
                    *c = scale(*c);
                }
            }
            DynamicImage::ImageRgb8(out)
        }
        DynamicImage::ImageRgba8(rgba) => {
            let mut out = rgba.clone();
            for p in out.pixels_mut() {
                for c in &mut p.0[..3] {
                    *c = scale(*c);
                }
            }
            DynamicImage::ImageRgba8(out)
        }
        // Deeper bit depths (16-bit PNG/TIFF) are flattened to 8-bit first;
        // the display and export paths are 8-bit throughout anyway.
        other if other.color().has_alpha() => {
            brighten(&DynamicImage::ImageRgba8(other.to_rgba8()), factor)
        }
        other => brighten(&DynamicImage::ImageRgb8(other.to_rgb8()), factor),
    }
}
