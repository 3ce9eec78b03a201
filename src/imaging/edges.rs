//! Sobel gradient-magnitude edge filter.
//!
//! Convolves the normalized [0,1] luma plane with the 3×3 Sobel kernel
//! pair (border clamping), then takes the Euclidean magnitude per pixel.
//! Kernels carry a 1/4 weight and the magnitude a 1/√2 divisor so the
//! output stays in [0,1] for [0,1] input — the same normalization the
//! classic reference filter uses, which is what lets the quantize rule
//! treat the result as a normalized plane.

use image::GrayImage;

use super::quantize::GrayF32;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Kernel weight sum on one side; divides each axis response into [-1,1].
const KERNEL_NORM: f32 = 4.0;

/// Gradient magnitude of a grayscale image, as a normalized float plane.
///
/// Output dimensions equal input dimensions; values are in [0,1].
pub fn sobel_magnitude(gray: &GrayImage) -> GrayF32 {
    let (w, h) = gray.dimensions();
    let mut out = GrayF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let sample = |x: i64, y: i64| -> f32 {
        let cx = x.clamp(0, w as i64 - 1) as u32;
        let cy = y.clamp(0, h as i64 - 1) as u32;
        gray.get_pixel(cx, cy).0[0] as f32 / 255.0
    };

    for y in 0..h {
        for x in 0..w {
            let mut gx = 0.0;
            let mut gy = 0.0;
            for (ky, (kx_row, ky_row)) in SOBEL_KERNEL_X.iter().zip(&SOBEL_KERNEL_Y).enumerate() {
                for kx in 0..3 {
                    let v = sample(x as i64 + kx as i64 - 1, y as i64 + ky as i64 - 1);
                    gx += v * kx_row[kx];
                    gy += v * ky_row[kx];
                }
            }
            gx /= KERNEL_NORM;
            gy /= KERNEL_NORM;
            let mag = (gx * gx + gy * gy).sqrt() / std::f32::consts::SQRT_2;
            out.put_pixel(x, y, image::Luma([mag]));
        }
    }

    out
}
