//! Brightness and contrast summary statistics.
//!
//! Both panels report the same two numbers: mean intensity and the
//! population standard deviation, computed over the luma-reduced form of
//! the image (color inputs are reduced with the same weighting as the
//! grayscale policy). Values are stored exact; rounding to one decimal
//! place happens at display time.

use image::DynamicImage;

use super::quantize::GrayF32;
use super::transform::grayscale;

/// Mean brightness and contrast (standard deviation) of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityStats {
    pub mean: f64,
    pub std: f64,
}

impl IntensityStats {
    /// Compute over the single-channel reduction of `image`.
    pub fn of(image: &DynamicImage) -> Self {
        let gray = grayscale(image);
        let samples: Vec<f64> = gray.pixels().map(|p| p.0[0] as f64).collect();
        Self::from_samples(&samples)
    }

    /// Compute over a raw float plane, on the plane's own scale.
    ///
    /// The edge filter's output stays in [0,1]; its statistics are read
    /// from this unrescaled plane, not from the display image.
    pub fn of_plane(plane: &GrayF32) -> Self {
        let samples: Vec<f64> = plane.pixels().map(|p| p.0[0] as f64).collect();
        Self::from_samples(&samples)
    }

    fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len() as f64;
        if n == 0.0 {
            return Self { mean: 0.0, std: 0.0 };
        }

        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;

        Self {
            mean,
            std: var.sqrt(),
        }
    }

    /// One-decimal display form, e.g. `128.0`.
    pub fn mean_display(&self) -> String {
        format!("{:.1}", self.mean)
    }

    pub fn std_display(&self) -> String {
        format!("{:.1}", self.std)
    }
}
