//! Image operations — pure Rust, everything in memory.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (PNG/JPEG/BMP/TIFF) | `image::ImageReader` with format sniffing |
//! | **Grayscale** | BT.601 weighted sum (0.299 R + 0.587 G + 0.114 B) |
//! | **Edge detection** | custom 3×3 Sobel pair, normalized magnitude |
//! | **Brightness** | per-channel scale + clamp |
//! | **Encode** (PNG/JPEG) | `image` encoders into an in-memory buffer |
//!
//! The module is split into:
//! - **decode**: uploaded bytes → [`SourceImage`] + display metadata
//! - **transform**: [`ProcessingMode`] dispatch over the four policies
//! - **edges** / **quantize**: the Sobel filter and the float→u8 rule
//! - **stats**: mean/std intensity over the luma reduction
//! - **export**: PNG/JPEG byte buffers with deterministic filenames

pub mod decode;
pub mod edges;
pub mod export;
pub mod quantize;
pub mod stats;
pub mod transform;

pub use decode::{DecodeError, SourceImage};
pub use export::{download_filename, encode, ExportError, ExportFormat};
pub use stats::IntensityStats;
pub use transform::{apply, BrightnessFactor, ProcessedImage, ProcessingMode, TransformError};
