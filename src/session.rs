//! Per-interaction session state and the pipeline that reruns over it.
//!
//! The UI is a pure render of a [`Session`]: every control change calls
//! back into one of the mutators here, each of which reruns the whole
//! dispatch + statistics pass from scratch. Nothing is cached across
//! interactions and nothing survives the process.
//!
//! All three failure sources — decode, transform, export — collapse into
//! one outward channel: the failure's description is recorded on the
//! session next to a fixed recovery hint, previous state stays usable,
//! and the next upload or control change starts a fresh run.

use std::path::Path;
use thiserror::Error;

use crate::imaging::{
    self, BrightnessFactor, DecodeError, ExportError, ExportFormat, IntensityStats,
    ProcessedImage, ProcessingMode, SourceImage, TransformError,
};

/// Shown under every reported failure.
pub const RECOVERY_HINT: &str = "Please try uploading a different image or check the file format.";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("error processing image: {0}")]
    Decode(#[from] DecodeError),
    #[error("error processing image: {0}")]
    Transform(#[from] TransformError),
    #[error("error processing image: {0}")]
    Export(#[from] ExportError),
    #[error("no processed image to export")]
    NothingToExport,
}

/// A decoded upload together with its display statistics.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub name: String,
    pub image: SourceImage,
    pub stats: IntensityStats,
}

/// The current dispatcher output together with its display statistics.
#[derive(Debug, Clone)]
pub struct ProcessedOutput {
    pub image: ProcessedImage,
    pub stats: IntensityStats,
}

/// An encoded download payload.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Everything one interaction renders from. See the module docs.
#[derive(Debug, Default)]
pub struct Session {
    source: Option<LoadedSource>,
    mode: ProcessingMode,
    factor: BrightnessFactor,
    processed: Option<ProcessedOutput>,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&LoadedSource> {
        self.source.as_ref()
    }

    pub fn processed(&self) -> Option<&ProcessedOutput> {
        self.processed.as_ref()
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    pub fn factor(&self) -> BrightnessFactor {
        self.factor
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Processed-side statistics are shown for every mode except Original.
    pub fn show_processed_stats(&self) -> bool {
        self.mode != ProcessingMode::Original && self.processed.is_some()
    }

    /// Downloads are offered for every mode except Original.
    pub fn offer_downloads(&self) -> bool {
        self.mode != ProcessingMode::Original && self.processed.is_some()
    }

    /// Ingest a new upload. On failure the previous image (if any) stays
    /// loaded and usable; the error is recorded for display.
    pub fn load(&mut self, name: &str, bytes: &[u8]) {
        match imaging::decode::decode(bytes) {
            Ok(image) => self.install(name.to_string(), image),
            Err(e) => self.record_error(SessionError::from(e)),
        }
    }

    /// Ingest an image from disk (the CLI preload path).
    pub fn load_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match imaging::decode::decode_file(path) {
            Ok(image) => self.install(name, image),
            Err(e) => self.record_error(SessionError::from(e)),
        }
    }

    fn install(&mut self, name: String, image: SourceImage) {
        log::info!(
            "loaded {name}: {}x{} {} ({} KB)",
            image.width(),
            image.height(),
            image.format_label(),
            image.size_kb()
        );
        let stats = IntensityStats::of(image.image());
        self.source = Some(LoadedSource { name, image, stats });
        self.error = None;
        self.refresh();
    }

    pub fn set_mode(&mut self, mode: ProcessingMode) {
        self.mode = mode;
        self.refresh();
    }

    pub fn set_factor(&mut self, factor: BrightnessFactor) {
        self.factor = factor;
        self.refresh();
    }

    /// Rerun dispatch and statistics top to bottom for the current
    /// controls. Transform failures land in the error channel; the
    /// session stays interactive.
    pub fn refresh(&mut self) {
        let Some(source) = &self.source else {
            self.processed = None;
            return;
        };

        match imaging::apply(self.mode, &source.image, self.factor) {
            Ok(image) => {
                // Edge detection reports statistics on the filter's raw
                // [0,1] plane; every other mode on its display image.
                let stats = match image.edge_plane() {
                    Some(plane) => IntensityStats::of_plane(plane),
                    None => IntensityStats::of(image.image()),
                };
                self.processed = Some(ProcessedOutput { image, stats });
                self.error = None;
            }
            Err(e) => {
                self.processed = None;
                self.record_error(SessionError::from(e));
            }
        }
    }

    /// Encode the current processed image for download.
    pub fn export(&self, format: ExportFormat) -> Result<ExportPayload, SessionError> {
        let processed = self.processed.as_ref().ok_or(SessionError::NothingToExport)?;
        let bytes = imaging::encode(processed.image.image(), format)?;
        Ok(ExportPayload {
            filename: imaging::download_filename(processed.image.mode(), format),
            mime: format.mime(),
            bytes,
        })
    }

    /// Record a failure on the single user-visible error channel.
    pub fn record_error(&mut self, error: SessionError) {
        log::warn!("{error}");
        self.error = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb(rgb));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn fresh_session_is_empty_with_original_mode() {
        let session = Session::new();
        assert!(session.source().is_none());
        assert!(session.processed().is_none());
        assert_eq!(session.mode(), ProcessingMode::Original);
        assert_eq!(session.factor().value(), 1.0);
        assert!(session.error().is_none());
    }

    #[test]
    fn load_computes_processed_result_and_stats() {
        let mut session = Session::new();
        session.load("gray.png", &png_bytes(4, 4, [128, 128, 128]));

        let source = session.source().unwrap();
        assert_eq!(source.name, "gray.png");
        assert!((source.stats.mean - 128.0).abs() <= 1.0);

        // Original mode still produces a processed pair (identity).
        let processed = session.processed().unwrap();
        assert_eq!(processed.image.mode(), ProcessingMode::Original);
        assert!(!session.show_processed_stats());
        assert!(!session.offer_downloads());
    }

    #[test]
    fn non_image_bytes_with_png_name_report_recoverable_error() {
        let mut session = Session::new();
        session.load("fake.png", b"definitely not pixels");
        assert!(session.error().is_some());
        assert!(session.source().is_none());

        // The session remains usable: a valid upload fully recovers.
        session.load("real.png", &png_bytes(2, 2, [1, 2, 3]));
        assert!(session.error().is_none());
        assert!(session.source().is_some());
        assert!(session.processed().is_some());
    }

    #[test]
    fn failed_upload_keeps_previous_image_loaded() {
        let mut session = Session::new();
        session.load("good.png", &png_bytes(3, 3, [9, 9, 9]));
        session.load("bad.png", b"garbage");

        assert!(session.error().is_some());
        assert_eq!(session.source().unwrap().name, "good.png");
        assert!(session.processed().is_some());
    }

    #[test]
    fn mode_change_recomputes_from_scratch() {
        let mut session = Session::new();
        session.load("img.png", &png_bytes(4, 4, [200, 100, 50]));

        session.set_mode(ProcessingMode::Grayscale);
        let processed = session.processed().unwrap();
        assert_eq!(processed.image.mode(), ProcessingMode::Grayscale);
        assert_eq!(processed.image.image().color().channel_count(), 1);
        assert!(session.show_processed_stats());
        assert!(session.offer_downloads());
    }

    #[test]
    fn factor_change_recomputes_brightness() {
        let mut session = Session::new();
        session.load("img.png", &png_bytes(2, 2, [100, 100, 100]));
        session.set_mode(ProcessingMode::BrightnessAdjustment);
        session.set_factor(BrightnessFactor::new(2.0));

        let rgb = session.processed().unwrap().image.image().as_rgb8().unwrap();
        assert!(rgb.pixels().all(|p| p.0 == [200, 200, 200]));

        session.set_factor(BrightnessFactor::new(0.5));
        let rgb = session.processed().unwrap().image.image().as_rgb8().unwrap();
        assert!(rgb.pixels().all(|p| p.0 == [50, 50, 50]));
    }

    #[test]
    fn edge_stats_use_the_raw_filter_scale() {
        // 2x2 checkerboard: the Sobel magnitude is exactly 0.5 at every
        // pixel, so the reported mean is 0.5 (not the 128 the rescaled
        // display image would give) and the contrast is 0.
        let checker = image::GrayImage::from_fn(2, 2, |x, y| {
            image::Luma([if (x + y) % 2 == 0 { 0 } else { 255 }])
        });
        let mut buf = Cursor::new(Vec::new());
        checker.write_to(&mut buf, ImageFormat::Png).unwrap();

        let mut session = Session::new();
        session.load("checker.png", &buf.into_inner());
        session.set_mode(ProcessingMode::EdgeDetection);

        let stats = session.processed().unwrap().stats;
        assert!((stats.mean - 0.5).abs() < 1e-6);
        assert!(stats.std < 1e-6);
        assert_eq!(stats.mean_display(), "0.5");
    }

    #[test]
    fn identity_pass_stats_match_source_stats() {
        let mut session = Session::new();
        session.load("img.png", &png_bytes(8, 8, [37, 101, 222]));
        let source_stats = session.source().unwrap().stats;
        let processed_stats = session.processed().unwrap().stats;
        assert_eq!(source_stats, processed_stats);
    }

    #[test]
    fn export_produces_named_payloads() {
        let mut session = Session::new();
        session.load("img.png", &png_bytes(4, 4, [10, 20, 30]));
        session.set_mode(ProcessingMode::EdgeDetection);

        let png = session.export(ExportFormat::Png).unwrap();
        assert_eq!(png.filename, "processed_edge_detection.png");
        assert_eq!(png.mime, "image/png");
        assert!(!png.bytes.is_empty());

        let jpeg = session.export(ExportFormat::Jpeg).unwrap();
        assert_eq!(jpeg.filename, "processed_edge_detection.jpg");
        assert_eq!(jpeg.mime, "image/jpeg");

        // The JPEG payload decodes back without an alpha channel.
        let back = image::load_from_memory(&jpeg.bytes).unwrap();
        assert!(!back.color().has_alpha());
    }

    #[test]
    fn export_with_nothing_loaded_errors() {
        let session = Session::new();
        assert!(matches!(
            session.export(ExportFormat::Png),
            Err(SessionError::NothingToExport)
        ));
    }

    #[test]
    fn load_path_roundtrip_and_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("img.png");
        std::fs::write(&path, png_bytes(5, 7, [1, 1, 1])).unwrap();

        let mut session = Session::new();
        session.load_path(&path);
        assert_eq!(session.source().unwrap().image.width(), 5);

        session.load_path(&tmp.path().join("missing.png"));
        assert!(session.error().is_some());
        // Previous image survives the failed load.
        assert_eq!(session.source().unwrap().image.width(), 5);
    }

    #[test]
    fn rgba_source_grayscale_jpeg_download_has_no_alpha() {
        let rgba =
            image::RgbaImage::from_pixel(3, 3, image::Rgba([50, 60, 70, 80]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();

        let mut session = Session::new();
        session.load("rgba.png", &buf.into_inner());
        session.set_mode(ProcessingMode::Grayscale);

        let jpeg = session.export(ExportFormat::Jpeg).unwrap();
        let back = image::load_from_memory(&jpeg.bytes).unwrap();
        assert!(!back.color().has_alpha());
    }
}
