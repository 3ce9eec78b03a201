//! The single-page UI: sidebar controls, side-by-side preview, statistics.
//!
//! Immediate mode keeps this honest to the interaction model: every frame
//! is a full render of the [`Session`], and every control change funnels
//! through a session mutator that reruns the pipeline synchronously. The
//! only state owned here is the pair of GPU texture handles, which are
//! plain display caches invalidated whenever the session recomputes.

use eframe::egui;
use std::path::PathBuf;

use crate::imaging::{BrightnessFactor, ExportError, ExportFormat, ProcessingMode};
use crate::session::{Session, SessionError, RECOVERY_HINT};

pub const PAGE_TITLE: &str = "Image Processing Dashboard";
const FOOTER: &str = "Built with pixeldeck";

pub struct PixeldeckApp {
    session: Session,
    original_texture: Option<egui::TextureHandle>,
    processed_texture: Option<egui::TextureHandle>,
}

impl PixeldeckApp {
    pub fn new(preload: Option<PathBuf>) -> Self {
        let mut session = Session::new();
        if let Some(path) = preload {
            session.load_path(&path);
        }
        Self {
            session,
            original_texture: None,
            processed_texture: None,
        }
    }

    fn invalidate_textures(&mut self) {
        self.original_texture = None;
        self.processed_texture = None;
    }

    fn upload_clicked(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &crate::imaging::decode::accepted_extensions())
            .pick_file()
        else {
            return;
        };
        self.session.load_path(&path);
        self.invalidate_textures();
    }

    fn download_clicked(&mut self, format: ExportFormat) {
        let payload = match self.session.export(format) {
            Ok(payload) => payload,
            Err(e) => {
                self.session.record_error(e);
                return;
            }
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&payload.filename)
            .add_filter(format.label(), &[format.extension()])
            .save_file()
        else {
            return;
        };
        if let Err(e) = std::fs::write(&path, &payload.bytes) {
            self.session
                .record_error(SessionError::Export(ExportError::Io(e)));
        } else {
            log::info!(
                "saved {} ({} bytes, {}) to {}",
                payload.filename,
                payload.bytes.len(),
                payload.mime,
                path.display()
            );
        }
    }

    fn sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Processing Controls");
        ui.separator();

        if ui.button("Upload Your Image").clicked() {
            self.upload_clicked();
        }
        ui.small("Supported formats: PNG, JPG, JPEG, BMP, TIFF");
        if let Some(source) = self.session.source() {
            ui.label(&source.name);
        }

        ui.add_space(12.0);
        ui.heading("Processing Options");

        let mut mode = self.session.mode();
        egui::ComboBox::from_label("Processing Type")
            .selected_text(mode.label())
            .show_ui(ui, |ui| {
                for candidate in ProcessingMode::ALL {
                    ui.selectable_value(&mut mode, candidate, candidate.label());
                }
            });
        if mode != self.session.mode() {
            self.session.set_mode(mode);
            self.processed_texture = None;
        }

        if self.session.mode() == ProcessingMode::BrightnessAdjustment {
            let mut factor = self.session.factor().value();
            let slider = egui::Slider::new(&mut factor, BrightnessFactor::MIN..=BrightnessFactor::MAX)
                .step_by(BrightnessFactor::STEP as f64)
                .text("Brightness Factor");
            if ui.add(slider).changed() {
                self.session.set_factor(BrightnessFactor::new(factor));
                self.processed_texture = None;
            }
            ui.small("1.0 = original, <1.0 = darker, >1.0 = brighter");
        }
    }

    fn error_banner(&self, ui: &mut egui::Ui) {
        if let Some(error) = self.session.error() {
            ui.colored_label(ui.visuals().error_fg_color, error);
            ui.label(RECOVERY_HINT);
            ui.separator();
        }
    }

    fn info_panel(&self, ui: &mut egui::Ui) {
        let Some(source) = self.session.source() else {
            return;
        };
        egui::CollapsingHeader::new("Image Information").show(ui, |ui| {
            let image = &source.image;
            ui.label(format!(
                "Dimensions: {} × {} pixels",
                image.width(),
                image.height()
            ));
            ui.label(format!("Format: {}", image.format_label()));
            ui.label(format!("Mode: {}", image.color_mode().label()));
            ui.label(format!("File Size: {} KB", image.size_kb()));
            ui.label(format!(
                "Channels: {} ({})",
                image.channels(),
                image.color_mode().label()
            ));
        });
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        ui.separator();
        ui.heading("Image Statistics");
        ui.columns(2, |columns| {
            if let Some(source) = self.session.source() {
                columns[0].strong("Original Image:");
                columns[0].label(format!("Mean Brightness: {}", source.stats.mean_display()));
                columns[0].label(format!("Contrast (Std): {}", source.stats.std_display()));
            }
            if self.session.show_processed_stats() {
                if let Some(processed) = self.session.processed() {
                    columns[1].strong("Processed Image:");
                    columns[1].label(format!(
                        "Mean Brightness: {}",
                        processed.stats.mean_display()
                    ));
                    columns[1].label(format!("Contrast (Std): {}", processed.stats.std_display()));
                }
            }
        });
    }

    fn show_fitted(ui: &mut egui::Ui, texture: &egui::TextureHandle) {
        let size = texture.size_vec2();
        let scale = (ui.available_width() / size.x).min(1.0);
        ui.image((texture.id(), size * scale));
    }

    fn ensure_textures(&mut self, ctx: &egui::Context) {
        if self.original_texture.is_none() {
            if let Some(source) = self.session.source() {
                self.original_texture =
                    Some(load_texture(ctx, "original", source.image.image()));
            }
        }
        if self.processed_texture.is_none() {
            if let Some(processed) = self.session.processed() {
                self.processed_texture =
                    Some(load_texture(ctx, "processed", processed.image.image()));
            }
        }
    }
}

/// Upload a DynamicImage as an egui texture (RGBA8 on the GPU).
fn load_texture(
    ctx: &egui::Context,
    name: &str,
    image: &image::DynamicImage,
) -> egui::TextureHandle {
    let rgba = image.to_rgba8();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width() as usize, rgba.height() as usize],
        rgba.as_raw(),
    );
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

impl eframe::App for PixeldeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_textures(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(PAGE_TITLE);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.small(FOOTER);
        });

        egui::SidePanel::left("controls")
            .default_width(260.0)
            .show(ctx, |ui| {
                self.sidebar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.error_banner(ui);

            if self.session.source().is_none() {
                ui.label("Please upload an image to get started!");
                return;
            }

            ui.columns(2, |columns| {
                columns[0].heading("Original Image");
                if let Some(texture) = &self.original_texture {
                    Self::show_fitted(&mut columns[0], texture);
                }

                columns[1].heading("Processed Image");
                if let Some(texture) = &self.processed_texture {
                    Self::show_fitted(&mut columns[1], texture);
                }
            });

            self.info_panel(ui);

            if self.session.offer_downloads() {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Download as PNG").clicked() {
                        self.download_clicked(ExportFormat::Png);
                    }
                    if ui.button("Download as JPEG").clicked() {
                        self.download_clicked(ExportFormat::Jpeg);
                    }
                });
            }

            self.statistics(ui);
        });
    }
}
