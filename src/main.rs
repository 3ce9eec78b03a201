use clap::Parser;
use pixeldeck::app::{PixeldeckApp, PAGE_TITLE};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pixeldeck")]
#[command(about = "Interactive dashboard for quick single-image transforms")]
#[command(long_about = "\
Interactive dashboard for quick single-image transforms

Opens a single-page window: upload an image (PNG, JPG, JPEG, BMP, TIFF),
pick a transform (grayscale, edge detection, brightness adjustment),
compare it side by side with the original, check brightness/contrast
statistics, and save the result as PNG or JPEG.

Optionally pass an image path to load it on launch.")]
#[command(version = version_string())]
struct Cli {
    /// Image to load on launch (same formats as the upload dialog)
    image: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(PAGE_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        PAGE_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(PixeldeckApp::new(cli.image)))),
    )
}
