mod app;

use anyhow::{anyhow, Result};
use app::OverlayApp;
use clap::Parser;
use eframe::NativeOptions;
use std::path::PathBuf;
use video_overlay::OverlayConfig;

/// Media player with an auto-hiding control overlay
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Media file to open
    media: Option<PathBuf>,

    /// JSON overlay config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with a generated clip of this many seconds instead of a file
    #[arg(long, value_name = "SECONDS")]
    demo: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("video_overlay=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => OverlayConfig::load(path)?,
        None => OverlayConfig::default(),
    };

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Video Overlay",
        options,
        Box::new(move |cc| Ok(Box::new(OverlayApp::new(cc, config, cli.media, cli.demo)))),
    )
    .map_err(|e| anyhow!("{}", e))
}
