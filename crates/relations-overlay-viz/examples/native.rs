//! Native desktop runner for relations-overlay-viz development.
//!
//! Run with: cargo run --example native --features native
//! With a config and document: cargo run --example native --features native -- --config overlay.toml --document doc.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::{run_native, NativeOptions};
use relations_overlay_core::OverlayConfig;
use relations_overlay_viz::{AnnotatedDocument, RelationsApp, SettingsStyle};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "native", about = "Relations overlay - native development runner")]
struct Args {
    /// TOML file with overlay settings.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// JSON file with the annotated document to display.
    #[arg(long, short)]
    document: Option<PathBuf>,

    /// Start with relation mode switched on.
    #[arg(long)]
    relations: bool,
}

fn load_config(path: &PathBuf) -> Result<OverlayConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    OverlayConfig::from_toml_str(&source).with_context(|| format!("parsing {}", path.display()))
}

fn load_document(path: &PathBuf) -> Result<AnnotatedDocument> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("relations_overlay_viz=debug,relations_overlay_core=debug")
            }))
            .init();
    }

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path).unwrap_or_else(|err| {
            warn!(error = %err, "Invalid overlay config, using defaults");
            OverlayConfig::default()
        }),
        None => OverlayConfig::default(),
    };
    let document = args.document.as_ref().map(load_document).transpose()?;

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_title("Relations Overlay - Development"),
        ..Default::default()
    };

    run_native(
        "Relations Overlay",
        options,
        Box::new(move |cc| {
            let mut app = RelationsApp::with_settings(cc, config, SettingsStyle::default());
            if let Some(document) = document {
                app.set_document(document);
            }
            if args.relations {
                app.enable_relation_mode();
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe failed: {err}"))
}
