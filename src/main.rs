mod app;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pedigree::config::Config;
use pedigree::genealogy::GenealogyStore;

use crate::app::{GenealogyApp, LaunchOptions};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON data file (overrides the config file)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Family to open on start
    #[arg(long)]
    family_id: Option<String>,

    /// Config file location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pedigree=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Registers a user font as the first fallback so CJK names render.
fn install_font(ctx: &egui::Context, path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert("user_font".to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("user_font".to_owned());
    }
    ctx.set_fonts(fonts);
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)?;
    let data_path = match args.data {
        Some(path) => path,
        None => config.resolved_data_path()?,
    };
    info!(
        config = %config_path.display(),
        data = %data_path.display(),
        "starting pedigree"
    );

    let store = GenealogyStore::new(data_path);
    let launch = LaunchOptions {
        family_id: args.family_id,
        default_family_name: config.default_family_name.clone(),
        initial_zoom: config.clamped_zoom(),
    };
    let font_path = config.font_path.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "pedigree",
        options,
        Box::new(move |cc| {
            if let Some(path) = &font_path
                && let Err(error) = install_font(&cc.egui_ctx, path)
            {
                warn!("{error:#}");
            }
            Ok(Box::new(GenealogyApp::new(cc, store, launch)))
        }),
    )
    .map_err(|error| anyhow::anyhow!("{error}"))
}
