// Render the built-in demo scene to an image file.
// Run with: cargo run --release -- <output.png> [settings.json]

mod progress;
mod scene;
mod settings;

use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use lumen_renderer::render;

use crate::progress::LogProgress;
use crate::settings::Settings;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <output.png> [settings.json]", args[0]);
        std::process::exit(1);
    }

    let output = &args[1];
    let settings = match args.get(2) {
        Some(path) => {
            log::info!("Loading settings from {}", path);
            Settings::load(path)?
        }
        None => Settings::default(),
    };

    let config = &settings.render;
    let camera = settings
        .camera
        .build(config.width, config.height)
        .context("Invalid camera")?;
    let scene = scene::build_scene().context("Failed to build demo scene")?;

    let start = Instant::now();
    let image = render(&camera, &scene, config, &LogProgress::new())?;
    log::info!("Rendered in {:.2}s", start.elapsed().as_secs_f64());

    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output))?;
    log::info!("Saved {}", output);

    Ok(())
}
