//! The `globe` binary: build a displaced icosphere and write it as OBJ.

use std::path::PathBuf;

use clap::Parser;
use globe_config::{CliArgs, default_config_dir};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // Load or create config, then apply CLI overrides
    let config = match globe_app::load_config(&config_dir, &args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let log_dir = config_dir.join("logs");
    globe_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match globe_app::run(&config) {
        Ok(globe) => tracing::info!(
            path = %config.export.output_path.display(),
            vertices = globe.mesh.vertex_count(),
            faces = globe.mesh.face_count(),
            "Globe written"
        ),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}
