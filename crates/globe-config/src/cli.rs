//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use globe_geo::GeoConvention;
use globe_mesh::MidpointMode;

use crate::Config;

/// Build a displaced icosphere from an elevation raster and export it as OBJ.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "globe", version)]
pub struct CliArgs {
    /// Subdivision passes over the icosahedron.
    #[arg(short, long)]
    pub subdivisions: Option<u32>,

    /// Share edge midpoints between faces (shared) or not (duplicated).
    #[arg(long)]
    pub midpoints: Option<MidpointMode>,

    /// Elevation raster (TIFF or PNG).
    #[arg(short, long)]
    pub raster: Option<PathBuf>,

    /// Elevation units per unit of radius.
    #[arg(long)]
    pub divisor: Option<f64>,

    /// Keep vertices on or above the base sphere.
    #[arg(long)]
    pub clamp: Option<bool>,

    /// Longitude/latitude convention (z-up, z-up-west-positive, y-up).
    #[arg(long)]
    pub convention: Option<GeoConvention>,

    /// Output OBJ path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write per-vertex colors.
    #[arg(long)]
    pub vertex_colors: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(depth) = args.subdivisions {
            self.mesh.subdivisions = depth;
        }
        if let Some(mode) = args.midpoints {
            self.mesh.midpoints = mode;
        }
        if let Some(ref path) = args.raster {
            self.elevation.raster_path = Some(path.clone());
        }
        if let Some(divisor) = args.divisor {
            self.elevation.divisor = divisor;
        }
        if let Some(clamp) = args.clamp {
            self.elevation.clamp_min_radius = clamp;
        }
        if let Some(convention) = args.convention {
            self.elevation.convention = convention;
        }
        if let Some(ref path) = args.output {
            self.export.output_path = path.clone();
        }
        if let Some(colors) = args.vertex_colors {
            self.export.vertex_colors = colors;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
