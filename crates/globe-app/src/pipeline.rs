//! The generation pipeline.
//!
//! icosahedron → subdivide → displace → face normals → assemble → export.

use std::path::Path;

use glam::DVec3;
use globe_config::{CliArgs, Config, ConfigError};
use globe_export::{ExportError, ObjOptions, export_obj};
use globe_geo::{ElevationSampler, EquirectRaster, FlatElevation, RasterError};
use globe_mesh::{
    AssembledMesh, DisplacementReport, ElevationPalette, GeometryError, Mesh, assemble,
    compute_face_normals, displace_mesh, icosphere,
};

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("elevation source error: {0}")]
    Raster(#[from] RasterError),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// Everything one run produces.
#[derive(Clone, Debug)]
pub struct GeneratedGlobe {
    /// Displaced indexed mesh.
    pub mesh: Mesh,
    /// One outward unit normal per face of `mesh`.
    pub normals: Vec<DVec3>,
    /// Per-corner expansion of `mesh`, colored when the config asks for it.
    pub assembled: AssembledMesh,
    /// Statistics of the displacement pass.
    pub report: DisplacementReport,
}

/// Load `config.ron` from `config_dir` and apply CLI overrides.
///
/// A missing file is created with defaults. A file that cannot be read or
/// parsed is an error, never a silent fallback to defaults.
pub fn load_config(config_dir: &Path, args: &CliArgs) -> Result<Config, PipelineError> {
    let mut config = Config::load_or_create(config_dir)?;
    config.apply_cli_overrides(args);
    Ok(config)
}

/// Elevation source described by `config`: the configured raster, or sea
/// level everywhere when no raster is set.
pub fn open_sampler(config: &Config) -> Result<Box<dyn ElevationSampler>, RasterError> {
    match &config.elevation.raster_path {
        Some(path) => {
            let raster = EquirectRaster::open(path, &config.elevation.raster_options())?;
            Ok(Box::new(raster))
        }
        None => {
            tracing::warn!("No elevation raster configured, generating a plain sphere");
            Ok(Box::new(FlatElevation(0.0)))
        }
    }
}

/// Build the displaced, shaded globe without writing anything.
pub fn generate<S>(config: &Config, sampler: &S) -> Result<GeneratedGlobe, PipelineError>
where
    S: ElevationSampler + ?Sized,
{
    config.validate()?;

    let sphere = icosphere(config.mesh.subdivisions, config.mesh.midpoints);
    tracing::debug!(
        depth = config.mesh.subdivisions,
        vertices = sphere.vertex_count(),
        faces = sphere.face_count(),
        "Subdivided icosphere"
    );

    let displaced = displace_mesh(
        &sphere,
        sampler,
        config.elevation.convention,
        &config.elevation.displacement_params(),
    );
    let normals = compute_face_normals(&displaced.mesh)?;
    let mut assembled = assemble(&displaced.mesh, &normals)?;
    if config.export.vertex_colors {
        assembled.apply_palette(&displaced.mesh, &ElevationPalette::default())?;
    }

    log_report(&displaced.report);

    Ok(GeneratedGlobe {
        mesh: displaced.mesh,
        normals,
        assembled,
        report: displaced.report,
    })
}

/// Generate the globe described by `config` and export it.
pub fn run(config: &Config) -> Result<GeneratedGlobe, PipelineError> {
    config.validate()?;
    let sampler = open_sampler(config)?;
    let globe = generate(config, sampler.as_ref())?;

    let options = ObjOptions {
        object_name: config.export.object_name.clone(),
        vertex_colors: config.export.vertex_colors,
    };
    export_obj(&config.export.output_path, &globe.assembled, &options)?;
    Ok(globe)
}

fn log_report(report: &DisplacementReport) {
    tracing::info!(
        samples = report.samples,
        no_data = report.no_data,
        clamped = report.clamped,
        collapsed = report.collapsed,
        min_elevation = ?report.min_elevation,
        max_elevation = ?report.max_elevation,
        "Elevation summary"
    );
    for (lower, count) in report.histogram.buckets() {
        tracing::debug!(
            lower,
            upper = lower + report.histogram.bucket_width(),
            count,
            "Elevation bucket"
        );
    }
}
