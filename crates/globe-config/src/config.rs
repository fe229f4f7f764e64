//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use globe_geo::{GeoConvention, GeoExtent, RasterOptions};
use globe_mesh::{DisplacementParams, MAX_SUBDIVISIONS, MidpointMode};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory name used under the platform config directory.
const APP_NAME: &str = "globe";

/// Platform config directory for the generator, e.g. `~/.config/globe`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sphere tessellation settings.
    pub mesh: MeshConfig,
    /// Elevation source and displacement settings.
    pub elevation: ElevationConfig,
    /// Output settings.
    pub export: ExportConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Sphere tessellation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Number of subdivision passes over the icosahedron (face count is
    /// `20 * 4^subdivisions`).
    pub subdivisions: u32,
    /// Whether adjacent faces share edge midpoints.
    pub midpoints: MidpointMode,
}

/// Elevation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElevationConfig {
    /// Elevation raster (TIFF or PNG). `None` leaves the sphere flat.
    pub raster_path: Option<PathBuf>,
    /// Direction to longitude/latitude convention.
    pub convention: GeoConvention,
    /// Elevation units per unit of radius (vertical exaggeration).
    pub divisor: f64,
    /// Keep every vertex on or above the base sphere.
    pub clamp_min_radius: bool,
    /// Multiplier applied to raw raster values.
    pub value_scale: f64,
    /// Offset added to scaled raster values.
    pub value_offset: f64,
    /// Raw raster value marking missing data.
    pub nodata: Option<f64>,
    /// Geographic coverage of the raster.
    pub extent: GeoExtent,
    /// Histogram bucket width for the elevation report.
    pub histogram_bucket: f64,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Path of the OBJ file to write.
    pub output_path: PathBuf,
    /// Object name written into the OBJ file.
    pub object_name: String,
    /// Write per-vertex colors derived from elevation.
    pub vertex_colors: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            subdivisions: 5,
            midpoints: MidpointMode::Shared,
        }
    }
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            raster_path: None,
            convention: GeoConvention::ZUp,
            divisor: 1000.0,
            clamp_min_radius: false,
            value_scale: 1.0,
            value_offset: 0.0,
            nodata: None,
            extent: GeoExtent::GLOBAL,
            histogram_bucket: 500.0,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("earth.obj"),
            object_name: "earth".to_string(),
            vertex_colors: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ElevationConfig {
    /// Raster decoding options described by this section.
    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            extent: self.extent,
            value_scale: self.value_scale,
            value_offset: self.value_offset,
            nodata: self.nodata,
        }
    }

    /// Displacement parameters described by this section.
    ///
    /// # Panics
    ///
    /// Panics on a divisor or bucket width that [`Config::validate`] rejects.
    pub fn displacement_params(&self) -> DisplacementParams {
        DisplacementParams::new(self.divisor, self.clamp_min_radius)
            .with_histogram_bucket(self.histogram_bucket)
    }
}

// --- Validation ---

impl Config {
    /// Check every setting against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mesh.subdivisions > MAX_SUBDIVISIONS {
            return Err(ConfigError::Invalid(format!(
                "mesh.subdivisions must be at most {MAX_SUBDIVISIONS}, got {}",
                self.mesh.subdivisions
            )));
        }
        let e = &self.elevation;
        if !(e.divisor > 0.0 && e.divisor.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "elevation.divisor must be positive and finite, got {}",
                e.divisor
            )));
        }
        if !(e.histogram_bucket > 0.0 && e.histogram_bucket.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "elevation.histogram_bucket must be positive and finite, got {}",
                e.histogram_bucket
            )));
        }
        if !(e.value_scale.is_finite() && e.value_offset.is_finite()) {
            return Err(ConfigError::Invalid(
                "elevation.value_scale and elevation.value_offset must be finite".to_string(),
            ));
        }
        if !e.extent.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "elevation.extent is empty or not finite: {:?}",
                e.extent
            )));
        }
        if self.export.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "export.output_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let config = Self::load_file(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Load a config file from an explicit path.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read `config.ron`: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::load_file(&config_dir.join("config.ron"))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("subdivisions: 5"));
        assert!(ron_str.contains("divisor: 1000.0"));
        assert!(ron_str.contains("ZUp"));
    }

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.elevation.raster_path = Some(PathBuf::from("data/dem.tif"));
        config.elevation.nodata = Some(-9999.0);
        config.mesh.midpoints = MidpointMode::Duplicated;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(mesh: (subdivisions: 3), export: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.mesh.subdivisions, 3);
        assert_eq!(config.mesh.midpoints, MidpointMode::Shared);
        assert_eq!(config.elevation, ElevationConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_convention_from_ron() {
        let config: Config = ron::from_str("(elevation: (convention: YUp))").unwrap();
        assert_eq!(config.elevation.convention, GeoConvention::YUp);
    }

    #[test]
    fn test_validate_rejects_deep_subdivision() {
        let mut config = Config::default();
        config.mesh.subdivisions = MAX_SUBDIVISIONS + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_bad_divisor() {
        for divisor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut config = Config::default();
            config.elevation.divisor = divisor;
            assert!(config.validate().is_err(), "divisor {divisor} accepted");
        }
    }

    #[test]
    fn test_validate_rejects_empty_extent() {
        let mut config = Config::default();
        config.elevation.extent.south = 90.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_displacement_params_follow_config() {
        let mut config = Config::default();
        config.elevation.divisor = 250.0;
        config.elevation.clamp_min_radius = true;
        config.elevation.histogram_bucket = 100.0;
        let params = config.elevation.displacement_params();
        assert_eq!(params.divisor, 250.0);
        assert!(params.clamp_min_radius);
        assert_eq!(params.histogram_bucket, 100.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.mesh.subdivisions = 6;
        config.elevation.clamp_min_radius = true;
        config.export.output_path = PathBuf::from("out/globe.obj");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.elevation.divisor = 500.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().elevation.divisor, 500.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// globe settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
