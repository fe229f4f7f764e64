//! Equirectangular elevation raster.
//!
//! The raster is a north-up grid whose columns are evenly spaced in longitude
//! and rows evenly spaced in latitude, covering a [`GeoExtent`]. Queries pick
//! the pixel containing the coordinate, the same point query a DEM tool does.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use serde::{Deserialize, Serialize};

use crate::ElevationSampler;

/// Errors raised while opening or building a raster.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The raster file could not be opened.
    #[error("failed to open raster {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The raster file could not be decoded as an image.
    #[error("failed to decode raster {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The raster holds no pixels.
    #[error("raster has no pixels")]
    EmptyRaster,

    /// The value buffer does not match the declared dimensions.
    #[error("raster is {width}x{height} but {len} values were supplied")]
    DimensionMismatch { width: u32, height: u32, len: usize },

    /// The geographic extent is empty or not finite.
    #[error("invalid raster extent {0:?}")]
    InvalidExtent(GeoExtent),
}

/// Geographic bounding box of a raster, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoExtent {
    /// Longitude of the left edge.
    pub west: f64,
    /// Longitude of the right edge.
    pub east: f64,
    /// Latitude of the bottom edge.
    pub south: f64,
    /// Latitude of the top edge.
    pub north: f64,
}

impl GeoExtent {
    /// The whole globe.
    pub const GLOBAL: GeoExtent = GeoExtent {
        west: -180.0,
        east: 180.0,
        south: -90.0,
        north: 90.0,
    };

    /// `true` if the extent is finite and has positive width and height.
    pub fn is_valid(&self) -> bool {
        [self.west, self.east, self.south, self.north]
            .iter()
            .all(|v| v.is_finite())
            && self.west < self.east
            && self.south < self.north
    }

    /// Inclusive containment test. NaN coordinates are never contained.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }
}

impl Default for GeoExtent {
    fn default() -> Self {
        Self::GLOBAL
    }
}

/// How raw raster values map to elevations.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterOptions {
    /// Geographic coverage of the grid.
    pub extent: GeoExtent,
    /// Multiplier applied to raw pixel values.
    pub value_scale: f64,
    /// Offset added after scaling.
    pub value_offset: f64,
    /// Raw value that marks a missing sample.
    pub nodata: Option<f64>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            extent: GeoExtent::GLOBAL,
            value_scale: 1.0,
            value_offset: 0.0,
            nodata: None,
        }
    }
}

/// A gridded elevation source held in memory.
#[derive(Clone, Debug)]
pub struct EquirectRaster {
    width: u32,
    height: u32,
    values: Vec<f32>,
    options: RasterOptions,
}

impl EquirectRaster {
    /// Load a single-band raster image (TIFF or PNG).
    ///
    /// 8- and 16-bit grayscale pixels keep their integer value. Any other
    /// pixel layout is converted to grayscale `f32`, which for integer
    /// formats means a value normalized to `[0, 1]`; use
    /// [`RasterOptions::value_scale`] to restore native units.
    pub fn open(path: &Path, options: &RasterOptions) -> Result<Self, RasterError> {
        let open_err = |source| RasterError::Open {
            path: path.to_path_buf(),
            source,
        };
        let image = ImageReader::open(path)
            .map_err(open_err)?
            .with_guessed_format()
            .map_err(open_err)?
            .decode()
            .map_err(|source| RasterError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        let (width, height) = (image.width(), image.height());
        let values: Vec<f32> = match image {
            DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
            DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
            other => other.to_luma32f().into_raw(),
        };

        let raster = Self::from_values(width, height, values, options)?;
        tracing::info!(
            path = %path.display(),
            width,
            height,
            "Loaded elevation raster"
        );
        Ok(raster)
    }

    /// Build a raster from row-major values, top row first.
    pub fn from_values(
        width: u32,
        height: u32,
        values: Vec<f32>,
        options: &RasterOptions,
    ) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyRaster);
        }
        if values.len() != width as usize * height as usize {
            return Err(RasterError::DimensionMismatch {
                width,
                height,
                len: values.len(),
            });
        }
        if !options.extent.is_valid() {
            return Err(RasterError::InvalidExtent(options.extent));
        }
        Ok(Self {
            width,
            height,
            values,
            options: options.clone(),
        })
    }

    /// Returns `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    /// Pixel `(column, row)` containing a coordinate, or `None` outside the
    /// extent. The east and south edges belong to the last column and row.
    pub fn pixel_at(&self, lon: f64, lat: f64) -> Option<(u32, u32)> {
        let extent = &self.options.extent;
        if !extent.contains(lon, lat) {
            return None;
        }
        let fx = (lon - extent.west) / (extent.east - extent.west);
        let fy = (extent.north - lat) / (extent.north - extent.south);
        let col = ((fx * self.width as f64) as u32).min(self.width - 1);
        let row = ((fy * self.height as f64) as u32).min(self.height - 1);
        Some((col, row))
    }

    fn raw(&self, col: u32, row: u32) -> f32 {
        self.values[row as usize * self.width as usize + col as usize]
    }
}

impl ElevationSampler for EquirectRaster {
    fn sample(&self, lon: f64, lat: f64) -> Option<f64> {
        let (col, row) = self.pixel_at(lon, lat)?;
        let raw = self.raw(col, row) as f64;
        if raw.is_nan() || self.options.nodata == Some(raw) {
            return None;
        }
        Some(raw * self.options.value_scale + self.options.value_offset)
    }
}
