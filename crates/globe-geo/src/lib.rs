//! Geographic addressing for the globe: direction vector to longitude/latitude
//! conventions, the elevation sampling contract, and an equirectangular raster
//! source.

mod convention;
mod raster;
mod sampler;

pub use convention::{GeoConvention, LonLat, ParseConventionError};
pub use raster::{EquirectRaster, GeoExtent, RasterError, RasterOptions};
pub use sampler::{ElevationSampler, FlatElevation};
