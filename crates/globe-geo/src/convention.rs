//! Mapping between unit direction vectors and geographic coordinates.
//!
//! Every convention returns longitude in `(-180, 180]` and latitude in
//! `[-90, 90]`, both in degrees. The conventions only differ in which model
//! axis points north and which way longitude increases.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LonLat {
    /// Longitude in degrees, positive east.
    pub lon: f64,
    /// Latitude in degrees, positive north.
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Axis and sign convention used to turn a sphere direction into a
/// longitude/latitude pair.
///
/// The chosen convention decides which region of the raster lands on which
/// part of the sphere, so it must stay fixed for a given output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeoConvention {
    /// North is `+Z`, the prime meridian is `+X`, east (lon = +90°) is `+Y`.
    ///
    /// `lon = atan2(y, x)`, `lat = asin(z)`.
    #[default]
    ZUp,
    /// North is `+Z`, the prime meridian is `+X`, east (lon = +90°) is `-Y`.
    ///
    /// `lon = atan2(-y, x)`, `lat = asin(z)`. This is the mirror image of
    /// [`GeoConvention::ZUp`] seen from outside the globe.
    ZUpWestPositive,
    /// North is `+Y`, the prime meridian is `+Z`, east (lon = +90°) is `+X`.
    ///
    /// `lon = atan2(x, z)`, `lat = asin(y)`.
    YUp,
}

impl GeoConvention {
    /// All supported conventions.
    pub const ALL: [GeoConvention; 3] = [Self::ZUp, Self::ZUpWestPositive, Self::YUp];

    /// Geographic coordinate of a direction.
    ///
    /// `dir` does not need to be unit length but must be non-zero; a zero
    /// vector yields NaN coordinates, which no raster extent contains.
    #[must_use]
    pub fn to_lon_lat(self, dir: DVec3) -> LonLat {
        let d = dir.normalize();
        let (east, north, meridian) = self.components(d);
        LonLat {
            lon: east.atan2(meridian).to_degrees(),
            lat: north.clamp(-1.0, 1.0).asin().to_degrees(),
        }
    }

    /// Unit direction of a geographic coordinate. Inverse of
    /// [`GeoConvention::to_lon_lat`].
    #[must_use]
    pub fn to_direction(self, coord: LonLat) -> DVec3 {
        let (sin_lon, cos_lon) = coord.lon.to_radians().sin_cos();
        let (sin_lat, cos_lat) = coord.lat.to_radians().sin_cos();
        let east = cos_lat * sin_lon;
        let meridian = cos_lat * cos_lon;
        match self {
            Self::ZUp => DVec3::new(meridian, east, sin_lat),
            Self::ZUpWestPositive => DVec3::new(meridian, -east, sin_lat),
            Self::YUp => DVec3::new(east, sin_lat, meridian),
        }
    }

    /// Split a direction into (east, north, prime-meridian) components.
    fn components(self, d: DVec3) -> (f64, f64, f64) {
        match self {
            Self::ZUp => (d.y, d.z, d.x),
            Self::ZUpWestPositive => (-d.y, d.z, d.x),
            Self::YUp => (d.x, d.y, d.z),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::ZUp => "z-up",
            Self::ZUpWestPositive => "z-up-west-positive",
            Self::YUp => "y-up",
        }
    }
}

impl fmt::Display for GeoConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a convention name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown geographic convention {0:?} (expected z-up, z-up-west-positive or y-up)")]
pub struct ParseConventionError(pub String);

impl FromStr for GeoConvention {
    type Err = ParseConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| ParseConventionError(s.to_string()))
    }
}
