//! The elevation query contract.

use glam::DVec3;

use crate::GeoConvention;

/// Source of elevation values addressed by geographic coordinates.
///
/// `None` is the no-data answer: the coordinate lies outside the source's
/// coverage or the stored value is flagged as missing.
pub trait ElevationSampler {
    /// Elevation at `(lon, lat)` in degrees, in the source's native units.
    fn sample(&self, lon: f64, lat: f64) -> Option<f64>;

    /// Elevation under a sphere direction, mapped through `convention`.
    fn sample_direction(&self, dir: DVec3, convention: GeoConvention) -> Option<f64> {
        let coord = convention.to_lon_lat(dir);
        self.sample(coord.lon, coord.lat)
    }
}

/// The same elevation everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatElevation(pub f64);

impl ElevationSampler for FlatElevation {
    fn sample(&self, _lon: f64, _lat: f64) -> Option<f64> {
        Some(self.0)
    }
}

impl<F> ElevationSampler for F
where
    F: Fn(f64, f64) -> Option<f64>,
{
    fn sample(&self, lon: f64, lat: f64) -> Option<f64> {
        self(lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_elevation() {
        let s = FlatElevation(12.5);
        assert_eq!(s.sample(0.0, 0.0), Some(12.5));
        assert_eq!(s.sample(-170.0, 80.0), Some(12.5));
    }

    #[test]
    fn test_closure_sampler() {
        let northern = |_lon: f64, lat: f64| if lat >= 0.0 { Some(lat) } else { None };
        assert_eq!(northern.sample(10.0, 45.0), Some(45.0));
        assert_eq!(northern.sample(10.0, -45.0), None);
    }

    #[test]
    fn test_sample_direction_uses_convention() {
        let lat_probe = |_lon: f64, lat: f64| Some(lat);
        let z_up = lat_probe.sample_direction(DVec3::Z, GeoConvention::ZUp).unwrap();
        let y_up = lat_probe.sample_direction(DVec3::Z, GeoConvention::YUp).unwrap();
        assert!((z_up - 90.0).abs() < 1e-9);
        assert!(y_up.abs() < 1e-9);
    }
}
