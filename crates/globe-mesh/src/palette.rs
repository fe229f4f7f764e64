//! Surface coloring by radial height.

/// Radii within this distance of `low` count as sea level.
pub const SEA_LEVEL_TOLERANCE: f64 = 1e-9;

/// Maps the distance of a displaced point from the globe center to a color.
///
/// At or below `low` the surface is sea. Between `low` and `high` the color
/// blends from `lowland` to `highland`; above `high` it is `highland`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationPalette {
    /// Sea-level radius.
    pub low: f64,
    /// Radius at which the land gradient saturates.
    pub high: f64,
    pub ocean: [f32; 3],
    pub lowland: [f32; 3],
    pub highland: [f32; 3],
}

impl Default for ElevationPalette {
    fn default() -> Self {
        Self {
            low: 1.0,
            high: 1.03,
            ocean: [0.0, 0.0, 1.0],
            lowland: [0.5, 1.0, 0.0],
            highland: [0.54, 0.27, 0.075],
        }
    }
}

impl ElevationPalette {
    /// RGB color for a point at `radius`.
    pub fn color_for_radius(&self, radius: f64) -> [f32; 3] {
        if radius <= self.low + SEA_LEVEL_TOLERANCE {
            return self.ocean;
        }
        if radius >= self.high {
            return self.highland;
        }
        let t = ((radius - self.low) / (self.high - self.low)) as f32;
        std::array::from_fn(|i| self.lowland[i] + (self.highland[i] - self.lowland[i]) * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sea_and_peaks() {
        let p = ElevationPalette::default();
        assert_eq!(p.color_for_radius(0.99), p.ocean);
        assert_eq!(p.color_for_radius(1.0), p.ocean);
        assert_eq!(p.color_for_radius(1.2), p.highland);
    }

    #[test]
    fn test_normalization_error_stays_sea() {
        let p = ElevationPalette::default();
        assert_eq!(p.color_for_radius(1.0 + 4.0 * f64::EPSILON), p.ocean);
        assert_ne!(p.color_for_radius(1.0 + 1e-6), p.ocean);
    }

    #[test]
    fn test_gradient_midpoint() {
        let p = ElevationPalette::default();
        let c = p.color_for_radius(1.015);
        for i in 0..3 {
            let expected = (p.lowland[i] + p.highland[i]) * 0.5;
            assert!((c[i] - expected).abs() < 1e-4, "channel {i}: {}", c[i]);
        }
    }

    #[test]
    fn test_gradient_starts_at_lowland() {
        let p = ElevationPalette::default();
        let c = p.color_for_radius(1.0 + 1e-6);
        for i in 0..3 {
            assert!((c[i] - p.lowland[i]).abs() < 1e-4);
        }
    }
}
