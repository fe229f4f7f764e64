//! Radial displacement of sphere vertices by sampled elevation.
//!
//! A vertex with unit direction `d` and elevation `e` moves to
//! `d * (1 + e / divisor)`. The divisor sets the vertical exaggeration.

use std::collections::BTreeMap;

use glam::DVec3;
use globe_geo::{ElevationSampler, GeoConvention};

use crate::mesh::Mesh;

/// Parameters controlling how elevation becomes radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementParams {
    /// Elevation units per unit of radius.
    pub divisor: f64,
    /// Never move a vertex below the base sphere.
    pub clamp_min_radius: bool,
    /// Width of one bucket in the elevation histogram, in elevation units.
    pub histogram_bucket: f64,
}

impl DisplacementParams {
    /// Create displacement parameters with a 500-unit histogram bucket.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is not positive and finite.
    pub fn new(divisor: f64, clamp_min_radius: bool) -> Self {
        assert!(
            divisor > 0.0 && divisor.is_finite(),
            "divisor must be positive and finite, got {divisor}"
        );
        Self {
            divisor,
            clamp_min_radius,
            histogram_bucket: 500.0,
        }
    }

    /// Replace the histogram bucket width.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not positive and finite.
    pub fn with_histogram_bucket(mut self, width: f64) -> Self {
        assert!(
            width > 0.0 && width.is_finite(),
            "histogram bucket must be positive and finite, got {width}"
        );
        self.histogram_bucket = width;
        self
    }
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self::new(1000.0, false)
    }
}

/// Radial scale factor for one elevation sample.
///
/// No-data (and non-finite samples) leave the vertex on the base sphere.
#[must_use]
pub fn scale_factor(elevation: Option<f64>, params: &DisplacementParams) -> f64 {
    match elevation {
        Some(e) if e.is_finite() => {
            let factor = 1.0 + e / params.divisor;
            if params.clamp_min_radius {
                factor.max(1.0)
            } else {
                factor
            }
        }
        _ => 1.0,
    }
}

/// Position of a unit direction after displacement.
#[must_use]
pub fn displace_vertex(dir: DVec3, elevation: Option<f64>, params: &DisplacementParams) -> DVec3 {
    dir * scale_factor(elevation, params)
}

/// Counts of elevation samples per fixed-width bucket.
///
/// Bucket `k` holds samples in `[k * width, (k + 1) * width)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationHistogram {
    bucket_width: f64,
    counts: BTreeMap<i64, usize>,
}

impl ElevationHistogram {
    pub fn new(bucket_width: f64) -> Self {
        Self {
            bucket_width,
            counts: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, elevation: f64) {
        let bucket = (elevation / self.bucket_width).floor() as i64;
        *self.counts.entry(bucket).or_default() += 1;
    }

    pub fn bucket_width(&self) -> f64 {
        self.bucket_width
    }

    /// `(lower bound, count)` for every non-empty bucket, lowest first.
    pub fn buckets(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.counts
            .iter()
            .map(|(&k, &n)| (k as f64 * self.bucket_width, n))
    }

    /// Total number of recorded samples.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Summary of one displacement pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplacementReport {
    /// Vertices sampled.
    pub samples: usize,
    /// Samples that returned no data and were left on the base sphere.
    pub no_data: usize,
    /// Samples raised to the base sphere by the minimum-radius clamp.
    pub clamped: usize,
    /// Unclamped samples at or below `-divisor`, whose vertex lands on the
    /// origin or on the far side of it.
    pub collapsed: usize,
    /// Lowest valid elevation seen.
    pub min_elevation: Option<f64>,
    /// Highest valid elevation seen.
    pub max_elevation: Option<f64>,
    /// Distribution of valid elevations.
    pub histogram: ElevationHistogram,
}

impl DisplacementReport {
    fn new(bucket_width: f64) -> Self {
        Self {
            samples: 0,
            no_data: 0,
            clamped: 0,
            collapsed: 0,
            min_elevation: None,
            max_elevation: None,
            histogram: ElevationHistogram::new(bucket_width),
        }
    }

    fn record(&mut self, elevation: Option<f64>, params: &DisplacementParams) {
        self.samples += 1;
        match elevation {
            Some(e) if e.is_finite() => {
                self.min_elevation = Some(self.min_elevation.map_or(e, |m| m.min(e)));
                self.max_elevation = Some(self.max_elevation.map_or(e, |m| m.max(e)));
                self.histogram.record(e);
                if params.clamp_min_radius {
                    if e < 0.0 {
                        self.clamped += 1;
                    }
                } else if e <= -params.divisor {
                    self.collapsed += 1;
                }
            }
            _ => self.no_data += 1,
        }
    }
}

/// A displaced mesh together with the statistics of its pass.
#[derive(Clone, Debug)]
pub struct Displaced {
    pub mesh: Mesh,
    pub report: DisplacementReport,
}

/// Displace every vertex of `mesh` along its own direction.
///
/// Each vertex is sampled once, through `convention`. The input mesh is left
/// untouched and the output keeps its connectivity and vertex order.
pub fn displace_mesh<S>(
    mesh: &Mesh,
    sampler: &S,
    convention: GeoConvention,
    params: &DisplacementParams,
) -> Displaced
where
    S: ElevationSampler + ?Sized,
{
    let mut report = DisplacementReport::new(params.histogram_bucket);
    let vertices = mesh
        .vertices()
        .iter()
        .map(|&dir| {
            let elevation = sampler.sample_direction(dir, convention);
            report.record(elevation, params);
            displace_vertex(dir, elevation, params)
        })
        .collect();

    tracing::debug!(
        samples = report.samples,
        no_data = report.no_data,
        clamped = report.clamped,
        "Displaced mesh vertices"
    );
    if report.collapsed > 0 {
        tracing::warn!(
            collapsed = report.collapsed,
            divisor = params.divisor,
            "Vertices displaced through the origin; enable clamp_min_radius or raise the divisor"
        );
    }

    Displaced {
        mesh: mesh.with_vertices(vertices),
        report,
    }
}
