//! Seeded two-blob generator.
//!
//! Even-indexed points are drawn around the origin and odd-indexed points
//! around `6` on every axis, each coordinate with unit standard deviation.

use std::f64::consts::PI;

use dbscan_core::PointSet;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::instrument;

use crate::errors::SyntheticError;

/// Mean of every coordinate of the odd-indexed blob.
const SECOND_BLOB_CENTRE: f64 = 6.0;

/// Configuration for [`generate_two_blobs`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwoBlobConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Coordinates per point.
    pub dimensions: usize,
    /// Seed for the random number generator.
    pub seed: u64,
}

impl Default for TwoBlobConfig {
    fn default() -> Self {
        Self {
            point_count: 30_000,
            dimensions: 2,
            seed: 42,
        }
    }
}

/// Generates two Gaussian blobs, deterministic for a given configuration.
///
/// # Errors
/// Returns [`SyntheticError::ZeroDimensions`] when points are requested
/// without coordinates and [`SyntheticError::Overflow`] when the coordinate
/// buffer size overflows `usize`.
///
/// # Examples
/// ```
/// use dbscan_providers_dense::{TwoBlobConfig, generate_two_blobs};
///
/// let config = TwoBlobConfig { point_count: 100, dimensions: 3, seed: 7 };
/// let points = generate_two_blobs(&config)?;
/// assert_eq!(points.len(), 100);
/// assert_eq!(points.dimensions(), 3);
/// assert_eq!(points, generate_two_blobs(&config)?);
/// # Ok::<(), dbscan_providers_dense::SyntheticError>(())
/// ```
#[instrument(
    name = "synthetic.two_blobs",
    fields(points = config.point_count, dimensions = config.dimensions, seed = config.seed),
)]
pub fn generate_two_blobs(config: &TwoBlobConfig) -> Result<PointSet, SyntheticError> {
    if config.point_count > 0 && config.dimensions == 0 {
        return Err(SyntheticError::ZeroDimensions);
    }
    let capacity = config
        .point_count
        .checked_mul(config.dimensions)
        .ok_or(SyntheticError::Overflow)?;

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut coordinates = Vec::with_capacity(capacity);
    for index in 0..config.point_count {
        let centre = if index % 2 == 0 {
            0.0
        } else {
            SECOND_BLOB_CENTRE
        };
        for _ in 0..config.dimensions {
            coordinates.push(centre + standard_normal_sample(&mut rng));
        }
    }
    Ok(PointSet::from_flat(
        "two-blobs",
        config.dimensions,
        coordinates,
    )?)
}

/// Draws one standard normal sample with the Box–Muller transform.
pub(crate) fn standard_normal_sample(rng: &mut SmallRng) -> f64 {
    let u1 = rng.gen_range(0.0_f64..1.0).max(f64::EPSILON);
    let u2 = rng.gen_range(0.0_f64..1.0);
    let radius = (-2.0 * u1.ln()).sqrt();
    radius * (2.0 * PI * u2).cos()
}
