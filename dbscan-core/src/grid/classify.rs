//! Parallel core-point classification.

use rayon::prelude::*;
use tracing::instrument;

use super::SpatialGrid;
use crate::points::{PointSet, squared_distance};

/// Flags every point with at least `min_points` neighbours (itself
/// included) within `eps_squared`.
///
/// Each point is classified independently and writes only its own flag.
#[instrument(
    name = "grid.classify",
    skip_all,
    fields(items = points.len(), min_points = min_points),
)]
pub(super) fn classify_core_points(
    points: &PointSet,
    grid: &SpatialGrid,
    eps_squared: f64,
    min_points: usize,
) -> Vec<bool> {
    (0..points.len())
        .into_par_iter()
        .map(|index| is_core(points, grid, index, eps_squared, min_points))
        .collect()
}

/// Counts neighbours through the grid and stops once `min_points` is met.
fn is_core(
    points: &PointSet,
    grid: &SpatialGrid,
    index: usize,
    eps_squared: f64,
    min_points: usize,
) -> bool {
    if min_points == 0 {
        return true;
    }
    let origin = points.point(index);
    let mut count = 0;
    for candidate in grid.candidates(origin) {
        if squared_distance(origin, points.point(candidate)) <= eps_squared {
            count += 1;
            if count >= min_points {
                return true;
            }
        }
    }
    false
}
