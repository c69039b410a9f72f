//! Naively parallel engine.
//!
//! Neighbourhoods come from an all-pairs scan spread across the current
//! rayon pool; the cluster expansion is the reference engine's
//! breadth-first pass and stays single-threaded.

use rayon::prelude::*;
use tracing::instrument;

use crate::{
    params::DensityParams,
    points::PointSet,
    result::Clustering,
    serial::{expand_clusters, neighbourhood},
};

/// Clusters `points` using the current rayon pool for the neighbourhood
/// scan.
///
/// [`crate::Dbscan::run`] installs a pool sized by the configured thread
/// count; callers invoking this directly get whichever pool is current.
///
/// # Examples
/// ```
/// use dbscan_core::{DensityParams, PointSet, naive, serial};
///
/// let points = PointSet::try_from_rows(
///     "grid",
///     (0..16).map(|i| vec![f64::from(i % 4), f64::from(i / 4)]).collect(),
/// )?;
/// let params = DensityParams::new(1.0, 4);
/// assert_eq!(naive::cluster(&points, params), serial::cluster(&points, params));
/// # Ok::<(), dbscan_core::PointSetError>(())
/// ```
#[must_use]
#[instrument(name = "naive.cluster", skip_all, fields(items = points.len()))]
pub fn cluster(points: &PointSet, params: DensityParams) -> Clustering {
    let eps_squared = params.eps_squared();
    let neighbourhoods: Vec<Vec<usize>> = (0..points.len())
        .into_par_iter()
        .map(|index| neighbourhood(points, index, eps_squared))
        .collect();
    expand_clusters(&neighbourhoods, params.min_points())
}
