//! Core–core edge collection.

use rayon::prelude::*;
use tracing::{debug, instrument};

use super::SpatialGrid;
use crate::points::{PointSet, squared_distance};

/// An undirected edge between two core points within `eps`, stored with
/// `left < right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct CoreEdge {
    left: usize,
    right: usize,
}

impl CoreEdge {
    pub(super) fn new(left: usize, right: usize) -> Self {
        debug_assert!(left < right, "core edges are stored with left < right");
        Self { left, right }
    }

    #[rustfmt::skip]
    pub(super) fn left(&self) -> usize { self.left }

    #[rustfmt::skip]
    pub(super) fn right(&self) -> usize { self.right }
}

/// Records each unordered pair of adjacent core points exactly once.
///
/// Lanes of the current rayon pool append to private lists which are
/// concatenated in index order once every lane has finished.
#[instrument(name = "grid.edges", skip_all, fields(items = points.len()))]
pub(super) fn collect_core_edges(
    points: &PointSet,
    grid: &SpatialGrid,
    core: &[bool],
    eps_squared: f64,
) -> Vec<CoreEdge> {
    let lanes: Vec<Vec<CoreEdge>> = (0..points.len())
        .into_par_iter()
        .filter(|&index| core[index])
        .fold(Vec::new, |mut lane, left| {
            let origin = points.point(left);
            lane.extend(
                grid.candidates(origin)
                    .filter(|&right| right > left && core[right])
                    .filter(|&right| squared_distance(origin, points.point(right)) <= eps_squared)
                    .map(|right| CoreEdge::new(left, right)),
            );
            lane
        })
        .collect();

    let lane_count = lanes.len();
    let edges: Vec<CoreEdge> = lanes.into_iter().flatten().collect();
    debug!(lanes = lane_count, edges = edges.len(), "core edges collected");
    edges
}
