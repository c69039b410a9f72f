//! Grid-indexed parallel engine.
//!
//! The pipeline runs in phases separated by rayon joins:
//!
//! - Index construction: points are bucketed by the cell of their first two
//!   coordinates, with side `eps`. Worker lanes fill private buffers that a
//!   single pass merges into the bucket map.
//! - Core classification: each point counts its neighbours through the
//!   cells overlapping its `eps` square and stops as soon as `min_points` is
//!   reached.
//! - Edge collection: each core point records core neighbours with a larger
//!   index into a per-lane list.
//! - Merge: one thread applies every edge to a union-find forest and numbers
//!   the roots in index order.
//! - Border labelling: each non-core point adopts the cluster of the first
//!   core neighbour it finds, reading the finished core labels.
//!
//! No phase takes a lock; every parallel phase writes only to its own slot or
//! to lane-private buffers.
//!
//! Queries scan every cell overlapping `[x - r, x + r]` on each axis, where
//! `r` is `eps` widened by a relative margin far above the rounding error
//! of the squared-distance test. That is the 3×3 block around the point's
//! cell, or a 4-cell span on an axis where the point sits on a cell edge,
//! and it holds every pair the exact test accepts, rounding included.
//!
//! Only the first two coordinates select cells. For `d > 2` the planar
//! distance never exceeds the full one, so the same cells still hold every
//! neighbour while buckets grow denser.

mod border;
mod classify;
mod edges;
mod index;
mod union_find;


use tracing::{debug, instrument};

use crate::{
    instrumentation,
    params::DensityParams,
    points::PointSet,
    result::{ClusterId, Clustering, Label},
};

pub(crate) use self::index::SpatialGrid;

use self::{
    border::label_borders,
    classify::classify_core_points,
    edges::{CoreEdge, collect_core_edges},
    union_find::DisjointSet,
};

/// Clusters `points` with the grid-indexed pipeline on the current rayon
/// pool.
///
/// # Examples
/// ```
/// use dbscan_core::{DensityParams, PointSet, grid};
///
/// let points = PointSet::try_from_rows(
///     "line",
///     vec![vec![0.0, 0.0], vec![0.1, 0.0], vec![0.2, 0.0], vec![10.0, 10.0]],
/// )?;
/// let clustering = grid::cluster(&points, DensityParams::new(0.5, 2));
/// let counts = clustering.counts();
/// assert_eq!((counts.clusters, counts.noise), (1, 1));
/// # Ok::<(), dbscan_core::PointSetError>(())
/// ```
#[must_use]
#[instrument(name = "grid.cluster", skip_all, fields(items = points.len()))]
pub fn cluster(points: &PointSet, params: DensityParams) -> Clustering {
    let eps_squared = params.eps_squared();
    let grid = SpatialGrid::build(points, params.eps());
    let core = classify_core_points(points, &grid, eps_squared, params.min_points());
    let edges = collect_core_edges(points, &grid, &core, eps_squared);
    instrumentation::record_core_edges(edges.len());

    let (core_labels, cluster_count) = merge_core_points(&core, &edges);
    let labels = label_borders(points, &grid, &core, &core_labels, eps_squared);
    Clustering::from_engine(labels, core, cluster_count)
}

/// Unions every core edge and numbers the resulting roots.
///
/// Runs on one thread. Roots are numbered in ascending index order of the
/// first core point reaching them, so the ids depend only on the input.
#[instrument(name = "grid.merge", skip_all, fields(edges = edges.len()))]
fn merge_core_points(core: &[bool], edges: &[CoreEdge]) -> (Vec<Label>, usize) {
    let mut forest = DisjointSet::new(core.len());
    for edge in edges {
        forest.union(edge.left(), edge.right());
    }

    let mut root_ids: Vec<Option<ClusterId>> = vec![None; core.len()];
    let mut next_id = 0;
    let mut labels = vec![Label::Noise; core.len()];
    for (index, _) in core.iter().enumerate().filter(|(_, is_core)| **is_core) {
        let root = forest.find(index);
        let id = *root_ids[root].get_or_insert_with(|| {
            let id = ClusterId::new(next_id);
            next_id += 1;
            id
        });
        labels[index] = Label::Cluster(id);
    }

    debug!(clusters = next_id, "core points merged");
    (labels, next_id)
}
