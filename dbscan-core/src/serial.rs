//! Breadth-first reference engine.
//!
//! Every point's neighbourhood is computed up front by an all-pairs scan,
//! then clusters are grown from core points in index order. The other
//! engines are checked against this one.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::{
    params::DensityParams,
    points::{PointSet, squared_distance},
    result::{ClusterId, Clustering, Label},
};

/// Clusters `points` on the calling thread.
///
/// # Examples
/// ```
/// use dbscan_core::{DensityParams, PointSet, serial};
///
/// let points = PointSet::try_from_rows("pair", vec![vec![0.0], vec![0.5], vec![9.0]])?;
/// let clustering = serial::cluster(&points, DensityParams::new(1.0, 2));
/// assert_eq!(clustering.cluster_count(), 1);
/// assert!(clustering.labels()[2].is_noise());
/// # Ok::<(), dbscan_core::PointSetError>(())
/// ```
#[must_use]
#[instrument(name = "serial.cluster", skip_all, fields(items = points.len()))]
pub fn cluster(points: &PointSet, params: DensityParams) -> Clustering {
    let eps_squared = params.eps_squared();
    let neighbourhoods: Vec<Vec<usize>> = (0..points.len())
        .map(|index| neighbourhood(points, index, eps_squared))
        .collect();
    expand_clusters(&neighbourhoods, params.min_points())
}

/// Returns every point within `eps_squared` of point `index`, itself
/// included, in ascending index order.
pub(crate) fn neighbourhood(points: &PointSet, index: usize, eps_squared: f64) -> Vec<usize> {
    let origin = points.point(index);
    points
        .iter()
        .enumerate()
        .filter(|(_, other)| squared_distance(origin, other) <= eps_squared)
        .map(|(candidate, _)| candidate)
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Noise,
    Cluster(ClusterId),
}

/// Grows clusters breadth-first over precomputed neighbourhoods.
///
/// A point is core when its neighbourhood holds at least `min_points`
/// entries. Only core points are enqueued; noise reached from a cluster is
/// relabelled into it as a border point.
pub(crate) fn expand_clusters(neighbourhoods: &[Vec<usize>], min_points: usize) -> Clustering {
    let core: Vec<bool> = neighbourhoods
        .iter()
        .map(|neighbours| neighbours.len() >= min_points)
        .collect();
    let mut marks = vec![Mark::Unvisited; neighbourhoods.len()];
    let mut queue = VecDeque::new();
    let mut next_id = 0;

    for start in 0..neighbourhoods.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        if !core[start] {
            marks[start] = Mark::Noise;
            continue;
        }

        let id = ClusterId::new(next_id);
        next_id += 1;
        marks[start] = Mark::Cluster(id);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if !core[current] {
                continue;
            }
            for &neighbour in &neighbourhoods[current] {
                match marks[neighbour] {
                    Mark::Noise => marks[neighbour] = Mark::Cluster(id),
                    Mark::Unvisited => {
                        marks[neighbour] = Mark::Cluster(id);
                        if core[neighbour] {
                            queue.push_back(neighbour);
                        }
                    }
                    Mark::Cluster(_) => {}
                }
            }
        }
    }

    debug!(clusters = next_id, "breadth-first expansion finished");
    let labels = marks
        .into_iter()
        .map(|mark| match mark {
            Mark::Cluster(id) => Label::Cluster(id),
            Mark::Noise | Mark::Unvisited => Label::Noise,
        })
        .collect();
    Clustering::from_engine(labels, core, next_id)
}
