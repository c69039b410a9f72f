//! Partition comparison between two clusterings of the same points.
//!
//! Cluster ids are a numbering artefact and border points touching several
//! clusters may legitimately land in either, so results are compared as
//! partitions rather than label arrays.

use std::collections::{HashMap, hash_map::Entry};

use thiserror::Error;
use tracing::instrument;

use crate::{
    grid::SpatialGrid,
    params::DensityParams,
    points::{PointSet, squared_distance},
    result::{ClusterId, Clustering, Label},
};

/// First disagreement found by [`compare_partitions`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum PartitionMismatch {
    /// A clustering does not describe every point.
    #[error("expected {points} labels but reference has {reference} and candidate {candidate}")]
    LengthMismatch {
        /// Number of points in the set.
        points: usize,
        /// Labels in the reference clustering.
        reference: usize,
        /// Labels in the candidate clustering.
        candidate: usize,
    },
    /// The clusterings disagree on whether a point is core.
    #[error("point {index} has a different core flag")]
    CoreFlag {
        /// Index of the offending point.
        index: usize,
    },
    /// The clusterings disagree on whether a point is noise.
    #[error("point {index} is noise in only one clustering")]
    Noise {
        /// Index of the offending point.
        index: usize,
    },
    /// No consistent renaming maps one clustering's ids onto the other's.
    #[error("point {index} breaks the cluster id correspondence")]
    Relabelling {
        /// Index of the offending point.
        index: usize,
    },
    /// A border point carries a cluster none of its core neighbours has.
    #[error("border point {index} is not adjacent to a core point of its cluster")]
    DetachedBorder {
        /// Index of the offending point.
        index: usize,
    },
    /// The clusterings report different cluster counts.
    #[error("reference has {reference} clusters but candidate has {candidate}")]
    ClusterCount {
        /// Clusters in the reference.
        reference: usize,
        /// Clusters in the candidate.
        candidate: usize,
    },
}

/// Checks that `candidate` partitions `points` the same way as `reference`.
///
/// The clusterings agree when they have the same core flags and noise set,
/// when a one-to-one renaming of cluster ids maps every reference core point
/// onto its candidate cluster, and when every border point in both carries
/// the cluster of some core point within `eps`. A border point adjacent to a
/// single cluster must follow the renaming; one adjacent to several may sit
/// in any of them.
///
/// # Errors
/// Returns the first [`PartitionMismatch`] found, scanning points in index
/// order.
///
/// # Examples
/// ```
/// use dbscan_core::{DensityParams, PointSet, compare_partitions, grid, serial};
///
/// let points = PointSet::try_from_rows(
///     "pairs",
///     vec![vec![0.0], vec![0.5], vec![5.0], vec![5.5], vec![20.0]],
/// )?;
/// let params = DensityParams::new(1.0, 2);
/// let reference = serial::cluster(&points, params);
/// let candidate = grid::cluster(&points, params);
/// assert_eq!(compare_partitions(&points, params, &reference, &candidate), Ok(()));
/// # Ok::<(), dbscan_core::PointSetError>(())
/// ```
#[instrument(name = "partition.compare", skip_all, fields(items = points.len()))]
pub fn compare_partitions(
    points: &PointSet,
    params: DensityParams,
    reference: &Clustering,
    candidate: &Clustering,
) -> Result<(), PartitionMismatch> {
    if reference.len() != points.len() || candidate.len() != points.len() {
        return Err(PartitionMismatch::LengthMismatch {
            points: points.len(),
            reference: reference.len(),
            candidate: candidate.len(),
        });
    }
    let core_flags = (reference.core_flags(), candidate.core_flags());
    if let Some(index) = first_difference(core_flags.0, core_flags.1, |flag| *flag) {
        return Err(PartitionMismatch::CoreFlag { index });
    }
    if let Some(index) = first_difference(reference.labels(), candidate.labels(), |label| {
        label.is_noise()
    }) {
        return Err(PartitionMismatch::Noise { index });
    }

    let renaming = core_renaming(reference, candidate)?;
    if reference.cluster_count() != candidate.cluster_count() {
        return Err(PartitionMismatch::ClusterCount {
            reference: reference.cluster_count(),
            candidate: candidate.cluster_count(),
        });
    }

    check_borders(points, params, reference, candidate, &renaming)
}

fn first_difference<T, K: PartialEq>(
    left: &[T],
    right: &[T],
    key: impl Fn(&T) -> K,
) -> Option<usize> {
    left.iter()
        .zip(right)
        .position(|(left, right)| key(left) != key(right))
}

/// Builds the one-to-one id renaming implied by the core points.
fn core_renaming(
    reference: &Clustering,
    candidate: &Clustering,
) -> Result<HashMap<ClusterId, ClusterId>, PartitionMismatch> {
    let mut forward = HashMap::new();
    let mut backward = HashMap::new();
    let pairs = reference.labels().iter().zip(candidate.labels()).enumerate();
    for (index, (reference_label, candidate_label)) in pairs {
        if !reference.is_core(index) {
            continue;
        }
        let (Some(from), Some(to)) = (reference_label.cluster(), candidate_label.cluster()) else {
            return Err(PartitionMismatch::Noise { index });
        };
        if !bind(&mut forward, from, to) || !bind(&mut backward, to, from) {
            return Err(PartitionMismatch::Relabelling { index });
        }
    }
    Ok(forward)
}

fn bind(map: &mut HashMap<ClusterId, ClusterId>, key: ClusterId, value: ClusterId) -> bool {
    match map.entry(key) {
        Entry::Occupied(entry) => *entry.get() == value,
        Entry::Vacant(entry) => {
            entry.insert(value);
            true
        }
    }
}

fn check_borders(
    points: &PointSet,
    params: DensityParams,
    reference: &Clustering,
    candidate: &Clustering,
    renaming: &HashMap<ClusterId, ClusterId>,
) -> Result<(), PartitionMismatch> {
    let grid = SpatialGrid::build(points, params.eps());
    let eps_squared = params.eps_squared();

    for index in 0..points.len() {
        let reference_label = reference.labels()[index];
        let candidate_label = candidate.labels()[index];
        let (Some(from), Some(to)) = (reference_label.cluster(), candidate_label.cluster()) else {
            continue;
        };
        if reference.is_core(index) {
            continue;
        }

        let origin = points.point(index);
        let core_neighbours: Vec<usize> = grid
            .candidates(origin)
            .filter(|&other| reference.is_core(other))
            .filter(|&other| squared_distance(origin, points.point(other)) <= eps_squared)
            .collect();
        let touches = |clustering: &Clustering, label: Label| {
            core_neighbours
                .iter()
                .any(|&other| clustering.labels()[other] == label)
        };
        if !touches(reference, reference_label) || !touches(candidate, candidate_label) {
            return Err(PartitionMismatch::DetachedBorder { index });
        }

        if renaming.get(&from) != Some(&to) {
            let first = reference.labels()[core_neighbours[0]];
            let ambiguous = core_neighbours
                .iter()
                .any(|&other| reference.labels()[other] != first);
            if !ambiguous {
                return Err(PartitionMismatch::Relabelling { index });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::{fixture, rstest};

    use crate::{serial, test_utils::points_from};

    fn cluster(id: usize) -> Label {
        Label::Cluster(ClusterId::new(id))
    }

    #[fixture]
    fn pairs() -> PointSet {
        points_from(&[&[0.0], &[0.5], &[5.0], &[5.5], &[20.0]])
    }

    const PARAMS: DensityParams = DensityParams::new(1.0, 2);

    #[rstest]
    fn identical_clusterings_agree(pairs: PointSet) {
        let reference = serial::cluster(&pairs, PARAMS);
        assert_eq!(compare_partitions(&pairs, PARAMS, &reference, &reference), Ok(()));
    }

    #[rstest]
    fn permuted_ids_agree(pairs: PointSet) {
        let reference = serial::cluster(&pairs, PARAMS);
        let swapped = Clustering::try_new(
            vec![cluster(1), cluster(1), cluster(0), cluster(0), Label::Noise],
            reference.core_flags().to_vec(),
        )
        .expect("swapped ids form a valid result");
        assert_eq!(compare_partitions(&pairs, PARAMS, &reference, &swapped), Ok(()));
    }

    #[rstest]
    fn merged_clusters_are_rejected(pairs: PointSet) {
        let reference = serial::cluster(&pairs, PARAMS);
        let merged = Clustering::try_new(
            vec![cluster(0), cluster(0), cluster(0), cluster(0), Label::Noise],
            reference.core_flags().to_vec(),
        )
        .expect("merged ids form a valid result");
        assert_eq!(
            compare_partitions(&pairs, PARAMS, &reference, &merged),
            Err(PartitionMismatch::Relabelling { index: 2 })
        );
    }

    #[rstest]
    fn noise_differences_are_rejected(pairs: PointSet) {
        let reference = serial::cluster(&pairs, PARAMS);
        let noisy = Clustering::try_new(
            vec![cluster(0), cluster(0), cluster(1), cluster(1), cluster(1)],
            reference.core_flags().to_vec(),
        )
        .expect("labels form a valid result");
        assert_eq!(
            compare_partitions(&pairs, PARAMS, &reference, &noisy),
            Err(PartitionMismatch::Noise { index: 4 })
        );
    }

    #[rstest]
    fn length_differences_are_rejected(pairs: PointSet) {
        let reference = serial::cluster(&pairs, PARAMS);
        let short = Clustering::try_new(vec![Label::Noise], vec![false]).expect("valid result");
        assert!(matches!(
            compare_partitions(&pairs, PARAMS, &reference, &short),
            Err(PartitionMismatch::LengthMismatch { points: 5, .. })
        ));
    }

    #[test]
    fn ambiguous_border_may_join_either_cluster() {
        // Point 2 is flagged non-core and touches core points of both clusters.
        let points = points_from(&[&[0.0], &[0.5], &[1.4], &[2.3], &[2.8]]);
        let params = DensityParams::new(1.0, 2);
        let core = vec![true, true, false, true, true];
        let left = Clustering::try_new(
            vec![cluster(0), cluster(0), cluster(0), cluster(1), cluster(1)],
            core.clone(),
        )
        .expect("valid result");
        let right = Clustering::try_new(
            vec![cluster(0), cluster(0), cluster(1), cluster(1), cluster(1)],
            core,
        )
        .expect("valid result");
        assert_eq!(compare_partitions(&points, params, &left, &right), Ok(()));
    }

    #[test]
    fn detached_border_is_rejected() {
        let points = points_from(&[&[0.0], &[0.5], &[1.4], &[9.0], &[9.5]]);
        let params = DensityParams::new(1.0, 2);
        let core = vec![true, true, false, true, true];
        let reference = Clustering::try_new(
            vec![cluster(0), cluster(0), cluster(0), cluster(1), cluster(1)],
            core.clone(),
        )
        .expect("valid result");
        let detached = Clustering::try_new(
            vec![cluster(0), cluster(0), cluster(1), cluster(1), cluster(1)],
            core,
        )
        .expect("valid result");
        assert_eq!(
            compare_partitions(&points, params, &reference, &detached),
            Err(PartitionMismatch::DetachedBorder { index: 2 })
        );
    }
}
