//! Result types for clustering runs.
//!
//! Provides per-point labels, the aggregate counts reported after a run and
//! validation of the cluster identifier constraints.

use thiserror::Error;

/// Identifier assigned to a cluster.
///
/// # Examples
/// ```
/// use dbscan_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

/// Final assignment of a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// The point has no core point within `eps`.
    Noise,
    /// The point belongs to the given cluster, either as a core point or as a
    /// border point adjacent to one.
    Cluster(ClusterId),
}

impl Label {
    /// Returns the cluster of a clustered point.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{ClusterId, Label};
    ///
    /// assert_eq!(Label::Cluster(ClusterId::new(2)).cluster(), Some(ClusterId::new(2)));
    /// assert_eq!(Label::Noise.cluster(), None);
    /// ```
    #[must_use]
    pub const fn cluster(self) -> Option<ClusterId> {
        match self {
            Self::Noise => None,
            Self::Cluster(id) => Some(id),
        }
    }

    /// Returns whether the point was left unclustered.
    #[must_use]
    pub const fn is_noise(self) -> bool {
        matches!(self, Self::Noise)
    }
}

/// Per-category totals of a [`Clustering`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    /// Number of distinct clusters.
    pub clusters: usize,
    /// Clustered points with a dense neighbourhood.
    pub core: usize,
    /// Clustered points that are not core points.
    pub border: usize,
    /// Unclustered points.
    pub noise: usize,
}

impl LabelCounts {
    /// Returns the number of points accounted for.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.core + self.border + self.noise
    }
}

/// Error returned when labels and core flags violate the result invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidClustering {
    /// Labels and core flags describe a different number of points.
    #[error("{labels} labels but {core_flags} core flags")]
    LengthMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of core flags supplied.
        core_flags: usize,
    },
    /// A core point was labelled as noise.
    #[error("core point {index} is labelled as noise")]
    NoisyCore {
        /// Index of the offending point.
        index: usize,
    },
    /// Cluster identifiers do not include `0`.
    #[error("cluster identifiers must include 0")]
    MissingZero,
    /// Cluster identifiers skip values.
    #[error("cluster identifiers must be contiguous without gaps")]
    Gap,
}

/// Output of a clustering run: one label and one core flag per point.
///
/// # Examples
/// ```
/// use dbscan_core::{ClusterId, Clustering, Label};
///
/// let clustering = Clustering::try_new(
///     vec![Label::Cluster(ClusterId::new(0)), Label::Cluster(ClusterId::new(0)), Label::Noise],
///     vec![true, false, false],
/// )?;
/// let counts = clustering.counts();
/// assert_eq!((counts.clusters, counts.core, counts.border, counts.noise), (1, 1, 1, 1));
/// # Ok::<(), dbscan_core::InvalidClustering>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    labels: Vec<Label>,
    core: Vec<bool>,
    cluster_count: usize,
}

impl Clustering {
    /// Validates and assembles a clustering.
    ///
    /// # Errors
    /// Returns [`InvalidClustering::LengthMismatch`] when the slices differ in
    /// length, [`InvalidClustering::NoisyCore`] when a core point is noise,
    /// and [`InvalidClustering::MissingZero`] or [`InvalidClustering::Gap`]
    /// when the used identifiers are not exactly `0..cluster_count`.
    pub fn try_new(labels: Vec<Label>, core: Vec<bool>) -> Result<Self, InvalidClustering> {
        if labels.len() != core.len() {
            return Err(InvalidClustering::LengthMismatch {
                labels: labels.len(),
                core_flags: core.len(),
            });
        }
        if let Some(index) = labels
            .iter()
            .zip(&core)
            .position(|(label, &is_core)| is_core && label.is_noise())
        {
            return Err(InvalidClustering::NoisyCore { index });
        }

        let max_id = labels.iter().filter_map(|label| label.cluster()).max();
        let Some(max_id) = max_id else {
            return Ok(Self {
                labels,
                core,
                cluster_count: 0,
            });
        };

        if !labels.contains(&Label::Cluster(ClusterId::new(0))) {
            return Err(InvalidClustering::MissingZero);
        }
        // Contiguous ids from 0 never exceed the number of labels.
        if max_id.get() >= labels.len() {
            return Err(InvalidClustering::Gap);
        }

        let mut seen = vec![false; max_id.get() + 1];
        for id in labels.iter().filter_map(|label| label.cluster()) {
            seen[id.get()] = true;
        }
        if seen.iter().any(|used| !used) {
            return Err(InvalidClustering::Gap);
        }

        Ok(Self {
            labels,
            core,
            cluster_count: seen.len(),
        })
    }

    /// Assembles a clustering produced by one of the engines.
    ///
    /// The engines guarantee the invariants checked by [`Self::try_new`];
    /// debug builds re-check them.
    pub(crate) fn from_engine(labels: Vec<Label>, core: Vec<bool>, cluster_count: usize) -> Self {
        debug_assert_eq!(
            Self::try_new(labels.clone(), core.clone()).map(|checked| checked.cluster_count),
            Ok(cluster_count),
            "engine output must satisfy the clustering invariants",
        );
        Self {
            labels,
            core,
            cluster_count,
        }
    }

    /// Returns the labels in point order.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the core flags in point order.
    #[must_use]
    pub fn core_flags(&self) -> &[bool] {
        &self.core
    }

    /// Returns whether point `index` is a core point.
    ///
    /// # Panics
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn is_core(&self, index: usize) -> bool {
        self.core[index]
    }

    /// Returns the number of points described by the result.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the result describes no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Returns the indices of the points in `cluster`, in ascending order.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{ClusterId, Clustering, Label};
    ///
    /// let id = ClusterId::new(0);
    /// let clustering = Clustering::try_new(
    ///     vec![Label::Cluster(id), Label::Noise, Label::Cluster(id)],
    ///     vec![true, false, true],
    /// )?;
    /// assert_eq!(clustering.members(id), vec![0, 2]);
    /// # Ok::<(), dbscan_core::InvalidClustering>(())
    /// ```
    #[must_use]
    pub fn members(&self, cluster: ClusterId) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.cluster() == Some(cluster))
            .map(|(index, _)| index)
            .collect()
    }

    /// Tallies clusters and core, border and noise points.
    #[must_use]
    pub fn counts(&self) -> LabelCounts {
        let mut counts = LabelCounts {
            clusters: self.cluster_count,
            ..LabelCounts::default()
        };
        for (label, &is_core) in self.labels.iter().zip(&self.core) {
            match (label, is_core) {
                (Label::Noise, _) => counts.noise += 1,
                (Label::Cluster(_), true) => counts.core += 1,
                (Label::Cluster(_), false) => counts.border += 1,
            }
        }
        counts
    }
}
