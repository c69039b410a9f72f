//! Type definitions for clustering property tests.

use proptest::test_runner::TestCaseError;
use test_strategy::Arbitrary;

use crate::{Clustering, DbscanBuilder, DensityParams, Engine, PointSet};

/// Spatial arrangement of a generated point set.
///
/// Each layout stresses a different part of the grid pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum Layout {
    /// Points scattered uniformly over a square.
    Uniform,
    /// A few tight groups with sparse noise between them.
    Blobs,
    /// Many exact duplicates, paired with zero or tiny radii.
    Duplicates,
    /// Integer lattice with `eps = 1`, so neighbours sit exactly on the
    /// radius and on cell boundaries.
    Lattice,
    /// Points in three to six dimensions whose first two coordinates are
    /// packed tightly, so cells hold many non-neighbours.
    HighDimensional,
}

/// Fixture for clustering property tests.
///
/// Carries the layout alongside the inputs so failures can be diagnosed.
#[derive(Clone, Debug)]
pub(super) struct ClusteringFixture {
    /// Generated points.
    pub points: PointSet,
    /// Density parameters to run with.
    pub params: DensityParams,
    /// Layout used during generation.
    pub layout: Layout,
}

impl ClusteringFixture {
    /// Short description used in failure messages.
    pub(super) fn describe(&self) -> String {
        format!(
            "layout={:?}, n={}, d={}, eps={}, min_points={}",
            self.layout,
            self.points.len(),
            self.points.dimensions(),
            self.params.eps(),
            self.params.min_points(),
        )
    }

    /// Runs `engine` on the fixture through the public entry point.
    pub(super) fn run(&self, engine: Engine, threads: usize) -> Result<Clustering, TestCaseError> {
        let dbscan = DbscanBuilder::new()
            .with_eps(self.params.eps())
            .with_min_points(self.params.min_points())
            .with_threads(threads)
            .with_engine(engine)
            .build()
            .map_err(|error| TestCaseError::fail(format!("build failed: {error}")))?;
        dbscan.run(&self.points).map_err(|error| {
            TestCaseError::fail(format!(
                "{engine} run on {threads} threads failed: {error} ({})",
                self.describe(),
            ))
        })
    }
}
