//! Property 1: equivalence with the reference engine.
//!
//! For any generated input, both parallel engines must partition the points
//! the same way as the breadth-first engine, up to cluster renaming and the
//! placement of border points touching several clusters.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{Engine, compare_partitions, serial};

use super::types::ClusteringFixture;

/// Runs the reference equivalence property for the given fixture.
pub(super) fn run_reference_equivalence_property(fixture: &ClusteringFixture) -> TestCaseResult {
    let reference = serial::cluster(&fixture.points, fixture.params);

    for engine in [Engine::NaiveParallel, Engine::GridParallel] {
        let candidate = fixture.run(engine, 2)?;
        compare_partitions(&fixture.points, fixture.params, &reference, &candidate).map_err(
            |mismatch| {
                TestCaseError::fail(format!(
                    "{engine} disagrees with the reference: {mismatch} ({})",
                    fixture.describe(),
                ))
            },
        )?;
    }

    // The naive engine shares the reference expansion, so its labels match
    // exactly rather than only as a partition.
    let naive = fixture.run(Engine::NaiveParallel, 2)?;
    if naive != reference {
        return Err(TestCaseError::fail(format!(
            "naive labels diverged from the reference ({})",
            fixture.describe(),
        )));
    }
    Ok(())
}
