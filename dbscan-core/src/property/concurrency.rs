//! Property 3: worker-count invariance.
//!
//! Runs each parallel engine on 1, 2 and 8 workers and requires identical
//! labels. Lane buffers are concatenated in index order and border scans
//! follow bucket order, so even the ids must not move.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::Engine;

use super::types::ClusteringFixture;

/// Worker counts every parallel engine is exercised with.
pub(super) const THREAD_COUNTS: [usize; 3] = [1, 2, 8];

/// Runs the worker-count invariance property for the given fixture.
pub(super) fn run_thread_invariance_property(fixture: &ClusteringFixture) -> TestCaseResult {
    for engine in [Engine::NaiveParallel, Engine::GridParallel] {
        let baseline = fixture.run(engine, THREAD_COUNTS[0])?;
        for threads in &THREAD_COUNTS[1..] {
            let result = fixture.run(engine, *threads)?;
            if result != baseline {
                return Err(TestCaseError::fail(format!(
                    "{engine} on {threads} threads diverged from {} thread ({})",
                    THREAD_COUNTS[0],
                    fixture.describe(),
                )));
            }
        }
    }
    Ok(())
}
