//! Benchmark parameter types and dataset construction.

use std::fmt;

use dbscan_core::{Dbscan, DbscanBuilder, Engine, PointSet};
use dbscan_providers_dense::{TwoBlobConfig, generate_two_blobs};

use crate::error::BenchSetupError;

/// Seed used for every generated dataset.
pub const SEED: u64 = 42;

/// Radius used by the engine comparison, matching the CLI default.
pub const EPS: f64 = 1.5;

/// Core threshold used by the engine comparison, matching the CLI default.
pub const MIN_POINTS: usize = 8;

/// Parameters identifying one engine benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineBenchParams {
    /// Engine under test.
    pub engine: Engine,
    /// Worker threads for parallel engines.
    pub threads: usize,
    /// Number of points in the dataset.
    pub point_count: usize,
}

impl EngineBenchParams {
    /// Builds the runner for this configuration.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Core`] when `threads` is zero.
    pub fn runner(&self) -> Result<Dbscan, BenchSetupError> {
        Ok(DbscanBuilder::new()
            .with_eps(EPS)
            .with_min_points(MIN_POINTS)
            .with_threads(self.threads)
            .with_engine(self.engine)
            .build()?)
    }
}

impl fmt::Display for EngineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.engine.is_parallel() {
            write!(f, "{}/t={},n={}", self.engine, self.threads, self.point_count)
        } else {
            write!(f, "{}/n={}", self.engine, self.point_count)
        }
    }
}

/// Generates the seeded two-dimensional two-blob dataset of `point_count`
/// points.
///
/// # Errors
/// Returns [`BenchSetupError::Synthetic`] when generation fails.
pub fn two_blob_points(point_count: usize) -> Result<PointSet, BenchSetupError> {
    Ok(generate_two_blobs(&TwoBlobConfig {
        point_count,
        dimensions: 2,
        seed: SEED,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(Engine::Serial, 8, "serial/n=1000")]
    #[case(Engine::NaiveParallel, 4, "naive/t=4,n=1000")]
    #[case(Engine::GridParallel, 8, "grid/t=8,n=1000")]
    fn display_names_parallel_threads_only(
        #[case] engine: Engine,
        #[case] threads: usize,
        #[case] expected: &str,
    ) {
        let params = EngineBenchParams {
            engine,
            threads,
            point_count: 1_000,
        };
        assert_eq!(params.to_string(), expected);
    }

    #[test]
    fn zero_threads_fail_setup() {
        let params = EngineBenchParams {
            engine: Engine::GridParallel,
            threads: 0,
            point_count: 10,
        };
        assert!(matches!(params.runner(), Err(BenchSetupError::Core(_))));
    }

    #[test]
    fn datasets_are_seeded() {
        let first = two_blob_points(64).expect("generation must succeed");
        let second = two_blob_points(64).expect("generation must succeed");
        assert_eq!(first.len(), 64);
        assert!(first.iter().eq(second.iter()));
    }
}
