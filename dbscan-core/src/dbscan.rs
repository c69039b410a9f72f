//! Run orchestration for the DBSCAN engines.
//!
//! Provides the [`Dbscan`] entry point, which dispatches to the configured
//! engine and owns the worker pool used by the parallel ones.

use std::{num::NonZeroUsize, sync::Arc};

use rayon::ThreadPoolBuilder;
use tracing::{info, instrument};

use crate::{
    Result,
    builder::Engine,
    error::DbscanError,
    grid, instrumentation, naive,
    params::DensityParams,
    points::PointSet,
    result::Clustering,
    serial,
};

/// Entry point for clustering a [`PointSet`].
///
/// # Examples
/// ```
/// use dbscan_core::{DbscanBuilder, PointSet};
///
/// let points = PointSet::try_from_rows(
///     "line",
///     vec![vec![0.0, 0.0], vec![0.1, 0.0], vec![0.2, 0.0], vec![10.0, 10.0]],
/// )?;
/// let dbscan = DbscanBuilder::new()
///     .with_eps(0.5)
///     .with_min_points(2)
///     .with_threads(2)
///     .build()?;
/// let clustering = dbscan.run(&points)?;
/// assert_eq!(clustering.cluster_count(), 1);
/// assert_eq!(clustering.counts().noise, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dbscan {
    params: DensityParams,
    threads: NonZeroUsize,
    engine: Engine,
}

impl Dbscan {
    pub(crate) fn new(params: DensityParams, threads: NonZeroUsize, engine: Engine) -> Self {
        Self {
            params,
            threads,
            engine,
        }
    }

    /// Returns the density parameters used by every run.
    #[must_use]
    pub fn params(&self) -> DensityParams {
        self.params
    }

    /// Returns the worker count used by parallel engines.
    #[must_use]
    pub fn threads(&self) -> NonZeroUsize {
        self.threads
    }

    /// Returns the configured engine.
    #[must_use]
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Clusters `points` with the configured engine.
    ///
    /// The serial engine runs on the calling thread. Parallel engines run on
    /// a pool of exactly [`Self::threads`] workers built for this call, so
    /// concurrent runs with different thread counts do not interfere.
    ///
    /// # Errors
    /// Returns [`DbscanError::ThreadPool`] when the worker pool cannot be
    /// created.
    #[instrument(
        name = "dbscan.run",
        err,
        skip(self, points),
        fields(
            points = %points.name(),
            items = points.len(),
            dimensions = points.dimensions(),
            eps = self.params.eps(),
            min_points = self.params.min_points(),
            engine = %self.engine,
        ),
    )]
    pub fn run(&self, points: &PointSet) -> Result<Clustering> {
        let clustering = match self.engine {
            Engine::Serial => serial::cluster(points, self.params),
            Engine::NaiveParallel => self.in_pool(|| naive::cluster(points, self.params))?,
            Engine::GridParallel => self.in_pool(|| grid::cluster(points, self.params))?,
        };

        let counts = clustering.counts();
        info!(
            clusters = counts.clusters,
            core = counts.core,
            border = counts.border,
            noise = counts.noise,
            "clustering completed"
        );
        instrumentation::record_run(self.engine, counts.clusters);
        Ok(clustering)
    }

    fn in_pool<F>(&self, job: F) -> Result<Clustering>
    where
        F: FnOnce() -> Clustering + Send,
    {
        let threads = self.threads.get();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("dbscan-worker-{index}"))
            .build()
            .map_err(|error| DbscanError::ThreadPool {
                threads,
                message: Arc::from(error.to_string()),
            })?;
        Ok(pool.install(job))
    }
}
