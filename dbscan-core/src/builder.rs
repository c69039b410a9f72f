//! Builder utilities for configuring DBSCAN runs.
//!
//! Exposes the engine selection surface and the validation performed before
//! constructing [`Dbscan`] instances.

use std::{fmt, num::NonZeroUsize};

use crate::{Result, dbscan::Dbscan, error::DbscanError, params::DensityParams};

/// Selects which implementation [`Dbscan::run`] executes.
///
/// Every engine produces the same partition of core and noise points; they
/// differ only in how the work is scheduled.
///
/// # Examples
/// ```
/// use dbscan_core::Engine;
///
/// assert_eq!(Engine::GridParallel.as_str(), "grid");
/// assert!(!Engine::Serial.is_parallel());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Engine {
    /// Breadth-first reference algorithm on the calling thread.
    Serial,
    /// Parallel all-pairs neighbourhoods followed by serial expansion.
    NaiveParallel,
    /// Grid index, parallel core classification and union-find merge.
    GridParallel,
}

impl Engine {
    /// Returns the short name used in summaries and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::NaiveParallel => "naive",
            Self::GridParallel => "grid",
        }
    }

    /// Returns whether the engine runs on a worker pool.
    #[must_use]
    pub const fn is_parallel(self) -> bool {
        !matches!(self, Self::Serial)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configures and constructs [`Dbscan`] instances.
///
/// # Examples
/// ```
/// use dbscan_core::{DbscanBuilder, Engine};
///
/// let dbscan = DbscanBuilder::new()
///     .with_eps(0.5)
///     .with_min_points(4)
///     .with_threads(2)
///     .with_engine(Engine::NaiveParallel)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(dbscan.params().min_points(), 4);
/// assert_eq!(dbscan.threads().get(), 2);
/// assert_eq!(dbscan.engine(), Engine::NaiveParallel);
/// ```
#[derive(Debug, Clone)]
pub struct DbscanBuilder {
    eps: f64,
    min_points: usize,
    threads: usize,
    engine: Engine,
}

impl Default for DbscanBuilder {
    fn default() -> Self {
        Self {
            eps: 1.5,
            min_points: 8,
            threads: 8,
            engine: Engine::GridParallel,
        }
    }
}

impl DbscanBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{DbscanBuilder, Engine};
    ///
    /// let builder = DbscanBuilder::new();
    /// assert_eq!(builder.eps(), 1.5);
    /// assert_eq!(builder.min_points(), 8);
    /// assert_eq!(builder.threads(), 8);
    /// assert_eq!(builder.engine(), Engine::GridParallel);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the neighbourhood radius.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Returns the configured neighbourhood radius.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Overrides the minimum neighbourhood size.
    #[must_use]
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Returns the configured minimum neighbourhood size.
    #[must_use]
    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Overrides the number of worker threads used by parallel engines.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Returns the configured worker thread count.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Selects the engine to run.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{DbscanBuilder, Engine};
    ///
    /// let builder = DbscanBuilder::new().with_engine(Engine::Serial);
    /// assert_eq!(builder.engine(), Engine::Serial);
    /// ```
    #[must_use]
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Returns the configured engine.
    #[must_use]
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Validates the configuration and constructs a [`Dbscan`] instance.
    ///
    /// The radius and minimum neighbourhood size are passed through as-is;
    /// see [`DensityParams`] for how degenerate values behave.
    ///
    /// # Errors
    /// Returns [`DbscanError::InvalidThreadCount`] when the thread count is
    /// zero.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{DbscanBuilder, DbscanError};
    ///
    /// let err = DbscanBuilder::new().with_threads(0).build().unwrap_err();
    /// assert_eq!(err, DbscanError::InvalidThreadCount { got: 0 });
    /// ```
    pub fn build(self) -> Result<Dbscan> {
        let threads = NonZeroUsize::new(self.threads).ok_or(DbscanError::InvalidThreadCount {
            got: self.threads,
        })?;

        Ok(Dbscan::new(
            DensityParams::new(self.eps, self.min_points),
            threads,
            self.engine,
        ))
    }
}
