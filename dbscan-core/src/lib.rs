//! Density-based clustering (DBSCAN) with three interchangeable engines.
//!
//! The crate computes the same clustering three ways so their behaviour and
//! cost can be compared:
//!
//! - [`serial`]: the breadth-first reference algorithm. Every other engine
//!   is validated against it.
//! - [`naive`]: parallel all-pairs neighbourhood search followed by the same
//!   serial expansion.
//! - [`grid`]: a cell-hash spatial index, parallel core classification, a
//!   single-writer union-find merge of core points and parallel border
//!   labelling.
//!
//! [`DbscanBuilder`] configures a run and [`Dbscan::run`] executes it on a
//! dedicated worker pool sized by the configured thread count.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled every run emits:
//! - `dbscan_runs_total` (counter, labelled by `engine`)
//! - `dbscan_core_edges_total` (counter, grid engine only)
//! - `dbscan_clusters` (histogram of clusters found per run)
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod dbscan;
mod error;
pub mod grid;
mod instrumentation;
pub mod naive;
mod params;
mod partition;
mod points;
#[cfg(test)]
mod property;
mod result;
pub mod serial;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{DbscanBuilder, Engine},
    dbscan::Dbscan,
    error::{DbscanError, DbscanErrorCode, PointSetError, PointSetErrorCode, Result},
    params::DensityParams,
    partition::{PartitionMismatch, compare_partitions},
    points::{PointSet, squared_distance},
    result::{ClusterId, Clustering, InvalidClustering, Label, LabelCounts},
};
