//! Metric hooks for clustering runs.
//!
//! Without the `metrics` feature every hook compiles to a no-op.

use crate::builder::Engine;

#[cfg(feature = "metrics")]
pub(crate) fn record_run(engine: Engine, clusters: usize) {
    metrics::counter!("dbscan_runs_total", "engine" => engine.as_str()).increment(1);
    metrics::histogram!("dbscan_clusters").record(clusters as f64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_run(_engine: Engine, _clusters: usize) {}

#[cfg(feature = "metrics")]
pub(crate) fn record_core_edges(edges: usize) {
    metrics::counter!("dbscan_core_edges_total").increment(edges as u64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_core_edges(_edges: usize) {}
