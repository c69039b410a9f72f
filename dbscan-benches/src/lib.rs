//! Benchmark support crate for the DBSCAN engines.
//!
//! Provides the dataset and parameter types shared by the Criterion
//! benchmarks that compare the serial, naive parallel and grid-indexed
//! engines on two-blob data.

pub mod error;
pub mod params;
