//! Property-based tests for the clustering engines.
//!
//! Checks the parallel engines against the breadth-first reference engine,
//! validates the density invariants every result must satisfy, and re-runs
//! the parallel engines across worker counts to catch scheduling-dependent
//! output.

mod concurrency;
mod equivalence;
mod strategies;
mod structural;
mod types;
