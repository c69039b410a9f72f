//! Benchmark setup error type.
//!
//! Setup helpers propagate failures with `?` and the bench entry points turn
//! them into a single panic message.

use dbscan_core::DbscanError;
use dbscan_providers_dense::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic point generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The runner rejected its configuration or failed to start its pool.
    #[error("clustering setup failed: {0}")]
    Core(#[from] DbscanError),
}
