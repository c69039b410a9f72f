use std::{io, path::PathBuf};

use dbscan_core::PointSetError;
use thiserror::Error;

/// Errors raised while reading or writing delimited point files.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DenseProviderError {
    #[error("failed to open `{}`: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to create `{}`: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("{labels} labels cannot describe {points} points")]
    LabelCountMismatch { points: usize, labels: usize },
    #[error("invalid point set: {0}")]
    PointSet(#[from] PointSetError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that may occur while generating synthetic point sets.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SyntheticError {
    /// Points were requested without any coordinates.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
    /// The requested `point_count * dimensions` overflowed `usize`.
    #[error("point_count * dimensions overflows usize")]
    Overflow,
    /// The generated coordinates did not form a valid point set.
    #[error("invalid point set: {0}")]
    PointSet(#[from] PointSetError),
}
