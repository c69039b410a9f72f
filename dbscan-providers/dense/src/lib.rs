//! Dense point providers: CSV ingestion, label export and synthetic blobs.
//!
//! Everything here produces or consumes a [`dbscan_core::PointSet`] held in
//! one contiguous row-major buffer.

mod errors;
mod export;
mod ingest;
mod synthetic;

pub use errors::{DenseProviderError, SyntheticError};
pub use export::{write_labels, write_labels_to_path};
pub use ingest::{read_points, read_points_from_path};
pub use synthetic::{TwoBlobConfig, generate_two_blobs};
