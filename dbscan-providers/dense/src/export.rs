//! Result export.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use dbscan_core::{Clustering, PointSet};
use tracing::instrument;

use crate::errors::DenseProviderError;

/// Writes one line per point: up to its first two coordinates followed by
/// `1` for clustered points or `0` for noise, comma separated.
///
/// # Errors
/// Returns [`DenseProviderError::LabelCountMismatch`] when `clustering` does
/// not describe every point, and [`DenseProviderError::Io`] when writing
/// fails.
///
/// # Examples
/// ```
/// use dbscan_core::{DensityParams, PointSet, serial};
/// use dbscan_providers_dense::write_labels;
///
/// let points = PointSet::try_from_rows("demo", vec![vec![0.0, 1.0, 2.0], vec![9.0, 9.0, 9.0]])?;
/// let clustering = serial::cluster(&points, DensityParams::new(1.0, 1));
/// let mut out = Vec::new();
/// write_labels(&mut out, &points, &clustering)?;
/// assert_eq!(String::from_utf8(out)?, "0,1,1\n9,9,1\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_labels<W: Write>(
    mut writer: W,
    points: &PointSet,
    clustering: &Clustering,
) -> Result<(), DenseProviderError> {
    if clustering.len() != points.len() {
        return Err(DenseProviderError::LabelCountMismatch {
            points: points.len(),
            labels: clustering.len(),
        });
    }
    for (point, label) in points.iter().zip(clustering.labels()) {
        for coordinate in point.iter().take(2) {
            write!(writer, "{coordinate},")?;
        }
        writeln!(writer, "{}", u8::from(!label.is_noise()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates `path` and writes the labels to it with [`write_labels`].
///
/// # Errors
/// Returns [`DenseProviderError::Create`] when the file cannot be created,
/// otherwise the errors of [`write_labels`].
#[instrument(
    name = "export.write_labels",
    skip_all,
    fields(path = %path.as_ref().display(), points = points.len()),
)]
pub fn write_labels_to_path(
    path: impl AsRef<Path>,
    points: &PointSet,
    clustering: &Clustering,
) -> Result<(), DenseProviderError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| DenseProviderError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_labels(BufWriter::new(file), points, clustering)
}
