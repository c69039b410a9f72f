//! Line-oriented CSV ingestion.
//!
//! Each line holds one point as comma-separated decimal coordinates.
//! Ingestion is lenient: a line contributes the fields parsed before its
//! first bad one, and lines that end up empty or disagree with the
//! established dimension are skipped.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::Arc,
};

use dbscan_core::PointSet;
use tracing::{debug, info, instrument};

use crate::errors::DenseProviderError;

/// Reads points from `reader`, one per line.
///
/// The first accepted line fixes the dimension. Lines that are not UTF-8,
/// yield no coordinates or have a different dimension are dropped.
///
/// # Errors
/// Returns [`DenseProviderError::Io`] when reading fails.
///
/// # Examples
/// ```
/// use dbscan_providers_dense::read_points;
///
/// let input = "0.5,1.5\n\nnot a number\n2.0,3.0,oops\n4.0\n";
/// let points = read_points("inline", input.as_bytes())?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.point(1), &[2.0, 3.0]);
/// # Ok::<(), dbscan_providers_dense::DenseProviderError>(())
/// ```
#[instrument(name = "ingest.read_points", skip_all, fields(name = %name.as_ref()))]
pub fn read_points<N, R>(name: N, reader: R) -> Result<PointSet, DenseProviderError>
where
    N: AsRef<str>,
    R: BufRead,
{
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut dropped = 0_usize;

    for (line_number, line) in reader.split(b'\n').enumerate() {
        let bytes = line?;
        let Ok(text) = std::str::from_utf8(&bytes) else {
            debug!(line = line_number + 1, "skipping line that is not UTF-8");
            dropped += 1;
            continue;
        };

        let coordinates = parse_coordinates(text);
        if coordinates.is_empty() {
            dropped += 1;
            continue;
        }
        if let Some(expected) = rows.first().map(Vec::len)
            && coordinates.len() != expected
        {
            debug!(
                line = line_number + 1,
                expected,
                actual = coordinates.len(),
                "skipping line with a different dimension"
            );
            dropped += 1;
            continue;
        }
        rows.push(coordinates);
    }

    info!(points = rows.len(), dropped, "points ingested");
    Ok(PointSet::try_from_rows(Arc::from(name.as_ref()), rows)?)
}

/// Opens `path` and reads points from it with [`read_points`].
///
/// # Errors
/// Returns [`DenseProviderError::Open`] when the file cannot be opened and
/// [`DenseProviderError::Io`] when reading fails.
pub fn read_points_from_path(
    name: impl AsRef<str>,
    path: impl AsRef<Path>,
) -> Result<PointSet, DenseProviderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DenseProviderError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_points(name, BufReader::new(file))
}

/// Parses leading comma-separated coordinates, stopping at the first field
/// that is not a finite decimal.
pub(crate) fn parse_coordinates(line: &str) -> Vec<f64> {
    line.trim_end_matches('\r')
        .split(',')
        .map(|field| field.trim().parse::<f64>())
        .map_while(|parsed| parsed.ok().filter(|value| value.is_finite()))
        .collect()
}
