//! Point storage and the squared Euclidean distance shared by every engine.

use std::sync::Arc;

use crate::error::PointSetError;

/// An immutable, ordered collection of points with a common dimension.
///
/// Coordinates are stored row-major in one contiguous buffer so concurrent
/// readers touch a single allocation.
///
/// # Examples
/// ```
/// use dbscan_core::PointSet;
///
/// let points = PointSet::try_from_rows("demo", vec![vec![0.0, 1.0], vec![2.0, 3.0]])?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.dimensions(), 2);
/// assert_eq!(points.point(1), &[2.0, 3.0]);
/// # Ok::<(), dbscan_core::PointSetError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    name: Arc<str>,
    dimensions: usize,
    coordinates: Vec<f64>,
}

impl PointSet {
    /// Builds a point set from one vector per point.
    ///
    /// An empty `rows` vector is accepted and yields an empty set of
    /// dimension zero.
    ///
    /// # Errors
    /// Returns [`PointSetError::ZeroDimension`] when the rows carry no
    /// coordinates, [`PointSetError::DimensionMismatch`] when a row differs
    /// from the first one, and [`PointSetError::NonFinite`] for NaN or
    /// infinite coordinates.
    pub fn try_from_rows(
        name: impl Into<Arc<str>>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, PointSetError> {
        let dimensions = rows.first().map_or(0, Vec::len);
        if !rows.is_empty() && dimensions == 0 {
            return Err(PointSetError::ZeroDimension);
        }

        let mut coordinates = Vec::with_capacity(rows.len().saturating_mul(dimensions));
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dimensions {
                return Err(PointSetError::DimensionMismatch {
                    row,
                    expected: dimensions,
                    actual: values.len(),
                });
            }
            check_finite(row, &values)?;
            coordinates.extend(values);
        }

        Ok(Self {
            name: name.into(),
            dimensions,
            coordinates,
        })
    }

    /// Builds a point set from a row-major coordinate buffer.
    ///
    /// # Errors
    /// Returns [`PointSetError::ZeroDimension`] when `dimensions` is zero for
    /// a non-empty buffer, [`PointSetError::RaggedBuffer`] when the buffer
    /// does not split into whole points, and [`PointSetError::NonFinite`] for
    /// NaN or infinite coordinates.
    ///
    /// # Examples
    /// ```
    /// use dbscan_core::{PointSet, PointSetError};
    ///
    /// let points = PointSet::from_flat("flat", 2, vec![0.0, 0.0, 1.0, 1.0])?;
    /// assert_eq!(points.len(), 2);
    ///
    /// let err = PointSet::from_flat("flat", 2, vec![0.0, 0.0, 1.0]);
    /// assert!(matches!(err, Err(PointSetError::RaggedBuffer { len: 3, dimensions: 2 })));
    /// # Ok::<(), PointSetError>(())
    /// ```
    pub fn from_flat(
        name: impl Into<Arc<str>>,
        dimensions: usize,
        coordinates: Vec<f64>,
    ) -> Result<Self, PointSetError> {
        if coordinates.is_empty() {
            return Ok(Self {
                name: name.into(),
                dimensions,
                coordinates,
            });
        }
        if dimensions == 0 {
            return Err(PointSetError::ZeroDimension);
        }
        if coordinates.len() % dimensions != 0 {
            return Err(PointSetError::RaggedBuffer {
                len: coordinates.len(),
                dimensions,
            });
        }
        for (row, values) in coordinates.chunks_exact(dimensions).enumerate() {
            check_finite(row, values)?;
        }
        Ok(Self {
            name: name.into(),
            dimensions,
            coordinates,
        })
    }

    /// Returns the human-readable name of the set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.dimensions == 0 {
            0
        } else {
            self.coordinates.len() / self.dimensions
        }
    }

    /// Returns whether the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Returns the number of coordinates per point.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Returns the coordinates of point `index`.
    ///
    /// # Panics
    /// Panics when `index >= self.len()`.
    #[must_use]
    pub fn point(&self, index: usize) -> &[f64] {
        let start = index * self.dimensions;
        &self.coordinates[start..start + self.dimensions]
    }

    /// Iterates over the points in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.coordinates.chunks_exact(self.dimensions.max(1))
    }
}

fn check_finite(row: usize, values: &[f64]) -> Result<(), PointSetError> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(column) => Err(PointSetError::NonFinite { row, column }),
        None => Ok(()),
    }
}

/// Squared Euclidean distance between two points of equal dimension.
///
/// Density comparisons are made against `eps²` so no square root is taken.
///
/// # Examples
/// ```
/// use dbscan_core::squared_distance;
///
/// assert_eq!(squared_distance(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
/// ```
#[must_use]
pub fn squared_distance(left: &[f64], right: &[f64]) -> f64 {
    debug_assert_eq!(left.len(), right.len(), "points must share a dimension");
    left.iter()
        .zip(right)
        .map(|(l, r)| {
            let diff = l - r;
            diff * diff
        })
        .sum()
}
