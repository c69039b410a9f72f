//! Cell-hash spatial index over the first two coordinates.

use std::{collections::HashMap, ops::RangeInclusive, vec};

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::points::PointSet;

/// Integer cell coordinates.
pub(crate) type CellKey = (i64, i64);

/// Relative widening of the query reach. It exceeds the rounding error of
/// the squared-distance test by several orders of magnitude, so every pair
/// that test accepts is within reach along each axis.
const REACH_SLACK: f64 = 1e-9;

/// Widest per-axis cell span walked as a plain integer range.
const DENSE_SPAN: u64 = 3;

/// Buckets point indices by the `eps`-sided cell of their first two
/// coordinates.
///
/// Immutable once built, so any number of workers may query it at once.
#[derive(Debug, Clone)]
pub(crate) struct SpatialGrid {
    side: f64,
    reach: f64,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    /// Indexes every point of `points` with cell side `side`.
    ///
    /// Lanes of the current rayon pool fill private `(cell, index)` buffers
    /// which are then merged on the calling thread. Buckets list their
    /// indices in ascending order.
    #[instrument(name = "grid.index", skip_all, fields(items = points.len()))]
    pub(crate) fn build(points: &PointSet, side: f64) -> Self {
        let lanes: Vec<Vec<(CellKey, usize)>> = (0..points.len())
            .into_par_iter()
            .fold(Vec::new, |mut lane, index| {
                lane.push((cell_of(points.point(index), side), index));
                lane
            })
            .collect();

        let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::new();
        for (key, index) in lanes.into_iter().flatten() {
            cells.entry(key).or_default().push(index);
        }
        debug!(cells = cells.len(), "spatial grid built");
        Self {
            side,
            reach: reach_for(side),
            cells,
        }
    }

    /// Returns the number of occupied cells.
    #[cfg(test)]
    pub(crate) fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Yields every indexed point in the cells overlapping the square of
    /// half-width `eps` (plus a rounding margin) around `point`.
    ///
    /// Usually this is the 3×3 block around the point's own cell, and a
    /// 4-cell span on an axis where the point sits on a cell edge.
    /// Candidates are a superset of the neighbourhood and must still be
    /// filtered by exact distance.
    pub(crate) fn candidates<'a>(&'a self, point: &[f64]) -> impl Iterator<Item = usize> + 'a {
        let (x, y) = planar(point);
        let rows = self.axis_cells(y);
        self.axis_cells(x)
            .flat_map(move |column| rows.clone().map(move |row| (column, row)))
            .filter_map(move |key| self.cells.get(&key))
            .flat_map(|bucket| bucket.iter().copied())
    }

    /// Cells on one axis that may hold a point within reach of `value`.
    ///
    /// Division and flooring are monotone, so any coordinate inside
    /// `[value - reach, value + reach]` lands in a cell between the two
    /// returned ends.
    fn axis_cells(&self, value: f64) -> AxisCells {
        let low = (value - self.reach) / self.side;
        let high = (value + self.reach) / self.side;
        let (first, last) = (low.floor() as i64, high.floor() as i64);
        if last.abs_diff(first) <= DENSE_SPAN {
            return AxisCells::Span(first..=last);
        }

        // Quotients past 2^52 are spaced at least one cell apart; visit only
        // the representable ones instead of every integer in between.
        let mut cells = Vec::new();
        let mut quotient = low;
        while quotient <= high {
            let cell = quotient.floor() as i64;
            if cells.last() != Some(&cell) {
                cells.push(cell);
            }
            quotient = quotient.next_up();
        }
        AxisCells::Stepped(cells.into_iter())
    }
}

/// Cell indices along one axis, in ascending order.
#[derive(Clone)]
enum AxisCells {
    Span(RangeInclusive<i64>),
    Stepped(vec::IntoIter<i64>),
}

impl Iterator for AxisCells {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        match self {
            Self::Span(cells) => cells.next(),
            Self::Stepped(cells) => cells.next(),
        }
    }
}

/// Search reach for cells of side `side`.
///
/// A non-positive or NaN side means only exact duplicates are neighbours,
/// and those always share a cell.
fn reach_for(side: f64) -> f64 {
    if side.is_nan() || side <= 0.0 {
        return 0.0;
    }
    let reach = side * (1.0 + REACH_SLACK);
    if reach.is_finite() { reach } else { side }
}

/// The first two coordinates, with a missing one counted as `0`.
fn planar(point: &[f64]) -> (f64, f64) {
    (
        point.first().copied().unwrap_or(0.0),
        point.get(1).copied().unwrap_or(0.0),
    )
}

/// Maps a point to its cell.
///
/// Float-to-integer casts saturate, so huge quotients and the infinities
/// produced by a zero side land in the extreme cells, and NaN lands in
/// cell `0`. Equal coordinates always share a cell.
pub(crate) fn cell_of(point: &[f64], side: f64) -> CellKey {
    let (x, y) = planar(point);
    let axis = |value: f64| (value / side).floor() as i64;
    (axis(x), axis(y))
}
