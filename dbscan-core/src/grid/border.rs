//! Parallel border labelling.

use rayon::prelude::*;
use tracing::instrument;

use super::SpatialGrid;
use crate::{
    points::{PointSet, squared_distance},
    result::Label,
};

/// Completes the label array from the finished core labels.
///
/// Core points keep their label. Every other point takes the label of the
/// first core point within `eps` in candidate order, or stays noise. When a
/// point touches several clusters the choice follows that scan order.
#[instrument(name = "grid.border", skip_all, fields(items = points.len()))]
pub(super) fn label_borders(
    points: &PointSet,
    grid: &SpatialGrid,
    core: &[bool],
    core_labels: &[Label],
    eps_squared: f64,
) -> Vec<Label> {
    (0..points.len())
        .into_par_iter()
        .map(|index| {
            if core[index] {
                return core_labels[index];
            }
            let origin = points.point(index);
            grid.candidates(origin)
                .find(|&candidate| {
                    core[candidate]
                        && squared_distance(origin, points.point(candidate)) <= eps_squared
                })
                .map_or(Label::Noise, |candidate| core_labels[candidate])
        })
        .collect()
}
