//! Shared test utilities for `dbscan-core`.

use dbscan_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::PointSet;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `DBSCAN_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a point set from borrowed rows.
///
/// # Panics
/// Panics when the rows do not form a valid point set.
#[must_use]
pub(crate) fn points_from(rows: &[&[f64]]) -> PointSet {
    PointSet::try_from_rows("fixture", rows.iter().map(|row| row.to_vec()).collect())
        .expect("fixture rows must form a valid point set")
}

/// Three points on a short line plus one far outlier.
///
/// With `eps = 0.5` and `min_points = 2` this yields one cluster and one
/// noise point.
#[must_use]
pub(crate) fn line_with_outlier() -> PointSet {
    points_from(&[&[0.0, 0.0], &[0.1, 0.0], &[0.2, 0.0], &[10.0, 10.0]])
}
