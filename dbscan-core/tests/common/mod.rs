//! Fixtures shared by the `dbscan-core` integration tests.

use dbscan_core::{Clustering, DbscanBuilder, Engine, PointSet};

/// Three points on a short line plus one far outlier.
pub fn line_with_outlier() -> PointSet {
    PointSet::try_from_rows(
        "line",
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.2, 0.0],
            vec![10.0, 10.0],
        ],
    )
    .expect("fixture rows are valid")
}

/// Two square grids of points far apart, each dense enough to be a cluster.
pub fn two_squares() -> PointSet {
    let square = |origin: f64| {
        (0..9).map(move |cell: i32| {
            vec![
                origin + f64::from(cell % 3) * 0.5,
                origin + f64::from(cell / 3) * 0.5,
            ]
        })
    };
    PointSet::try_from_rows("squares", square(0.0).chain(square(50.0)).collect())
        .expect("fixture rows are valid")
}

/// Runs `engine` with the given configuration.
pub fn run(
    points: &PointSet,
    engine: Engine,
    threads: usize,
    eps: f64,
    min_points: usize,
) -> Clustering {
    DbscanBuilder::new()
        .with_engine(engine)
        .with_threads(threads)
        .with_eps(eps)
        .with_min_points(min_points)
        .build()
        .expect("configuration is valid")
        .run(points)
        .expect("run must succeed")
}
