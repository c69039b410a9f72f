//! Strategy builders for clustering property tests.
//!
//! Every fixture is derived from a layout and a seed so rstest cases can
//! replay the exact inputs proptest explores.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{DensityParams, PointSet};

use super::types::{ClusteringFixture, Layout};

/// Upper bound on generated point counts. The reference engine is quadratic.
const MAX_POINTS: usize = 96;

/// Generates fixtures across every layout.
pub(super) fn clustering_fixture_strategy() -> impl Strategy<Value = ClusteringFixture> {
    (any::<Layout>(), any::<u64>()).prop_map(|(layout, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(layout, &mut rng)
    })
}

/// Generates a fixture for a specific layout.
pub(super) fn generate_fixture(layout: Layout, rng: &mut SmallRng) -> ClusteringFixture {
    let (rows, params) = match layout {
        Layout::Uniform => generate_uniform(rng),
        Layout::Blobs => generate_blobs(rng),
        Layout::Duplicates => generate_duplicates(rng),
        Layout::Lattice => generate_lattice(rng),
        Layout::HighDimensional => generate_high_dimensional(rng),
    };
    let points = PointSet::try_from_rows(format!("{layout:?}"), rows)
        .expect("generated rows must form a valid point set");
    ClusteringFixture {
        points,
        params,
        layout,
    }
}

fn random_rows(
    rng: &mut SmallRng,
    count: usize,
    dimensions: usize,
    span: f64,
) -> Vec<Vec<f64>> {
    (0..count)
        .map(|_| (0..dimensions).map(|_| rng.gen_range(-span..span)).collect())
        .collect()
}

fn generate_uniform(rng: &mut SmallRng) -> (Vec<Vec<f64>>, DensityParams) {
    let count = rng.gen_range(0..=MAX_POINTS);
    let dimensions = rng.gen_range(1..=3);
    let rows = random_rows(rng, count, dimensions, 5.0);
    let params = DensityParams::new(rng.gen_range(0.3..2.0), rng.gen_range(1..=6));
    (rows, params)
}

fn generate_blobs(rng: &mut SmallRng) -> (Vec<Vec<f64>>, DensityParams) {
    let centre_count = rng.gen_range(2..=4);
    let centres = random_rows(rng, centre_count, 2, 20.0);
    let count = rng.gen_range(8..=MAX_POINTS);
    let rows = (0..count)
        .map(|index| {
            if index % 7 == 0 {
                // Sparse background noise.
                vec![rng.gen_range(-25.0..25.0), rng.gen_range(-25.0..25.0)]
            } else {
                let centre = &centres[index % centres.len()];
                centre
                    .iter()
                    .map(|value| value + rng.gen_range(-1.0..1.0))
                    .collect()
            }
        })
        .collect();
    let params = DensityParams::new(rng.gen_range(0.4..1.5), rng.gen_range(2..=5));
    (rows, params)
}

fn generate_duplicates(rng: &mut SmallRng) -> (Vec<Vec<f64>>, DensityParams) {
    let site_count = rng.gen_range(1..=6);
    let sites = random_rows(rng, site_count, 2, 3.0);
    let count = rng.gen_range(1..=MAX_POINTS / 2);
    let rows = (0..count)
        .map(|_| sites[rng.gen_range(0..sites.len())].clone())
        .collect();
    let eps = if rng.gen_bool(0.5) { 0.0 } else { 1e-9 };
    let params = DensityParams::new(eps, rng.gen_range(1..=4));
    (rows, params)
}

fn generate_lattice(rng: &mut SmallRng) -> (Vec<Vec<f64>>, DensityParams) {
    let width: i32 = rng.gen_range(1..=8);
    let rows = (0..width * width)
        .filter(|_| rng.gen_bool(0.8))
        .map(|cell| vec![f64::from(cell % width), f64::from(cell / width)])
        .collect();
    let params = DensityParams::new(1.0, rng.gen_range(1..=5));
    (rows, params)
}

fn generate_high_dimensional(rng: &mut SmallRng) -> (Vec<Vec<f64>>, DensityParams) {
    let dimensions = rng.gen_range(3..=6);
    let count = rng.gen_range(0..=MAX_POINTS);
    let rows = (0..count)
        .map(|_| {
            (0..dimensions)
                .map(|axis| {
                    let span = if axis < 2 { 0.5 } else { 4.0 };
                    rng.gen_range(-span..span)
                })
                .collect()
        })
        .collect();
    let params = DensityParams::new(rng.gen_range(0.8..2.5), rng.gen_range(1..=4));
    (rows, params)
}
