//! Property 2: density invariants.
//!
//! Every result must flag exactly the points with a dense neighbourhood as
//! core, leave noise only where no core point is within `eps`, and account
//! for every point exactly once.

use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

use crate::{Clustering, Engine, Label, squared_distance};

use super::types::ClusteringFixture;

/// Runs the density invariants property against every engine.
pub(super) fn run_density_invariants_property(fixture: &ClusteringFixture) -> TestCaseResult {
    for engine in [Engine::Serial, Engine::NaiveParallel, Engine::GridParallel] {
        let clustering = fixture.run(engine, 2)?;
        check_density_invariants(fixture, &clustering)
            .map_err(|error| error_with_engine(error, engine))?;
    }
    Ok(())
}

fn error_with_engine(error: TestCaseError, engine: Engine) -> TestCaseError {
    match error {
        TestCaseError::Fail(reason) => TestCaseError::fail(format!("{engine}: {reason}")),
        other => other,
    }
}

fn check_density_invariants(fixture: &ClusteringFixture, clustering: &Clustering) -> TestCaseResult {
    let points = &fixture.points;
    let eps_squared = fixture.params.eps_squared();
    let within = |left: usize, right: usize| {
        squared_distance(points.point(left), points.point(right)) <= eps_squared
    };
    prop_assert_eq!(clustering.len(), points.len());

    for index in 0..points.len() {
        let neighbours = (0..points.len()).filter(|&other| within(index, other)).count();
        prop_assert_eq!(
            clustering.is_core(index),
            neighbours >= fixture.params.min_points(),
            "core flag of point {} with {} neighbours ({})",
            index,
            neighbours,
            fixture.describe(),
        );

        match clustering.labels()[index] {
            Label::Noise => {
                let touches_core = (0..points.len())
                    .any(|other| clustering.is_core(other) && within(index, other));
                prop_assert!(
                    !touches_core,
                    "noise point {} has a core neighbour ({})",
                    index,
                    fixture.describe(),
                );
            }
            Label::Cluster(id) => {
                let attached = clustering.is_core(index)
                    || (0..points.len()).any(|other| {
                        clustering.is_core(other)
                            && within(index, other)
                            && clustering.labels()[other] == Label::Cluster(id)
                    });
                prop_assert!(
                    attached,
                    "border point {} is detached from cluster {} ({})",
                    index,
                    id.get(),
                    fixture.describe(),
                );
            }
        }
    }

    let counts = clustering.counts();
    prop_assert_eq!(counts.total(), points.len());
    let revalidated = Clustering::try_new(
        clustering.labels().to_vec(),
        clustering.core_flags().to_vec(),
    );
    prop_assert_eq!(
        revalidated.map(|checked| checked.cluster_count()),
        Ok(clustering.cluster_count())
    );
    Ok(())
}
