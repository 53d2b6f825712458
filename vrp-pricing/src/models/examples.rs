use crate::config::{PricingConfig, RouteLimits};
use crate::models::Problem;
use crate::models::fleet::{Carrier, Fleet};
use crate::models::graph::{Depot, GraphBuilder, Stop};
use crate::utils::GenericResult;

/// Creates an example problem: one depot `D` and three stops `A`, `B`, `C` with demands 4, 6 and 5
/// and a single carrier of capacity 20.
///
/// Distances: `D-A=2`, `D-B=3`, `D-C=4`, `A-B=2`, `A-C=5`, `B-C=2`.
pub fn create_example_problem() -> GenericResult<Problem> {
    let config = create_example_config();

    let graph = GraphBuilder::default()
        .add_depot(Depot::new(0))
        .add_stops([Stop::new(0, 4., 10.), Stop::new(1, 6., 10.), Stop::new(2, 5., 10.)])
        .stop_distances(vec![vec![0., 2., 5.], vec![2., 0., 2.], vec![5., 2., 0.]])
        .depot_distances(vec![vec![2., 3., 4.]])
        .arc_threshold(config.arc_threshold())
        .build()?;

    let fleet = Fleet::new(vec![Carrier {
        id: 0,
        depot: 0,
        capacity: 20.,
        min_load_ratio: 0.25,
        max_distance: 15.,
        cost_per_distance: 1.,
        max_uses: 1,
    }])?;

    Problem::new(graph, fleet)
}

/// Creates a pricing config which matches example problem.
pub fn create_example_config() -> PricingConfig {
    PricingConfig {
        limits: RouteLimits { max_visits: 8, max_capacity: 20., max_distance: 15., min_carrier_load: 5. },
        ..PricingConfig::default()
    }
}
