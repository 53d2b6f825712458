use crate::config::{PricingConfig, RouteLimits};
use crate::models::duals::DualPrices;
use crate::models::fleet::{Carrier, Fleet};
use crate::models::graph::{Depot, Graph, GraphBuilder, Stop};
use crate::models::order::{Order, Route, VisitedKey};
use crate::models::{CarrierId, Coordinate, DepotId, Distance, Load, Node, Problem, StopId};
use crate::pricing::PricingContext;
use crate::pricing::price::stop_values;
use crate::utils::{Environment, Float};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::sync::Arc;

pub fn test_stop(id: StopId, demand: Load) -> Stop {
    Stop::new(id, demand, 10.)
}

pub fn test_carrier(id: CarrierId, depot: DepotId, capacity: Load, min_load_ratio: Float) -> Carrier {
    Carrier { id, depot, capacity, min_load_ratio, max_distance: 100., cost_per_distance: 1., max_uses: 1 }
}

pub fn test_environment() -> Arc<Environment> {
    Arc::new(Environment::silent())
}

pub fn create_test_graph(
    stops: Vec<Stop>,
    stop_matrix: Vec<Vec<Distance>>,
    depot_matrix: Vec<Vec<Distance>>,
    arc_threshold: Option<Distance>,
) -> Graph {
    let builder = (0..depot_matrix.len())
        .fold(GraphBuilder::default(), |builder, depot| builder.add_depot(Depot::new(depot)))
        .add_stops(stops)
        .stop_distances(stop_matrix)
        .depot_distances(depot_matrix);

    let builder = match arc_threshold {
        Some(threshold) => builder.arc_threshold(threshold),
        None => builder,
    };

    builder.build().expect("cannot build test graph")
}

pub fn create_test_problem(graph: Graph, carriers: Vec<Carrier>) -> Problem {
    Problem::new(graph, Fleet::new(carriers).expect("cannot create fleet")).expect("cannot create problem")
}

/// Creates a problem with two depots which share no arcs: depot 0 serves stops 0 and 1,
/// depot 1 serves stops 2 and 3.
pub fn create_two_depot_problem() -> Problem {
    let far = 100.;
    let graph = create_test_graph(
        (0..4).map(|id| test_stop(id, 5.)).collect(),
        vec![vec![0., 1., far, far], vec![1., 0., far, far], vec![far, far, 0., 1.], vec![far, far, 1., 0.]],
        vec![vec![1., 2., far, far], vec![far, far, 1., 2.]],
        Some(10.),
    );

    create_test_problem(graph, vec![test_carrier(0, 0, 20., 0.25), test_carrier(1, 1, 20., 0.25)])
}

pub fn create_test_route(problem: &Problem, depot: DepotId, stops: Vec<StopId>) -> Route {
    let graph = &problem.graph;
    let nodes = std::iter::once(Node::Depot(depot))
        .chain(stops.iter().map(|&stop| Node::Stop(stop)))
        .chain(std::iter::once(Node::Depot(depot)))
        .collect::<Vec<_>>();

    let distance = nodes.windows(2).map(|pair| graph.matrix_distance(pair[0], pair[1]).unwrap_or(0.)).sum();
    let load = stops.iter().map(|&stop| graph.stop(stop).map_or(0., |stop| stop.demand)).sum();

    Route::new(graph.size(), depot, stops, distance, load)
}

pub fn create_test_order(id: usize, route: Route, carrier: CarrierId, dispatch: Vec<(StopId, Load)>) -> Order {
    Order { id, route, carrier, dispatch, primal_price: 0., reduced_cost: 0. }
}

pub fn create_test_context<'a>(
    problem: &'a Problem,
    config: &'a PricingConfig,
    environment: &'a Environment,
    duals: &'a DualPrices,
    emitted: &'a FxHashMap<VisitedKey, Distance>,
) -> PricingContext<'a> {
    let values = stop_values(&problem.graph, duals, config.dual_multiplier).expect("cannot compute values");

    PricingContext {
        problem,
        config,
        environment,
        duals,
        values,
        emitted,
        time_limit: 100.,
        order_limit: usize::MAX,
        reserved: 0,
    }
}

/// Generates a random problem with euclidean distances on a 10x10 square.
pub fn generate_problem(seed: u64, depots: usize, stops: usize) -> (Problem, PricingConfig) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut coordinate = || Coordinate { lng: rng.gen_range(0.0..10.0), lat: rng.gen_range(0.0..10.0) };

    let depot_coordinates = (0..depots).map(|_| coordinate()).collect::<Vec<_>>();
    let stop_coordinates = (0..stops).map(|_| coordinate()).collect::<Vec<_>>();
    let distance = |a: &Coordinate, b: &Coordinate| ((a.lng - b.lng).powi(2) + (a.lat - b.lat).powi(2)).sqrt();

    let stop_list = stop_coordinates
        .iter()
        .enumerate()
        .map(|(id, coordinate)| {
            let demand = rng.gen_range(1.0..6.0);
            Stop::new(id, demand, rng.gen_range(5.0..15.0))
                .with_dispatch(rng.gen_range(0.0..1.0), demand + 2.)
                .with_coordinate(*coordinate)
        })
        .collect::<Vec<_>>();

    let stop_matrix =
        stop_coordinates.iter().map(|from| stop_coordinates.iter().map(|to| distance(from, to)).collect()).collect();
    let depot_matrix =
        depot_coordinates.iter().map(|from| stop_coordinates.iter().map(|to| distance(from, to)).collect()).collect();

    let config = PricingConfig {
        limits: RouteLimits { max_visits: 4, max_capacity: 20., max_distance: 30., min_carrier_load: 3. },
        log_interval: 0,
        ..PricingConfig::default()
    };

    let graph = GraphBuilder::default()
        .add_stops(stop_list)
        .stop_distances(stop_matrix)
        .depot_distances(depot_matrix);
    let graph = depot_coordinates
        .iter()
        .enumerate()
        .fold(graph, |graph, (id, coordinate)| graph.add_depot(Depot::new(id).with_coordinate(*coordinate)))
        .arc_threshold(config.arc_threshold())
        .build()
        .expect("cannot build generated graph");

    let carriers = (0..depots)
        .flat_map(|depot| [(depot, 12., 0.3), (depot, 20., 0.5)])
        .enumerate()
        .map(|(id, (depot, capacity, ratio))| Carrier {
            id,
            depot,
            capacity,
            min_load_ratio: ratio,
            max_distance: 30.,
            cost_per_distance: 1.,
            max_uses: 1,
        })
        .collect();

    (create_test_problem(graph, carriers), config)
}
