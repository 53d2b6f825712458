use super::*;
use crate::algorithms::structures::BitVec;
use crate::config::{PricingConfig, RouteLimits};
use crate::helpers::models::*;
use crate::models::examples::{create_example_config, create_example_problem};
use crate::models::duals::DualPrices;
use crate::models::{DepotId, Node, Problem};
use crate::pricing::label::{Direction, Label, Resources};
use crate::utils::Environment;

fn push_path(
    arena: &mut LabelArena,
    problem: &Problem,
    direction: Direction,
    depot: DepotId,
    stops: &[StopId],
) -> LabelId {
    let graph = &problem.graph;
    let seed = arena.push(Label::seed(direction, depot, graph.size())).unwrap();

    stops.iter().fold(seed, |parent, &stop| {
        let label = arena.get(parent);
        let arc = match direction {
            Direction::Forward => graph.matrix_distance(label.node(), Node::Stop(stop)),
            Direction::Backward => graph.matrix_distance(Node::Stop(stop), label.node()),
        }
        .unwrap();
        let demand = graph.stop(stop).unwrap().demand;

        let child = label.extend(parent, stop, arc, demand).unwrap();
        arena.push(child).unwrap()
    })
}

fn sink(
    arena: &mut LabelArena,
    problem: &Problem,
    direction: Direction,
    depot: DepotId,
    stops: &[StopId],
) -> SinkEntry {
    let id = push_path(arena, problem, direction, depot, stops);
    SinkEntry::new(arena, id)
}

struct ConnectionRun {
    orders: OrderPool,
    statistics: PricingStatistics,
}

fn connect_all(
    problem: &Problem,
    config: &PricingConfig,
    emitted: &FxHashMap<VisitedKey, Distance>,
    pairs: Vec<(Vec<StopId>, Vec<StopId>)>,
) -> ConnectionRun {
    let environment = Environment::silent();
    let duals = DualPrices::zero(problem);
    let ctx = create_test_context(problem, config, &environment, &duals, emitted);
    let connector = Connector::new(&ctx);

    let mut arena = LabelArena::default();
    let mut run = ConnectionRun { orders: OrderPool::new(0), statistics: PricingStatistics::default() };

    for (forward, backward) in pairs {
        let forward = sink(&mut arena, problem, Direction::Forward, 0, forward.as_slice());
        let backward = sink(&mut arena, problem, Direction::Backward, 0, backward.as_slice());

        connector.connect(&arena, &forward, &backward, &mut run.orders, &mut run.statistics).unwrap();
    }

    run
}

#[test]
fn can_connect_forward_path_with_depot_root() {
    let problem = create_example_problem().unwrap();

    let run = connect_all(&problem, &create_example_config(), &FxHashMap::default(), vec![(vec![0, 1], vec![])]);

    let orders = run.orders.into_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].route.stops, vec![0, 1]);
    assert_eq!(orders[0].route.distance, 7.);
    assert_eq!(orders[0].route.depot, 0);
    assert_eq!(orders[0].dispatch, vec![(0, 4.), (1, 6.)]);
    assert_eq!(orders[0].primal_price, 93.);
    assert_eq!(orders[0].reduced_cost, 93.);
    assert_eq!(run.statistics.accepted_orders, 1);
    assert_eq!(run.statistics.best_objective, Some(93.));
}

#[test]
fn can_reverse_backward_path() {
    let problem = create_example_problem().unwrap();

    let run = connect_all(&problem, &create_example_config(), &FxHashMap::default(), vec![(vec![1], vec![0, 2])]);

    let orders = run.orders.into_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].route.stops, vec![1, 2, 0]);
    assert_eq!(orders[0].route.distance, 3. + 2. + 5. + 2.);
    assert_eq!(orders[0].route.load, 15.);
}

parameterized_test! {can_reject_connection, (forward, backward, max_distance, min_profit, expected), {
    can_reject_connection_impl(forward, backward, max_distance, min_profit, expected);
}}

can_reject_connection! {
    case01_empty_route: (vec![], vec![], 15., 0., Rejection::EmptyRoute),
    case02_overlap: (vec![0, 1], vec![0], 15., 0., Rejection::Overlap),
    case03_combined_distance: (vec![0, 1], vec![], 6., 0., Rejection::CombinedDistance),
    case04_no_carrier: (vec![0], vec![], 15., 0., Rejection::NoCarrier),
    case05_unprofitable: (vec![0, 1], vec![], 15., 1000., Rejection::Unprofitable),
}

fn can_reject_connection_impl(
    forward: Vec<StopId>,
    backward: Vec<StopId>,
    max_distance: Distance,
    min_profit: f64,
    expected: Rejection,
) {
    let problem = create_example_problem().unwrap();
    let mut config = create_example_config();
    config.limits.max_distance = max_distance;
    config.min_profit = min_profit;

    let run = connect_all(&problem, &config, &FxHashMap::default(), vec![(forward, backward)]);

    assert!(run.orders.is_empty());
    assert_eq!(run.statistics.connections, 1);
    assert_eq!(run.statistics.rejected(expected), 1);
}

#[test]
fn can_reject_combined_capacity_and_visits() {
    let problem = create_example_problem().unwrap();
    let mut config = create_example_config();
    config.limits.max_capacity = 14.;
    config.limits.max_visits = 1;

    let run = connect_all(&problem, &config, &FxHashMap::default(), vec![(vec![0, 1], vec![2]), (vec![1], vec![2])]);

    assert_eq!(run.statistics.rejected(Rejection::CombinedCapacity), 1);
    assert_eq!(run.statistics.rejected(Rejection::CombinedVisits), 1);
}

#[test]
fn can_keep_only_shorter_route_for_the_same_visited_set() {
    let problem = create_example_problem().unwrap();

    let run = connect_all(
        &problem,
        &create_example_config(),
        &FxHashMap::default(),
        vec![(vec![1, 0, 2], vec![]), (vec![0, 1, 2], vec![]), (vec![2, 0, 1], vec![])],
    );

    assert_eq!(run.statistics.accepted_orders, 2);
    assert_eq!(run.statistics.replaced_orders, 1);
    assert_eq!(run.statistics.rejected(Rejection::Duplicate), 1);
    let orders = run.orders.into_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].route.stops, vec![0, 1, 2]);
    assert_eq!(orders[0].route.distance, 10.);
}

#[test]
fn can_reject_route_emitted_before_unless_shorter() {
    let problem = create_example_problem().unwrap();
    let mut emitted = FxHashMap::default();
    emitted.insert(VisitedKey::new(0, 3, &[0, 1]), 7.);
    emitted.insert(VisitedKey::new(0, 3, &[1]), 10.);

    let run = connect_all(&problem, &create_example_config(), &emitted, vec![(vec![0, 1], vec![]), (vec![1], vec![])]);

    assert_eq!(run.statistics.rejected(Rejection::Duplicate), 1);
    let orders = run.orders.into_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].route.stops, vec![1]);
}

#[test]
fn can_reject_labels_of_different_depots_or_without_arc() {
    let problem = create_two_depot_problem();
    let config = PricingConfig {
        limits: RouteLimits { max_visits: 8, max_capacity: 100., max_distance: 100., min_carrier_load: 0. },
        ..PricingConfig::default()
    };
    let environment = Environment::silent();
    let duals = DualPrices::zero(&problem);
    let emitted = FxHashMap::default();
    let ctx = create_test_context(&problem, &config, &environment, &duals, &emitted);
    let connector = Connector::new(&ctx);
    let mut arena = LabelArena::default();
    let mut orders = OrderPool::new(0);
    let mut statistics = PricingStatistics::default();

    let forward = sink(&mut arena, &problem, Direction::Forward, 0, &[1]);
    let other_depot = sink(&mut arena, &problem, Direction::Backward, 1, &[]);
    let far_stop = {
        let visited = BitVec::new(4).with(2);
        let resources = Resources { load: 5., distance: 1., visits: 1 };
        let label = Label::generate(Direction::Backward, Node::Stop(2), None, visited, resources, 0).unwrap();
        SinkEntry { id: arena.push(label).unwrap(), stops: vec![2] }
    };

    connector.connect(&arena, &forward, &other_depot, &mut orders, &mut statistics).unwrap();
    connector.connect(&arena, &forward, &far_stop, &mut orders, &mut statistics).unwrap();

    assert!(orders.is_empty());
    assert_eq!(statistics.rejected(Rejection::DepotMismatch), 1);
    assert_eq!(statistics.rejected(Rejection::MissingArc), 1);
}

#[test]
fn can_issue_increasing_order_ids() {
    let mut pool = OrderPool::new(5);

    assert_eq!(pool.issue_id(), 5);
    assert_eq!(pool.issue_id(), 6);
    assert_eq!(pool.next_id(), 7);
}
