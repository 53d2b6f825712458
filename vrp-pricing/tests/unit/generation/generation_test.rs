use super::*;
use crate::helpers::models::*;
use crate::models::examples::{create_example_config, create_example_problem};
use rustc_hash::FxHashSet;
use std::sync::Mutex;

#[derive(Default)]
struct FakeMaster {
    columns: Vec<Column>,
    solves: usize,
    duals: Option<Option<DualPrices>>,
}

impl MasterProblem for FakeMaster {
    fn add_columns(&mut self, columns: &[Column]) -> GenericResult<()> {
        self.columns.extend(columns.iter().cloned());
        Ok(())
    }

    fn solve(&mut self, _: Float) -> GenericResult<Option<DualPrices>> {
        self.solves += 1;
        match self.duals.clone() {
            Some(duals) => Ok(duals),
            None => Ok(Some(DualPrices::zero(&create_example_problem()?))),
        }
    }

    fn objective(&self) -> Option<Cost> {
        Some(self.columns.iter().map(|column| column.objective).sum())
    }
}

fn create_generation(master: FakeMaster, config: GenerationConfig) -> ColumnGeneration<FakeMaster> {
    let environment = test_environment();
    let problem = Arc::new(create_example_problem().unwrap());
    let pricer = Pricer::new(problem, create_example_config(), environment.clone()).unwrap();

    ColumnGeneration::new(pricer, master, config, environment).unwrap()
}

fn create_config(columns_per_iteration: usize, max_columns: usize) -> GenerationConfig {
    GenerationConfig { columns_per_iteration, max_columns, time_limit: 10, ..GenerationConfig::default() }
}

#[test]
fn can_generate_all_columns_until_pricing_is_exhausted() {
    let mut generation = create_generation(FakeMaster::default(), create_config(2, 100));

    let orders = generation.run().unwrap();

    assert_eq!(orders.len(), 5);
    assert_eq!(generation.master().columns.len(), 5);
    assert_eq!(generation.master().solves, 3);
    let ids = orders.iter().map(|order| order.id).collect::<FxHashSet<_>>();
    assert_eq!(ids.len(), 5);
}

#[test]
fn can_stop_at_column_limit() {
    let mut generation = create_generation(FakeMaster::default(), create_config(2, 3));

    let orders = generation.run().unwrap();

    assert_eq!(orders.len(), 3);
    assert_eq!(generation.master().columns.len(), 3);
}

#[test]
fn can_stop_at_iteration_limit() {
    let config = GenerationConfig { max_iterations: Some(1), ..create_config(2, 100) };
    let mut generation = create_generation(FakeMaster::default(), config);

    let orders = generation.run().unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(generation.master().solves, 1);
}

#[test]
fn can_keep_previous_duals_when_master_has_no_solution() {
    let master = FakeMaster { duals: Some(None), ..FakeMaster::default() };
    let mut generation = create_generation(master, create_config(2, 100));

    let orders = generation.run().unwrap();

    assert_eq!(orders.len(), 5);
}

#[test]
fn can_propagate_pricing_error_on_incomplete_duals() {
    let master = FakeMaster { duals: Some(Some(DualPrices::from_iter(std::iter::empty()))), ..FakeMaster::default() };
    let mut generation = create_generation(master, create_config(2, 100));

    let result = generation.run();

    assert!(result.is_err());
    assert_eq!(generation.master().columns.len(), 2);
}

#[test]
fn can_log_summary_and_best_orders() {
    let messages = Arc::new(Mutex::new(Vec::<String>::new()));
    let environment = Arc::new(Environment::new({
        let messages = messages.clone();
        Arc::new(move |msg: &str| messages.lock().unwrap().push(msg.to_string()))
    }));
    let problem = Arc::new(create_example_problem().unwrap());
    let pricer = Pricer::new(problem, create_example_config(), environment.clone()).unwrap();
    let mut generation =
        ColumnGeneration::new(pricer, FakeMaster::default(), create_config(2, 100), environment).unwrap();

    generation.run().unwrap();

    let messages = messages.lock().unwrap();
    let finished = messages.iter().position(|msg| msg.starts_with("column generation finished: orders: 5")).unwrap();
    let described = &messages[finished + 1..];
    assert_eq!(described.len(), 5);
    assert!(described[0].starts_with("order 4: D0->F2->F1->F0->D0, carrier C0, distance 10.00"));
    assert!(described[4].contains("price 42.00"));
}

#[test]
fn can_reject_invalid_config() {
    let problem = Arc::new(create_example_problem().unwrap());
    let pricer = Pricer::new(problem, create_example_config(), test_environment()).unwrap();
    let config = GenerationConfig { master_time_share: 1., ..GenerationConfig::default() };

    assert!(ColumnGeneration::new(pricer, FakeMaster::default(), config, test_environment()).is_err());
}

#[test]
fn can_create_column_from_order() {
    let problem = create_example_problem().unwrap();
    let route = create_test_route(&problem, 0, vec![0, 1]);
    let order = Order { primal_price: 93., ..create_test_order(7, route, 0, vec![(0, 4.), (1, 6.)]) };

    let column = Column::from(&order);

    assert_eq!(column.order_id, 7);
    assert_eq!(column.objective, 93.);
    assert_eq!(
        column.coefficients,
        vec![(Constraint::StopCapacity(0), 4.), (Constraint::StopCapacity(1), 6.), (Constraint::CarrierUsage(0), 1.)]
    );
}

#[test]
fn can_summarize_orders() {
    let problem = create_example_problem().unwrap();
    let first = Order {
        primal_price: 93.,
        ..create_test_order(0, create_test_route(&problem, 0, vec![0, 1]), 0, vec![(0, 4.), (1, 6.)])
    };
    let second =
        Order { primal_price: 42., ..create_test_order(1, create_test_route(&problem, 0, vec![2]), 0, vec![(2, 5.)]) };

    let summary = OrderSummary::new(&[first.clone(), second]);

    assert_eq!(summary.count, 2);
    assert_eq!(summary.total_price, 135.);
    assert_eq!(summary.total_distance, 15.);
    assert_eq!(summary.total_dispatch, 15.);
    assert_eq!(summary.carriers.len(), 1);
    assert_eq!(summary.depots.len(), 1);
    assert_eq!(
        summary.to_string(),
        "orders: 2, price: 135.00, distance: 15.00, dispatch: 15.00, carriers used: 1, depots used: 1"
    );
    assert_eq!(
        describe_order(&first),
        "order 0: D0->F0->F1->D0, carrier C0, distance 7.00, dispatch [F0=4.00, F1=6.00], \
         price 93.00, reduced cost 0.00"
    );
}
