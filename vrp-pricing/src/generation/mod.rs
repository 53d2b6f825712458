//! Column generation loop which alternates pricing and an external master problem.

#[cfg(test)]
#[path = "../../tests/unit/generation/generation_test.rs"]
mod generation_test;

mod report;
pub use self::report::*;

use crate::config::GenerationConfig;
use crate::models::Cost;
use crate::models::duals::{Constraint, DualPrices};
use crate::models::order::Order;
use crate::pricing::Pricer;
use crate::utils::{Environment, Float, GenericResult, TimeQuota, Timer, compare_floats};
use std::sync::Arc;

/// Amount of the most profitable orders which are logged when column generation finishes.
const REPORTED_ORDERS: usize = 5;

/// A master problem column derived from an order.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Order id.
    pub order_id: usize,
    /// Objective coefficient (maximization).
    pub objective: Cost,
    /// Constraint coefficients.
    pub coefficients: Vec<(Constraint, Float)>,
}

impl From<&Order> for Column {
    fn from(order: &Order) -> Self {
        let coefficients = order
            .dispatch
            .iter()
            .map(|&(stop, quantity)| (Constraint::StopCapacity(stop), quantity))
            .chain(std::iter::once((Constraint::CarrierUsage(order.carrier), 1.)))
            .collect();

        Self { order_id: order.id, objective: order.primal_price, coefficients }
    }
}

/// An external restricted master problem (LP relaxation) solver.
pub trait MasterProblem {
    /// Adds new columns.
    fn add_columns(&mut self, columns: &[Column]) -> GenericResult<()>;

    /// Solves the problem within time limit (seconds) and returns dual prices of all constraints.
    /// Returns `None` when there is no usable solution.
    fn solve(&mut self, time_limit: Float) -> GenericResult<Option<DualPrices>>;

    /// Returns objective value of the last solution.
    fn objective(&self) -> Option<Cost>;
}

/// Runs column generation: pricing produces orders, master problem consumes them as columns and
/// returns new dual prices.
pub struct ColumnGeneration<M: MasterProblem> {
    pricer: Pricer,
    master: M,
    config: GenerationConfig,
    environment: Arc<Environment>,
}

impl<M: MasterProblem> ColumnGeneration<M> {
    /// Creates a new instance of `ColumnGeneration`.
    pub fn new(
        pricer: Pricer,
        master: M,
        config: GenerationConfig,
        environment: Arc<Environment>,
    ) -> GenericResult<Self> {
        config.validate()?;

        Ok(Self { pricer, master, config, environment })
    }

    /// Returns master problem.
    pub fn master(&self) -> &M {
        &self.master
    }

    /// Runs the loop until time is exhausted, column limit is reached or pricing finds nothing.
    /// Returns all generated orders.
    pub fn run(&mut self) -> GenericResult<Vec<Order>> {
        let timer = Timer::start();
        let quota = TimeQuota::new(self.config.time_limit as Float);

        let mut duals = DualPrices::zero(self.pricer.problem());
        let mut orders: Vec<Order> = Vec::new();
        let mut iteration = 0_usize;

        loop {
            let remaining = quota.remaining_secs();
            if remaining <= 0. || self.environment.is_quota_reached() {
                self.log(&format!("time limit is reached after {iteration} iterations"));
                break;
            }

            if orders.len() >= self.config.max_columns {
                self.log(&format!("column limit {} is reached", self.config.max_columns));
                break;
            }

            if self.config.max_iterations.is_some_and(|max| iteration >= max) {
                self.log(&format!("iteration limit {iteration} is reached"));
                break;
            }

            iteration += 1;

            let order_limit = self.config.columns_per_iteration.min(self.config.max_columns - orders.len());
            let pricing_time = (remaining * (1. - self.config.master_time_share)).ceil() as i32;
            let result = self.pricer.price(&duals, pricing_time, i32::try_from(order_limit).unwrap_or(i32::MAX))?;

            if result.orders.is_empty() {
                self.log(&format!("iteration {iteration}: no new orders, stopping"));
                break;
            }

            let columns = result.orders.iter().map(Column::from).collect::<Vec<_>>();
            self.master.add_columns(columns.as_slice())?;

            let best_reduced_cost = result.orders.first().map(|order| order.reduced_cost);
            let new_orders = result.orders.len();
            orders.extend(result.orders);

            match self.master.solve(quota.remaining_secs())? {
                Some(new_duals) => duals = new_duals,
                None => self.log(&format!("iteration {iteration}: master has no solution, keeping previous duals")),
            }

            self.log(&format!(
                "iteration {iteration}: new columns {new_orders}, total columns {}, best reduced cost {}, \
                 master objective {}, elapsed {:.3}s",
                orders.len(),
                format_optional(best_reduced_cost),
                format_optional(self.master.objective()),
                timer.elapsed_secs_as_float()
            ));
        }

        self.log(&format!("column generation finished: {}", OrderSummary::new(orders.as_slice())));

        let mut best = orders.iter().collect::<Vec<_>>();
        best.sort_by(|a, b| compare_floats(b.primal_price, a.primal_price).then_with(|| a.id.cmp(&b.id)));
        best.into_iter().take(REPORTED_ORDERS).for_each(|order| self.log(&describe_order(order)));

        Ok(orders)
    }

    fn log(&self, message: &str) {
        self.environment.log(message)
    }
}

fn format_optional(value: Option<Float>) -> String {
    value.map_or("n/a".to_string(), |value| format!("{value:.2}"))
}
