//! The pricing subproblem: a bidirectional labeling search which finds new orders under given
//! dual prices.
//!
//! A [Pricer] lives across column generation iterations: every call refreshes stop values from
//! dual prices, runs the search and returns best orders by reduced cost. Orders which did not fit
//! into the order limit are kept and returned by following calls.

#[cfg(test)]
#[path = "../../tests/unit/pricing/pricer_test.rs"]
mod pricer_test;

pub mod connection;
pub mod label;
pub mod loading;
pub mod pool;
pub mod price;
pub mod queue;
pub mod search;
pub mod statistics;

use crate::config::PricingConfig;
use crate::models::duals::{Constraint, DualPrices};
use crate::models::order::{Order, VisitedKey, compare_orders};
use crate::models::{Distance, Problem};
use crate::pricing::price::{reduced_cost, stop_values};
use crate::pricing::search::LabelingSearch;
use crate::pricing::statistics::{PricingStatistics, Termination};
use crate::utils::{Environment, Float, GenericResult};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Keeps everything what one pricing call needs: frozen stop values, dual prices and budgets.
pub struct PricingContext<'a> {
    /// A problem to price.
    pub problem: &'a Problem,
    /// Search configuration.
    pub config: &'a PricingConfig,
    /// Environment with logger and external quota.
    pub environment: &'a Environment,
    /// Dual prices of the call.
    pub duals: &'a DualPrices,
    /// Stop value snapshot computed from dual prices.
    pub values: Vec<Float>,
    /// Route keys emitted by previous calls with their distance.
    pub emitted: &'a FxHashMap<VisitedKey, Distance>,
    /// Time limit in seconds.
    pub time_limit: Float,
    /// Max amount of orders to find.
    pub order_limit: usize,
    /// Amount of orders which are already found and count towards order limit.
    pub reserved: usize,
}

/// A result of pricing call.
pub struct PricingResult {
    /// Orders sorted by reduced cost descending.
    pub orders: Vec<Order>,
    /// Call statistics.
    pub statistics: PricingStatistics,
}

/// A long living pricing subproblem solver.
pub struct Pricer {
    problem: Arc<Problem>,
    config: PricingConfig,
    environment: Arc<Environment>,
    backlog: Vec<Order>,
    emitted: FxHashMap<VisitedKey, Distance>,
    next_order_id: usize,
}

impl Pricer {
    /// Creates a new instance of `Pricer` validating the configuration.
    pub fn new(problem: Arc<Problem>, config: PricingConfig, environment: Arc<Environment>) -> GenericResult<Self> {
        config.validate()?;

        Ok(Self { problem, config, environment, backlog: Vec::new(), emitted: FxHashMap::default(), next_order_id: 0 })
    }

    /// Returns the problem.
    pub fn problem(&self) -> &Problem {
        self.problem.as_ref()
    }

    /// Returns amount of orders found but not returned yet.
    pub fn backlog_size(&self) -> usize {
        self.backlog.len()
    }

    /// Finds up to `order_limit` orders under given dual prices within `time_limit_seconds`.
    /// Negative limits are treated as zero. Missing dual price of any problem constraint is an error.
    pub fn price(
        &mut self,
        duals: &DualPrices,
        time_limit_seconds: i32,
        order_limit: i32,
    ) -> GenericResult<PricingResult> {
        let order_limit = order_limit.max(0) as usize;
        let time_limit = time_limit_seconds.max(0) as Float;

        let values = stop_values(&self.problem.graph, duals, self.config.dual_multiplier)?;
        self.problem.fleet.carriers().iter().try_for_each(|carrier| {
            duals.get(Constraint::CarrierUsage(carrier.id)).map(|_| ())
        })?;

        for order in self.backlog.iter_mut() {
            order.reduced_cost = reduced_cost(order, duals)?;
        }
        self.backlog.sort_by(compare_orders);

        self.environment.log(&format!(
            "pricing started: duals {}, time limit {time_limit}s, order limit {order_limit}, backlog {}",
            duals.len(),
            self.backlog.len()
        ));

        if order_limit == 0 || self.backlog.len() >= order_limit {
            let statistics = PricingStatistics { termination: Termination::Backlog, ..PricingStatistics::default() };
            return Ok(PricingResult { orders: self.take_orders(order_limit), statistics });
        }

        let output = {
            let ctx = PricingContext {
                problem: self.problem.as_ref(),
                config: &self.config,
                environment: self.environment.as_ref(),
                duals,
                values,
                emitted: &self.emitted,
                time_limit,
                order_limit,
                reserved: self.backlog.len(),
            };

            LabelingSearch::new(&ctx, self.next_order_id).run()?
        };

        self.next_order_id = output.orders.next_id();
        let found = output.orders.into_orders();

        let keys = found.iter().map(|order| order.route.key().clone()).collect::<FxHashSet<_>>();
        self.backlog.retain(|order| !keys.contains(order.route.key()));
        found.iter().for_each(|order| {
            self.emitted.insert(order.route.key().clone(), order.route.distance);
        });
        self.backlog.extend(found);
        self.backlog.sort_by(compare_orders);

        let statistics = output.statistics;
        self.environment.log(&format!("pricing finished: {statistics}"));

        Ok(PricingResult { orders: self.take_orders(order_limit), statistics })
    }

    fn take_orders(&mut self, order_limit: usize) -> Vec<Order> {
        let rest = self.backlog.split_off(order_limit.min(self.backlog.len()));
        std::mem::replace(&mut self.backlog, rest)
    }
}
