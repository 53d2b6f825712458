//! A bidirectional labeling search which drives label expansion and connection.

#[cfg(test)]
#[path = "../../tests/unit/pricing/search_test.rs"]
mod search_test;

use crate::models::{Distance, StopId};
use crate::pricing::PricingContext;
use crate::pricing::connection::{Connector, OrderPool, SinkEntry};
use crate::pricing::label::{Direction, Label, LabelArena, LabelId};
use crate::pricing::pool::DominancePool;
use crate::pricing::queue::Frontier;
use crate::pricing::statistics::{PricingStatistics, Rejection, Termination};
use crate::utils::{GenericResult, Timer, exceeds};

/// A result of one search run.
pub struct SearchOutput {
    /// Found orders.
    pub orders: OrderPool,
    /// Search statistics.
    pub statistics: PricingStatistics,
}

/// Keeps the whole state of one search run.
pub struct LabelingSearch<'a> {
    ctx: &'a PricingContext<'a>,
    connector: Connector<'a>,
    arena: LabelArena,
    pool: DominancePool,
    frontier: Frontier,
    sinks: Vec<[Vec<SinkEntry>; 2]>,
    orders: OrderPool,
    statistics: PricingStatistics,
    timer: Timer,
}

impl<'a> LabelingSearch<'a> {
    /// Creates a new search which issues order ids starting from `next_order_id`.
    pub fn new(ctx: &'a PricingContext<'a>, next_order_id: usize) -> Self {
        let graph = &ctx.problem.graph;

        Self {
            ctx,
            connector: Connector::new(ctx),
            arena: LabelArena::default(),
            pool: DominancePool::new(graph.size()),
            frontier: Frontier::new(ctx.config.scheduling, graph.depots().len()),
            sinks: (0..graph.depots().len()).map(|_| [Vec::new(), Vec::new()]).collect(),
            orders: OrderPool::new(next_order_id),
            statistics: PricingStatistics::default(),
            timer: Timer::start(),
        }
    }

    /// Runs search until frontier is exhausted or one of the budgets is reached.
    pub fn run(mut self) -> GenericResult<SearchOutput> {
        self.init()?;

        let mut iteration = 0_usize;
        self.statistics.termination = loop {
            if let Some(termination) = self.check_budget() {
                break termination;
            }

            let Some(slot) = self.frontier.select() else {
                break Termination::Exhausted;
            };

            for direction in [Direction::Forward, Direction::Backward] {
                if let Some(id) = self.frontier.pop(slot, direction) {
                    self.expand(id)?;
                }
            }

            iteration += 1;
            let log_interval = self.ctx.config.log_interval;
            if log_interval > 0 && iteration % log_interval == 0 {
                self.log_progress(iteration);
            }
        };

        self.statistics.elapsed_secs = self.timer.elapsed_secs_as_float();

        Ok(SearchOutput { orders: self.orders, statistics: self.statistics })
    }

    fn init(&mut self) -> GenericResult<()> {
        let size = self.ctx.problem.graph.size();

        for depot in self.ctx.problem.graph.depots() {
            for direction in [Direction::Forward, Direction::Backward] {
                let id = self.arena.push(Label::seed(direction, depot.id, size))?;
                self.frontier.push(self.arena.get(id), id);
            }
        }

        Ok(())
    }

    fn check_budget(&self) -> Option<Termination> {
        if self.orders.len() + self.ctx.reserved >= self.ctx.order_limit {
            Some(Termination::OrderLimit)
        } else if self.ctx.environment.is_quota_reached() {
            Some(Termination::Quota)
        } else if self.timer.elapsed_secs_as_float() > self.ctx.time_limit {
            Some(Termination::TimeLimit)
        } else {
            None
        }
    }

    fn expand(&mut self, id: LabelId) -> GenericResult<()> {
        self.statistics.expansions += 1;

        let label = self.arena.get(id).clone();
        if label.is_seed() || label.load() >= self.ctx.config.limits.min_carrier_load {
            self.reach_sink(id)?;
        }

        let ctx = self.ctx;
        let graph = &ctx.problem.graph;
        let arcs = match label.direction() {
            Direction::Forward => graph.outgoing(label.node()),
            Direction::Backward => graph.incoming(label.node()),
        };

        for &(stop, arc) in arcs {
            if let Err(reason) = self.check_extension(&label, stop, arc) {
                self.statistics.reject(reason);
                continue;
            }

            let demand = graph.stop(stop).map_or(0., |stop| stop.demand);
            let child = self.arena.push(label.extend(id, stop, arc, demand)?)?;

            let (arena, frontier, statistics) = (&self.arena, &mut self.frontier, &mut self.statistics);
            let is_added = self.pool.try_add(arena, child, |evicted| {
                frontier.remove(arena.get(evicted), evicted);
                statistics.evicted_labels += 1;
            });

            if is_added {
                self.frontier.push(self.arena.get(child), child);
            } else {
                self.statistics.reject(Rejection::Dominated);
                self.arena.discard(child);
            }
        }

        Ok(())
    }

    fn check_extension(&self, label: &Label, stop: StopId, arc: Distance) -> Result<(), Rejection> {
        let config = self.ctx.config;
        let graph = &self.ctx.problem.graph;
        let demand = graph.stop(stop).map_or(0., |stop| stop.demand);

        if label.visited().contains(stop) {
            return Err(Rejection::Tabu);
        }

        if label.visits() + 1 > config.half_visits() {
            return Err(Rejection::VisitCap);
        }

        if exceeds(label.load() + demand, config.half_capacity()) {
            return Err(Rejection::CapacityCap);
        }

        if exceeds(label.distance() + arc + graph.nearest_distance(stop), config.half_distance()) {
            return Err(Rejection::DistanceCap);
        }

        Ok(())
    }

    /// Connects the label with all opposite direction labels of its depot which reached the sink
    /// before and then keeps it for future connections.
    fn reach_sink(&mut self, id: LabelId) -> GenericResult<()> {
        let (direction, depot) = {
            let label = self.arena.get(id);
            (label.direction(), label.depot())
        };

        let entry = SinkEntry::new(&self.arena, id);

        for other in self.sinks[depot][direction.opposite().index()].iter() {
            let (forward, backward) = match direction {
                Direction::Forward => (&entry, other),
                Direction::Backward => (other, &entry),
            };

            self.connector.connect(&self.arena, forward, backward, &mut self.orders, &mut self.statistics)?;
        }

        self.sinks[depot][direction.index()].push(entry);

        Ok(())
    }

    fn log_progress(&self, iteration: usize) {
        let (forward, backward) = self.frontier.sizes();
        let best = self.statistics.best_objective.map_or("n/a".to_string(), |best| format!("{best:.2}"));

        self.ctx.environment.log(&format!(
            "[{}s] iteration {iteration}: queues {forward}/{backward}, labels {}, pooled {}, orders {}, best {best}",
            self.timer.elapsed_secs(),
            self.arena.len(),
            self.pool.len(),
            self.orders.len(),
        ));
    }
}
