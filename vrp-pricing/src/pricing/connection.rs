//! Connects forward and backward labels which reached the virtual sink into closed routes.

#[cfg(test)]
#[path = "../../tests/unit/pricing/connection_test.rs"]
mod connection_test;

use crate::models::order::{Order, Route, VisitedKey};
use crate::models::{Distance, StopId};
use crate::pricing::PricingContext;
use crate::pricing::label::{LabelArena, LabelId};
use crate::pricing::loading::Loading;
use crate::pricing::price::{primal_price, reduced_cost};
use crate::pricing::statistics::{PricingStatistics, Rejection};
use crate::utils::{GenericResult, exceeds};
use rustc_hash::FxHashMap;

/// A label which reached the virtual sink with its cached path stops.
pub struct SinkEntry {
    /// Label id.
    pub id: LabelId,
    /// Path stops starting from the depot.
    pub stops: Vec<StopId>,
}

impl SinkEntry {
    /// Creates a sink entry caching label path.
    pub fn new(arena: &LabelArena, id: LabelId) -> Self {
        Self { id, stops: arena.stops(id) }
    }
}

/// Keeps orders found within one pricing call, one per visited set.
pub struct OrderPool {
    orders: FxHashMap<VisitedKey, Order>,
    next_id: usize,
}

impl OrderPool {
    /// Creates a new pool which assigns order ids starting from the given one.
    pub fn new(next_id: usize) -> Self {
        Self { orders: FxHashMap::default(), next_id }
    }

    /// Returns distance of the order with the same visited set.
    pub fn distance(&self, key: &VisitedKey) -> Option<Distance> {
        self.orders.get(key).map(|order| order.route.distance)
    }

    /// Returns a next order id and advances the counter.
    pub fn issue_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Stores the order replacing the one with the same visited set. Returns true if the order
    /// was replaced.
    pub fn insert(&mut self, order: Order) -> bool {
        self.orders.insert(order.route.key().clone(), order).is_some()
    }

    /// Returns amount of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if pool is empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Returns a next order id which is not issued yet.
    pub fn next_id(&self) -> usize {
        self.next_id
    }

    /// Consumes the pool returning its orders.
    pub fn into_orders(self) -> Vec<Order> {
        self.orders.into_values().collect()
    }
}

/// Connects two sink labels of the same depot and turns the route into an order.
pub struct Connector<'a> {
    ctx: &'a PricingContext<'a>,
    loading: Loading<'a>,
}

impl<'a> Connector<'a> {
    /// Creates a new instance of `Connector`.
    pub fn new(ctx: &'a PricingContext<'a>) -> Self {
        let loading = Loading::new(ctx.problem, ctx.values.as_slice(), ctx.duals, ctx.config.carrier_policy);
        Self { ctx, loading }
    }

    /// Tries to connect forward and backward labels. A rejection is counted in statistics,
    /// only fatal problems are returned as errors.
    pub fn connect(
        &self,
        arena: &LabelArena,
        forward: &SinkEntry,
        backward: &SinkEntry,
        orders: &mut OrderPool,
        statistics: &mut PricingStatistics,
    ) -> GenericResult<()> {
        statistics.connections += 1;

        match self.try_connect(arena, forward, backward, orders)? {
            Ok((order, is_replacement)) => {
                statistics.accept(order.primal_price, is_replacement);
                orders.insert(order);
            }
            Err(reason) => statistics.reject(reason),
        }

        Ok(())
    }

    fn try_connect(
        &self,
        arena: &LabelArena,
        forward: &SinkEntry,
        backward: &SinkEntry,
        orders: &mut OrderPool,
    ) -> GenericResult<Result<(Order, bool), Rejection>> {
        let (fwd, bwd) = (arena.get(forward.id), arena.get(backward.id));
        let limits = &self.ctx.config.limits;
        let graph = &self.ctx.problem.graph;

        if fwd.depot() != bwd.depot() {
            return Ok(Err(Rejection::DepotMismatch));
        }

        if fwd.is_seed() && bwd.is_seed() {
            return Ok(Err(Rejection::EmptyRoute));
        }

        let Some(arc) = graph.distance(fwd.node(), bwd.node()) else {
            return Ok(Err(Rejection::MissingArc));
        };

        let distance = fwd.distance() + arc + bwd.distance();
        if exceeds(distance, limits.max_distance) {
            return Ok(Err(Rejection::CombinedDistance));
        }

        let load = fwd.load() + bwd.load();
        if exceeds(load, limits.max_capacity) {
            return Ok(Err(Rejection::CombinedCapacity));
        }

        if fwd.visits() + bwd.visits() > limits.max_visits {
            return Ok(Err(Rejection::CombinedVisits));
        }

        if fwd.visited().intersects(bwd.visited()) {
            return Ok(Err(Rejection::Overlap));
        }

        let stops = forward.stops.iter().chain(backward.stops.iter().rev()).copied().collect();
        let route = Route::new(graph.size(), fwd.depot(), stops, distance, load);

        let known = orders.distance(route.key());
        let emitted = self.ctx.emitted.get(route.key()).copied();
        if known.into_iter().chain(emitted).any(|known| known <= distance) {
            return Ok(Err(Rejection::Duplicate));
        }

        let Some(assignment) = self.loading.solve(&route)? else {
            return Ok(Err(Rejection::NoCarrier));
        };

        let carrier = self
            .ctx
            .problem
            .fleet
            .carrier(assignment.carrier)
            .ok_or_else(|| format!("unknown carrier {}", assignment.carrier))?;

        let primal_price = primal_price(graph, carrier, route.distance, assignment.dispatch.as_slice());
        if primal_price < self.ctx.config.min_profit {
            return Ok(Err(Rejection::Unprofitable));
        }

        let mut order = Order {
            id: orders.issue_id(),
            route,
            carrier: assignment.carrier,
            dispatch: assignment.dispatch,
            primal_price,
            reduced_cost: 0.,
        };
        order.reduced_cost = reduced_cost(&order, self.ctx.duals)?;

        Ok(Ok((order, known.is_some())))
    }
}
