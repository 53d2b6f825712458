//! Specifies routes and orders: priced routes with carrier and dispatch assignment.

#[cfg(test)]
#[path = "../../tests/unit/models/order_test.rs"]
mod order_test;

use crate::algorithms::structures::BitVec;
use crate::models::{CarrierId, Cost, DepotId, Distance, Load, Node, StopId};
use crate::utils::compare_floats;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A depot with a set of visited stops which identifies a route regardless of visiting sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VisitedKey {
    depot: DepotId,
    stops: BitVec,
}

impl VisitedKey {
    /// Creates a key for the given depot and stops.
    pub fn new(depot: DepotId, size: usize, stops: &[StopId]) -> Self {
        let mut bits = BitVec::new(size);
        stops.iter().for_each(|&stop| bits.set(stop, true));

        Self { depot, stops: bits }
    }

    /// Returns route depot.
    pub fn depot(&self) -> DepotId {
        self.depot
    }

    /// Returns visited stops in ascending order.
    pub fn stops(&self) -> impl Iterator<Item = StopId> + '_ {
        self.stops.ones()
    }

    /// Returns amount of visited stops.
    pub fn len(&self) -> usize {
        self.stops.count_ones()
    }

    /// Returns true if no stop is visited.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for VisitedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let stops = self.stops().map(|stop| stop.to_string()).collect::<Vec<_>>().join(",");
        write!(f, "D{}{{{stops}}}", self.depot)
    }
}

impl Serialize for VisitedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// A closed route: starts at depot, visits stops in given order and returns to the same depot.
#[derive(Clone, Debug, Serialize)]
pub struct Route {
    /// Start and end depot.
    pub depot: DepotId,
    /// Visited stops in visiting order.
    pub stops: Vec<StopId>,
    /// Total route distance including return to depot.
    pub distance: Distance,
    /// Sum of visited stops demand.
    pub load: Load,
    key: VisitedKey,
}

impl Route {
    /// Creates a new route.
    pub fn new(graph_size: usize, depot: DepotId, stops: Vec<StopId>, distance: Distance, load: Load) -> Self {
        let key = VisitedKey::new(depot, graph_size, stops.as_slice());
        Self { depot, stops, distance, load, key }
    }

    /// Returns amount of visited stops.
    pub fn visits(&self) -> usize {
        self.stops.len()
    }

    /// Returns route depot with a set of visited stops.
    pub fn key(&self) -> &VisitedKey {
        &self.key
    }

    /// Returns route nodes including start and end depot.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        std::iter::once(Node::Depot(self.depot))
            .chain(self.stops.iter().map(|&stop| Node::Stop(stop)))
            .chain(std::iter::once(Node::Depot(self.depot)))
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let nodes = self
            .nodes()
            .map(|node| match node {
                Node::Depot(depot) => format!("D{depot}"),
                Node::Stop(stop) => format!("F{stop}"),
            })
            .collect::<Vec<_>>()
            .join("->");

        write!(f, "{nodes}")
    }
}

/// An order: a priced route with assigned carrier and per stop dispatch quantities.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id, unique within pricer lifetime.
    pub id: usize,
    /// Order route.
    pub route: Route,
    /// Assigned carrier.
    pub carrier: CarrierId,
    /// Dispatched quantities in visiting order.
    pub dispatch: Vec<(StopId, Load)>,
    /// Profit of the order using original stop values.
    pub primal_price: Cost,
    /// Reduced cost of the order under dual prices used to generate it.
    pub reduced_cost: Cost,
}

impl Order {
    /// Returns total dispatched quantity.
    pub fn total_dispatch(&self) -> Load {
        self.dispatch.iter().map(|(_, quantity)| *quantity).sum()
    }

    /// Returns quantity dispatched to the stop.
    pub fn dispatch_of(&self, stop: StopId) -> Option<Load> {
        self.dispatch.iter().find(|(id, _)| *id == stop).map(|(_, quantity)| *quantity)
    }
}

/// Compares orders by reduced cost descending, then by id ascending.
pub fn compare_orders(a: &Order, b: &Order) -> Ordering {
    compare_floats(b.reduced_cost, a.reduced_cost).then_with(|| a.id.cmp(&b.id))
}
