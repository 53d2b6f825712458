use crate::models::order::Order;
use crate::models::{CarrierId, Cost, DepotId, Distance, Load};
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

/// Aggregated information about a list of orders.
#[derive(Clone, Debug, Default)]
pub struct OrderSummary {
    /// Amount of orders.
    pub count: usize,
    /// Sum of primal prices.
    pub total_price: Cost,
    /// Sum of route distances.
    pub total_distance: Distance,
    /// Sum of dispatched quantities.
    pub total_dispatch: Load,
    /// Amount of orders per carrier.
    pub carriers: FxHashMap<CarrierId, usize>,
    /// Amount of orders per depot.
    pub depots: FxHashMap<DepotId, usize>,
}

impl OrderSummary {
    /// Creates a summary of given orders.
    pub fn new(orders: &[Order]) -> Self {
        orders.iter().fold(Self::default(), |mut acc, order| {
            acc.count += 1;
            acc.total_price += order.primal_price;
            acc.total_distance += order.route.distance;
            acc.total_dispatch += order.total_dispatch();
            *acc.carriers.entry(order.carrier).or_insert(0) += 1;
            *acc.depots.entry(order.route.depot).or_insert(0) += 1;

            acc
        })
    }
}

impl Display for OrderSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "orders: {}, price: {:.2}, distance: {:.2}, dispatch: {:.2}, carriers used: {}, depots used: {}",
            self.count,
            self.total_price,
            self.total_distance,
            self.total_dispatch,
            self.carriers.len(),
            self.depots.len()
        )
    }
}

/// Renders the order route with dispatched quantities.
pub fn describe_order(order: &Order) -> String {
    let dispatch =
        order.dispatch.iter().map(|(stop, quantity)| format!("F{stop}={quantity:.2}")).collect::<Vec<_>>().join(", ");

    format!(
        "order {}: {}, carrier C{}, distance {:.2}, dispatch [{dispatch}], price {:.2}, reduced cost {:.2}",
        order.id, order.route, order.carrier, order.route.distance, order.primal_price, order.reduced_cost
    )
}
