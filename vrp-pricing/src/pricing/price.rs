//! Price calculations: stop values, primal price and reduced cost.

#[cfg(test)]
#[path = "../../tests/unit/pricing/price_test.rs"]
mod price_test;

use crate::models::duals::{Constraint, DualPrices};
use crate::models::fleet::Carrier;
use crate::models::graph::Graph;
use crate::models::order::Order;
use crate::models::{Cost, Distance, Load, StopId};
use crate::utils::{Float, GenericResult};

/// Computes a value snapshot of every stop: `original_value - dual[stop] * multiplier`.
pub fn stop_values(graph: &Graph, duals: &DualPrices, multiplier: Float) -> GenericResult<Vec<Float>> {
    graph
        .stops()
        .iter()
        .map(|stop| duals.get(Constraint::StopCapacity(stop.id)).map(|dual| stop.original_value - dual * multiplier))
        .collect()
}

/// Returns the cost of driving the distance with the carrier.
pub fn carrier_cost(carrier: &Carrier, distance: Distance) -> Cost {
    distance * carrier.cost_per_distance
}

/// Returns dispatched quantities value minus carrier cost using original stop values.
pub fn primal_price(graph: &Graph, carrier: &Carrier, distance: Distance, dispatch: &[(StopId, Load)]) -> Cost {
    let income = dispatch
        .iter()
        .map(|&(stop, quantity)| graph.stop(stop).map_or(0., |stop| stop.original_value) * quantity)
        .sum::<Cost>();

    income - carrier_cost(carrier, distance)
}

/// Returns dispatched quantities value minus carrier cost and carrier dual using a value snapshot.
/// It is used to compare alternative carrier assignments of the same route.
pub fn pricing_value(
    values: &[Float],
    duals: &DualPrices,
    carrier: &Carrier,
    distance: Distance,
    dispatch: &[(StopId, Load)],
) -> GenericResult<Cost> {
    let income = dispatch.iter().map(|&(stop, quantity)| values[stop] * quantity).sum::<Cost>();
    let usage = duals.get(Constraint::CarrierUsage(carrier.id))?;

    Ok(income - carrier_cost(carrier, distance) - usage)
}

/// Returns reduced cost of the order: primal price minus dual value of used resources.
pub fn reduced_cost(order: &Order, duals: &DualPrices) -> GenericResult<Cost> {
    let stops = order.dispatch.iter().try_fold(0., |acc, &(stop, quantity)| {
        duals.get(Constraint::StopCapacity(stop)).map(|dual| acc + dual * quantity)
    })?;
    let carrier = duals.get(Constraint::CarrierUsage(order.carrier))?;

    Ok(order.primal_price - stops - carrier)
}
