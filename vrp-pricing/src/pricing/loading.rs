//! Loading assigns dispatch quantities and a carrier to a route.

#[cfg(test)]
#[path = "../../tests/unit/pricing/loading_test.rs"]
mod loading_test;

use crate::config::CarrierPolicy;
use crate::models::duals::DualPrices;
use crate::models::fleet::Carrier;
use crate::models::graph::{Graph, Stop};
use crate::models::order::Route;
use crate::models::{CarrierId, Cost, Load, Problem, StopId};
use crate::pricing::price::pricing_value;
use crate::utils::{EPSILON, Float, GenericResult, compare_floats, exceeds};

/// A result of loading: chosen carrier with per stop dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    /// Chosen carrier.
    pub carrier: CarrierId,
    /// Dispatched quantities in visiting order.
    pub dispatch: Vec<(StopId, Load)>,
}

/// Chooses dispatch and carrier for routes found within one pricing call.
pub struct Loading<'a> {
    problem: &'a Problem,
    values: &'a [Float],
    duals: &'a DualPrices,
    policy: CarrierPolicy,
}

impl<'a> Loading<'a> {
    /// Creates a new instance of `Loading`.
    pub fn new(problem: &'a Problem, values: &'a [Float], duals: &'a DualPrices, policy: CarrierPolicy) -> Self {
        Self { problem, values, duals, policy }
    }

    /// Returns an assignment of the route or `None` when no carrier can take it.
    pub fn solve(&self, route: &Route) -> GenericResult<Option<Assignment>> {
        let mut carriers =
            self.problem.fleet.at_depot(route.depot).filter(|carrier| carrier.can_drive(route.depot, route.distance));

        match self.policy {
            CarrierPolicy::DepotBound => {
                Ok(carriers.next().and_then(|carrier| self.assign(route, carrier, route.load)))
            }
            CarrierPolicy::LeastViolation => self.choose_least_violation(route, carriers.collect()),
        }
    }

    fn choose_least_violation(&self, route: &Route, carriers: Vec<&Carrier>) -> GenericResult<Option<Assignment>> {
        let target = route.load;

        let direct = carriers.iter().filter(|carrier| carrier.accepts(target)).copied().collect::<Vec<_>>();
        let candidates: Vec<&Carrier> = if direct.is_empty() {
            // NOTE keep carriers which are closest to accept the load from above and from below
            let overshoot = carriers
                .iter()
                .filter(|carrier| carrier.capacity < target)
                .min_by(|a, b| compare_floats(target - a.capacity, target - b.capacity));
            let undershoot = carriers
                .iter()
                .filter(|carrier| carrier.min_ratio_capacity() > target)
                .min_by(|a, b| compare_floats(a.min_ratio_capacity() - target, b.min_ratio_capacity() - target));

            overshoot.into_iter().chain(undershoot).copied().collect()
        } else {
            direct
        };

        candidates.into_iter().try_fold(None::<(Cost, Assignment)>, |best, carrier| {
            let Some(assignment) = self.assign(route, carrier, target) else {
                return Ok(best);
            };

            let dispatch = assignment.dispatch.as_slice();
            let value = pricing_value(self.values, self.duals, carrier, route.distance, dispatch)?;

            Ok(match best {
                Some((best_value, _)) if best_value >= value => best,
                _ => Some((value, assignment)),
            })
        })
        .map(|best| best.map(|(_, assignment)| assignment))
    }

    fn assign(&self, route: &Route, carrier: &Carrier, target: Load) -> Option<Assignment> {
        let target = target.clamp(carrier.min_ratio_capacity(), carrier.capacity);
        let dispatch = allocate(&self.problem.graph, route.stops.as_slice(), target)?;

        if is_feasible(&self.problem.graph, carrier, route, dispatch.as_slice()) {
            Some(Assignment { carrier: carrier.id, dispatch })
        } else {
            None
        }
    }
}

/// Allocates the target quantity over route stops: minimum dispatch first, then up to demand
/// and finally up to max dispatch. Returns `None` if the target cannot be allocated exactly.
pub fn allocate(graph: &Graph, stops: &[StopId], target: Load) -> Option<Vec<(StopId, Load)>> {
    let stops = stops.iter().map(|&stop| graph.stop(stop)).collect::<Option<Vec<_>>>()?;

    let mut dispatch = stops.iter().map(|stop| (stop.id, stop.min_dispatch.min(stop.demand))).collect::<Vec<_>>();
    let mut remaining = target - dispatch.iter().map(|(_, quantity)| *quantity).sum::<Load>();

    if remaining < -EPSILON {
        return None;
    }

    let limits: [fn(&Stop) -> Load; 2] = [|stop| stop.demand, |stop| stop.max_dispatch];
    for limit in limits {
        for (stop, (_, quantity)) in stops.iter().zip(dispatch.iter_mut()) {
            if remaining <= EPSILON {
                break;
            }

            let room = (limit(stop) - *quantity).max(0.);
            let added = room.min(remaining);
            *quantity += added;
            remaining -= added;
        }
    }

    if remaining > EPSILON { None } else { Some(dispatch) }
}

/// Checks that dispatch respects stop bounds and carrier limits.
pub fn is_feasible(graph: &Graph, carrier: &Carrier, route: &Route, dispatch: &[(StopId, Load)]) -> bool {
    let stops_ok = dispatch.iter().all(|&(stop, quantity)| {
        graph.stop(stop).is_some_and(|stop| quantity >= -EPSILON && !exceeds(quantity, stop.max_dispatch))
    });

    let total = dispatch.iter().map(|(_, quantity)| *quantity).sum::<Load>();

    stops_ok
        && !exceeds(total, carrier.capacity)
        && !exceeds(carrier.min_ratio_capacity(), total)
        && !exceeds(route.distance, carrier.max_distance)
        && carrier.depot == route.depot
}
