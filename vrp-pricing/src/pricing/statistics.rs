//! Pricing call statistics.

use crate::models::Cost;
use crate::utils::Float;
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};

/// A reason why a label extension or a connection was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rejection {
    /// The stop is already visited.
    Tabu,
    /// Single direction visit cap is exceeded.
    VisitCap,
    /// Single direction capacity cap is exceeded.
    CapacityCap,
    /// Single direction distance cap is exceeded.
    DistanceCap,
    /// A label with the same visited set is not longer.
    Dominated,
    /// Connected labels belong to different depots.
    DepotMismatch,
    /// There is no arc between connected labels.
    MissingArc,
    /// Combined distance is exceeded.
    CombinedDistance,
    /// Combined load is exceeded.
    CombinedCapacity,
    /// Combined visits are exceeded.
    CombinedVisits,
    /// Connected labels visit the same stop.
    Overlap,
    /// Both connected labels are depot roots.
    EmptyRoute,
    /// A route with the same visited set is not longer.
    Duplicate,
    /// No carrier can take the route.
    NoCarrier,
    /// Primal price is below the profit floor.
    Unprofitable,
}

/// Specifies why a pricing call has stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Termination {
    /// All queues are exhausted.
    #[default]
    Exhausted,
    /// Time limit is reached.
    TimeLimit,
    /// Enough orders are found.
    OrderLimit,
    /// External quota is reached.
    Quota,
    /// Orders were returned from previously found ones without search.
    Backlog,
}

/// Keeps counters of one pricing call.
#[derive(Clone, Debug, Default)]
pub struct PricingStatistics {
    /// Rejection counters.
    pub rejections: FxHashMap<Rejection, usize>,
    /// Amount of expanded labels.
    pub expansions: usize,
    /// Amount of connection attempts.
    pub connections: usize,
    /// Amount of labels evicted from dominance pool.
    pub evicted_labels: usize,
    /// Amount of accepted orders.
    pub accepted_orders: usize,
    /// Amount of orders replaced by a shorter route with the same visited set.
    pub replaced_orders: usize,
    /// Best primal price among accepted orders.
    pub best_objective: Option<Cost>,
    /// Elapsed time in seconds.
    pub elapsed_secs: Float,
    /// Why the call has stopped.
    pub termination: Termination,
}

impl PricingStatistics {
    /// Counts the rejection.
    pub fn reject(&mut self, reason: Rejection) {
        *self.rejections.entry(reason).or_insert(0) += 1;
    }

    /// Returns the count of the rejection.
    pub fn rejected(&self, reason: Rejection) -> usize {
        self.rejections.get(&reason).copied().unwrap_or(0)
    }

    /// Registers accepted order price.
    pub fn accept(&mut self, primal_price: Cost, is_replacement: bool) {
        self.accepted_orders += 1;
        self.replaced_orders += usize::from(is_replacement);
        self.best_objective = Some(self.best_objective.map_or(primal_price, |best| best.max(primal_price)));
    }
}

impl Display for PricingStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "termination: {:?}, expansions: {}, connections: {}, evicted: {}, accepted: {}, replaced: {}, \
             best: {}, elapsed: {:.3}s",
            self.termination,
            self.expansions,
            self.connections,
            self.evicted_labels,
            self.accepted_orders,
            self.replaced_orders,
            self.best_objective.map_or("n/a".to_string(), |best| format!("{best:.2}")),
            self.elapsed_secs
        )?;

        let mut rejections = self.rejections.iter().collect::<Vec<_>>();
        rejections.sort();

        if !rejections.is_empty() {
            let rejections =
                rejections.into_iter().map(|(reason, count)| format!("{reason:?}={count}")).collect::<Vec<_>>();
            write!(f, ", rejections: [{}]", rejections.join(", "))?;
        }

        Ok(())
    }
}
