use crate::models::duals::Constraint;
use crate::models::fleet::Fleet;
use crate::models::graph::Graph;
use crate::utils::{Float, GenericResult};

/// Defines a pricing problem: a routing graph with carriers which serve it.
pub struct Problem {
    /// A routing graph.
    pub graph: Graph,
    /// Available carriers.
    pub fleet: Fleet,
}

impl Problem {
    /// Creates a new problem checking that all carriers belong to known depots.
    pub fn new(graph: Graph, fleet: Fleet) -> GenericResult<Self> {
        if let Some(carrier) = fleet.carriers().iter().find(|carrier| graph.depot(carrier.depot).is_none()) {
            return Err(format!("carrier {} refers to unknown depot {}", carrier.id, carrier.depot).into());
        }

        Ok(Self { graph, fleet })
    }

    /// Returns master problem constraints with their right hand side:
    /// stop capacity is limited by its demand, carrier usage by max uses.
    pub fn constraints(&self) -> impl Iterator<Item = (Constraint, Float)> + '_ {
        let stops = self.graph.stops().iter().map(|stop| (Constraint::StopCapacity(stop.id), stop.demand));
        let carriers = self
            .fleet
            .carriers()
            .iter()
            .map(|carrier| (Constraint::CarrierUsage(carrier.id), carrier.max_uses as Float));

        stops.chain(carriers)
    }
}
