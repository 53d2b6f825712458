//! Specifies carriers (vehicles) and their grouping by depot.

#[cfg(test)]
#[path = "../../tests/unit/models/fleet_test.rs"]
mod fleet_test;

use crate::models::{CarrierId, Cost, DepotId, Distance, Load};
use crate::utils::{Float, GenericResult};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Represents a carrier which can execute an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    /// Carrier index.
    pub id: CarrierId,
    /// A depot where carrier starts and ends its route.
    pub depot: DepotId,
    /// Max load.
    pub capacity: Load,
    /// A share of capacity which has to be loaded at least.
    pub min_load_ratio: Float,
    /// Max route distance.
    pub max_distance: Distance,
    /// Cost of one distance unit.
    pub cost_per_distance: Cost,
    /// How many times the carrier can be used by the master problem.
    pub max_uses: usize,
}

impl Carrier {
    /// Returns a minimum load which carrier accepts.
    pub fn min_ratio_capacity(&self) -> Load {
        self.capacity * self.min_load_ratio
    }

    /// Checks whether carrier can drive the route of given depot and distance.
    pub fn can_drive(&self, depot: DepotId, distance: Distance) -> bool {
        self.depot == depot && distance <= self.max_distance
    }

    /// Checks whether carrier accepts the load.
    pub fn accepts(&self, load: Load) -> bool {
        load >= self.min_ratio_capacity() && load <= self.capacity
    }
}

/// Keeps all carriers grouped by their depots.
pub struct Fleet {
    carriers: Vec<Carrier>,
    by_depot: FxHashMap<DepotId, Vec<CarrierId>>,
}

impl Fleet {
    /// Creates a new fleet validating carrier definitions.
    pub fn new(carriers: Vec<Carrier>) -> GenericResult<Self> {
        carriers.iter().enumerate().try_for_each(|(idx, carrier)| {
            if carrier.id != idx {
                return Err(format!("carrier id {} does not match its position {idx}", carrier.id));
            }

            let is_valid = carrier.capacity.is_finite()
                && carrier.capacity > 0.
                && (0. ..=1.).contains(&carrier.min_load_ratio)
                && carrier.max_distance >= 0.
                && carrier.cost_per_distance.is_finite()
                && carrier.cost_per_distance >= 0.;

            if is_valid { Ok(()) } else { Err(format!("carrier {idx} has invalid capacity, ratio, distance or cost")) }
        })?;

        let by_depot = carriers.iter().fold(FxHashMap::<DepotId, Vec<CarrierId>>::default(), |mut acc, carrier| {
            acc.entry(carrier.depot).or_default().push(carrier.id);
            acc
        });

        Ok(Self { carriers, by_depot })
    }

    /// Returns all carriers.
    pub fn carriers(&self) -> &[Carrier] {
        self.carriers.as_slice()
    }

    /// Returns carrier by its index.
    pub fn carrier(&self, id: CarrierId) -> Option<&Carrier> {
        self.carriers.get(id)
    }

    /// Returns carriers based at the given depot.
    pub fn at_depot(&self, depot: DepotId) -> impl Iterator<Item = &Carrier> + '_ {
        self.by_depot.get(&depot).into_iter().flat_map(|ids| ids.iter().map(|id| &self.carriers[*id]))
    }
}
