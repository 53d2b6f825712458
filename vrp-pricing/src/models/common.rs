use crate::utils::Float;
use serde::{Deserialize, Serialize};

/// Specifies distance type.
pub type Distance = Float;

/// Specifies load (quantity) type.
pub type Load = Float;

/// Specifies cost (money) type.
pub type Cost = Float;

/// Specifies stop index type, stops are indexed from zero without gaps.
pub type StopId = usize;

/// Specifies depot index type, depots are indexed from zero without gaps.
pub type DepotId = usize;

/// Specifies carrier index type, carriers are indexed from zero without gaps.
pub type CarrierId = usize;

/// Represents a node of the routing graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    /// A depot: route start and end.
    Depot(DepotId),
    /// A stop which has to be served.
    Stop(StopId),
}

impl Node {
    /// Returns stop index if the node is a stop.
    pub fn as_stop(&self) -> Option<StopId> {
        match self {
            Node::Stop(stop) => Some(*stop),
            Node::Depot(_) => None,
        }
    }
}

/// A geographical coordinate, kept only to describe the problem.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude.
    pub lng: Float,
    /// Latitude.
    pub lat: Float,
}
