//! Specifies labels: immutable partial path states kept in an arena.

#[cfg(test)]
#[path = "../../tests/unit/pricing/label_test.rs"]
mod label_test;

use crate::algorithms::structures::BitVec;
use crate::models::{DepotId, Distance, Load, Node, StopId};
use crate::utils::GenericResult;

/// An index of a label inside [LabelArena].
pub type LabelId = usize;

/// A search direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From depot along route arcs.
    Forward,
    /// From depot against route arcs.
    Backward,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Returns direction index which is used to address per direction storage.
    pub fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
        }
    }
}

/// Cumulative resources of a partial path.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Resources {
    /// Sum of visited stops demand.
    pub load: Load,
    /// Path distance.
    pub distance: Distance,
    /// Amount of visited stops.
    pub visits: usize,
}

/// A partial path state. Labels are never mutated: an extension creates a new label which refers
/// to its parent by index.
#[derive(Clone, Debug)]
pub struct Label {
    direction: Direction,
    node: Node,
    parent: Option<LabelId>,
    visited: BitVec,
    resources: Resources,
    depot: DepotId,
}

impl Label {
    /// Creates a root label of the depot.
    pub fn seed(direction: Direction, depot: DepotId, size: usize) -> Self {
        let visited = BitVec::new(size);
        Self { direction, node: Node::Depot(depot), parent: None, visited, resources: Resources::default(), depot }
    }

    /// Creates a new label checking its invariants.
    pub fn generate(
        direction: Direction,
        node: Node,
        parent: Option<LabelId>,
        visited: BitVec,
        resources: Resources,
        depot: DepotId,
    ) -> GenericResult<Self> {
        let is_valid = |value: f64| value.is_finite() && value >= 0.;
        if !is_valid(resources.load) || !is_valid(resources.distance) {
            return Err(format!(
                "invalid label resources at {node:?}: load={}, distance={}",
                resources.load, resources.distance
            )
            .into());
        }

        match node {
            Node::Stop(stop) if !visited.contains(stop) => {
                Err(format!("label at stop {stop} does not have it in the visited set").into())
            }
            Node::Depot(node_depot) if node_depot != depot || parent.is_some() => {
                Err(format!("depot label {node_depot} can be only a root of depot {depot}").into())
            }
            _ => Ok(Self { direction, node, parent, visited, resources, depot }),
        }
    }

    /// Creates a child label which visits given stop.
    pub fn extend(&self, id: LabelId, stop: StopId, arc: Distance, demand: Load) -> GenericResult<Self> {
        let resources = Resources {
            load: self.resources.load + demand,
            distance: self.resources.distance + arc,
            visits: self.resources.visits + 1,
        };

        Self::generate(self.direction, Node::Stop(stop), Some(id), self.visited.with(stop), resources, self.depot)
    }

    /// Returns search direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns current node.
    pub fn node(&self) -> Node {
        self.node
    }

    /// Returns parent label.
    pub fn parent(&self) -> Option<LabelId> {
        self.parent
    }

    /// Returns visited stops.
    pub fn visited(&self) -> &BitVec {
        &self.visited
    }

    /// Returns path resources.
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Returns path load.
    pub fn load(&self) -> Load {
        self.resources.load
    }

    /// Returns path distance.
    pub fn distance(&self) -> Distance {
        self.resources.distance
    }

    /// Returns amount of visited stops.
    pub fn visits(&self) -> usize {
        self.resources.visits
    }

    /// Returns owning depot.
    pub fn depot(&self) -> DepotId {
        self.depot
    }

    /// Returns true if label is a depot root.
    pub fn is_seed(&self) -> bool {
        self.parent.is_none()
    }
}

/// Keeps all labels created within one pricing call.
#[derive(Default)]
pub struct LabelArena {
    labels: Vec<Label>,
}

impl LabelArena {
    /// Adds a label to the arena checking its consistency with the parent.
    pub fn push(&mut self, label: Label) -> GenericResult<LabelId> {
        if let Some(parent) = label.parent {
            let parent = self.labels.get(parent).ok_or_else(|| format!("unknown parent label {parent}"))?;

            if parent.direction != label.direction || parent.depot != label.depot {
                return Err("label and its parent have different direction or depot".into());
            }

            let (p, l) = (&parent.resources, &label.resources);
            if l.load < p.load || l.distance < p.distance || l.visits < p.visits {
                return Err(format!("label resources decrease along the path at {:?}", label.node).into());
            }
        }

        self.labels.push(label);

        Ok(self.labels.len() - 1)
    }

    /// Removes the label if it was the last added one.
    pub fn discard(&mut self, id: LabelId) {
        if id + 1 == self.labels.len() {
            self.labels.pop();
        }
    }

    /// Returns label by its id. Panics if id was not issued by this arena.
    pub fn get(&self, id: LabelId) -> &Label {
        &self.labels[id]
    }

    /// Returns path nodes starting from the depot.
    pub fn path(&self, id: LabelId) -> Vec<Node> {
        let mut path = std::iter::successors(Some(id), |&id| self.labels[id].parent)
            .map(|id| self.labels[id].node)
            .collect::<Vec<_>>();
        path.reverse();

        path
    }

    /// Returns path stops starting from the depot.
    pub fn stops(&self, id: LabelId) -> Vec<StopId> {
        self.path(id).into_iter().filter_map(|node| node.as_stop()).collect()
    }

    /// Returns amount of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if arena has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
