//! Keeps non-dominated labels per stop and direction.

#[cfg(test)]
#[path = "../../tests/unit/pricing/pool_test.rs"]
mod pool_test;

use crate::algorithms::structures::BitVec;
use crate::models::{DepotId, Node};
use crate::pricing::label::{LabelArena, LabelId};
use rustc_hash::FxHashMap;

type Bucket = FxHashMap<(DepotId, BitVec), LabelId>;

/// A dominance pool: for the same stop, direction, depot and visited set only the shortest label
/// is kept. Labels with different visited sets never dominate each other.
pub struct DominancePool {
    buckets: Vec<[Bucket; 2]>,
    size: usize,
}

impl DominancePool {
    /// Creates a new pool for the graph with given amount of stops.
    pub fn new(stops: usize) -> Self {
        Self { buckets: (0..stops).map(|_| [Bucket::default(), Bucket::default()]).collect(), size: 0 }
    }

    /// Tries to add a label, returns true if it is inserted. A label which replaces a longer one
    /// evicts it and reports eviction via `on_evict`. Depot labels are never pooled.
    pub fn try_add(&mut self, arena: &LabelArena, id: LabelId, mut on_evict: impl FnMut(LabelId)) -> bool {
        let label = arena.get(id);
        let Node::Stop(stop) = label.node() else {
            return false;
        };

        let bucket = &mut self.buckets[stop][label.direction().index()];
        let key = (label.depot(), label.visited().clone());

        match bucket.get(&key).copied() {
            Some(existing) if arena.get(existing).distance() <= label.distance() => false,
            Some(existing) => {
                on_evict(existing);
                bucket.insert(key, id);
                true
            }
            None => {
                bucket.insert(key, id);
                self.size += 1;
                true
            }
        }
    }

    /// Checks whether the label is currently kept by the pool.
    pub fn contains(&self, arena: &LabelArena, id: LabelId) -> bool {
        let label = arena.get(id);
        label.node().as_stop().is_some_and(|stop| {
            self.buckets[stop][label.direction().index()].get(&(label.depot(), label.visited().clone())) == Some(&id)
        })
    }

    /// Returns amount of kept labels.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if pool has no labels.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
