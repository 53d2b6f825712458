//! Priority queues of labels waiting for expansion.

#[cfg(test)]
#[path = "../../tests/unit/pricing/queue_test.rs"]
mod queue_test;

use crate::config::Scheduling;
use crate::models::{Distance, Load};
use crate::pricing::label::{Direction, Label, LabelId};
use crate::utils::compare_floats;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    distance: Distance,
    load: Load,
    id: LabelId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // NOTE heap is a max heap: shorter distance, then bigger load, then older label goes first
    fn cmp(&self, other: &Self) -> Ordering {
        compare_floats(other.distance, self.distance)
            .then_with(|| compare_floats(self.load, other.load))
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// A label priority queue with lazy deletion: removed labels stay in the heap and are skipped
/// on poll.
#[derive(Default)]
pub struct LabelQueue {
    heap: BinaryHeap<QueueEntry>,
    queued: FxHashSet<LabelId>,
}

impl LabelQueue {
    /// Adds label to the queue.
    pub fn push(&mut self, label: &Label, id: LabelId) {
        if self.queued.insert(id) {
            self.heap.push(QueueEntry { distance: label.distance(), load: label.load(), id });
        }
    }

    /// Marks label as removed, returns true if it was queued.
    pub fn remove(&mut self, id: LabelId) -> bool {
        self.queued.remove(&id)
    }

    /// Returns the label with the highest priority.
    pub fn pop(&mut self) -> Option<LabelId> {
        while let Some(entry) = self.heap.pop() {
            if self.queued.remove(&entry.id) {
                return Some(entry.id);
            }
        }

        None
    }

    /// Returns amount of queued labels.
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    /// Returns true if no label is queued.
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}

/// Keeps forward and backward queues and decides which of them is served next.
pub struct Frontier {
    scheduling: Scheduling,
    queues: Vec<[LabelQueue; 2]>,
    served: Vec<usize>,
}

impl Frontier {
    /// Creates a new frontier for given amount of depots.
    pub fn new(scheduling: Scheduling, depots: usize) -> Self {
        let slots = match scheduling {
            Scheduling::Global => 1,
            Scheduling::DepotFairness => depots.max(1),
        };

        Self {
            scheduling,
            queues: (0..slots).map(|_| [LabelQueue::default(), LabelQueue::default()]).collect(),
            served: vec![0; slots],
        }
    }

    /// Adds label to its queue.
    pub fn push(&mut self, label: &Label, id: LabelId) {
        let slot = self.slot(label);
        self.queues[slot][label.direction().index()].push(label, id);
    }

    /// Removes label from its queue.
    pub fn remove(&mut self, label: &Label, id: LabelId) -> bool {
        let slot = self.slot(label);
        self.queues[slot][label.direction().index()].remove(id)
    }

    /// Selects a slot to serve: the least served one which has queued labels, ties are broken by
    /// the lowest index. Returns `None` when all queues are empty.
    pub fn select(&mut self) -> Option<usize> {
        let slot = self
            .queues
            .iter()
            .enumerate()
            .filter(|(_, queues)| queues.iter().any(|queue| !queue.is_empty()))
            .min_by_key(|(slot, _)| (self.served[*slot], *slot))
            .map(|(slot, _)| slot)?;

        self.served[slot] += 1;

        Some(slot)
    }

    /// Polls a label of given direction from the slot.
    pub fn pop(&mut self, slot: usize, direction: Direction) -> Option<LabelId> {
        self.queues.get_mut(slot).and_then(|queues| queues[direction.index()].pop())
    }

    /// Returns amount of queued labels per direction.
    pub fn sizes(&self) -> (usize, usize) {
        self.queues.iter().fold((0, 0), |(forward, backward), queues| {
            (forward + queues[Direction::Forward.index()].len(), backward + queues[Direction::Backward.index()].len())
        })
    }

    /// Returns true if all queues are empty.
    pub fn is_empty(&self) -> bool {
        self.sizes() == (0, 0)
    }

    fn slot(&self, label: &Label) -> usize {
        match self.scheduling {
            Scheduling::Global => 0,
            Scheduling::DepotFairness => label.depot(),
        }
    }
}
