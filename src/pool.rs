//! Reusable storage for nearest-neighbor search state.
//!
//! Queue items live in a slab addressed by slot number and queues are recycled
//! whole, so once a pool has served a few queries on a tree it stops
//! allocating.

use crate::node::NodeId;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::trace;

/// Candidate node waiting in the search queue
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct SearchItem {
    pub(crate) node: NodeId,
    /// Lower-bound squared distance from the query point
    pub(crate) distance: f64,
}

/// Min-heap key `(distance bits, node, slot)`.
///
/// Bit patterns of non-negative floats order the same way as their values and
/// node ids break ties, so the pop order never depends on slot reuse.
pub(crate) type QueueKey = Reverse<(u64, NodeId, u32)>;

pub(crate) type SearchQueue = BinaryHeap<QueueKey>;

/// Item and queue pools for nearest-neighbor queries.
///
/// A tree owns one set behind a mutex for [`find_nearest`](crate::StaticRTree::find_nearest).
/// Threads that query concurrently can each keep their own set and call
/// [`find_nearest_with`](crate::StaticRTree::find_nearest_with).
#[derive(Debug, Default)]
pub struct SearchPools {
    items: Vec<SearchItem>,
    free_slots: Vec<u32>,
    queues: Vec<SearchQueue>,
    queue_capacity: usize,
    items_out: usize,
    queues_out: usize,
}

/// Queues created up front, one for a query plus a spare
const INITIAL_QUEUES: usize = 2;

impl SearchPools {
    /// Creates pools pre-sized for `capacity` live queue items.
    ///
    /// For a tree of height `h` and branching factor `M`, `h * M` covers the
    /// items a balanced tree keeps queued at once. Slots are addressed by
    /// `u32`, so `capacity` is clamped to `u32::MAX`.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = u32::try_from(capacity).unwrap_or(u32::MAX);
        let capacity = slots as usize;
        let items = vec![SearchItem::default(); capacity];
        let free_slots = (0..slots).rev().collect();
        let queues = (0..INITIAL_QUEUES)
            .map(|_| SearchQueue::with_capacity(capacity))
            .collect();
        Self {
            items,
            free_slots,
            queues,
            queue_capacity: capacity,
            items_out: 0,
            queues_out: 0,
        }
    }

    /// Takes a reset item slot
    pub(crate) fn take_item(&mut self) -> u32 {
        self.items_out += 1;
        if let Some(slot) = self.free_slots.pop() {
            self.items[slot as usize] = SearchItem::default();
            return slot;
        }
        let slot = self.items.len() as u32;
        self.items.push(SearchItem::default());
        trace!(slots = self.items.len(), "search item slab grew");
        slot
    }

    #[inline]
    pub(crate) fn item(&self, slot: u32) -> SearchItem {
        self.items[slot as usize]
    }

    #[inline]
    pub(crate) fn item_mut(&mut self, slot: u32) -> &mut SearchItem {
        &mut self.items[slot as usize]
    }

    pub(crate) fn give_back_item(&mut self, slot: u32) {
        debug_assert!(self.items_out > 0, "item slot {slot} returned twice");
        self.items_out -= 1;
        self.free_slots.push(slot);
    }

    /// Takes an empty queue
    pub(crate) fn take_queue(&mut self) -> SearchQueue {
        self.queues_out += 1;
        self.queues.pop().unwrap_or_else(|| {
            trace!(capacity = self.queue_capacity, "search queue pool empty, allocating");
            SearchQueue::with_capacity(self.queue_capacity)
        })
    }

    pub(crate) fn give_back_queue(&mut self, mut queue: SearchQueue) {
        debug_assert!(self.queues_out > 0, "queue returned twice");
        self.queues_out -= 1;
        queue.clear();
        self.queues.push(queue);
    }

    /// Items and queues taken and not yet given back
    pub fn outstanding(&self) -> usize {
        self.items_out + self.queues_out
    }

    /// Item slots allocated so far, free or in use
    pub fn item_slots(&self) -> usize {
        self.items.len()
    }

    /// Queues currently idle in the pool
    pub fn idle_queues(&self) -> usize {
        self.queues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presized() {
        let pools = SearchPools::with_capacity(18);
        assert_eq!(pools.item_slots(), 18);
        assert_eq!(pools.idle_queues(), 2);
        assert_eq!(pools.outstanding(), 0);
    }

    #[test]
    fn test_item_reuse() {
        let mut pools = SearchPools::with_capacity(2);
        let a = pools.take_item();
        pools.item_mut(a).distance = 4.0;
        pools.item_mut(a).node = 3;
        assert_eq!(pools.outstanding(), 1);
        pools.give_back_item(a);

        let b = pools.take_item();
        assert_eq!(b, a, "freed slot should be reused first");
        assert_eq!(pools.item(b), SearchItem::default(), "taken item must be reset");
        pools.give_back_item(b);
        assert_eq!(pools.outstanding(), 0);
    }

    #[test]
    fn test_item_slab_grows_past_capacity() {
        let mut pools = SearchPools::with_capacity(1);
        let slots: Vec<u32> = (0..5).map(|_| pools.take_item()).collect();
        assert_eq!(pools.item_slots(), 5);
        for slot in slots {
            pools.give_back_item(slot);
        }
        let _again: Vec<u32> = (0..5).map(|_| pools.take_item()).collect();
        assert_eq!(pools.item_slots(), 5, "returned slots must be reused before growing");
    }

    #[test]
    fn test_queue_reuse_is_cleared() {
        let mut pools = SearchPools::with_capacity(4);
        let mut queue = pools.take_queue();
        queue.push(Reverse((1.5f64.to_bits(), 7, 0)));
        pools.give_back_queue(queue);

        let queue = pools.take_queue();
        assert!(queue.is_empty());
        pools.give_back_queue(queue);
        assert_eq!(pools.idle_queues(), 2);
        assert_eq!(pools.outstanding(), 0);
    }

    #[test]
    fn test_queue_pops_smallest_distance_first() {
        let mut queue = SearchQueue::new();
        for (distance, node) in [(9.0f64, 1), (0.25, 2), (4.0, 3), (0.0, 4)] {
            queue.push(Reverse((distance.to_bits(), node, 0)));
        }
        let order: Vec<NodeId> = std::iter::from_fn(|| queue.pop().map(|Reverse((_, node, _))| node)).collect();
        assert_eq!(order, vec![4, 2, 3, 1]);
    }
}
