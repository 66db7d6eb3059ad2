//! Frontier containers for the two search variants.
//!
//! The priority variant orders entries by `(cost, insertion_order)`, so
//! equal-cost entries leave in the order they were pushed. With uniform
//! weights that makes it pop exactly what the FIFO variant pops.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) index: usize,
    pub(crate) cost: i32,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.cmp(&other.cost).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Nodes discovered but not yet expanded.
#[derive(Debug)]
pub(crate) enum Frontier {
    Fifo(VecDeque<usize>),
    Priority {
        heap: BinaryHeap<Reverse<Entry>>,
        seq: u64,
    },
}

impl Frontier {
    pub(crate) fn fifo() -> Self {
        Self::Fifo(VecDeque::new())
    }

    pub(crate) fn priority() -> Self {
        Self::Priority {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Queue `index`. `cost` is ignored by the FIFO variant. Duplicate
    /// entries for one node are allowed.
    pub(crate) fn push(&mut self, index: usize, cost: i32) {
        match self {
            Self::Fifo(q) => q.push_back(index),
            Self::Priority { heap, seq } => {
                heap.push(Reverse(Entry {
                    index,
                    cost,
                    seq: *seq,
                }));
                *seq += 1;
            }
        }
    }

    /// Next entry as `(index, cost)`. The FIFO variant reports cost 0.
    pub(crate) fn pop(&mut self) -> Option<(usize, i32)> {
        match self {
            Self::Fifo(q) => q.pop_front().map(|i| (i, 0)),
            Self::Priority { heap, .. } => heap.pop().map(|Reverse(e)| (e.index, e.cost)),
        }
    }

    /// Drain every remaining node index.
    pub(crate) fn drain(&mut self) -> Vec<usize> {
        match self {
            Self::Fifo(q) => q.drain(..).collect(),
            Self::Priority { heap, .. } => heap.drain().map(|Reverse(e)| e.index).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut f = Frontier::fifo();
        f.push(3, 9);
        f.push(1, 0);
        assert_eq!(f.pop(), Some((3, 0)));
        assert_eq!(f.pop(), Some((1, 0)));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn priority_lowest_cost_first() {
        let mut f = Frontier::priority();
        f.push(7, 5);
        f.push(8, 2);
        f.push(9, 3);
        assert_eq!(f.pop(), Some((8, 2)));
        assert_eq!(f.pop(), Some((9, 3)));
        assert_eq!(f.pop(), Some((7, 5)));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn priority_ties_keep_insertion_order() {
        let mut f = Frontier::priority();
        for i in [4, 2, 6, 0] {
            f.push(i, 1);
        }
        let order: Vec<usize> = std::iter::from_fn(|| f.pop().map(|(i, _)| i)).collect();
        assert_eq!(order, vec![4, 2, 6, 0]);
    }

    #[test]
    fn duplicates_surface_cheapest_first() {
        let mut f = Frontier::priority();
        f.push(5, 10);
        f.push(5, 4);
        assert_eq!(f.pop(), Some((5, 4)));
        assert_eq!(f.pop(), Some((5, 10)));
    }

    #[test]
    fn drain_empties() {
        let mut f = Frontier::priority();
        f.push(1, 1);
        f.push(2, 1);
        let mut left = f.drain();
        left.sort();
        assert_eq!(left, vec![1, 2]);
        assert_eq!(f.pop(), None);
    }
}
