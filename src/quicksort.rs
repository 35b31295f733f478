//! In-place partition-exchange sort (quicksort, Lomuto partition scheme)
//!
//! The sort is generic over any `PartialOrd` element and never allocates a
//! second buffer. It is not stable. Elements must be totally ordered by `<`;
//! with unordered values (NaN) the result is still a permutation of the input
//! but its order is unspecified.

use crate::pivot::{PivotSelector, PivotStrategy};

/// Sort `v` in ascending order using the last element of every range as the pivot.
pub fn sort<T: PartialOrd>(v: &mut [T]) {
    Sorter::default().sort(v);
}

/// Partition-exchange sorter with a configurable pivot policy
#[derive(Debug, Clone, Default)]
pub struct Sorter {
    pivot: PivotSelector,
}

impl Sorter {
    pub fn new(strategy: PivotStrategy) -> Self {
        Self {
            pivot: PivotSelector::new(strategy, None),
        }
    }

    /// Sorter with a reproducible random pivot sequence
    pub fn with_seed(strategy: PivotStrategy, seed: u64) -> Self {
        Self {
            pivot: PivotSelector::new(strategy, Some(seed)),
        }
    }

    pub fn strategy(&self) -> PivotStrategy {
        self.pivot.strategy()
    }

    /// Sort `v` in place into non-decreasing order.
    ///
    /// The smaller side of every partition is sorted recursively and the
    /// larger side in the loop, so stack depth stays logarithmic even when
    /// the pivot is always an extreme element.
    pub fn sort<T: PartialOrd>(&mut self, v: &mut [T]) {
        let mut v = v;
        while v.len() > 1 {
            let last = v.len() - 1;
            let pivot = self.pivot.choose(v);
            v.swap(pivot, last);

            let mid = partition(v);
            let (left, right) = std::mem::take(&mut v).split_at_mut(mid);
            let right = &mut right[1..];

            if left.len() < right.len() {
                self.sort(left);
                v = right;
            } else {
                self.sort(right);
                v = left;
            }
        }
    }
}

/// Lomuto partition around the last element of `v`.
///
/// Returns the final index of the pivot: everything before it is strictly
/// less than the pivot, everything after it is not.
fn partition<T: PartialOrd>(v: &mut [T]) -> usize {
    let last = v.len() - 1;
    let mut store = 0;

    for j in 0..last {
        if v[j] < v[last] {
            v.swap(store, j);
            store += 1;
        }
    }

    v.swap(store, last);
    store
}

/// Index of the first element that is less than its predecessor, if any.
pub fn first_disorder<T: PartialOrd>(v: &[T]) -> Option<usize> {
    v.windows(2).position(|w| w[1] < w[0]).map(|i| i + 1)
}
