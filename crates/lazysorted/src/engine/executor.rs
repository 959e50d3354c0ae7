//! Partial-sort executor.
//!
//! ## Purpose
//!
//! This module owns the engine pair, the element array and the pivot treap,
//! and keeps them consistent while answering queries with the minimum
//! sorting work. Point queries run bounded quickselect; range queries sort
//! the regions a range spans; value queries run quickselect steered by
//! comparisons against the probe value.
//!
//! ## Design notes
//!
//! * **Pivots fall out of partitioning**: Every partition step settles one
//!   position permanently, and that position is recorded in the treap so no
//!   later query repeats the work.
//! * **Duplicate collapse**: A fresh pivot whose value equals a flanking
//!   pivot's makes the flank redundant; the flank's flags move onto the new
//!   pivot and the flank is deleted. When such a collapse removes the bound
//!   the current quickselect was narrowing toward, the region between is
//!   constant-valued and the query is already answered.
//! * **Empty regions are sorted regions**: When partitioning leaves two
//!   pivots adjacent, the empty region between them is flagged sorted
//!   immediately; nothing could ever query inside it.
//! * **Failure safety**: Comparator errors propagate out of every primitive.
//!   An aborted partition may leave a region permuted, but no position is
//!   recorded as a pivot unless its partition completed, so invariants hold
//!   and the sequence remains usable.
//!
//! ## Invariants
//!
//! * For every pivot `p` with `0 <= p.idx < len`, `data[p.idx]` is the
//!   `p.idx`-th order statistic of the array.
//! * A region flagged sorted is in nondecreasing order.
//!
//! ## Non-goals
//!
//! * This module does not validate user-facing indices (handled by
//!   `validator`).
//! * This module does not clamp or clone for the caller (handled by the API
//!   facade).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::algorithms::partition::{insertion_sort, partition, quick_sort};
use crate::engine::output::PivotView;
use crate::engine::tree::{IndexBound, NodeId, PivotFlags, PivotTree};
use crate::primitives::compare::Comparator;
use crate::primitives::errors::LazySortedError;
use crate::primitives::rng::PivotRng;

// ============================================================================
// Executor
// ============================================================================

/// The partial-sort engine: element array plus pivot treap.
#[derive(Debug)]
pub struct LazyExecutor<T, C> {
    data: Vec<T>,
    tree: PivotTree,
    rng: PivotRng,
    cmp: C,
    sort_threshold: usize,
}

/// Which flanking pivots a duplicate collapse removed.
#[derive(Debug, Clone, Copy, Default)]
struct UniqOutcome {
    left_removed: bool,
    right_removed: bool,
}

impl<T, C: Comparator<T>> LazyExecutor<T, C> {
    /// Take ownership of the elements and install the sentinels.
    pub fn new(data: Vec<T>, cmp: C, sort_threshold: usize, seed: Option<u64>) -> Self {
        debug_assert!(sort_threshold >= 1);
        let mut rng = match seed {
            Some(seed) => PivotRng::new(seed),
            None => PivotRng::from_counter(),
        };
        let tree = PivotTree::new(data.len(), &mut rng);
        let mut executor = Self {
            data,
            tree,
            rng,
            cmp,
            sort_threshold,
        };
        // A zero-length sequence is vacuously sorted between its sentinels;
        // for any other length the sentinels are not adjacent and this is a
        // no-op.
        if let Some(lo) = executor.tree.first() {
            if let Some(hi) = executor.tree.succ(lo) {
                executor.mark_empty_gap(lo, hi);
            }
        }
        executor
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current (partially sorted) element storage.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The comparator, e.g. to read counters off an instrumented one.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Hand the element storage back, in its current partial order.
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }

    /// Borrow the pivot tree for inspection from the test suite.
    #[cfg(feature = "dev")]
    pub fn tree(&self) -> &PivotTree {
        &self.tree
    }

    /// In-order `(index, flag-name)` snapshot of the pivot tree.
    pub fn pivots(&self) -> Vec<PivotView> {
        let mut views = Vec::new();
        let mut current = self.tree.first();
        while let Some(id) = current {
            views.push(PivotView {
                index: self.tree.idx(id),
                flag: self.tree.flags(id).name(),
            });
            current = self.tree.succ(id);
        }
        views
    }

    // ========================================================================
    // Point Queries
    // ========================================================================

    /// Ensure `data[k]` holds the `k`-th order statistic.
    ///
    /// Runs quickselect bounded by the tightest pivots surrounding `k`,
    /// recording each partition's pivot, until the region around `k` fits
    /// under the insertion-sort cutoff. `k == len` is accepted and resolves
    /// to the upper sentinel.
    pub fn sort_point(&mut self, k: usize) -> Result<(), LazySortedError> {
        let k = k as isize;
        let (mut left, mut right) = match self.tree.bound(k) {
            IndexBound::At(_) => return Ok(()),
            IndexBound::Between(left, right) => (left, right),
        };

        let thresh = self.sort_threshold as isize;
        loop {
            // The bounding region may be sorted already, or have become so
            // through a duplicate collapse below.
            if self.tree.flags(right).contains(PivotFlags::SORTED_RIGHT) {
                return Ok(());
            }
            if self.tree.idx(left) + 1 + thresh > self.tree.idx(right) {
                break;
            }
            let lo = (self.tree.idx(left) + 1) as usize;
            let hi = self.tree.idx(right) as usize;
            let piv = partition(&mut self.data, &mut self.cmp, &mut self.rng, lo, hi)? as isize;

            let middle = self.insert_between(piv, left, right);
            let outcome = self.uniq_pivots(left, middle, right)?;

            if piv < k {
                if !outcome.left_removed {
                    self.mark_empty_gap(left, middle);
                }
                if outcome.right_removed {
                    // The old bound collapsed into `middle`; the merged
                    // region now runs to middle's successor.
                    right = match self.tree.succ(middle) {
                        Some(next) => next,
                        None => return Ok(()),
                    };
                }
                left = middle;
            } else if piv > k {
                if !outcome.right_removed {
                    self.mark_empty_gap(middle, right);
                }
                if outcome.left_removed {
                    left = match self.tree.pred(middle) {
                        Some(prev) => prev,
                        None => return Ok(()),
                    };
                }
                right = middle;
            } else {
                if !outcome.left_removed {
                    self.mark_empty_gap(left, middle);
                }
                if !outcome.right_removed {
                    self.mark_empty_gap(middle, right);
                }
                return Ok(());
            }
        }

        self.finish_region(left, right)
    }

    /// Ensure `data[start..stop]` is sorted.
    ///
    /// Settles both endpoints, then walks the pivots spanning the range and
    /// quicksorts each unsorted region. Pivots that end up interior to one
    /// sorted run are dropped.
    pub fn sort_range(&mut self, start: usize, stop: usize) -> Result<(), LazySortedError> {
        debug_assert!(start < stop && stop <= self.data.len());

        self.sort_point(start)?;
        self.sort_point(stop)?;

        let (mut current, mut next) = match self.tree.bound(start as isize) {
            IndexBound::At(id) => (id, self.tree.succ(id)),
            IndexBound::Between(left, right) => (left, Some(right)),
        };

        while self.tree.idx(current) < stop as isize {
            let nxt = match next {
                Some(nxt) => nxt,
                None => break,
            };

            if self.tree.flags(current).contains(PivotFlags::SORTED_LEFT) {
                debug_assert!(self.tree.flags(nxt).contains(PivotFlags::SORTED_RIGHT));
            } else {
                // The whole region must become sorted, so interim pivots
                // would record positions nobody can query more cheaply
                // later; plain quicksort skips the bookkeeping.
                let lo = (self.tree.idx(current) + 1) as usize;
                let hi = self.tree.idx(nxt) as usize;
                quick_sort(
                    &mut self.data,
                    &mut self.cmp,
                    &mut self.rng,
                    lo,
                    hi,
                    self.sort_threshold,
                )?;
                self.tree.add_flags(current, PivotFlags::SORTED_LEFT);
                self.tree.add_flags(nxt, PivotFlags::SORTED_RIGHT);
            }

            if self.tree.flags(current).contains(PivotFlags::SORTED_RIGHT) {
                self.tree.delete(current);
            }

            current = nxt;
            next = self.tree.succ(current);
        }

        debug_assert!(self.tree.flags(current).contains(PivotFlags::SORTED_RIGHT));
        if self.tree.flags(current).contains(PivotFlags::SORTED_LEFT) {
            self.tree.delete(current);
        }

        Ok(())
    }

    // ========================================================================
    // Value Queries
    // ========================================================================

    /// First index holding a value equal to `item`, or `None`.
    ///
    /// Descends the tree by comparing pivot values against the probe, then
    /// quickselects within the bounded region until it is sorted, and scans
    /// it for the first equal element.
    pub fn find_item(&mut self, item: &T) -> Result<Option<usize>, LazySortedError> {
        let n = self.data.len() as isize;

        // BST descent keyed by value; sentinels compare asymmetrically.
        let mut left: Option<NodeId> = None;
        let mut right: Option<NodeId> = None;
        let mut current = self.tree.root();
        while let Some(id) = current {
            let idx = self.tree.idx(id);
            let goes_left = if idx == -1 {
                false
            } else if idx == n {
                true
            } else {
                !self.cmp.lt(&self.data[idx as usize], item)?
            };
            if goes_left {
                right = Some(id);
                current = self.tree.left_child(id);
            } else {
                left = Some(id);
                current = self.tree.right_child(id);
            }
        }
        let (mut left, mut right) = match (left, right) {
            (Some(left), Some(right)) => (left, right),
            _ => unreachable!("sentinels terminate every descent on both sides"),
        };

        if !self.tree.flags(left).contains(PivotFlags::SORTED_LEFT) {
            let thresh = self.sort_threshold as isize;
            while self.tree.idx(left) + 1 + thresh <= self.tree.idx(right) {
                let lo = (self.tree.idx(left) + 1) as usize;
                let hi = self.tree.idx(right) as usize;
                let piv =
                    partition(&mut self.data, &mut self.cmp, &mut self.rng, lo, hi)? as isize;

                let below = self.cmp.lt(&self.data[piv as usize], item)?;
                let middle = self.insert_between(piv, left, right);
                let outcome = self.uniq_pivots(left, middle, right)?;

                if below {
                    // item <= data[right.idx], so the collapse can only have
                    // taken the left flank.
                    debug_assert!(!outcome.right_removed);
                    if !outcome.left_removed {
                        self.mark_empty_gap(left, middle);
                    }
                    left = middle;
                } else {
                    debug_assert!(!outcome.left_removed);
                    if !outcome.right_removed {
                        self.mark_empty_gap(middle, right);
                    }
                    right = middle;
                }
            }

            let lo = (self.tree.idx(left) + 1) as usize;
            let hi = self.tree.idx(right) as usize;
            insertion_sort(&mut self.data, &mut self.cmp, lo, hi)?;
            self.tree.add_flags(left, PivotFlags::SORTED_LEFT);
            self.tree.add_flags(right, PivotFlags::SORTED_RIGHT);
            self.tree.depivot(left, right);

            // depivot may have dropped either flank; only indices are needed
            // from here on.
            let scan_hi = if hi as isize == n { n } else { hi as isize + 1 };
            return self.scan_for(item, lo as isize, scan_hi);
        }

        let scan_lo = self.tree.idx(left) + 1;
        let right_idx = self.tree.idx(right);
        let scan_hi = if right_idx == n { n } else { right_idx + 1 };
        self.scan_for(item, scan_lo, scan_hi)
    }

    /// Linear probe of a sorted span; first hit wins. The span includes the
    /// bounding pivot position itself, whose value may equal the probe.
    fn scan_for(
        &mut self,
        item: &T,
        lo: isize,
        hi: isize,
    ) -> Result<Option<usize>, LazySortedError> {
        for k in lo..hi {
            if self.cmp.eq(item, &self.data[k as usize])? {
                return Ok(Some(k as usize));
            }
        }
        Ok(None)
    }

    /// Number of elements equal to `item`.
    ///
    /// Finds the first occurrence, expands right through pivots whose values
    /// still compare equal, and counts equals across the covered span.
    pub fn count_item(&mut self, item: &T) -> Result<usize, LazySortedError> {
        let k = match self.find_item(item)? {
            Some(k) => k,
            None => return Ok(0),
        };

        let n = self.data.len() as isize;
        let mut stop = match self.tree.bound(k as isize) {
            IndexBound::At(id) => self.tree.succ(id),
            IndexBound::Between(_, right) => Some(right),
        };

        // Walk right while the pivot values themselves still match; the
        // first mismatching pivot caps the run, since everything beyond it
        // is at least as large.
        let mut matched = true;
        let mut cap = n;
        while let Some(id) = stop {
            if self.tree.idx(id) >= n || !matched {
                cap = self.tree.idx(id).min(n);
                break;
            }
            matched = self.cmp.eq(item, &self.data[self.tree.idx(id) as usize])?;
            stop = self.tree.succ(id);
        }

        let mut count = 1;
        for i in (k as isize + 1)..cap {
            if self.cmp.eq(item, &self.data[i as usize])? {
                count += 1;
            }
        }
        Ok(count)
    }

    // ========================================================================
    // Pivot Maintenance
    // ========================================================================

    /// Record a partition's pivot between two bounding pivots.
    fn insert_between(&mut self, idx: isize, left: NodeId, right: NodeId) -> NodeId {
        // Descend from whichever bound is the parent of the new in-order
        // position.
        let hint = if self.tree.right_child(left).is_none() {
            left
        } else {
            right
        };
        let priority = self.rng.next_u32();
        self.tree
            .insert(idx, PivotFlags::UNSORTED, priority, Some(hint))
    }

    /// Collapse value-duplicate pivots around a fresh `middle` pivot.
    ///
    /// If the values at `left` and `middle` compare equal, `left` carries no
    /// extra information: its flags move onto `middle` and it is deleted.
    /// Symmetrically for `right`. Sentinel indices skip their comparison.
    fn uniq_pivots(
        &mut self,
        left: NodeId,
        middle: NodeId,
        right: NodeId,
    ) -> Result<UniqOutcome, LazySortedError> {
        let n = self.data.len() as isize;
        let mut outcome = UniqOutcome::default();

        let left_idx = self.tree.idx(left);
        let middle_idx = self.tree.idx(middle);
        let right_idx = self.tree.idx(right);
        debug_assert!(left_idx < middle_idx && middle_idx < right_idx);

        if left_idx >= 0
            && self
                .cmp
                .eq(&self.data[left_idx as usize], &self.data[middle_idx as usize])?
        {
            let flags = self.tree.flags(left);
            self.tree.add_flags(middle, flags);
            self.tree.delete(left);
            outcome.left_removed = true;
        }

        if right_idx < n
            && self
                .cmp
                .eq(&self.data[middle_idx as usize], &self.data[right_idx as usize])?
        {
            let flags = self.tree.flags(right);
            self.tree.add_flags(middle, flags);
            self.tree.delete(right);
            outcome.right_removed = true;
        }

        Ok(outcome)
    }

    /// Flag the region between two adjacent pivots as sorted. No-op when the
    /// pivots are not adjacent.
    fn mark_empty_gap(&mut self, left: NodeId, right: NodeId) {
        if self.tree.idx(right) == self.tree.idx(left) + 1 {
            self.tree.add_flags(left, PivotFlags::SORTED_LEFT);
            self.tree.add_flags(right, PivotFlags::SORTED_RIGHT);
        }
    }

    /// Insertion-sort a region that fits under the cutoff, mark it sorted,
    /// and coalesce with sorted neighbors.
    fn finish_region(&mut self, left: NodeId, right: NodeId) -> Result<(), LazySortedError> {
        let lo = (self.tree.idx(left) + 1) as usize;
        let hi = self.tree.idx(right) as usize;
        insertion_sort(&mut self.data, &mut self.cmp, lo, hi)?;
        self.tree.add_flags(left, PivotFlags::SORTED_LEFT);
        self.tree.add_flags(right, PivotFlags::SORTED_RIGHT);
        self.tree.depivot(left, right);
        Ok(())
    }
}
