//! Partitioning and small-range sorts.
//!
//! ## Purpose
//!
//! This module provides the in-place array routines the partial-sort engine
//! composes: a Lomuto-style partition around a random pivot, insertion sort
//! for small ranges, and a plain quicksort for ranges whose pivots are not
//! worth tracking.
//!
//! ## Design notes
//!
//! * **Fallible**: All comparisons go through the comparator and may fail.
//!   A failed partition leaves the range permuted but never publishes the
//!   final pivot swap, so every recorded pivot still separates its sides.
//! * **Half-open ranges**: Every routine operates on `left <= i < right`.
//!
//! ## Invariants
//!
//! * On success, `partition` returns `p` with `data[left..p] < data[p]` and
//!   `data[p+1..right] >= data[p]`.
//! * Routines only ever swap elements inside the given range.
//!
//! ## Non-goals
//!
//! * No stable sorting; ties may be reordered.
//! * No pivot bookkeeping; the engine records pivots itself.

// Internal dependencies
use crate::primitives::compare::Comparator;
use crate::primitives::errors::LazySortedError;
use crate::primitives::rng::PivotRng;

// ============================================================================
// Pivot Selection
// ============================================================================

/// Pick a pivot position uniformly from `[left, right)`.
#[inline]
pub fn pick_pivot(rng: &mut PivotRng, left: usize, right: usize) -> usize {
    debug_assert!(left < right);
    left + rng.below((right - left) as u32) as usize
}

// ============================================================================
// Partition
// ============================================================================

/// Partition `data[left..right]` into `[less than pivot | pivot | rest]`
/// and return the pivot's final position.
///
/// The pivot element is chosen at random and parked at `left` for the scan.
/// If a comparison fails, the error is returned before the pivot is swapped
/// into place, so no position is ever misreported as an order statistic.
pub fn partition<T, C: Comparator<T>>(
    data: &mut [T],
    cmp: &mut C,
    rng: &mut PivotRng,
    left: usize,
    right: usize,
) -> Result<usize, LazySortedError> {
    let piv = pick_pivot(rng, left, right);
    data.swap(left, piv);

    // Invariant: last_less and everything to its left is less than the
    // pivot, or the pivot itself.
    let mut last_less = left;
    for i in (left + 1)..right {
        if cmp.lt(&data[i], &data[left])? {
            last_less += 1;
            data.swap(i, last_less);
        }
    }

    data.swap(left, last_less);
    Ok(last_less)
}

// ============================================================================
// Small-Range Sorts
// ============================================================================

/// Insertion sort on `data[left..right]`.
pub fn insertion_sort<T, C: Comparator<T>>(
    data: &mut [T],
    cmp: &mut C,
    left: usize,
    right: usize,
) -> Result<(), LazySortedError> {
    for i in (left + 1)..right {
        let mut j = i;
        while j > left && cmp.lt(&data[j], &data[j - 1])? {
            data.swap(j, j - 1);
            j -= 1;
        }
    }
    Ok(())
}

/// Plain quicksort on `data[left..right]`.
///
/// Used when an entire region must become sorted, where tracking the interim
/// pivots would only add tree maintenance for positions nobody will query.
pub fn quick_sort<T, C: Comparator<T>>(
    data: &mut [T],
    cmp: &mut C,
    rng: &mut PivotRng,
    left: usize,
    right: usize,
    sort_threshold: usize,
) -> Result<(), LazySortedError> {
    if right - left <= sort_threshold {
        return insertion_sort(data, cmp, left, right);
    }

    let piv = partition(data, cmp, rng, left, right)?;
    quick_sort(data, cmp, rng, left, piv, sort_threshold)?;
    quick_sort(data, cmp, rng, piv + 1, right, sort_threshold)
}
