//! High-level API for lazily sorted sequences.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points: a fluent
//! builder for configuring engine parameters and the [`LazySorted`]
//! container facade whose operations are thin reductions to the engine
//! primitives.
//!
//! ## Design notes
//!
//! * **Ergonomic**: `LazySorted::new` covers the common `T: Ord` case;
//!   the builder exposes thresholds, seeding, and custom comparators.
//! * **Validated**: Parameters are validated when `.build()` is called;
//!   duplicate parameter configuration is an error.
//! * **Lazy**: Every accessor sorts just enough of the sequence to answer,
//!   and records the work so later queries get cheaper.
//!
//! ## Key concepts
//!
//! * **Point access** (`get`) settles one order statistic via quickselect.
//! * **Range access** (`get_slice`) sorts the spanned regions when the step
//!   is small and falls back to per-index selection for sparse strides.
//! * **Value access** (`index_of`, `count_of`, `contains`) steers
//!   quickselect by comparisons against the probe value.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`LazySortedBuilder`] via `LazySortedBuilder::new()`.
//! 2. Chain configuration methods (`.sort_threshold()`, `.seed()`, ...).
//! 3. Call `.build(elements)` to obtain a [`LazySorted`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::engine::executor::LazyExecutor;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::engine::output::PivotView;
pub use crate::primitives::compare::{Comparator, NaturalOrder, PartialOrder};
pub use crate::primitives::errors::LazySortedError;

/// Default insertion-sort cutoff: regions at most this long are finished by
/// insertion sort instead of further partitioning.
pub const DEFAULT_SORT_THRESHOLD: usize = 16;

/// Default contiguity cutoff: slices with `|step|` at most this are served
/// by sorting the spanned range rather than selecting index by index.
pub const DEFAULT_CONTIGUOUS_THRESHOLD: usize = 8;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a [`LazySorted`] sequence.
#[derive(Debug, Clone)]
pub struct LazySortedBuilder<C = NaturalOrder> {
    /// Insertion-sort cutoff.
    pub sort_threshold: Option<usize>,

    /// Contiguity cutoff for slice requests.
    pub contiguous_threshold: Option<usize>,

    /// Seed for pivot selection and treap priorities.
    pub seed: Option<u64>,

    /// Comparator the engine will consult.
    pub comparator: C,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl Default for LazySortedBuilder<NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySortedBuilder<NaturalOrder> {
    /// Create a new builder with default settings and the natural ordering.
    pub fn new() -> Self {
        Self {
            sort_threshold: None,
            contiguous_threshold: None,
            seed: None,
            comparator: NaturalOrder,
            duplicate_param: None,
        }
    }
}

impl<C> LazySortedBuilder<C> {
    /// Set the insertion-sort cutoff (must be at least 1).
    pub fn sort_threshold(mut self, threshold: usize) -> Self {
        if self.sort_threshold.is_some() {
            self.duplicate_param = Some("sort_threshold");
        }
        self.sort_threshold = Some(threshold);
        self
    }

    /// Set the contiguity cutoff for slice requests.
    pub fn contiguous_threshold(mut self, threshold: usize) -> Self {
        if self.contiguous_threshold.is_some() {
            self.duplicate_param = Some("contiguous_threshold");
        }
        self.contiguous_threshold = Some(threshold);
        self
    }

    /// Seed the engine's PRNG for deterministic pivot selection.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Replace the comparator the engine consults.
    pub fn comparator<C2>(self, comparator: C2) -> LazySortedBuilder<C2> {
        LazySortedBuilder {
            sort_threshold: self.sort_threshold,
            contiguous_threshold: self.contiguous_threshold,
            seed: self.seed,
            comparator,
            duplicate_param: self.duplicate_param,
        }
    }

    /// Build the sequence around `elements`.
    pub fn build<T>(self, elements: Vec<T>) -> Result<LazySorted<T, C>, LazySortedError>
    where
        C: Comparator<T>,
    {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let sort_threshold = self.sort_threshold.unwrap_or(DEFAULT_SORT_THRESHOLD);
        Validator::validate_sort_threshold(sort_threshold)?;

        let contiguous_threshold = self
            .contiguous_threshold
            .unwrap_or(DEFAULT_CONTIGUOUS_THRESHOLD);

        Ok(LazySorted {
            executor: LazyExecutor::new(elements, self.comparator, sort_threshold, self.seed),
            contiguous_threshold,
        })
    }
}

// ============================================================================
// Container Facade
// ============================================================================

/// A sequence that behaves as if sorted, sorting only on demand.
///
/// Construction is O(1) beyond taking ownership of the elements. Every query
/// performs the minimum partitioning needed to answer it and records the
/// settled positions, so repeated or nearby queries approach O(1).
pub struct LazySorted<T, C = NaturalOrder> {
    executor: LazyExecutor<T, C>,
    contiguous_threshold: usize,
}

impl<T: Ord> LazySorted<T, NaturalOrder> {
    /// Wrap `elements` with the natural ordering and default thresholds.
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            executor: LazyExecutor::new(elements, NaturalOrder, DEFAULT_SORT_THRESHOLD, None),
            contiguous_threshold: DEFAULT_CONTIGUOUS_THRESHOLD,
        }
    }
}

impl<T, C: Comparator<T>> LazySorted<T, C> {
    /// Wrap `elements` with a custom comparator and default thresholds.
    pub fn with_comparator(elements: Vec<T>, comparator: C) -> Self {
        Self {
            executor: LazyExecutor::new(elements, comparator, DEFAULT_SORT_THRESHOLD, None),
            contiguous_threshold: DEFAULT_CONTIGUOUS_THRESHOLD,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.executor.len()
    }

    /// True when the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.executor.is_empty()
    }

    /// Element at position `index` in sorted order.
    ///
    /// Negative indices count from the end, Python-style.
    pub fn get(&mut self, index: isize) -> Result<&T, LazySortedError> {
        let k = Validator::normalize_index(index, self.executor.len())?;
        self.executor.sort_point(k)?;
        Ok(&self.executor.data()[k])
    }

    /// Elements of the sorted sequence selected by a Python-style slice.
    ///
    /// `None` endpoints are open; negative endpoints count from the end;
    /// `step` must be nonzero. When `|step|` is within the contiguity
    /// cutoff the spanned range is sorted once; sparser strides settle each
    /// visited position individually.
    pub fn get_slice(
        &mut self,
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
    ) -> Result<Vec<T>, LazySortedError>
    where
        T: Clone,
    {
        let bounds = Validator::normalize_slice(start, stop, step, self.executor.len())?;
        let mut result = Vec::with_capacity(bounds.len);
        if bounds.len == 0 {
            return Ok(result);
        }

        if bounds.step.unsigned_abs() <= self.contiguous_threshold {
            let (mut lo, mut hi) = if bounds.start < bounds.stop {
                (bounds.start, bounds.stop)
            } else {
                (bounds.stop, bounds.start)
            };
            if bounds.step < 0 {
                // A backward walk's half-open range excludes `stop` and
                // includes `start`; shift once to recover it.
                lo += 1;
                hi += 1;
            }
            self.executor.sort_range(lo as usize, hi as usize)?;

            let mut k = bounds.start;
            for _ in 0..bounds.len {
                result.push(self.executor.data()[k as usize].clone());
                k += bounds.step;
            }
        } else {
            let mut k = bounds.start;
            for _ in 0..bounds.len {
                self.executor.sort_point(k as usize)?;
                result.push(self.executor.data()[k as usize].clone());
                k += bounds.step;
            }
        }

        Ok(result)
    }

    /// The elements currently occupying positions `[start, stop)`, in
    /// undefined order.
    ///
    /// Both endpoints are clamped to the sequence (negative values count
    /// from the end). Only the boundary positions are settled, so this is
    /// much cheaper than sorting the span; it answers questions like "the
    /// middle 90% of the data" without ordering them.
    pub fn between(&mut self, start: isize, stop: isize) -> Result<Vec<T>, LazySortedError>
    where
        T: Clone,
    {
        let len = self.executor.len();
        let (lo, hi) = Validator::clamp_between(start, stop, len);
        if lo >= hi {
            return Ok(Vec::new());
        }

        if lo != 0 {
            self.executor.sort_point(lo)?;
        }
        if hi != len {
            self.executor.sort_point(hi)?;
        }

        Ok(self.executor.data()[lo..hi].to_vec())
    }

    /// Smallest index whose element equals `item`.
    pub fn index_of(&mut self, item: &T) -> Result<usize, LazySortedError> {
        match self.executor.find_item(item)? {
            Some(index) => Ok(index),
            None => Err(LazySortedError::ValueNotFound),
        }
    }

    /// Number of elements equal to `item`.
    pub fn count_of(&mut self, item: &T) -> Result<usize, LazySortedError> {
        self.executor.count_item(item)
    }

    /// True if some element equals `item`.
    pub fn contains(&mut self, item: &T) -> Result<bool, LazySortedError> {
        Ok(self.executor.find_item(item)?.is_some())
    }

    /// Diagnostic snapshot of the pivot tree, in index order.
    pub fn pivots(&self) -> Vec<PivotView> {
        self.executor.pivots()
    }

    /// The comparator, e.g. to read counters off an instrumented one.
    pub fn comparator(&self) -> &C {
        self.executor.comparator()
    }

    /// Hand the element storage back, in its current partial order.
    pub fn into_inner(self) -> Vec<T> {
        self.executor.into_inner()
    }
}
