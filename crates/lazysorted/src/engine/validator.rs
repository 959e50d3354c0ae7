//! Index and slice normalization.
//!
//! ## Purpose
//!
//! This module turns user-facing positions (negative indices, open-ended
//! slices, clamped ranges) into the plain array offsets the engine works
//! with. It also hosts the builder's configuration checks.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Out-of-range indices and zero steps are rejected before
//!   any mutation.
//! * **Slice semantics**: `normalize_slice` follows Python's
//!   `slice.indices()` contract exactly: negative positions count from the
//!   end, out-of-range positions clamp, and the resulting walk never leaves
//!   the sequence.
//!
//! ## Invariants
//!
//! * A normalized index is always a valid array offset.
//! * A normalized slice of length `m` visits exactly `m` in-bounds offsets.
//!
//! ## Non-goals
//!
//! * This module does not sort or move data.
//! * This module does not decide the contiguous-versus-strided strategy;
//!   the facade applies its threshold to the normalized step.

// Internal dependencies
use crate::primitives::errors::LazySortedError;

// ============================================================================
// Normalized Slice
// ============================================================================

/// A slice request normalized to concrete offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceBounds {
    /// First position of the walk (already adjusted and clamped).
    pub start: isize,
    /// Exclusive stopping position; `-1` when a negative step walks off the
    /// front.
    pub stop: isize,
    /// Step, never zero.
    pub step: isize,
    /// Number of positions the walk visits.
    pub len: usize,
}

// ============================================================================
// Validator
// ============================================================================

/// Validation and normalization utility for user-facing positions and
/// builder configuration. All methods are fail-fast and side-effect free.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Index Normalization
    // ========================================================================

    /// Resolve an index in `[-len, len)` to an array offset.
    pub fn normalize_index(index: isize, len: usize) -> Result<usize, LazySortedError> {
        let mut k = index;
        if k < 0 {
            k += len as isize;
        }
        if k < 0 || k >= len as isize {
            return Err(LazySortedError::IndexOutOfRange { index, len });
        }
        Ok(k as usize)
    }

    /// Normalize a slice request, Python-style.
    ///
    /// `None` endpoints default to the appropriate extreme for the step's
    /// direction; negative endpoints count from the end and then clamp.
    pub fn normalize_slice(
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
        len: usize,
    ) -> Result<SliceBounds, LazySortedError> {
        if step == 0 {
            return Err(LazySortedError::ZeroStep);
        }
        let n = len as isize;

        let (default_start, default_stop) = if step > 0 { (0, n) } else { (n - 1, -1) };
        let (lower, upper) = if step > 0 { (0, n) } else { (-1, n - 1) };

        let clamp = |position: Option<isize>, default: isize| -> isize {
            match position {
                None => default,
                Some(mut p) => {
                    if p < 0 {
                        p += n;
                    }
                    p.max(lower).min(upper)
                }
            }
        };

        let start = clamp(start, default_start);
        let stop = clamp(stop, default_stop);

        let len = if step > 0 && start < stop {
            ((stop - start - 1) / step + 1) as usize
        } else if step < 0 && start > stop {
            ((start - stop - 1) / (-step) + 1) as usize
        } else {
            0
        };

        Ok(SliceBounds {
            start,
            stop,
            step,
            len,
        })
    }

    /// Clamp a `between` request to `[0, len]` on both ends.
    ///
    /// Negative endpoints count from the end; anything still outside the
    /// sequence clamps to its edge. The caller treats `start >= stop` as an
    /// empty request.
    pub fn clamp_between(start: isize, stop: isize, len: usize) -> (usize, usize) {
        let n = len as isize;
        let adjust = |mut p: isize| -> usize {
            if p < 0 {
                p += n;
            }
            p.max(0).min(n) as usize
        };
        (adjust(start), adjust(stop))
    }

    // ========================================================================
    // Builder Validation
    // ========================================================================

    /// Validate the insertion-sort cutoff.
    pub fn validate_sort_threshold(threshold: usize) -> Result<(), LazySortedError> {
        const MIN_SORT_THRESHOLD: usize = 1;
        if threshold < MIN_SORT_THRESHOLD {
            return Err(LazySortedError::InvalidSortThreshold {
                got: threshold,
                min: MIN_SORT_THRESHOLD,
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), LazySortedError> {
        if let Some(parameter) = duplicate_param {
            return Err(LazySortedError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
