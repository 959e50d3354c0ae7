#![cfg(feature = "dev")]
//! Tests for index and slice normalization.
//!
//! These tests pin the normalization rules the facade relies on: negative
//! indexing, Python-style slice adjustment and clamping, the between-range
//! clamp, and the builder's configuration checks.
//!
//! ## Test Organization
//!
//! 1. **Index Normalization** - negative indices, bounds
//! 2. **Slice Normalization** - defaults, clamping, lengths, both directions
//! 3. **Between Clamping**
//! 4. **Builder Checks** - thresholds, duplicate parameters

use lazysorted::internals::engine::validator::{SliceBounds, Validator};
use lazysorted::internals::primitives::errors::LazySortedError;

// ============================================================================
// Index Normalization
// ============================================================================

/// In-range indices, positive and negative, resolve to offsets.
#[test]
fn test_normalize_index_in_range() {
    assert_eq!(Validator::normalize_index(0, 5), Ok(0));
    assert_eq!(Validator::normalize_index(4, 5), Ok(4));
    assert_eq!(Validator::normalize_index(-1, 5), Ok(4));
    assert_eq!(Validator::normalize_index(-5, 5), Ok(0));
}

/// Out-of-range indices report the original index and the length.
#[test]
fn test_normalize_index_out_of_range() {
    assert_eq!(
        Validator::normalize_index(5, 5),
        Err(LazySortedError::IndexOutOfRange { index: 5, len: 5 })
    );
    assert_eq!(
        Validator::normalize_index(-6, 5),
        Err(LazySortedError::IndexOutOfRange { index: -6, len: 5 })
    );
    assert_eq!(
        Validator::normalize_index(0, 0),
        Err(LazySortedError::IndexOutOfRange { index: 0, len: 0 })
    );
}

// ============================================================================
// Slice Normalization
// ============================================================================

fn bounds(
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
    len: usize,
) -> SliceBounds {
    Validator::normalize_slice(start, stop, step, len).unwrap()
}

/// Open forward slices cover the whole sequence.
#[test]
fn test_slice_defaults_forward() {
    let b = bounds(None, None, 1, 10);
    assert_eq!((b.start, b.stop, b.step, b.len), (0, 10, 1, 10));
}

/// Open backward slices cover the whole sequence in reverse.
#[test]
fn test_slice_defaults_backward() {
    let b = bounds(None, None, -1, 10);
    assert_eq!((b.start, b.stop, b.step, b.len), (9, -1, -1, 10));
}

/// Forward strides compute ceil-divided lengths.
#[test]
fn test_slice_forward_stride() {
    let b = bounds(Some(2), Some(8), 2, 10);
    assert_eq!((b.start, b.stop, b.len), (2, 8, 3)); // 2, 4, 6

    let b = bounds(Some(2), Some(9), 2, 10);
    assert_eq!(b.len, 4); // 2, 4, 6, 8
}

/// Negative endpoints count from the end.
#[test]
fn test_slice_negative_endpoints() {
    let b = bounds(Some(-2), None, -3, 10);
    assert_eq!((b.start, b.stop, b.len), (8, -1, 3)); // 8, 5, 2

    let b = bounds(Some(-8), Some(-2), 1, 10);
    assert_eq!((b.start, b.stop, b.len), (2, 8, 6));
}

/// Far-out endpoints clamp to the sequence edges.
#[test]
fn test_slice_clamping() {
    let b = bounds(Some(-100), Some(100), 1, 10);
    assert_eq!((b.start, b.stop, b.len), (0, 10, 10));

    let b = bounds(Some(100), Some(-100), -2, 10);
    assert_eq!((b.start, b.stop, b.len), (9, -1, 5)); // 9, 7, 5, 3, 1
}

/// Slices that cannot make progress have length zero.
#[test]
fn test_slice_empty_cases() {
    assert_eq!(bounds(Some(5), Some(5), 1, 10).len, 0);
    assert_eq!(bounds(Some(8), Some(2), 1, 10).len, 0);
    assert_eq!(bounds(Some(2), Some(8), -1, 10).len, 0);
    assert_eq!(bounds(None, None, 1, 0).len, 0);
    assert_eq!(bounds(None, None, -1, 0).len, 0);
}

/// A zero step is rejected before any normalization.
#[test]
fn test_slice_zero_step() {
    assert_eq!(
        Validator::normalize_slice(None, None, 0, 10),
        Err(LazySortedError::ZeroStep)
    );
}

/// Normalized walks visit exactly `len` in-bounds offsets.
#[test]
fn test_slice_walk_stays_in_bounds() {
    let cases = [
        (None, None, 1isize),
        (None, None, -1),
        (Some(3), Some(17), 4),
        (Some(-1), Some(0), -2),
        (Some(15), None, -5),
        (Some(-30), Some(30), 7),
    ];
    for len in [0usize, 1, 2, 9, 16] {
        for &(start, stop, step) in &cases {
            let b = bounds(start, stop, step, len);
            let mut k = b.start;
            for _ in 0..b.len {
                assert!(
                    k >= 0 && (k as usize) < len,
                    "walk left the sequence: k={k} len={len} bounds={b:?}"
                );
                k += b.step;
            }
        }
    }
}

// ============================================================================
// Between Clamping
// ============================================================================

/// Between endpoints adjust negatives and clamp to `[0, len]`.
#[test]
fn test_clamp_between() {
    assert_eq!(Validator::clamp_between(2, 8, 10), (2, 8));
    assert_eq!(Validator::clamp_between(-3, -1, 10), (7, 9));
    assert_eq!(Validator::clamp_between(-100, 100, 10), (0, 10));
    assert_eq!(Validator::clamp_between(5, 5, 10), (5, 5));
    assert_eq!(Validator::clamp_between(8, 2, 10), (8, 2));
    assert_eq!(Validator::clamp_between(0, 0, 0), (0, 0));
}

// ============================================================================
// Builder Checks
// ============================================================================

/// The sort threshold must leave quickselect an exit.
#[test]
fn test_validate_sort_threshold() {
    assert_eq!(
        Validator::validate_sort_threshold(0),
        Err(LazySortedError::InvalidSortThreshold { got: 0, min: 1 })
    );
    assert_eq!(Validator::validate_sort_threshold(1), Ok(()));
    assert_eq!(Validator::validate_sort_threshold(64), Ok(()));
}

/// Duplicate parameter tracking surfaces the parameter name.
#[test]
fn test_validate_no_duplicates() {
    assert_eq!(Validator::validate_no_duplicates(None), Ok(()));
    assert_eq!(
        Validator::validate_no_duplicates(Some("seed")),
        Err(LazySortedError::DuplicateParameter { parameter: "seed" })
    );
}
