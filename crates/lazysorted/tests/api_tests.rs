//! Tests for the public container facade.
//!
//! These tests exercise the user-facing surface end to end: point access,
//! slices, index-range access, value queries, error reporting, and the
//! laziness guarantees observable through the diagnostic pivot view and an
//! instrumented comparator.
//!
//! ## Test Organization
//!
//! 1. **End-to-End Scenarios** - literal inputs with expected outputs
//! 2. **Point Access** - negative indices, bounds checking
//! 3. **Slices** - contiguous and strided, forward and backward
//! 4. **Between** - clamping and content
//! 5. **Value Queries** - index_of, count_of, contains
//! 6. **Builder** - validation and duplicate detection
//! 7. **Laziness** - idempotence and total work, via comparator counters
//! 8. **Failure** - comparator errors surface and leave the sequence usable

use lazysorted::prelude::*;

/// Comparator over `i32` that counts every call it answers.
#[derive(Debug, Clone, Copy, Default)]
struct CountingOrd {
    lt_calls: u64,
    eq_calls: u64,
}

impl CountingOrd {
    fn total(&self) -> u64 {
        self.lt_calls + self.eq_calls
    }
}

impl Comparator<i32> for CountingOrd {
    fn lt(&mut self, a: &i32, b: &i32) -> Result<bool, LazySortedError> {
        self.lt_calls += 1;
        Ok(a < b)
    }

    fn eq(&mut self, a: &i32, b: &i32) -> Result<bool, LazySortedError> {
        self.eq_calls += 1;
        Ok(a == b)
    }
}

/// Deterministic Fisher-Yates shuffle of `0..n`.
fn shuffled(n: usize, mut state: u64) -> Vec<i32> {
    let mut values: Vec<i32> = (0..n as i32).collect();
    for i in (1..values.len()).rev() {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let j = ((state >> 32) as usize) % (i + 1);
        values.swap(i, j);
    }
    values
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

/// Point queries interleaved with pivot-view checks.
#[test]
fn test_scenario_point_queries() {
    let mut seq = LazySorted::new(vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]);

    assert_eq!(*seq.get(0).unwrap(), 1);
    assert_no_duplicate_pivots(&seq.pivots());

    assert_eq!(*seq.get(10).unwrap(), 9);
    assert_no_duplicate_pivots(&seq.pivots());

    assert_eq!(*seq.get(5).unwrap(), 4);
    assert_no_duplicate_pivots(&seq.pivots());
}

fn assert_no_duplicate_pivots(views: &[PivotView]) {
    for pair in views.windows(2) {
        assert!(
            pair[0].index < pair[1].index,
            "pivot indices must be strictly increasing: {} vs {}",
            pair[0],
            pair[1]
        );
    }
}

/// A contiguous slice sorts the spanned range and leaves bounding pivots.
#[test]
fn test_scenario_contiguous_slice() {
    let mut seq = LazySorted::new(shuffled(100, 1));

    assert_eq!(seq.get_slice(Some(5), Some(10), 1).unwrap(), vec![5, 6, 7, 8, 9]);

    // Some adjacent pivot pair brackets the sorted span.
    let views = seq.pivots();
    assert_no_duplicate_pivots(&views);
    let bracketed = views.windows(2).any(|pair| {
        pair[0].index <= 5
            && pair[1].index >= 10
            && (pair[0].flag == "SORTED_LEFT" || pair[0].flag == "SORTED_BOTH")
            && (pair[1].flag == "SORTED_RIGHT" || pair[1].flag == "SORTED_BOTH")
    });
    assert!(bracketed, "no sorted region covers [5, 10): {views:?}");
}

/// A sparse stride settles each visited position individually.
#[test]
fn test_scenario_strided_slice() {
    let mut seq = LazySorted::new(shuffled(100, 2));
    assert_eq!(
        seq.get_slice(Some(0), Some(100), 20).unwrap(),
        vec![0, 20, 40, 60, 80]
    );
}

/// All-equal elements collapse their pivots.
#[test]
fn test_scenario_all_equal() {
    let mut seq = LazySorted::new(vec![2, 2, 2, 2, 2]);
    assert_eq!(*seq.get(0).unwrap(), 2);
    assert_eq!(seq.count_of(&2).unwrap(), 5);
    assert_eq!(seq.index_of(&2).unwrap(), 0);
}

/// Missing values: error for index_of, zero for count_of, false for contains.
#[test]
fn test_scenario_missing_value() {
    let mut seq = LazySorted::new(vec![1, 2, 3]);
    assert_eq!(seq.index_of(&4), Err(LazySortedError::ValueNotFound));
    assert!(!seq.contains(&4).unwrap());
    assert_eq!(seq.count_of(&4).unwrap(), 0);
}

/// Querying every position fully sorts the array and cleans up the tree.
#[test]
fn test_scenario_full_sweep() {
    let mut seq = LazySorted::new(shuffled(1000, 3));

    for &k in &shuffled(1000, 4) {
        assert_eq!(*seq.get(k as isize).unwrap(), k);
    }

    // Interior pivots are either gone or interior to one fully sorted run.
    for view in seq.pivots() {
        if view.index >= 0 && view.index < 1000 {
            assert_eq!(
                view.flag, "SORTED_BOTH",
                "interior pivot {view} survived without both sides sorted"
            );
        }
    }

    assert_eq!(seq.into_inner(), (0..1000).collect::<Vec<_>>());
}

// ============================================================================
// Point Access
// ============================================================================

/// Negative indices count from the end.
#[test]
fn test_get_negative_index() {
    let mut seq = LazySorted::new(vec![30, 10, 20]);
    assert_eq!(*seq.get(-1).unwrap(), 30);
    assert_eq!(*seq.get(-3).unwrap(), 10);
}

/// Indices outside `[-len, len)` are rejected with context.
#[test]
fn test_get_out_of_range() {
    let mut seq = LazySorted::new(vec![1, 2, 3]);
    assert_eq!(
        seq.get(3),
        Err(LazySortedError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(
        seq.get(-4),
        Err(LazySortedError::IndexOutOfRange { index: -4, len: 3 })
    );
}

/// An empty sequence rejects every index but answers value queries cleanly.
#[test]
fn test_empty_sequence() {
    let mut seq: LazySorted<i32> = LazySorted::new(Vec::new());
    assert_eq!(seq.len(), 0);
    assert!(seq.is_empty());
    assert!(matches!(
        seq.get(0),
        Err(LazySortedError::IndexOutOfRange { .. })
    ));
    assert_eq!(seq.get_slice(None, None, 1).unwrap(), Vec::<i32>::new());
    assert_eq!(seq.between(0, 10).unwrap(), Vec::<i32>::new());
    assert!(!seq.contains(&7).unwrap());
    assert_eq!(seq.count_of(&7).unwrap(), 0);
    assert_eq!(seq.index_of(&7), Err(LazySortedError::ValueNotFound));

    let views = seq.pivots();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].index, -1);
    assert_eq!(views[1].index, 0);
}

/// A single element is reachable from both ends.
#[test]
fn test_single_element() {
    let mut seq = LazySorted::new(vec![42]);
    assert_eq!(*seq.get(0).unwrap(), 42);
    assert_eq!(*seq.get(-1).unwrap(), 42);
    assert_eq!(seq.index_of(&42).unwrap(), 0);
    assert_eq!(seq.count_of(&42).unwrap(), 1);
}

/// Every position of a shuffled sequence resolves to its sorted value.
#[test]
fn test_get_matches_sorted() {
    let original = shuffled(200, 5);
    let mut expected = original.clone();
    expected.sort();

    let mut seq = LazySorted::new(original);
    for k in [0isize, 199, 100, 37, 163, 1, 198, 50] {
        assert_eq!(*seq.get(k).unwrap(), expected[k as usize]);
    }
}

// ============================================================================
// Slices
// ============================================================================

/// Open-ended forward slice returns the whole sorted sequence.
#[test]
fn test_slice_full() {
    let mut seq = LazySorted::new(shuffled(50, 6));
    assert_eq!(
        seq.get_slice(None, None, 1).unwrap(),
        (0..50).collect::<Vec<_>>()
    );
}

/// Reverse slice returns the sorted sequence backwards.
#[test]
fn test_slice_reversed() {
    let mut seq = LazySorted::new(shuffled(50, 7));
    assert_eq!(
        seq.get_slice(None, None, -1).unwrap(),
        (0..50).rev().collect::<Vec<_>>()
    );
}

/// Negative strides within the contiguity cutoff sort one range.
#[test]
fn test_slice_negative_stride() {
    let mut seq = LazySorted::new(shuffled(12, 8));
    assert_eq!(seq.get_slice(Some(10), Some(2), -2).unwrap(), vec![10, 8, 6, 4]);
}

/// Out-of-range endpoints clamp instead of erroring.
#[test]
fn test_slice_clamps() {
    let mut seq = LazySorted::new(shuffled(10, 9));
    assert_eq!(
        seq.get_slice(Some(-100), Some(100), 1).unwrap(),
        (0..10).collect::<Vec<_>>()
    );
    assert_eq!(
        seq.get_slice(Some(100), Some(-100), -3).unwrap(),
        vec![9, 6, 3, 0]
    );
}

/// Slices that make no progress are empty.
#[test]
fn test_slice_empty() {
    let mut seq = LazySorted::new(shuffled(10, 10));
    assert_eq!(seq.get_slice(Some(5), Some(5), 1).unwrap(), Vec::<i32>::new());
    assert_eq!(seq.get_slice(Some(8), Some(2), 1).unwrap(), Vec::<i32>::new());
    assert_eq!(seq.get_slice(Some(2), Some(8), -1).unwrap(), Vec::<i32>::new());
}

/// A zero step is rejected.
#[test]
fn test_slice_zero_step() {
    let mut seq = LazySorted::new(vec![1, 2, 3]);
    assert_eq!(seq.get_slice(None, None, 0), Err(LazySortedError::ZeroStep));
}

// ============================================================================
// Between
// ============================================================================

/// `between` returns exactly the elements ranked in the range, unordered.
#[test]
fn test_between_content() {
    let mut seq = LazySorted::new(shuffled(100, 11));
    let mut middle = seq.between(5, 95).unwrap();
    middle.sort();
    assert_eq!(middle, (5..95).collect::<Vec<_>>());
}

/// Negative and oversized endpoints clamp.
#[test]
fn test_between_clamps() {
    let mut seq = LazySorted::new(shuffled(10, 12));
    let mut tail = seq.between(-3, 100).unwrap();
    tail.sort();
    assert_eq!(tail, vec![7, 8, 9]);

    assert_eq!(seq.between(7, 3).unwrap(), Vec::<i32>::new());
    assert_eq!(seq.between(-100, -200).unwrap(), Vec::<i32>::new());
}

/// Full-range `between` touches no interior pivot at all.
#[test]
fn test_between_full_range_is_free() {
    let mut seq = LazySorted::new(shuffled(40, 13));
    let elements = seq.between(0, 40).unwrap();
    assert_eq!(elements.len(), 40);
    assert_eq!(seq.pivots().len(), 2, "only the sentinels exist");
}

// ============================================================================
// Value Queries
// ============================================================================

/// index_of returns the smallest matching index.
#[test]
fn test_index_of_first_duplicate() {
    let mut seq = LazySorted::new(vec![5, 3, 5, 1, 5, 3]);
    // Sorted: [1, 3, 3, 5, 5, 5]
    assert_eq!(seq.index_of(&3).unwrap(), 1);
    assert_eq!(seq.index_of(&5).unwrap(), 3);
    assert_eq!(seq.index_of(&1).unwrap(), 0);
}

/// count_of matches the multiplicity in the original data.
#[test]
fn test_count_of_duplicates() {
    let mut data = shuffled(30, 14);
    data.extend_from_slice(&[7, 7, 7]);
    let mut seq = LazySorted::new(data);
    assert_eq!(seq.count_of(&7).unwrap(), 4);
    assert_eq!(seq.count_of(&29).unwrap(), 1);
    assert_eq!(seq.count_of(&30).unwrap(), 0);
}

/// contains agrees with membership.
#[test]
fn test_contains() {
    let mut seq = LazySorted::new(shuffled(25, 15));
    assert!(seq.contains(&24).unwrap());
    assert!(seq.contains(&0).unwrap());
    assert!(!seq.contains(&25).unwrap());
    assert!(!seq.contains(&-1).unwrap());
}

// ============================================================================
// Builder
// ============================================================================

/// Setting a parameter twice is a configuration error.
#[test]
fn test_builder_duplicate_parameter() {
    let result = LazySortedBuilder::new()
        .sort_threshold(8)
        .sort_threshold(9)
        .build(vec![1, 2, 3]);
    assert_eq!(
        result.err(),
        Some(LazySortedError::DuplicateParameter {
            parameter: "sort_threshold"
        })
    );
}

/// A zero sort threshold cannot terminate quickselect.
#[test]
fn test_builder_zero_threshold() {
    let result = LazySortedBuilder::new().sort_threshold(0).build(vec![1, 2, 3]);
    assert_eq!(
        result.err(),
        Some(LazySortedError::InvalidSortThreshold { got: 0, min: 1 })
    );
}

/// Seeded sequences answer queries identically.
#[test]
fn test_builder_seed_is_deterministic() {
    let data = shuffled(300, 16);
    let mut a = LazySortedBuilder::new().seed(42).build(data.clone()).unwrap();
    let mut b = LazySortedBuilder::new().seed(42).build(data).unwrap();

    for k in [150isize, 0, 299, 42] {
        assert_eq!(a.get(k).unwrap(), b.get(k).unwrap());
    }
    assert_eq!(a.pivots(), b.pivots());
}

/// Small thresholds still answer correctly.
#[test]
fn test_builder_small_thresholds() {
    let data = shuffled(120, 17);
    let mut seq = LazySortedBuilder::new()
        .sort_threshold(1)
        .contiguous_threshold(1)
        .seed(9)
        .build(data)
        .unwrap();

    assert_eq!(*seq.get(60).unwrap(), 60);
    assert_eq!(seq.get_slice(Some(10), Some(20), 1).unwrap(), (10..20).collect::<Vec<_>>());
    assert_eq!(seq.get_slice(Some(0), Some(120), 17).unwrap(), vec![0, 17, 34, 51, 68, 85, 102, 119]);
}

// ============================================================================
// Laziness
// ============================================================================

/// Repeating a point query performs no further comparisons.
#[test]
fn test_get_is_idempotent() {
    let mut seq = LazySortedBuilder::new()
        .comparator(CountingOrd::default())
        .seed(21)
        .build(shuffled(500, 18))
        .unwrap();

    assert_eq!(*seq.get(250).unwrap(), 250);
    let after_first = seq.comparator().total();
    assert!(after_first > 0);

    assert_eq!(*seq.get(250).unwrap(), 250);
    assert_eq!(seq.comparator().total(), after_first, "second query re-sorted");
}

/// Repeating a contiguous slice performs no further comparisons.
#[test]
fn test_slice_is_idempotent() {
    let mut seq = LazySortedBuilder::new()
        .comparator(CountingOrd::default())
        .seed(22)
        .build(shuffled(300, 19))
        .unwrap();

    let first = seq.get_slice(Some(100), Some(140), 1).unwrap();
    let after_first = seq.comparator().total();
    let second = seq.get_slice(Some(100), Some(140), 1).unwrap();
    assert_eq!(first, second);
    assert_eq!(seq.comparator().total(), after_first, "second slice re-sorted");
}

/// A full query sweep stays far below per-query rescans.
#[test]
fn test_total_work_is_bounded() {
    let n = 1000;
    let mut seq = LazySortedBuilder::new()
        .comparator(CountingOrd::default())
        .seed(23)
        .build(shuffled(n, 20))
        .unwrap();

    for &k in &shuffled(n, 21) {
        assert_eq!(*seq.get(k as isize).unwrap(), k);
    }

    // Fresh quickselect per query would cost on the order of n per call,
    // about 3.4 million comparisons here. Shared partitioning keeps the
    // whole sweep within ordinary-sort territory.
    assert!(
        seq.comparator().total() < 1_500_000,
        "sweep cost {} comparisons",
        seq.comparator().total()
    );
}

// ============================================================================
// Failure
// ============================================================================

/// NaN under PartialOrder surfaces as a comparator failure.
#[test]
fn test_partial_order_nan_fails() {
    let mut seq = LazySortedBuilder::new()
        .comparator(PartialOrder)
        .build(vec![2.0, f64::NAN, 1.0])
        .unwrap();

    assert!(matches!(
        seq.get(0),
        Err(LazySortedError::ComparatorFailure(_))
    ));

    // The sequence is still usable afterwards.
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.between(0, 0).unwrap(), Vec::<f64>::new());
}

/// Clean data under PartialOrder works end to end.
#[test]
fn test_partial_order_clean_floats() {
    let mut seq = LazySortedBuilder::new()
        .comparator(PartialOrder)
        .build(vec![2.5, 0.5, 1.5, 2.0])
        .unwrap();

    assert_eq!(*seq.get(0).unwrap(), 0.5);
    assert_eq!(*seq.get(-1).unwrap(), 2.5);
    assert_eq!(seq.index_of(&1.5).unwrap(), 1);
}
