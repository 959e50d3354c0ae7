//! The comparator capability.
//!
//! ## Purpose
//!
//! This module defines the ordering interface the engine consumes. Elements
//! are opaque to the engine; every ordering decision goes through a
//! [`Comparator`], and every comparison is allowed to fail.
//!
//! ## Design notes
//!
//! * **Fallible**: Both predicates return `Result`, so exotic orderings
//!   (partial orders, user callbacks) can abort a query without corrupting
//!   the sequence.
//! * **Stateful**: Methods take `&mut self` so comparators can carry state,
//!   such as call counters used to measure how much sorting work a query
//!   performed.
//!
//! ## Key concepts
//!
//! * `lt` is a strict less-than; `eq` is equality. The engine never derives
//!   one from the other.
//!
//! ## Non-goals
//!
//! * This module does not provide key extraction or reversed orderings;
//!   callers implement [`Comparator`] for those.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

// Internal dependencies
use crate::primitives::errors::LazySortedError;

// ============================================================================
// Comparator Trait
// ============================================================================

/// Ordering capability consumed by the partial-sort engine.
///
/// The engine calls `lt` while partitioning and sorting, and `eq` while
/// deduplicating pivots and searching for values. A failure from either
/// aborts the current operation; the sequence remains valid and usable.
pub trait Comparator<T> {
    /// Strict less-than: `a < b`.
    fn lt(&mut self, a: &T, b: &T) -> Result<bool, LazySortedError>;

    /// Equality: `a == b`.
    fn eq(&mut self, a: &T, b: &T) -> Result<bool, LazySortedError>;
}

// ============================================================================
// Provided Comparators
// ============================================================================

/// Comparator for totally ordered elements. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn lt(&mut self, a: &T, b: &T) -> Result<bool, LazySortedError> {
        Ok(a < b)
    }

    fn eq(&mut self, a: &T, b: &T) -> Result<bool, LazySortedError> {
        Ok(a == b)
    }
}

/// Comparator for partially ordered elements (e.g., floats).
///
/// Fails with [`LazySortedError::ComparatorFailure`] when two values are
/// incomparable, such as a comparison involving NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialOrder;

impl<T: PartialOrd> Comparator<T> for PartialOrder {
    fn lt(&mut self, a: &T, b: &T) -> Result<bool, LazySortedError> {
        match a.partial_cmp(b) {
            Some(ordering) => Ok(ordering == core::cmp::Ordering::Less),
            None => Err(LazySortedError::ComparatorFailure(String::from(
                "values are incomparable",
            ))),
        }
    }

    fn eq(&mut self, a: &T, b: &T) -> Result<bool, LazySortedError> {
        match a.partial_cmp(b) {
            Some(ordering) => Ok(ordering == core::cmp::Ordering::Equal),
            None => Err(LazySortedError::ComparatorFailure(String::from(
                "values are incomparable",
            ))),
        }
    }
}
