//! # LazySorted — sequences that sort themselves on demand
//!
//! A `LazySorted<T>` behaves like a sorted snapshot of its input, but does
//! only the sorting work your queries actually require. A single indexed
//! access into an untouched sequence runs one bounded quickselect (expected
//! O(n)); repeated or nearby accesses reuse the recorded partitioning and
//! approach O(1). Asking for a handful of order statistics, like the median
//! or a few percentiles, costs far less than sorting everything.
//!
//! The engine keeps two structures consistent: the element array, which is
//! rearranged in place, and a treap of *pivot* positions whose elements are
//! already where a full sort would put them. Regions between pivots are
//! partitioned lazily and marked sorted once settled; adjacent sorted
//! regions coalesce.
//!
//! ## Quick Start
//!
//! ```rust
//! use lazysorted::prelude::*;
//!
//! let mut seq = LazySorted::new(vec![3, 1, 4, 1, 5, 9, 2, 6]);
//!
//! assert_eq!(*seq.get(0)?, 1);          // the minimum
//! assert_eq!(*seq.get(-1)?, 9);         // the maximum
//! assert_eq!(seq.get_slice(Some(2), Some(5), 1)?, vec![2, 3, 4]);
//! assert_eq!(seq.index_of(&5)?, 5);
//! assert_eq!(seq.count_of(&1)?, 2);
//! assert!(seq.contains(&4)?);
//! # Result::<(), LazySortedError>::Ok(())
//! ```
//!
//! ## Configuration
//!
//! Thresholds, the PRNG seed, and the comparator are set through the
//! builder:
//!
//! ```rust
//! use lazysorted::prelude::*;
//!
//! let mut seq = LazySortedBuilder::new()
//!     .sort_threshold(24)     // insertion-sort regions up to 24 elements
//!     .contiguous_threshold(4) // sort ranges for |step| <= 4 slices
//!     .seed(7)                // deterministic pivot choices
//!     .build(vec![10, 30, 20])?;
//!
//! assert_eq!(*seq.get(1)?, 20);
//! # Result::<(), LazySortedError>::Ok(())
//! ```
//!
//! Elements are opaque to the engine; every ordering decision goes through a
//! [`Comparator`](prelude::Comparator), and comparators may fail. A failing
//! comparison aborts the query with an error and leaves the sequence valid:
//!
//! ```rust
//! use lazysorted::prelude::*;
//!
//! let mut seq = LazySortedBuilder::new()
//!     .comparator(PartialOrder)
//!     .build(vec![2.0, f64::NAN, 1.0])?;
//!
//! assert!(seq.get(0).is_err()); // NaN is incomparable
//! assert_eq!(seq.len(), 3);     // the sequence is still usable
//! # Result::<(), LazySortedError>::Ok(())
//! ```
//!
//! ## When not to use this
//!
//! If you will eventually look at every position in order, `sort()` is
//! simpler and faster. `LazySorted` pays off when queries touch a fraction
//! of the positions, or when you cannot know in advance which ones.
//!
//! Ties may be reordered (no stable sort), one instance must not be mutated
//! concurrently, and the order of elements inside unqueried regions is
//! unspecified.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Layer 1: Primitives - errors, the comparator capability, the PRNG.
mod primitives;

// Layer 2: Algorithms - partitioning and small-range sorts.
mod algorithms;

// Layer 3: Engine - pivot treap, executor, normalization, diagnostics.
mod engine;

// High-level fluent API and the container facade.
mod api;

// Standard prelude.
pub mod prelude {
    pub use crate::api::{
        Comparator, LazySorted, LazySortedBuilder, LazySortedError, NaturalOrder, PartialOrder,
        PivotView, DEFAULT_CONTIGUOUS_THRESHOLD, DEFAULT_SORT_THRESHOLD,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing
// purposes. It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
