//! Layer 2: Algorithms
//!
//! # Purpose
//!
//! This layer provides the pure array routines the engine is built from:
//! random pivot picking, partitioning, insertion sort, and plain quicksort.
//! Every routine is fallible through the comparator and knows nothing about
//! the pivot tree.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Algorithms ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Partitioning and small-range sorts.
pub mod partition;
