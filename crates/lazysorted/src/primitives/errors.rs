//! Error types for lazily sorted sequences.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur while querying a
//! lazily sorted sequence, including comparator failures, index validation,
//! and builder configuration mistakes.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., the offending index
//!   and the sequence length).
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic
//!   messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`
//!   (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Comparator failures**: A user-supplied comparison raised; the
//!    sequence stays internally consistent and remains usable.
//! 2. **Index validation**: Out-of-range indices and zero slice steps are
//!    rejected before any mutation.
//! 3. **Builder validation**: Invalid thresholds and duplicate parameters are
//!    caught when the container is built.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages are consistent in tone and formatting.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or retry strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for lazily sorted sequence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazySortedError {
    /// A user-supplied comparison failed (e.g., incomparable values).
    ComparatorFailure(String),

    /// Index falls outside `[-len, len)`.
    IndexOutOfRange {
        /// The index as supplied by the caller (before normalization).
        index: isize,
        /// Length of the sequence.
        len: usize,
    },

    /// `index_of` was asked for a value the sequence does not contain.
    ValueNotFound,

    /// Slice step of zero; a slice must make progress in one direction.
    ZeroStep,

    /// The insertion-sort cutoff must leave room for at least one element.
    InvalidSortThreshold {
        /// The threshold provided.
        got: usize,
        /// Minimum accepted threshold.
        min: usize,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for LazySortedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::ComparatorFailure(msg) => write!(f, "Comparator failure: {msg}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Index {index} out of range for sequence of length {len}")
            }
            Self::ValueNotFound => write!(f, "Value is not in the sequence"),
            Self::ZeroStep => write!(f, "Slice step cannot be zero"),
            Self::InvalidSortThreshold { got, min } => {
                write!(f, "Invalid sort_threshold: {got} (must be at least {min})")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for LazySortedError {}
