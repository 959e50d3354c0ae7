//! Diagnostic output types.
//!
//! The engine's only observable state beyond query answers is its pivot
//! tree; this module provides the snapshot type the diagnostic traversal
//! returns.

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Pivot View
// ============================================================================

/// One pivot as seen by the diagnostic traversal: its array position and the
/// name of its sortedness flags. Sentinels appear at `-1` and `len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotView {
    /// Array position of the pivot.
    pub index: isize,
    /// Flag name: `UNSORTED`, `SORTED_LEFT`, `SORTED_RIGHT`, or
    /// `SORTED_BOTH`.
    pub flag: &'static str,
}

impl Display for PivotView {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}, {})", self.index, self.flag)
    }
}
