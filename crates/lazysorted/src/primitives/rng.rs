//! Pivot-priority PRNG.
//!
//! A minimal LCG (Linear Congruential Generator) drives pivot selection and
//! treap priorities. It is per-instance: two sequences never share state, and
//! tests can inject a seed for fully deterministic behavior. There is no
//! security claim; treap balance only needs priorities that are independent
//! of the data.

// External dependencies
use core::sync::atomic::{AtomicU64, Ordering};

/// Distinct default seeds for instances constructed without an explicit seed.
static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Weyl-style increment; keeps unseeded instances apart.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

// ============================================================================
// PRNG
// ============================================================================

/// Minimal PRNG for pivot picking and treap priorities.
///
/// Uses an LCG with constants from PCG/MMIX over 64-bit state.
#[derive(Debug, Clone)]
pub struct PivotRng {
    state: u64,
}

impl PivotRng {
    /// Create a PRNG from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Create a PRNG with a process-unique default seed.
    pub fn from_counter() -> Self {
        let n = INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::new(n.wrapping_mul(SEED_STRIDE) ^ SEED_STRIDE)
    }

    /// Next raw 32-bit output (used directly as a treap priority).
    pub fn next_u32(&mut self) -> u32 {
        // LCG constants for 64-bit state
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    /// Uniform-ish value in `[0, bound)`. `bound` must be nonzero.
    pub fn below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        self.next_u32() % bound
    }
}
