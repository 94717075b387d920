#![forbid(unsafe_code)]

//! Bounded random sampling for transition timing.
//!
//! A small xorshift64 generator keeps threshold jitter deterministic under
//! test seeds without pulling in an RNG dependency. All timing draws go
//! through [`Rng::range`] so the bounds stay named at call sites instead of
//! being buried in inline arithmetic.
//!
//! # Invariants
//!
//! 1. The generator state is never zero (zero is a xorshift fixed point).
//! 2. `range(b)` returns a value strictly below `b` for `b > 0`, and 0 for
//!    `b == 0`.
//! 3. Two generators built from the same seed produce identical sequences.

use std::time::{SystemTime, UNIX_EPOCH};

/// Deterministic xorshift64 generator.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a generator from a seed. A zero seed is remapped to a fixed
    /// odd constant to avoid the all-zero fixed point.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    /// Create a generator seeded from the wall clock.
    ///
    /// Good enough for visual jitter; use [`Rng::new`] in tests.
    #[must_use]
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5DEE_CE66_D001);
        Self::new(nanos ^ nanos.rotate_left(31))
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform draw from `[0, bound)`. Returns 0 when `bound` is 0.
    pub fn range(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(bound)) as u32
    }

    /// Return `true` with probability `p` (clamped to `[0.0, 1.0]`).
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        let unit = self.next_u64() as f64 / u64::MAX as f64;
        unit < p
    }

    /// Uniform choice from a slice. Returns `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.range(items.len() as u32) as usize;
        items.get(idx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
