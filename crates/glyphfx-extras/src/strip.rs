#![forbid(unsafe_code)]

//! Snap-scrolling card strip.
//!
//! Index-based navigation over a horizontal row of equal-width cards with a
//! fixed gap. Movement happens only through [`CardStrip::next`] /
//! [`CardStrip::prev`], which emit snap-scroll requests; raw horizontal
//! scroll input is gated out by [`AxisFilter`] so the strip cannot drift
//! between card boundaries.
//!
//! # Invariants
//!
//! 1. `index` stays in `[0, card_count)` (0 when the strip is empty).
//! 2. Every emitted offset is an exact multiple of the card pitch
//!    (card width + gap).
//! 3. Resizing preserves the index and re-snaps instantly.

/// How a scroll request should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animate to the target offset.
    Smooth,
    /// Jump to the target offset without animation.
    Instant,
}

/// A request to move the strip's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Target offset from the strip's left edge, in cells.
    pub offset: u32,
    /// Animation behavior.
    pub behavior: ScrollBehavior,
}

/// Card-strip navigation state.
#[derive(Debug, Clone)]
pub struct CardStrip {
    index: usize,
    card_count: usize,
    card_width: u32,
    gap: u32,
}

impl CardStrip {
    /// Create a strip of `card_count` cards, starting at the first card.
    #[must_use]
    pub fn new(card_count: usize, card_width: u32, gap: u32) -> Self {
        Self {
            index: 0,
            card_count,
            card_width,
            gap,
        }
    }

    /// Current card index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.card_count
    }

    /// Distance between the left edges of adjacent cards.
    #[must_use]
    pub fn pitch(&self) -> u32 {
        self.card_width.saturating_add(self.gap)
    }

    /// Offset of card `index` from the strip's left edge.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> u32 {
        self.pitch().saturating_mul(index as u32)
    }

    /// Advance to the next card. `None` when already on the last card.
    pub fn next(&mut self) -> Option<ScrollRequest> {
        if self.index + 1 >= self.card_count {
            return None;
        }
        self.index += 1;
        Some(self.snap(ScrollBehavior::Smooth))
    }

    /// Step back to the previous card. `None` when already on the first.
    pub fn prev(&mut self) -> Option<ScrollRequest> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.snap(ScrollBehavior::Smooth))
    }

    /// Jump to `index`, clamped to the valid range.
    pub fn snap_to(&mut self, index: usize) -> ScrollRequest {
        self.index = index.min(self.card_count.saturating_sub(1));
        self.snap(ScrollBehavior::Smooth)
    }

    /// Apply new card metrics, re-snapping instantly to the current card.
    pub fn resize(&mut self, card_width: u32, gap: u32) -> ScrollRequest {
        self.card_width = card_width;
        self.gap = gap;
        self.snap(ScrollBehavior::Instant)
    }

    fn snap(&self, behavior: ScrollBehavior) -> ScrollRequest {
        ScrollRequest {
            offset: self.offset_for(self.index),
            behavior,
        }
    }
}

// ---------------------------------------------------------------------------
// Axis filtering
// ---------------------------------------------------------------------------

/// Gates raw scroll input so only vertical motion passes through.
///
/// Wheel input with any horizontal component is suppressed; drag input is
/// suppressed only past a horizontal tolerance, so slightly diagonal
/// vertical swipes still scroll the page.
#[derive(Debug, Clone, Copy)]
pub struct AxisFilter {
    drag_tolerance: i32,
}

impl Default for AxisFilter {
    fn default() -> Self {
        Self { drag_tolerance: 10 }
    }
}

impl AxisFilter {
    /// Create a filter with the given horizontal drag tolerance.
    #[must_use]
    pub fn new(drag_tolerance: i32) -> Self {
        Self {
            drag_tolerance: drag_tolerance.max(0),
        }
    }

    /// Whether a wheel event with the given horizontal delta may pass.
    #[must_use]
    pub fn allows_wheel(&self, dx: i32) -> bool {
        dx == 0
    }

    /// Whether a drag with the given horizontal delta may pass.
    #[must_use]
    pub fn allows_drag(&self, dx: i32) -> bool {
        dx.abs() <= self.drag_tolerance
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_card() {
        let strip = CardStrip::new(4, 30, 2);
        assert_eq!(strip.index(), 0);
        assert_eq!(strip.offset_for(0), 0);
    }

    #[test]
    fn next_advances_and_snaps() {
        let mut strip = CardStrip::new(3, 30, 2);
        let req = strip.next().unwrap();
        assert_eq!(strip.index(), 1);
        assert_eq!(req.offset, 32);
        assert_eq!(req.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn next_stops_at_last_card() {
        let mut strip = CardStrip::new(2, 30, 2);
        assert!(strip.next().is_some());
        assert!(strip.next().is_none());
        assert_eq!(strip.index(), 1);
    }

    #[test]
    fn prev_stops_at_first_card() {
        let mut strip = CardStrip::new(2, 30, 2);
        assert!(strip.prev().is_none());
        strip.next();
        assert!(strip.prev().is_some());
        assert_eq!(strip.index(), 0);
    }

    #[test]
    fn empty_strip_never_moves() {
        let mut strip = CardStrip::new(0, 30, 2);
        assert!(strip.next().is_none());
        assert!(strip.prev().is_none());
        assert_eq!(strip.index(), 0);
    }

    #[test]
    fn single_card_never_moves() {
        let mut strip = CardStrip::new(1, 30, 2);
        assert!(strip.next().is_none());
        assert!(strip.prev().is_none());
    }

    #[test]
    fn offsets_are_pitch_multiples() {
        let strip = CardStrip::new(5, 27, 3);
        for i in 0..5 {
            assert_eq!(strip.offset_for(i) % strip.pitch(), 0);
        }
    }

    #[test]
    fn snap_to_clamps() {
        let mut strip = CardStrip::new(3, 30, 2);
        let req = strip.snap_to(99);
        assert_eq!(strip.index(), 2);
        assert_eq!(req.offset, 64);
    }

    #[test]
    fn resize_keeps_index_and_snaps_instantly() {
        let mut strip = CardStrip::new(4, 30, 2);
        strip.next();
        strip.next();
        let req = strip.resize(40, 4);
        assert_eq!(strip.index(), 2);
        assert_eq!(req.offset, 88);
        assert_eq!(req.behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn wheel_filter_blocks_horizontal() {
        let filter = AxisFilter::default();
        assert!(filter.allows_wheel(0));
        assert!(!filter.allows_wheel(1));
        assert!(!filter.allows_wheel(-3));
    }

    #[test]
    fn drag_filter_uses_tolerance() {
        let filter = AxisFilter::default();
        assert!(filter.allows_drag(0));
        assert!(filter.allows_drag(10));
        assert!(filter.allows_drag(-10));
        assert!(!filter.allows_drag(11));
        assert!(!filter.allows_drag(-40));
    }

    #[test]
    fn drag_tolerance_clamped_non_negative() {
        let filter = AxisFilter::new(-5);
        assert!(filter.allows_drag(0));
        assert!(!filter.allows_drag(1));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn index_stays_in_range_under_random_ops(
                card_count in 0usize..12,
                ops in proptest::collection::vec(0u8..4, 0..40),
            ) {
                let mut strip = CardStrip::new(card_count, 30, 2);
                for op in ops {
                    match op {
                        0 => { strip.next(); }
                        1 => { strip.prev(); }
                        2 => { strip.snap_to(usize::MAX); }
                        _ => { strip.resize(17, 1); }
                    }
                    prop_assert!(
                        strip.index() < card_count.max(1),
                        "index {} out of range for {} cards",
                        strip.index(),
                        card_count
                    );
                }
            }

            #[test]
            fn emitted_offsets_are_pitch_multiples(
                card_count in 1usize..12,
                card_width in 1u32..200,
                gap in 0u32..50,
                steps in 0usize..24,
            ) {
                let mut strip = CardStrip::new(card_count, card_width, gap);
                for _ in 0..steps {
                    if let Some(req) = strip.next() {
                        prop_assert_eq!(req.offset % strip.pitch(), 0);
                    }
                }
            }
        }
    }
}
