#![forbid(unsafe_code)]

//! Viewport-visibility toggles.
//!
//! Sections report how much of them is visible as a ratio in `[0, 1]`;
//! these helpers turn the stream of ratios into edge-triggered events. A
//! [`SectionToggle`] flips shown/hidden as the ratio crosses its threshold,
//! and a [`RevealOnce`] fires a single time on the first crossing (the
//! hook that kicks off the scramble transition for a section's text).

/// Edge-triggered shown/hidden state for one section.
#[derive(Debug, Clone)]
pub struct SectionToggle {
    threshold: f64,
    visible: bool,
}

impl SectionToggle {
    /// Create a toggle that flips at `threshold` (clamped to `[0, 1]`).
    /// Sections start hidden.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            visible: false,
        }
    }

    /// Feed the current visible ratio. Returns the new visibility when it
    /// changed, `None` while the state holds.
    pub fn update(&mut self, ratio: f64) -> Option<bool> {
        let now = ratio.clamp(0.0, 1.0) >= self.threshold;
        if now == self.visible {
            return None;
        }
        self.visible = now;
        Some(now)
    }

    /// Current visibility.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Fires exactly once, the first time the ratio reaches the threshold.
#[derive(Debug, Clone)]
pub struct RevealOnce {
    threshold: f64,
    fired: bool,
}

impl RevealOnce {
    /// Create a one-shot trigger at `threshold` (clamped to `[0, 1]`).
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            fired: false,
        }
    }

    /// Feed the current visible ratio. Returns `true` exactly once.
    pub fn update(&mut self, ratio: f64) -> bool {
        if self.fired || ratio.clamp(0.0, 1.0) < self.threshold {
            return false;
        }
        self.fired = true;
        true
    }

    /// Whether the trigger has already fired.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
