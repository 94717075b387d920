#![forbid(unsafe_code)]

//! The scramble-transition engine.
//!
//! A [`TransitionSession`] morphs one string into another over discrete
//! frames. Each grapheme position gets a [`CharSlot`] with two randomized
//! thresholds: the frame at which it stops showing its old grapheme and
//! starts showing filler glyphs, and the frame at which it locks to its new
//! grapheme. What a slot displays is a pure function of the session's frame
//! counter against those thresholds; the caller owns cadence and calls
//! [`advance`](TransitionSession::advance) once per tick.
//!
//! # Invariants
//!
//! 1. Slot count is `max(graphemes(old), graphemes(new))`; the shorter
//!    side's missing positions hold `None`.
//! 2. `0 <= scramble_start < reveal_at < scramble_start + reveal_window`
//!    and `scramble_start < scramble_window` for every slot.
//! 3. A slot that has settled never changes again within the session.
//! 4. Once the frame counter reaches [`completion_frame`], rendering yields
//!    exactly the target text with no scrambling runs.
//! 5. Scrambling output draws only from the palette; a chosen filler
//!    persists across renders unless re-rolled.
//!
//! [`completion_frame`]: TransitionSession::completion_frame

use unicode_segmentation::UnicodeSegmentation;

use crate::glyphs::GlyphPalette;
use crate::rng::Rng;
use crate::segment::{Segment, SegmentBuilder, SegmentRole};

/// Default bound on the frame at which a slot may begin scrambling.
pub const DEFAULT_SCRAMBLE_WINDOW: u32 = 40;

/// Default bound on how many frames after its start a slot may reveal.
pub const DEFAULT_REVEAL_WINDOW: u32 = 40;

/// Default per-frame probability of re-rolling a scrambling slot's filler.
/// Below 1.0 so the flicker reads slower than the frame rate.
pub const DEFAULT_REROLL_CHANCE: f64 = 0.15;

// ---------------------------------------------------------------------------
// Timing configuration
// ---------------------------------------------------------------------------

/// Jitter windows and flicker rate for a transition.
#[derive(Debug, Clone)]
pub struct TimingConfig {
    scramble_window: u32,
    reveal_window: u32,
    reroll_chance: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scramble_window: DEFAULT_SCRAMBLE_WINDOW,
            reveal_window: DEFAULT_REVEAL_WINDOW,
            reroll_chance: DEFAULT_REROLL_CHANCE,
        }
    }
}

impl TimingConfig {
    /// Set the scramble-start window (builder). Clamped to at least 1.
    #[must_use]
    pub fn scramble_window(mut self, window: u32) -> Self {
        self.scramble_window = window.max(1);
        self
    }

    /// Set the reveal window (builder). Clamped to at least 2 so the reveal
    /// offset range `[1, window)` is never empty.
    #[must_use]
    pub fn reveal_window(mut self, window: u32) -> Self {
        self.reveal_window = window.max(2);
        self
    }

    /// Set the filler re-roll probability (builder). Clamped to `[0, 1]`.
    #[must_use]
    pub fn reroll_chance(mut self, chance: f64) -> Self {
        self.reroll_chance = chance.clamp(0.0, 1.0);
        self
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Where a slot is in its life cycle at a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// Before `scramble_start`: still showing the old grapheme.
    HoldingOld,
    /// Between the thresholds: showing filler glyphs.
    Scrambling,
    /// At or past `reveal_at`: locked to the new grapheme. Terminal.
    Settled,
}

/// Per-grapheme transition state.
///
/// `None` for source or target means "no grapheme at this position": the
/// slot grows out of nothing or shrinks away to nothing.
#[derive(Debug, Clone)]
pub struct CharSlot {
    source: Option<String>,
    target: Option<String>,
    scramble_start: u32,
    reveal_at: u32,
    filler: Option<char>,
}

impl CharSlot {
    /// Phase at `frame`, as a pure function of the two thresholds.
    #[must_use]
    pub fn phase_at(&self, frame: u32) -> SlotPhase {
        if frame >= self.reveal_at {
            SlotPhase::Settled
        } else if frame >= self.scramble_start {
            SlotPhase::Scrambling
        } else {
            SlotPhase::HoldingOld
        }
    }

    /// The grapheme this slot transitions away from.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The grapheme this slot settles to.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Frame at which scrambling begins.
    #[must_use]
    pub fn scramble_start(&self) -> u32 {
        self.scramble_start
    }

    /// Frame at which the slot locks to its target.
    #[must_use]
    pub fn reveal_at(&self) -> u32 {
        self.reveal_at
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One active transition: a slot per grapheme position plus the frame
/// counter the slots are evaluated against.
#[derive(Debug)]
pub struct TransitionSession {
    slots: Vec<CharSlot>,
    frame: u32,
    rng: Rng,
    palette: GlyphPalette,
    config: TimingConfig,
}

impl TransitionSession {
    /// Build a session morphing `old_text` into `new_text`.
    ///
    /// Draws both thresholds for every slot up front: the scramble start
    /// uniformly from `[0, scramble_window)` and the reveal offset
    /// uniformly from `[1, reveal_window)` past it.
    #[must_use]
    pub fn new(
        old_text: &str,
        new_text: &str,
        config: TimingConfig,
        palette: GlyphPalette,
        mut rng: Rng,
    ) -> Self {
        let old: Vec<&str> = old_text.graphemes(true).collect();
        let new: Vec<&str> = new_text.graphemes(true).collect();
        let len = old.len().max(new.len());

        let mut slots = Vec::with_capacity(len);
        for i in 0..len {
            let scramble_start = rng.range(config.scramble_window);
            let reveal_at = scramble_start
                .saturating_add(1)
                .saturating_add(rng.range(config.reveal_window - 1));
            slots.push(CharSlot {
                source: old.get(i).map(|g| (*g).to_string()),
                target: new.get(i).map(|g| (*g).to_string()),
                scramble_start,
                reveal_at,
                filler: None,
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(slots = len, "transition session created");

        Self {
            slots,
            frame: 0,
            rng,
            palette,
            config,
        }
    }

    /// The slots, in display order.
    #[must_use]
    pub fn slots(&self) -> &[CharSlot] {
        &self.slots
    }

    /// Current frame index (0-based).
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Advance to the next frame.
    pub fn advance(&mut self) {
        self.frame = self.frame.saturating_add(1);
    }

    /// Render the current frame without advancing.
    ///
    /// Scrambling slots pick a filler glyph on first entry and re-roll it
    /// with the configured per-frame probability thereafter, so the filler
    /// flickers slower than the frame rate.
    pub fn render_current(&mut self) -> Vec<Segment> {
        let Self {
            slots,
            frame,
            rng,
            palette,
            config,
        } = self;

        let mut out = SegmentBuilder::new();
        for slot in slots.iter_mut() {
            match slot.phase_at(*frame) {
                SlotPhase::HoldingOld => {
                    out.push(SegmentRole::Settled, slot.source.as_deref().unwrap_or(""));
                }
                SlotPhase::Settled => {
                    out.push(SegmentRole::Settled, slot.target.as_deref().unwrap_or(""));
                }
                SlotPhase::Scrambling => {
                    if slot.filler.is_none() || rng.chance(config.reroll_chance) {
                        slot.filler = Some(palette.random(rng));
                    }
                    if let Some(ch) = slot.filler {
                        out.push_char(SegmentRole::Scrambling, ch);
                    }
                }
            }
        }
        out.finish()
    }

    /// Whether every slot has settled at the current frame.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| slot.phase_at(self.frame) == SlotPhase::Settled)
    }

    /// The frame index on which the session completes: the largest
    /// `reveal_at` across slots, or 0 for an empty session.
    #[must_use]
    pub fn completion_frame(&self) -> u32 {
        self.slots.iter().map(|s| s.reveal_at).max().unwrap_or(0)
    }

    /// The text the session settles to.
    #[must_use]
    pub fn target_text(&self) -> String {
        self.slots
            .iter()
            .filter_map(|s| s.target.as_deref())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
