#![forbid(unsafe_code)]

//! Rendered-output model: runs of settled and scrambling text.
//!
//! A render pass produces a list of [`Segment`]s, each a run of text with a
//! [`SegmentRole`]. Settled runs display verbatim; scrambling runs are the
//! in-progress glyphs a presenter is expected to style distinctly.
//!
//! # Invariants
//!
//! 1. No two adjacent segments share a role.
//! 2. No segment is empty.

/// How a run of text should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    /// Verbatim text: either not yet touched or already settled.
    Settled,
    /// In-transition filler glyphs.
    Scrambling,
}

/// A run of text with a single role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The text content.
    pub text: String,
    /// Presentation role for the whole run.
    pub role: SegmentRole,
}

impl Segment {
    /// Create a settled segment.
    #[must_use]
    pub fn settled(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: SegmentRole::Settled,
        }
    }

    /// Create a scrambling segment.
    #[must_use]
    pub fn scrambling(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: SegmentRole::Scrambling,
        }
    }
}

/// Concatenate segment text regardless of role.
#[must_use]
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Accumulates pieces into coalesced segments.
///
/// Adjacent pushes with the same role merge into one segment; empty pushes
/// are dropped.
#[derive(Debug, Default)]
pub struct SegmentBuilder {
    segments: Vec<Segment>,
}

impl SegmentBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text under a role.
    pub fn push(&mut self, role: SegmentRole, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.role == role => last.text.push_str(text),
            _ => self.segments.push(Segment {
                text: text.to_string(),
                role,
            }),
        }
    }

    /// Append a single character under a role.
    pub fn push_char(&mut self, role: SegmentRole, ch: char) {
        let mut buf = [0u8; 4];
        self.push(role, ch.encode_utf8(&mut buf));
    }

    /// Finish and return the coalesced segments.
    #[must_use]
    pub fn finish(self) -> Vec<Segment> {
        self.segments
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
