#![forbid(unsafe_code)]

//! Text-bearing display targets.
//!
//! A [`TextSurface`] is whatever region a transition animates: it can be
//! read back as plain text (markup stripped) and overwritten with a fresh
//! segment list each tick.

use crate::segment::{Segment, plain_text};

/// A display target a transition can read and overwrite.
pub trait TextSurface {
    /// Current displayed content as plain text, roles stripped.
    fn plain_text(&self) -> String;

    /// Replace the displayed content.
    fn present(&mut self, segments: &[Segment]);
}

/// In-memory surface retaining the last presented segments.
///
/// Used as the default surface for tests and demos; a real presenter would
/// map segment roles onto styles.
#[derive(Debug, Default, Clone)]
pub struct BufferSurface {
    segments: Vec<Segment>,
}

impl BufferSurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface pre-populated with settled text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let segments = if text.is_empty() {
            Vec::new()
        } else {
            vec![Segment::settled(text)]
        };
        Self { segments }
    }

    /// The last presented segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any scrambling run is currently displayed.
    #[must_use]
    pub fn has_scrambling(&self) -> bool {
        self.segments
            .iter()
            .any(|s| s.role == crate::segment::SegmentRole::Scrambling)
    }
}

impl TextSurface for BufferSurface {
    fn plain_text(&self) -> String {
        plain_text(&self.segments)
    }

    fn present(&mut self, segments: &[Segment]) {
        self.segments = segments.to_vec();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
