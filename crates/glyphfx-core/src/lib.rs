#![forbid(unsafe_code)]

//! Core: transition slots, glyph palettes, random sampling, and completion
//! signals. No threads, no I/O; cadence is the caller's concern.

pub mod glyphs;
pub mod logging;
pub mod rng;
pub mod segment;
pub mod signal;
pub mod surface;
pub mod transition;

pub use glyphs::GlyphPalette;
pub use rng::Rng;
pub use segment::{Segment, SegmentRole, plain_text};
pub use signal::{Completion, Notifier, completion};
pub use surface::{BufferSurface, TextSurface};
pub use transition::{CharSlot, SlotPhase, TimingConfig, TransitionSession};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn, warn_span};
