#![forbid(unsafe_code)]

//! glyphfx public facade crate.
//!
//! Re-exports the engine, runtime, and extras behind one import, plus a
//! lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use glyphfx::prelude::*;
//!
//! let driver = ScrambleDriver::new(
//!     BufferSurface::with_text("dog"),
//!     Arc::new(ThreadScheduler::new()),
//! );
//! let done = driver.set_text("cat");
//! done.wait();
//! assert_eq!(driver.text(), "cat");
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use glyphfx_core::glyphs::GlyphPalette;
pub use glyphfx_core::rng::Rng;
pub use glyphfx_core::segment::{Segment, SegmentBuilder, SegmentRole, plain_text};
pub use glyphfx_core::signal::{Completion, Notifier, completion};
pub use glyphfx_core::surface::{BufferSurface, TextSurface};
pub use glyphfx_core::transition::{
    CharSlot, SlotPhase, TimingConfig, TransitionSession,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use glyphfx_runtime::{
    Cadence, DriverConfig, ManualScheduler, ScrambleDriver, ThreadScheduler, TickHandle,
    TickScheduler,
};

// --- Extras re-exports -----------------------------------------------------

#[cfg(feature = "extras")]
pub use glyphfx_extras::{
    AxisFilter, CardStrip, FileStore, MemoryStore, PrefCenter, PrefStore, Preferences,
    RevealOnce, ScrollBehavior, ScrollRequest, SectionToggle, StoreError, Theme,
};

// --- Errors ----------------------------------------------------------------

/// Top-level error type for glyphfx apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure.
    Io(std::io::Error),
    /// Preference storage failure.
    #[cfg(feature = "extras")]
    Store(glyphfx_extras::StoreError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            #[cfg(feature = "extras")]
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            #[cfg(feature = "extras")]
            Self::Store(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "extras")]
impl From<glyphfx_extras::StoreError> for Error {
    fn from(err: glyphfx_extras::StoreError) -> Self {
        Self::Store(err)
    }
}

// --- Prelude ---------------------------------------------------------------

/// Common imports for glyphfx applications.
pub mod prelude {
    pub use crate::{
        BufferSurface, Completion, GlyphPalette, Segment, SegmentRole, TextSurface,
        TimingConfig, TransitionSession,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{Cadence, DriverConfig, ScrambleDriver, ThreadScheduler, TickScheduler};

    #[cfg(feature = "extras")]
    pub use crate::{CardStrip, PrefCenter, SectionToggle, Theme};
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
