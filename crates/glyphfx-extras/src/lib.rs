#![forbid(unsafe_code)]

//! Extras: the peripheral display-state helpers around the transition
//! engine. Persisted theme/accent preferences, snap-scrolling card strips,
//! and viewport-visibility toggles.

pub mod prefs;
pub mod strip;
pub mod visibility;

pub use prefs::{MemoryStore, PrefCenter, PrefStore, Preferences, StoreError, Theme};
pub use strip::{AxisFilter, CardStrip, ScrollBehavior, ScrollRequest};
pub use visibility::{RevealOnce, SectionToggle};

#[cfg(feature = "file-store")]
pub use prefs::FileStore;
