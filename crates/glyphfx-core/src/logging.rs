#![forbid(unsafe_code)]

//! Tracing re-exports.
//!
//! Internal call sites gate their `tracing::` calls on the `tracing`
//! feature; this module re-exports the macros for downstream crates that
//! want to do the same without naming `tracing` themselves.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, trace_span, warn, warn_span};
