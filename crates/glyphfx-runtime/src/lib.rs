#![forbid(unsafe_code)]

//! Runtime: tick scheduling and per-surface transition driving.
//!
//! The core engine is cadence-agnostic; this crate supplies the cadence.
//! [`scheduler`] turns "wait at least the minimum delay, then wait for the
//! next refresh boundary" into a cancellable one-shot job, and [`driver`]
//! owns the one-active-session-per-surface rule, supersession, and
//! completion signalling.

pub mod driver;
pub mod scheduler;

pub use driver::{DriverConfig, ScrambleDriver};
pub use scheduler::{Cadence, ManualScheduler, ThreadScheduler, TickHandle, TickJob, TickScheduler};
