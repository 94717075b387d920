#![forbid(unsafe_code)]

//! Per-surface transition driving.
//!
//! A [`ScrambleDriver`] owns one surface and at most one active transition
//! session. [`set_text`](ScrambleDriver::set_text) cancels whatever tick is
//! pending, renders frame 0 synchronously, then lets the scheduler carry
//! the rest of the session; each tick schedules its successor only after
//! its own render completes, so renders are strictly frame-ordered.
//!
//! # Supersession
//!
//! Sessions are generation-tagged. Starting a new transition bumps the
//! generation and cancels the pending tick; a stale tick that fires anyway
//! sees the mismatch and returns without touching the surface. The
//! superseded session's completion is abandoned, never fulfilled.

use std::sync::{Arc, Mutex};

use glyphfx_core::glyphs::GlyphPalette;
use glyphfx_core::rng::Rng;
use glyphfx_core::signal::{Completion, Notifier, completion};
use glyphfx_core::surface::TextSurface;
use glyphfx_core::transition::{TimingConfig, TransitionSession};

use crate::scheduler::{Cadence, TickHandle, TickScheduler};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Driver-wide settings applied to every transition it starts.
#[derive(Debug, Clone, Default)]
pub struct DriverConfig {
    /// Tick cadence handed to the scheduler.
    pub cadence: Cadence,
    /// Timing windows for new sessions.
    pub timing: TimingConfig,
    /// Filler palette for new sessions.
    pub palette: GlyphPalette,
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

struct DriverInner<S> {
    surface: S,
    session: Option<TransitionSession>,
    notifier: Option<Notifier>,
    pending: Option<TickHandle>,
    generation: u64,
}

struct Shared<S> {
    inner: Mutex<DriverInner<S>>,
    scheduler: Arc<dyn TickScheduler>,
    config: DriverConfig,
}

/// Drives scramble transitions on a single surface.
pub struct ScrambleDriver<S: TextSurface + Send + 'static> {
    shared: Arc<Shared<S>>,
}

impl<S: TextSurface + Send + 'static> ScrambleDriver<S> {
    /// Create a driver with default configuration.
    #[must_use]
    pub fn new(surface: S, scheduler: Arc<dyn TickScheduler>) -> Self {
        Self::with_config(surface, scheduler, DriverConfig::default())
    }

    /// Create a driver with explicit configuration.
    #[must_use]
    pub fn with_config(
        surface: S,
        scheduler: Arc<dyn TickScheduler>,
        config: DriverConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(DriverInner {
                    surface,
                    session: None,
                    notifier: None,
                    pending: None,
                    generation: 0,
                }),
                scheduler,
                config,
            }),
        }
    }

    /// Start a transition from the surface's current text to `new_text`.
    ///
    /// Cancels any in-flight transition first; the superseded transition's
    /// completion is abandoned (see module docs). Frame 0 is rendered
    /// before this returns.
    pub fn set_text(&self, new_text: &str) -> Completion {
        let mut inner = self.shared.inner.lock().unwrap();

        inner.generation += 1;
        let generation = inner.generation;
        if let Some(handle) = inner.pending.take() {
            handle.cancel();
        }
        // Replacing the notifier drops the superseded one unfulfilled.
        inner.notifier = None;

        let old_text = inner.surface.plain_text();
        let mut session = TransitionSession::new(
            &old_text,
            new_text,
            self.shared.config.timing.clone(),
            self.shared.config.palette.clone(),
            Rng::from_entropy(),
        );
        let (notifier, handle) = completion();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            generation,
            slots = session.slots().len(),
            "transition started"
        );

        let segments = session.render_current();
        inner.surface.present(&segments);

        if session.is_complete() {
            inner.session = None;
            notifier.notify();
        } else {
            inner.session = Some(session);
            inner.notifier = Some(notifier);
            Self::schedule_tick(&self.shared, generation, &mut inner);
        }

        handle
    }

    /// Current plain text of the surface.
    #[must_use]
    pub fn text(&self) -> String {
        self.shared.inner.lock().unwrap().surface.plain_text()
    }

    /// Inspect the surface under the driver lock.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.shared.inner.lock().unwrap().surface)
    }

    fn schedule_tick(shared: &Arc<Shared<S>>, generation: u64, inner: &mut DriverInner<S>) {
        let worker = Arc::clone(shared);
        let handle = shared.scheduler.schedule(
            shared.config.cadence,
            Box::new(move || Self::tick(&worker, generation)),
        );
        inner.pending = Some(handle);
    }

    fn tick(shared: &Arc<Shared<S>>, generation: u64) {
        let mut inner = shared.inner.lock().unwrap();
        if inner.generation != generation {
            // Superseded while this tick was in flight.
            return;
        }
        inner.pending = None;

        let rendered = match inner.session.as_mut() {
            Some(session) => {
                session.advance();
                let segments = session.render_current();
                let complete = session.is_complete();
                Some((segments, complete))
            }
            None => None,
        };
        let Some((segments, complete)) = rendered else {
            return;
        };

        inner.surface.present(&segments);

        if complete {
            inner.session = None;
            if let Some(notifier) = inner.notifier.take() {
                notifier.notify();
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(generation, "transition complete");
        } else {
            Self::schedule_tick(shared, generation, &mut inner);
        }
    }
}

impl<S: TextSurface + Send + 'static> std::fmt::Debug for ScrambleDriver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.lock().unwrap();
        f.debug_struct("ScrambleDriver")
            .field("generation", &inner.generation)
            .field("active", &inner.session.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use glyphfx_core::surface::BufferSurface;
    use std::time::Duration;

    fn manual_driver(initial: &str) -> (ScrambleDriver<BufferSurface>, Arc<ManualScheduler>) {
        let sched = Arc::new(ManualScheduler::new());
        let driver = ScrambleDriver::new(
            BufferSurface::with_text(initial),
            sched.clone() as Arc<dyn TickScheduler>,
        );
        (driver, sched)
    }

    #[test]
    fn first_render_is_synchronous() {
        let (driver, sched) = manual_driver("dog");
        let _done = driver.set_text("cat");
        // Frame 0 landed before any scheduled tick ran.
        assert_eq!(driver.text().chars().count(), 3);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn runs_to_completion_under_manual_ticks() {
        let (driver, sched) = manual_driver("dog");
        let done = driver.set_text("cat");
        sched.fire_all();
        assert!(done.is_complete());
        assert_eq!(driver.text(), "cat");
        assert!(driver.with_surface(|s| !s.has_scrambling()));
    }

    #[test]
    fn empty_to_empty_completes_immediately() {
        let (driver, sched) = manual_driver("");
        let done = driver.set_text("");
        assert!(done.is_complete());
        assert_eq!(sched.pending(), 0);
        assert_eq!(driver.text(), "");
    }

    #[test]
    fn growth_and_shrink() {
        let (driver, sched) = manual_driver("");
        let done = driver.set_text("hi");
        sched.fire_all();
        assert!(done.is_complete());
        assert_eq!(driver.text(), "hi");

        let done = driver.set_text("");
        sched.fire_all();
        assert!(done.is_complete());
        assert_eq!(driver.text(), "");
    }

    #[test]
    fn supersession_abandons_first_completion() {
        let (driver, sched) = manual_driver("start");
        let first = driver.set_text("AAAAAAAA");
        // Let the first transition make some progress.
        sched.fire_next();
        sched.fire_next();

        let second = driver.set_text("B");
        sched.fire_all();

        assert!(second.is_complete());
        assert!(!first.is_complete(), "abandoned completion must not fulfill");
        assert_eq!(driver.text(), "B");
    }

    #[test]
    fn supersession_cancels_pending_tick() {
        let (driver, sched) = manual_driver("one");
        let _first = driver.set_text("two");
        assert_eq!(sched.pending(), 1);
        let _second = driver.set_text("three");
        // Old tick cancelled, new tick queued.
        sched.fire_all();
        assert_eq!(driver.text(), "three");
    }

    #[test]
    fn sequential_transitions_fulfill_in_turn() {
        let (driver, sched) = manual_driver("a");
        let first = driver.set_text("b");
        sched.fire_all();
        let second = driver.set_text("c");
        sched.fire_all();
        assert!(first.is_complete());
        assert!(second.is_complete());
        assert_eq!(driver.text(), "c");
    }

    #[test]
    fn tick_count_matches_completion_frame_bound() {
        let (driver, sched) = manual_driver("dog");
        let done = driver.set_text("cat");
        let mut ticks = 0;
        while sched.fire_next() {
            ticks += 1;
        }
        assert!(done.is_complete());
        // One scheduled tick per frame past frame 0; bounded by the jitter
        // windows (scramble < 40, reveal offset < 40).
        assert!(ticks < 80, "too many ticks: {ticks}");
    }

    #[test]
    fn threaded_end_to_end() {
        let driver = ScrambleDriver::with_config(
            BufferSurface::with_text("dog"),
            Arc::new(crate::scheduler::ThreadScheduler::new()),
            DriverConfig {
                cadence: Cadence::default()
                    .min_delay(Duration::from_micros(200))
                    .refresh(Duration::from_micros(100)),
                ..DriverConfig::default()
            },
        );
        let done = driver.set_text("cat");
        assert!(done.wait_timeout(Duration::from_secs(10)), "timed out");
        assert_eq!(driver.text(), "cat");
    }
}
