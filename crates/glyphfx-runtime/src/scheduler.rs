#![forbid(unsafe_code)]

//! Tick scheduling: one-shot jobs with a minimum delay plus refresh
//! alignment, cancellable by handle.
//!
//! The effective inter-tick period is "wait at least the minimum delay,
//! then wait for the next refresh boundary". Tick spacing is therefore
//! approximate: at least the minimum delay, possibly longer under load. A
//! late job still runs; jobs are never dropped or coalesced.
//!
//! # Invariants
//!
//! 1. A scheduled job runs at most once.
//! 2. Cancelling before the job fires prevents the run; cancelling after it
//!    fired (or twice) is a no-op.
//! 3. [`ManualScheduler`] runs jobs only when the test asks it to, in FIFO
//!    order.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Default minimum delay between ticks.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(30);

/// Default refresh period (60 Hz).
pub const DEFAULT_REFRESH: Duration = Duration::from_nanos(16_666_667);

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

/// The tick-interval composition: a minimum delay followed by alignment to
/// the next refresh boundary.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    min_delay: Duration,
    refresh: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            min_delay: DEFAULT_MIN_DELAY,
            refresh: DEFAULT_REFRESH,
        }
    }
}

impl Cadence {
    /// Set the minimum inter-tick delay (builder).
    #[must_use]
    pub fn min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = delay;
        self
    }

    /// Set the refresh period (builder). A zero period disables alignment.
    #[must_use]
    pub fn refresh(mut self, period: Duration) -> Self {
        self.refresh = period;
        self
    }

    /// The configured minimum delay.
    #[must_use]
    pub fn min_delay_value(&self) -> Duration {
        self.min_delay
    }

    /// The configured refresh period.
    #[must_use]
    pub fn refresh_value(&self) -> Duration {
        self.refresh
    }
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Shared cancel flag between a handle and its worker.
#[derive(Clone)]
struct CancelFlag {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelFlag {
    fn new() -> Self {
        Self {
            inner: Arc::new((Mutex::new(false), Condvar::new())),
        }
    }

    fn set(&self) {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap();
        *cancelled = true;
        cvar.notify_all();
    }

    fn is_set(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap()
    }

    /// Wait for either cancellation or a timeout. Returns `true` if
    /// cancelled. Loops for spurious wakeups.
    fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap();
        if *cancelled {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;

        loop {
            let (guard, result) = cvar.wait_timeout(cancelled, remaining).unwrap();
            cancelled = guard;
            if *cancelled {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

/// Handle to a scheduled tick. Cancellation is no-op-safe.
pub struct TickHandle {
    flag: CancelFlag,
}

impl TickHandle {
    /// Cancel the pending job. Safe to call whether or not the job has
    /// already fired, and safe to call repeatedly.
    pub fn cancel(&self) {
        self.flag.set();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("cancelled", &self.flag.is_set())
            .finish()
    }
}

/// A one-shot tick job.
pub type TickJob = Box<dyn FnOnce() + Send>;

/// Schedules one-shot tick jobs.
pub trait TickScheduler: Send + Sync {
    /// Schedule `job` to run once after `cadence` elapses. The returned
    /// handle cancels the run if invoked first.
    fn schedule(&self, cadence: Cadence, job: TickJob) -> TickHandle;
}

// ---------------------------------------------------------------------------
// Thread-backed scheduler
// ---------------------------------------------------------------------------

/// Runs each scheduled job on its own worker thread.
///
/// The worker blocks on the cancel flag for the minimum delay, sleeps out
/// the remainder of the current refresh period, then runs the job unless it
/// was cancelled in the meantime.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadScheduler;

impl ThreadScheduler {
    /// Create a scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Time until the next refresh boundary, measured against a process
    /// epoch so consecutive ticks land on the same grid.
    fn until_next_boundary(refresh: Duration) -> Duration {
        use std::sync::OnceLock;
        static EPOCH: OnceLock<Instant> = OnceLock::new();
        let epoch = *EPOCH.get_or_init(Instant::now);

        let elapsed = epoch.elapsed().as_nanos();
        let period = refresh.as_nanos().max(1);
        let into_period = elapsed % period;
        Duration::from_nanos((period - into_period) as u64)
    }
}

impl TickScheduler for ThreadScheduler {
    fn schedule(&self, cadence: Cadence, job: TickJob) -> TickHandle {
        let flag = CancelFlag::new();
        let worker_flag = flag.clone();

        thread::spawn(move || {
            if worker_flag.wait_timeout(cadence.min_delay) {
                return;
            }
            if !cadence.refresh.is_zero()
                && worker_flag.wait_timeout(Self::until_next_boundary(cadence.refresh))
            {
                return;
            }
            if worker_flag.is_set() {
                return;
            }
            job();
        });

        TickHandle { flag }
    }
}

// ---------------------------------------------------------------------------
// Manual scheduler (deterministic tests)
// ---------------------------------------------------------------------------

/// Queues jobs and runs them only when told to, on the caller's thread.
///
/// Jobs may schedule follow-up jobs while firing; the queue lock is not
/// held across a job run, so re-entrant scheduling is fine.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<VecDeque<(CancelFlag, TickJob)>>,
}

impl ManualScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued jobs, cancelled ones included.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    /// Pop jobs until one that is not cancelled runs. Returns whether a job
    /// ran.
    pub fn fire_next(&self) -> bool {
        loop {
            let entry = self.queue.lock().unwrap().pop_front();
            match entry {
                Some((flag, job)) => {
                    if flag.is_set() {
                        continue;
                    }
                    job();
                    return true;
                }
                None => return false,
            }
        }
    }

    /// Fire until the queue drains, including jobs scheduled while firing.
    /// Returns how many jobs ran.
    pub fn fire_all(&self) -> usize {
        let mut ran = 0;
        while self.fire_next() {
            ran += 1;
        }
        ran
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&self, _cadence: Cadence, job: TickJob) -> TickHandle {
        let flag = CancelFlag::new();
        self.queue
            .lock()
            .unwrap()
            .push_back((flag.clone(), job));
        TickHandle { flag }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
