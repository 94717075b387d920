#![forbid(unsafe_code)]

//! Single-fulfillment completion signal.
//!
//! [`completion`] returns a ([`Notifier`], [`Completion`]) pair. The driver
//! holds the notifier and fires it at most once, when every slot of a
//! transition has settled; callers hold the (cloneable) completion and may
//! poll or block on it.
//!
//! # Invariants
//!
//! 1. Fulfillment takes effect at most once; repeat calls are no-ops.
//! 2. Fulfillment wakes all current waiters and satisfies future ones.
//! 3. A completion is never "rejected"; there is no error path.
//!
//! # Abandonment
//!
//! Starting a new transition on a surface drops the superseded session's
//! notifier without fulfilling it. Waiters on that completion stay pending
//! forever, matching the reference behavior. Use
//! [`Completion::wait_timeout`] where that matters.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Create a linked notifier/completion pair.
#[must_use]
pub fn completion() -> (Notifier, Completion) {
    let inner = Arc::new((Mutex::new(false), Condvar::new()));
    (
        Notifier {
            inner: inner.clone(),
        },
        Completion { inner },
    )
}

/// Fulfilling half of the pair. Not cloneable; at most one holder fires it.
pub struct Notifier {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Notifier {
    /// Fulfill the completion. Idempotent.
    pub fn notify(&self) {
        let (lock, cvar) = &*self.inner;
        let mut done = lock.lock().unwrap();
        *done = true;
        cvar.notify_all();
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish()
    }
}

/// Waiting half of the pair.
#[derive(Clone)]
pub struct Completion {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Completion {
    /// Non-blocking poll.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap()
    }

    /// Block until fulfilled.
    ///
    /// A superseded transition never fulfills its completion, so this can
    /// block forever on an abandoned handle. Prefer
    /// [`wait_timeout`](Self::wait_timeout) when supersession is possible.
    pub fn wait(&self) {
        let (lock, cvar) = &*self.inner;
        let mut done = lock.lock().unwrap();
        while !*done {
            done = cvar.wait(done).unwrap();
        }
    }

    /// Wait for fulfillment or a timeout.
    ///
    /// Returns `true` if fulfilled, `false` if the timeout elapsed first.
    /// Handles spurious wakeups by looping until the deadline.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut done = lock.lock().unwrap();
        if *done {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;

        loop {
            let (guard, result) = cvar.wait_timeout(done, remaining).unwrap();
            done = guard;
            if *done {
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

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("complete", &self.is_complete())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
