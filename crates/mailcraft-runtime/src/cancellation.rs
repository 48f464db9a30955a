#![forbid(unsafe_code)]

//! Cooperative cancellation for long-running editor effects.
//!
//! A [`CancellationSource`] is owned by whoever may abort the work (the
//! editor, usually); the work itself receives a [`CancellationToken`] and
//! checks it at every yield point. Both are ordinary values created per
//! operation, never process-wide state.
//!
//! ```
//! use mailcraft_runtime::cancellation::CancellationSource;
//! use std::time::Duration;
//!
//! let source = CancellationSource::new();
//! let token = source.token();
//! let worker = std::thread::spawn(move || {
//!     // Sleeps, but wakes early on cancel.
//!     token.wait_timeout(Duration::from_secs(30))
//! });
//! source.cancel();
//! assert!(worker.join().unwrap());
//! ```

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

#[derive(Default)]
struct Flag {
    cancelled: Mutex<bool>,
    changed: Condvar,
}

impl Flag {
    fn get(&self) -> bool {
        *self.cancelled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self) {
        let mut cancelled = self
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *cancelled = true;
        self.changed.notify_all();
    }
}

/// Read side of a cancellation signal. Cheap to clone and `Send`.
#[derive(Clone)]
pub struct CancellationToken {
    flag: Arc<Flag>,
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancellationToken {
    /// A token that is never cancelled.
    #[must_use]
    pub fn never() -> Self {
        Self {
            flag: Arc::default(),
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }

    /// Block for up to `timeout`, returning early if cancelled.
    ///
    /// Returns `true` if cancellation was observed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self
            .flag
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .flag
            .changed
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Write side of a cancellation signal.
///
/// Dropping the source does not cancel its tokens.
#[derive(Default)]
pub struct CancellationSource {
    flag: Arc<Flag>,
}

impl std::fmt::Debug for CancellationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationSource")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancellationSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A token observing this source.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            flag: Arc::clone(&self.flag),
        }
    }

    /// Request cancellation and wake every waiting token. Idempotent.
    pub fn cancel(&self) {
        if !self.flag.get() {
            tracing::debug!(target: "mailcraft.cancel", "cancellation requested");
        }
        self.flag.set();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }
}
