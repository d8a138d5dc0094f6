//! Timing for resolution and validation calls.

use std::time::{Duration, Instant};

/// Adds the time between its creation and drop to `slot`.
///
/// ```rust,ignore
/// let mut spent = Duration::ZERO;
/// {
///     let _timer = PhaseTimer::new(&mut spent);
///     // list the identity store, match, ...
/// }
/// ```
pub(crate) struct PhaseTimer<'a> {
    start: Instant,
    slot: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub(crate) fn new(slot: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            slot,
        }
    }
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        *self.slot += self.start.elapsed();
    }
}

/// Run `f`, returning its result and how long it took.
pub(crate) fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let mut elapsed = Duration::ZERO;
    let out = {
        let _timer = PhaseTimer::new(&mut elapsed);
        f()
    };
    (out, elapsed)
}
