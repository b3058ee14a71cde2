use std::fmt;

use super::monitor::{Monitor, MonitorGuard};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
struct LatchState {
    counter: usize,
    /// Threads currently parked in `wait`/`count_down_and_wait`.
    waiting: usize,
}

/// A resettable count-down latch.
///
/// One or more threads can wait for the counter to become zero while other threads
/// decrement it. Decrementing never blocks, and a thread may decrement more than once.
///
/// Unlike a one-shot latch, the counter can be re-armed with [`reset`](Self::reset)
/// or [`reset_to`](Self::reset_to), but only while no thread is blocked on it: a
/// parked thread expects to be released by the counter reaching zero, and moving
/// the counter under it would strand it.
pub struct Latch {
    initial: usize,
    monitor: Monitor<LatchState>,
}

impl Latch {
    /// Create a latch whose counter starts at, and resets to, `count`.
    pub fn new(count: usize) -> Self {
        Self {
            initial: count,
            monitor: Monitor::new(LatchState {
                counter: count,
                waiting: 0,
            }),
        }
    }

    /// Value restored by [`reset`](Self::reset).
    pub fn initial(&self) -> usize {
        self.initial
    }

    /// Current value of the counter. Advisory only.
    pub fn count(&self) -> usize {
        self.monitor.get().counter
    }

    /// Number of threads currently blocked on the latch. Advisory only.
    pub fn waiters(&self) -> usize {
        self.monitor.get().waiting
    }

    /// Decrement the counter by one.
    ///
    /// Nothing happens if the counter is already zero. If the counter becomes zero,
    /// every waiting thread is woken up.
    pub fn count_down(&self) {
        let mut state = self.monitor.lock();
        self.count_down_locked(&mut state);
    }

    /// Decrement the counter and block until it reaches zero.
    ///
    /// The thread whose decrement brings the counter to zero wakes the others and
    /// returns without blocking. Returns immediately if the counter is already zero.
    pub fn count_down_and_wait(&self) {
        let mut state = self.monitor.lock();
        self.count_down_locked(&mut state);
        if state.counter != 0 {
            Self::wait_locked(&mut state);
        }
    }

    /// Restore the counter to its initial value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if any thread is blocked on the latch. The
    /// counter is left untouched in that case.
    pub fn reset(&self) -> Result<()> {
        self.reset_to(self.initial)
    }

    /// Set the counter to `value`.
    ///
    /// This does not change the value restored by a later [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if any thread is blocked on the latch. The
    /// counter is left untouched in that case.
    pub fn reset_to(&self, value: usize) -> Result<()> {
        let mut state = self.monitor.lock();
        if state.waiting != 0 {
            log::debug!(
                "latch {:p}: reset to {} rejected, {} thread(s) waiting",
                self,
                value,
                state.waiting
            );
            return Err(Error::InvalidState {
                waiting: state.waiting,
            });
        }
        state.counter = value;
        Ok(())
    }

    /// Block the calling thread until the counter is zero.
    ///
    /// Returns immediately if it already is.
    pub fn wait(&self) {
        let mut state = self.monitor.lock();
        Self::wait_locked(&mut state);
    }

    /// Return `true` if [`wait`](Self::wait) would block. Advisory only.
    pub fn would_block(&self) -> bool {
        self.count() != 0
    }

    fn count_down_locked(&self, state: &mut MonitorGuard<'_, LatchState>) {
        if state.counter == 0 {
            return;
        }
        state.counter -= 1;
        if state.counter == 0 {
            log::trace!(
                "latch {:p}: reached zero, waking {} thread(s)",
                self,
                state.waiting
            );
            state.notify_all();
        }
    }

    fn wait_locked(state: &mut MonitorGuard<'_, LatchState>) {
        state.waiting += 1;
        state.wait_while(|state| state.counter != 0);
        state.waiting -= 1;
    }
}

impl fmt::Debug for Latch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.monitor.get();
        f.debug_struct("Latch")
            .field("counter", &state.counter)
            .field("initial", &self.initial)
            .field("waiting", &state.waiting)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        thread,
    };

    use super::*;
    use crate::sync::wait_until;

    #[test]
    fn count_starts_at_initial() {
        let latch = Latch::new(2);
        assert_eq!(latch.count(), 2);
        assert_eq!(latch.initial(), 2);
        assert_eq!(latch.waiters(), 0);
        assert!(latch.would_block());
    }

    #[test]
    fn count_down_decrements() {
        let latch = Latch::new(2);
        latch.count_down();
        assert_eq!(latch.count(), 1);
        latch.count_down();
        assert_eq!(latch.count(), 0);
        assert!(!latch.would_block());
    }

    #[test]
    fn count_down_at_zero_is_noop() {
        let latch = Latch::new(2);
        latch.count_down();
        latch.count_down();
        latch.count_down();
        assert_eq!(latch.count(), 0);
    }

    #[test]
    fn wait_on_zero_returns_immediately() {
        let latch = Latch::new(0);
        latch.wait();
        latch.count_down_and_wait();
        assert_eq!(latch.count(), 0);
        assert_eq!(latch.waiters(), 0);
    }

    #[test]
    fn reset_restores_initial() {
        let latch = Latch::new(2);
        latch.count_down();
        latch.count_down();
        latch.reset().unwrap();
        assert_eq!(latch.count(), 2);
    }

    #[test]
    fn reset_to_keeps_initial() {
        let latch = Latch::new(2);
        latch.reset_to(4).unwrap();
        assert_eq!(latch.count(), 4);
        assert_eq!(latch.initial(), 2);

        latch.reset_to(0).unwrap();
        assert!(!latch.would_block());

        latch.reset().unwrap();
        assert_eq!(latch.count(), 2);
    }

    #[test]
    fn reset_fails_while_waiting() {
        let latch = Latch::new(2);
        thread::scope(|s| {
            s.spawn(|| latch.wait());
            wait_until(|| latch.waiters() == 1);

            assert!(matches!(
                latch.reset(),
                Err(Error::InvalidState { waiting: 1 })
            ));
            assert!(matches!(
                latch.reset_to(3),
                Err(Error::InvalidState { waiting: 1 })
            ));
            assert_eq!(latch.count(), 2);

            latch.count_down();
            latch.count_down();
        });
        assert_eq!(latch.waiters(), 0);
        latch.reset().unwrap();
        assert_eq!(latch.count(), 2);
    }

    #[test]
    fn last_count_down_and_wait_does_not_block() {
        let latch = Latch::new(1);
        latch.count_down_and_wait();
        assert_eq!(latch.count(), 0);
        assert_eq!(latch.waiters(), 0);
    }

    #[test]
    fn count_down_and_wait_blocks_until_zero() {
        let latch = Latch::new(2);
        let done = AtomicBool::new(false);
        thread::scope(|s| {
            s.spawn(|| {
                latch.count_down_and_wait();
                done.store(true, Ordering::SeqCst);
            });
            wait_until(|| latch.waiters() == 1);
            assert_eq!(latch.count(), 1);
            assert!(!done.load(Ordering::SeqCst));

            latch.count_down();
        });
        assert!(done.load(Ordering::SeqCst));
    }

    #[test]
    fn debug_reports_state() {
        let latch = Latch::new(3);
        latch.count_down();
        let repr = format!("{latch:?}");
        assert!(repr.contains("counter: 2"));
        assert!(repr.contains("initial: 3"));
        assert!(repr.contains("waiting: 0"));
    }
}
