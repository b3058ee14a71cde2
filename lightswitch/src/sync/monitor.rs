use std::ops::{Deref, DerefMut};

use parking_lot::{Condvar, Mutex, MutexGuard};

/// A lock and condition variable pair implemented using the primitives
/// available from `parking_lot`.  Currently we use a `Mutex` and `Condvar`.
/// <p>
/// Both primitives of this crate are built on top of it:
/// <ul>
/// <li>The mutex guards the counters of the primitive and is held only for the
///     short critical section that reads or mutates them and decides whether
///     to notify.</li>
/// <li>The condition variable is used to park threads until the guarded state
///     changes. Waking is always a broadcast; woken threads must re-check their
///     predicate since a wakeup may be spurious or meant for someone else.</li>
/// <li>Unlike a plain `Mutex`, locking returns a [`MonitorGuard`] which can
///     wait and broadcast on the same monitor without access to the monitor itself.</li>
/// </ul>
pub struct Monitor<T> {
    mutex: Mutex<T>,
    cvar: Condvar,
}

impl<T> Monitor<T> {
    pub const fn new(value: T) -> Self {
        Self {
            mutex: Mutex::new(value),
            cvar: Condvar::new(),
        }
    }

    pub fn lock(&self) -> MonitorGuard<'_, T> {
        MonitorGuard {
            monitor: self,
            guard: self.mutex.lock(),
        }
    }

    /// Copy the protected value out of the monitor.
    ///
    /// The value may be stale as soon as the lock is released.
    pub fn get(&self) -> T
    where
        T: Copy,
    {
        *self.mutex.lock()
    }
}

pub struct MonitorGuard<'a, T> {
    monitor: &'a Monitor<T>,
    guard: MutexGuard<'a, T>,
}

impl<T> Deref for MonitorGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T> DerefMut for MonitorGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

impl<T> MonitorGuard<'_, T> {
    /// Release the lock and block until notified. The lock is held again once
    /// this returns. Wakeups may be spurious.
    pub fn wait(&mut self) {
        self.monitor.cvar.wait(&mut self.guard);
    }

    /// Block for as long as `condition` returns `true`.
    ///
    /// The condition is evaluated with the lock held, once before the first
    /// wait and again after every wakeup.
    pub fn wait_while<F>(&mut self, mut condition: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        while condition(&mut self.guard) {
            self.wait();
        }
    }

    /// Wake every thread parked on this monitor.
    pub fn notify_all(&self) {
        self.monitor.cvar.notify_all();
    }
}
