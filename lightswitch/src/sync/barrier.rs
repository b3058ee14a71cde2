use std::fmt;

use super::monitor::Monitor;

#[derive(Debug, Clone, Copy)]
struct BarrierState {
    /// Arrivals still needed before the current generation is released.
    /// Always in `[1, capacity]`.
    remaining: usize,
    generation: u64,
}

/// A reusable barrier.
///
/// A barrier makes a fixed set of threads wait for each other to reach a common
/// point. Once the last thread of the set arrives, every waiting thread is released
/// and the barrier is immediately ready for the next round.
///
/// Each round is a *generation*. A thread that goes to sleep remembers the generation
/// it arrived in and only leaves once that generation has been released, so a notify
/// issued by a later round can never release it early.
///
/// The barrier is shared by reference (e.g. `Arc<Barrier>` or scoped threads); it is
/// intentionally neither `Clone` nor `Copy`.
pub struct Barrier {
    capacity: usize,
    monitor: Monitor<BarrierState>,
}

impl Barrier {
    /// Create a barrier for `capacity` threads.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "barrier capacity must be greater than zero");
        Self {
            capacity,
            monitor: Monitor::new(BarrierState {
                remaining: capacity,
                generation: 0,
            }),
        }
    }

    /// Number of threads the barrier was built for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of threads that still have to call [`wait`](Self::wait) to release
    /// the current generation.
    ///
    /// Advisory only, other threads may arrive right after this returns.
    pub fn count(&self) -> usize {
        self.monitor.get().remaining
    }

    /// Identifier of the current round. Incremented every time the barrier releases.
    pub fn generation(&self) -> u64 {
        self.monitor.get().generation
    }

    /// Wait for all threads to reach the barrier.
    ///
    /// If `capacity - 1` threads are already waiting, all of them are woken up and
    /// the calling thread returns without blocking. Otherwise the calling thread
    /// blocks until the remaining threads arrive. In both cases the barrier is
    /// restored to its full count for the next round.
    ///
    /// Returns `true` in exactly one thread of each round (the last to arrive) and
    /// `false` in all the others.
    pub fn wait(&self) -> bool {
        let mut state = self.monitor.lock();
        if state.remaining == 1 {
            state.remaining = self.capacity;
            state.generation = state.generation.wrapping_add(1);
            log::trace!(
                "barrier {:p}: generation {} released ({} threads)",
                self,
                state.generation,
                self.capacity
            );
            state.notify_all();
            return true;
        }

        state.remaining -= 1;
        let generation = state.generation;
        log::trace!(
            "barrier {:p}: waiting in generation {}, {} remaining",
            self,
            generation,
            state.remaining
        );
        state.wait_while(|state| state.generation == generation);
        false
    }

    /// Return `true` if a call to [`wait`](Self::wait) right now would block.
    ///
    /// Advisory only, see [`count`](Self::count).
    pub fn would_block(&self) -> bool {
        self.count() != 1
    }
}

impl fmt::Debug for Barrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.monitor.get();
        f.debug_struct("Barrier")
            .field("capacity", &self.capacity)
            .field("remaining", &state.remaining)
            .field("generation", &state.generation)
            .finish()
    }
}
