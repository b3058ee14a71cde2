//! No-op twins of [`Barrier`] and [`Latch`], selected by the `stub` feature.
//!
//! Every operation returns immediately. Use this to compile a program with all of its
//! synchronization points disabled, e.g. when it is known to run single threaded.
use crate::error::Result;

#[derive(Debug)]
pub struct Barrier {
    capacity: usize,
}

impl Barrier {
    /// # Panics
    ///
    /// Panics if `capacity` is zero, like the real barrier.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "barrier capacity must be greater than zero");
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Always the full capacity: no arrival is ever recorded.
    pub fn count(&self) -> usize {
        self.capacity
    }

    pub fn generation(&self) -> u64 {
        0
    }

    /// Returns `false` without blocking.
    pub fn wait(&self) -> bool {
        false
    }

    pub fn would_block(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct Latch {
    initial: usize,
}

impl Latch {
    pub fn new(count: usize) -> Self {
        Self { initial: count }
    }

    pub fn initial(&self) -> usize {
        self.initial
    }

    /// Always zero: the stub latch is permanently open.
    pub fn count(&self) -> usize {
        0
    }

    pub fn waiters(&self) -> usize {
        0
    }

    pub fn count_down(&self) {}

    pub fn count_down_and_wait(&self) {}

    pub fn reset(&self) -> Result<()> {
        Ok(())
    }

    pub fn reset_to(&self, _value: usize) -> Result<()> {
        Ok(())
    }

    pub fn wait(&self) {}

    pub fn would_block(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_barrier_never_blocks() {
        let barrier = Barrier::new(4);
        assert!(!barrier.would_block());
        assert!(!barrier.wait());
        assert_eq!(barrier.count(), 4);
    }

    #[test]
    fn stub_latch_is_open() {
        let latch = Latch::new(3);
        latch.wait();
        latch.count_down_and_wait();
        assert_eq!(latch.count(), 0);
        assert!(latch.reset_to(7).is_ok());
        assert_eq!(latch.initial(), 3);
    }
}
