//! Synchronization primitives.
//!
//!
//! Provides a reusable [`Barrier`] and a resettable count-down [`Latch`]. Both are plain
//! monitors: one mutex guarding a handful of counters plus one condition variable used to
//! park and wake threads (see [`Monitor`]). Neither type can be cloned; share them by
//! reference or through an `Arc`.
//!
//! With the `stub` feature enabled both types are replaced by no-op versions with the same
//! API, which never block.
pub mod monitor;

cfg_if::cfg_if! {
    if #[cfg(feature = "stub")] {
        mod stub;
        pub use stub::{Barrier, Latch};
    } else {
        mod barrier;
        mod latch;
        pub use barrier::Barrier;
        pub use latch::Latch;
    }
}

pub use monitor::*;

/// Poll `condition` until it holds. Used to observe threads parked on a primitive.
#[cfg(all(test, not(feature = "stub")))]
pub(crate) fn wait_until(mut condition: impl FnMut() -> bool) {
    while !condition() {
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}
