//! Thread coordination building blocks.
//!
//! Two independent primitives for phased or fan-out/fan-in pipelines built on native
//! threads:
//!
//! - [`Barrier`]: a fixed number of threads wait for each other, then proceed together.
//!   The barrier re-arms itself after every round.
//! - [`Latch`]: threads wait for a counter to reach zero while other threads count it down.
//!   The counter can be reset while nobody is waiting.
//!
//! There are no timed waits and no fairness guarantees among waiters.
pub mod error;
pub mod options;
pub mod sync;

pub use error::{Error, Result};
pub use sync::{Barrier, Latch};
