use clap::Parser;

/// Runs a phased worker pipeline synchronized with a barrier and a latch.
#[derive(Parser, Debug)]
pub struct Options {
    /// Number of worker threads. Also the barrier capacity and the latch count.
    #[clap(long, default_value_t = 4)]
    pub workers: usize,

    /// Number of phases every worker goes through.
    #[clap(long, default_value_t = 3)]
    pub phases: usize,

    /// Upper bound of the simulated work done by a worker in one phase.
    #[clap(long, default_value_t = 10)]
    pub max_jitter_ms: u64,
}
