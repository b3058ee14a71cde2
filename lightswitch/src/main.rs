use std::{sync::Arc, thread, time::Duration};

use clap::Parser;
use lightswitch::{options::Options, Barrier, Latch};
use rand::Rng;

fn worker(id: usize, options: &Options, barrier: &Barrier, finished: &Latch, shutdown: &Latch) {
    let mut rng = rand::rng();
    for phase in 0..options.phases {
        let work = rng.random_range(0..=options.max_jitter_ms);
        log::debug!("worker {id}: phase {phase}, working for {work}ms");
        thread::sleep(Duration::from_millis(work));

        if barrier.wait() {
            log::info!("phase {phase} completed by all {} workers", barrier.capacity());
        }
    }

    finished.count_down();
    // Park until every worker and the coordinator have acknowledged the shutdown.
    shutdown.count_down_and_wait();
    log::debug!("worker {id}: exiting");
}

fn main() {
    env_logger::init();
    let options = Arc::new(Options::parse());

    if options.workers == 0 {
        eprintln!("--workers must be greater than zero");
        std::process::exit(2);
    }

    let barrier = Arc::new(Barrier::new(options.workers));
    let finished = Arc::new(Latch::new(options.workers));
    // One extra party for the coordinator.
    let shutdown = Arc::new(Latch::new(options.workers + 1));

    let handles = (0..options.workers)
        .map(|id| {
            let options = options.clone();
            let barrier = barrier.clone();
            let finished = finished.clone();
            let shutdown = shutdown.clone();
            thread::spawn(move || worker(id, &options, &barrier, &finished, &shutdown))
        })
        .collect::<Vec<_>>();

    finished.wait();
    log::info!("all {} workers finished {} phases", options.workers, options.phases);

    // Nobody waits on `finished` anymore, so it can be re-armed for another run.
    if let Err(err) = finished.reset() {
        log::warn!("could not re-arm latch: {err}");
    }

    shutdown.count_down_and_wait();
    for handle in handles {
        if handle.join().is_err() {
            log::error!("worker thread panicked");
        }
    }

    println!(
        "{} workers, {} phases, {} barrier generations, latch re-armed to {}",
        options.workers,
        options.phases,
        barrier.generation(),
        finished.count()
    );
}
