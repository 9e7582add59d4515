//! A small worker pool for the per-vertex searches behind betweenness and closeness.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use tracing::debug;

use crate::error::{Error, Result};

pub(crate) const MIN_NUM_THREADS: usize = 1;
pub(crate) const MAX_NUM_THREADS: usize = 128;

/// Runs `task` once for every vertex index in `0..num_nodes`, spread over `num_threads`
/// workers.
///
/// Each worker grabs the next unprocessed index from a shared counter and accumulates into
/// its own buffer of `width` values; the buffers are summed once every worker has finished.
/// With a single thread the work runs on the calling thread.
pub(crate) fn accumulate<F>(
    num_nodes: usize,
    width: usize,
    num_threads: usize,
    task: F,
) -> Result<Vec<f64>>
where
    F: Fn(usize, &mut [f64]) + Sync,
{
    let num_threads = num_threads.clamp(MIN_NUM_THREADS, MAX_NUM_THREADS);
    let counter = AtomicUsize::new(0);

    let worker = || {
        let mut buffer = vec![0.0; width];
        loop {
            let index = counter.fetch_add(1, Ordering::Relaxed);
            if index >= num_nodes {
                break;
            }

            task(index, &mut buffer);
        }

        buffer
    };

    if num_threads == 1 {
        return Ok(worker());
    }

    debug!(num_threads, num_nodes, "spawning centrality workers");

    thread::scope(|scope| -> Result<Vec<f64>> {
        let handles: Vec<_> = (0..num_threads).map(|_| scope.spawn(worker)).collect();

        let mut totals = vec![0.0; width];
        for handle in handles {
            let buffer = handle.join().map_err(|_| Error::WorkerPanicked)?;

            for (total, value) in totals.iter_mut().zip(buffer) {
                *total += value;
            }
        }

        Ok(totals)
    })
}
