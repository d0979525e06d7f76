//! Shell sizes: how many vertices sit at exactly `l` hops from a source.
//!
//! Every vertex's sequence is independent of the others, so [`compute_shells`] can spread the
//! sources over worker threads. Each worker keeps its own results, which are put back into vertex
//! order once all of them have joined.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Instant,
};

use crate::{error::Result, graph::Topology};

pub const MIN_NUM_THREADS: usize = 1;
pub const MAX_NUM_THREADS: usize = 128;

/// Returns the shell sizes of `source` for the distances `0..bound`, using only neighbourhood
/// queries.
///
/// The shell at distance `l > 0` is the neighbourhood of radius `l` minus the neighbourhood of
/// radius `l - 1`; the shell at distance 0 is the neighbourhood of radius 0, the source itself.
pub fn shell_sizes<G: Topology + ?Sized>(graph: &G, source: usize, bound: usize) -> Result<Vec<usize>> {
    let mut shells = Vec::with_capacity(bound);
    let mut previous = 0;

    for l in 0..bound {
        let size = graph.neighborhood_size(source, l)?;
        shells.push(size - previous);
        previous = size;
    }

    Ok(shells)
}

/// The worker task: claims the next unprocessed vertex until none are left, returning the
/// sequences it computed tagged with their source.
fn shells_task<G: Topology + ?Sized>(
    counter: &AtomicUsize,
    graph: &G,
    bound: usize,
) -> Result<Vec<(usize, Vec<usize>)>> {
    let start = Instant::now();
    let num_nodes = graph.vertex_count();
    let mut computed = Vec::new();

    loop {
        let index = counter.fetch_add(1, Ordering::Relaxed);
        if index >= num_nodes {
            break;
        }
        if index % 1000 == 0 {
            tracing::debug!(node = index, elapsed = ?start.elapsed(), "computing shells");
        }

        computed.push((index, graph.shell_sizes(index, bound)?));
    }

    Ok(computed)
}

/// Computes the shell sizes of every vertex for the distances `0..bound`, indexed by vertex.
///
/// `num_threads` is clamped to `MIN_NUM_THREADS..=MAX_NUM_THREADS`; with a single thread the
/// vertices are processed in order on the calling thread.
pub fn compute_shells<G: Topology + ?Sized>(
    graph: &G,
    bound: usize,
    num_threads: usize,
) -> Result<Vec<Vec<usize>>> {
    let num_threads = num_threads.clamp(MIN_NUM_THREADS, MAX_NUM_THREADS);
    let num_nodes = graph.vertex_count();

    if num_threads == 1 || num_nodes < 2 {
        return (0..num_nodes)
            .map(|source| graph.shell_sizes(source, bound))
            .collect();
    }

    let start = Instant::now();
    let counter = AtomicUsize::new(0);

    let results: Vec<Result<Vec<(usize, Vec<usize>)>>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads.min(num_nodes))
            .map(|_| scope.spawn(|| shells_task(&counter, graph, bound)))
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut shells = vec![Vec::new(); num_nodes];
    for result in results {
        for (index, sequence) in result? {
            shells[index] = sequence;
        }
    }

    tracing::debug!(num_threads, num_nodes, elapsed = ?start.elapsed(), "shells computed");

    Ok(shells)
}
