#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The parallel search coordinator.
//!
//! Branches of a DPLL search are independent, so workers can explore them
//! concurrently. Each worker pulls a formula instance from a shared FIFO
//! queue and runs the sequential engine on it; every time the engine
//! branches, the unexplored sibling goes to the shared queue instead of the
//! local stack, where an idle peer can claim it.
//!
//! The first worker to find a model installs it in a single-publication
//! slot, raises the shutdown flag, and wakes everyone. Exhaustion is
//! detected by the worker that returns to an empty queue while every other
//! worker is already waiting on it: the idle count is read under the queue
//! lock, so a still-busy peer cannot slip a new item in between the read
//! and the shutdown.
//!
//! Shutdown is strictly cooperative. Workers observe the flag when they
//! wake at the queue and, to keep latency down on large sub-problems, at
//! the top of every engine iteration; no thread is ever killed.

use crate::sat::cnf::Cnf;
use crate::sat::dpll::{Branching, Dpll, Search, SearchStats};
use crate::sat::model::Model;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use tracing::{debug, trace};

/// State shared by the coordinator and its workers.
struct Pool {
    /// Instances awaiting exploration, in arrival order.
    queue: Mutex<VecDeque<Cnf>>,
    /// Signalled when the queue gains an item or the pool shuts down.
    ready: Condvar,
    /// Workers currently waiting on the queue.
    idle: AtomicU64,
    /// Cooperative shutdown flag.
    cancel: AtomicBool,
    /// First satisfying model published by any worker.
    winner: Mutex<Option<Model>>,
    /// Counters merged from finished engine runs.
    stats: Mutex<SearchStats>,
    /// Pool size; `idle == workers` with an empty queue means exhaustion.
    workers: u64,
}

impl Pool {
    fn new(seed: Cnf, workers: u64) -> Self {
        Self {
            queue: Mutex::new(VecDeque::from([seed])),
            ready: Condvar::new(),
            idle: AtomicU64::new(workers),
            cancel: AtomicBool::new(false),
            winner: Mutex::new(None),
            stats: Mutex::new(SearchStats::default()),
            workers,
        }
    }

    /// Installs `model` as the pool result unless a peer won the race, then
    /// begins shutdown. Exactly one model ever reaches the caller.
    fn publish(&self, model: Model) {
        {
            let mut winner = self.winner.lock().unwrap();
            if winner.is_none() {
                *winner = Some(model);
            }
        }
        self.shut_down();
    }

    /// Raises the shutdown flag and wakes every worker. The queue lock is
    /// held across the store and the broadcast so a worker between its
    /// empty-check and its wait cannot miss the wakeup.
    fn shut_down(&self) {
        let _queue = self.queue.lock().unwrap();
        self.cancel.store(true, Ordering::Release);
        self.ready.notify_all();
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    fn merge_stats(&self, stats: SearchStats) {
        self.stats.lock().unwrap().merge(stats);
    }
}

/// Branch strategy that offers every sibling to the shared queue.
struct QueueBranching {
    pool: Arc<Pool>,
}

impl Branching for QueueBranching {
    fn offer(&mut self, _stack: &mut Vec<Cnf>, sibling: Cnf) {
        let mut queue = self.pool.queue.lock().unwrap();
        queue.push_back(sibling);
        self.pool.ready.notify_one();
    }

    fn interrupted(&self) -> bool {
        self.pool.cancelled()
    }
}

/// One worker: claim an instance, search it, hand siblings to peers,
/// repeat until a model is published or the search space runs dry.
fn worker(pool: &Arc<Pool>) {
    loop {
        let item = {
            let mut queue = pool.queue.lock().unwrap();
            while queue.is_empty() && !pool.cancelled() {
                queue = pool.ready.wait(queue).unwrap();
            }
            if pool.cancelled() {
                return;
            }
            pool.idle.fetch_sub(1, Ordering::AcqRel);
            queue.pop_front().expect("queue is non-empty past the wait")
        };

        let mut engine = Dpll::with_branching(
            item,
            QueueBranching {
                pool: Arc::clone(pool),
            },
        );
        let outcome = engine.run();
        pool.merge_stats(engine.stats());

        match outcome {
            Search::Satisfiable(model) => {
                trace!("worker found a satisfying assignment");
                pool.publish(model);
                return;
            }
            Search::Interrupted => return,
            Search::Exhausted => {
                pool.idle.fetch_add(1, Ordering::AcqRel);
                let queue = pool.queue.lock().unwrap();
                if pool.idle.load(Ordering::Acquire) == pool.workers && queue.is_empty() {
                    // Nobody holds work and nothing is queued: the whole
                    // search space is exhausted. The result slot is left
                    // alone; an empty slot reads as unsatisfiable.
                    trace!("search space exhausted, shutting down the pool");
                    pool.cancel.store(true, Ordering::Release);
                    pool.ready.notify_all();
                    return;
                }
            }
        }
    }
}

/// One worker per logical processor.
#[must_use]
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}

/// Decides `cnf` with one worker per logical processor.
#[must_use]
pub fn solve(cnf: Cnf) -> Option<Model> {
    solve_with(cnf, default_workers())
}

/// Decides `cnf` with an explicit worker count (clamped to at least one).
#[must_use]
pub fn solve_with(cnf: Cnf, workers: usize) -> Option<Model> {
    solve_with_stats(cnf, workers).0
}

/// Like [`solve_with`], also returning the merged search counters.
///
/// # Panics
///
/// Panics if a worker thread cannot be spawned.
#[must_use]
pub fn solve_with_stats(cnf: Cnf, workers: usize) -> (Option<Model>, SearchStats) {
    let workers = workers.max(1);
    let pool = Arc::new(Pool::new(cnf, workers as u64));
    debug!(workers, "starting parallel search");

    let handles: Vec<_> = (0..workers)
        .map(|id| {
            let pool = Arc::clone(&pool);
            thread::Builder::new()
                .name(format!("parsat-worker-{id}"))
                .spawn(move || worker(&pool))
                .expect("failed to spawn worker thread")
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    let model = pool.winner.lock().unwrap().take();
    let stats = *pool.stats.lock().unwrap();
    debug!(
        satisfiable = model.is_some(),
        decisions = stats.decisions,
        "parallel search finished"
    );
    (model, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pigeonhole(pigeons: i32, holes: i32) -> Cnf {
        let var = |pigeon: i32, hole: i32| (pigeon - 1) * holes + hole;
        let mut clauses = Vec::new();
        for pigeon in 1..=pigeons {
            clauses.push((1..=holes).map(|hole| var(pigeon, hole)).collect());
        }
        for hole in 1..=holes {
            for first in 1..=pigeons {
                for second in (first + 1)..=pigeons {
                    clauses.push(vec![-var(first, hole), -var(second, hole)]);
                }
            }
        }
        Cnf::new(clauses)
    }

    #[test]
    fn test_satisfiable_instance() {
        let cnf = Cnf::new(vec![vec![-1, 2, 3], vec![2, -3]]);
        let model = solve_with(cnf.clone(), 4).expect("satisfiable");
        assert!(cnf.verify(&model));
    }

    #[test]
    fn test_unsatisfiable_instance() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        assert_eq!(solve_with(cnf, 4), None);
    }

    #[test]
    fn test_pigeonhole_is_unsatisfiable() {
        assert_eq!(solve_with(pigeonhole(3, 2), 4), None);
    }

    #[test]
    fn test_single_worker_pool() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, -2]]);
        let model = solve_with(cnf.clone(), 1).expect("satisfiable");
        assert!(cnf.verify(&model));
    }

    #[test]
    fn test_more_workers_than_work() {
        // Seven workers never receive an item and must still shut down.
        let model = solve_with(Cnf::new(vec![vec![1]]), 8).expect("satisfiable");
        assert_eq!(model.value("1"), Some(true));
    }

    #[test]
    fn test_agreement_with_sequential_engine() {
        let instances = vec![
            vec![vec![1]],
            vec![vec![1], vec![-1]],
            vec![vec![-1, 2, 3], vec![2, -3]],
            vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]],
            vec![vec![1, 2, 3], vec![-1, -2], vec![-2, -3], vec![-1, -3]],
        ];
        for clauses in instances {
            let cnf = Cnf::new(clauses);
            let sequential = Dpll::new(cnf.clone()).solve();
            let parallel = solve_with(cnf.clone(), 4);
            assert_eq!(sequential.is_some(), parallel.is_some());
            if let Some(model) = parallel {
                assert!(cnf.verify(&model));
            }
        }
    }

    #[test]
    fn test_stats_are_merged_across_workers() {
        let (model, stats) = solve_with_stats(pigeonhole(3, 2), 2);
        assert_eq!(model, None);
        assert!(stats.decisions + stats.propagations + stats.eliminations > 0);
    }
}
