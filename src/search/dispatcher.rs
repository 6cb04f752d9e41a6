//! Parallel root fan-out over a fixed worker pool.
//!
//! The coordinator expands every root move, sends one task per child position
//! over the task channel, and then blocks until exactly as many results have
//! come back over the result channel. Workers own nothing but their channel
//! ends and the pool's stop flag; every `Position` crossing a channel is an
//! independent copy.
//!
//! There is no per-task timeout. One slow search stalls the whole barrier
//! until it finishes or the pool is torn down. Teardown raises the stop flag
//! (aborting searches mid-task), disconnects the shutdown channel, and joins
//! the workers. Once the last worker exits its result sender is dropped, so a
//! coordinator blocked in `evaluate` observes a disconnect instead of waiting
//! forever.

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{select, unbounded, Receiver, Sender};
use tracing::{debug, warn};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::position::position::{Move, Position};
use crate::search::negamax::{search_with_stop, SearchResult};
use crate::utils::algebraic::format_move;

#[derive(Debug, Clone, Copy)]
struct SearchTask {
    root_move: Move,
    position: Position,
}

/// Result of searching the child reached by one root move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootOutcome {
    pub root_move: Move,
    /// Search of the child, scored from the opponent's perspective.
    pub result: SearchResult,
}

/// Everything gathered by one synchronous fan-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanIn {
    /// Outcomes with a reply, in move-generation order.
    pub usable: Vec<RootOutcome>,
    /// Root moves whose child search found no reply.
    pub dead_ends: Vec<Move>,
    pub received: usize,
}

impl FanIn {
    #[inline]
    pub fn has_solution(&self) -> bool {
        !self.usable.is_empty()
    }
}

#[derive(Debug)]
struct PoolControl {
    stop: AtomicBool,
    shutdown_tx: Mutex<Option<Sender<()>>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl PoolControl {
    fn shutdown(&self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Ok(mut guard) = self.shutdown_tx.lock() {
            guard.take();
        }

        let handles = match self.handles.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        };
        if handles.is_empty() {
            return;
        }
        let joined = handles.len();
        for handle in handles {
            if handle.join().is_err() {
                warn!("search worker panicked before teardown");
            }
        }
        debug!(workers = joined, "search pool torn down");
    }

    #[inline]
    fn is_shut_down(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

/// Cloneable teardown trigger, usable from any thread.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    control: Arc<PoolControl>,
}

impl ShutdownHandle {
    /// Stop every worker and wait for them to exit. Repeat calls are no-ops.
    pub fn shutdown(&self) {
        self.control.shutdown();
    }

    #[inline]
    pub fn is_shut_down(&self) -> bool {
        self.control.is_shut_down()
    }
}

/// Fixed pool of search workers fed by a shared task channel.
#[derive(Debug)]
pub struct SearchPool {
    task_tx: Sender<SearchTask>,
    result_rx: Receiver<RootOutcome>,
    control: Arc<PoolControl>,
    workers: usize,
    depth: u8,
}

impl SearchPool {
    /// Spawn `workers` threads that search each task to `depth` plies.
    ///
    /// Both values are raised to at least one.
    pub fn start(workers: usize, depth: u8) -> ChessResult<Self> {
        let workers = workers.max(1);
        let depth = depth.max(1);

        let (task_tx, task_rx) = unbounded::<SearchTask>();
        let (result_tx, result_rx) = unbounded::<RootOutcome>();
        let (shutdown_tx, shutdown_rx) = unbounded::<()>();

        let control = Arc::new(PoolControl {
            stop: AtomicBool::new(false),
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
            handles: Mutex::new(Vec::with_capacity(workers)),
        });

        for worker_id in 0..workers {
            let tasks = task_rx.clone();
            let results = result_tx.clone();
            let shutdown = shutdown_rx.clone();
            let worker_control = Arc::clone(&control);

            let spawned = thread::Builder::new()
                .name(format!("fanout-worker-{worker_id}"))
                .spawn(move || run_worker(worker_id, depth, tasks, results, shutdown, worker_control));

            match spawned {
                Ok(handle) => {
                    if let Ok(mut guard) = control.handles.lock() {
                        guard.push(handle);
                    }
                }
                Err(err) => {
                    control.shutdown();
                    return Err(ChessErrors::WorkerSpawn(err.to_string()));
                }
            }
        }

        debug!(workers, depth, "search pool started");
        Ok(Self {
            task_tx,
            result_rx,
            control,
            workers,
            depth,
        })
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            control: Arc::clone(&self.control),
        }
    }

    pub fn shutdown(&self) {
        self.control.shutdown();
    }

    /// Search every root move of `position` in parallel and wait for all of
    /// the results.
    pub fn evaluate(&self, position: &Position) -> ChessResult<FanIn> {
        if self.control.is_shut_down() {
            return Err(ChessErrors::WorkerPoolClosed);
        }

        let moves = position.valid_moves();
        let order: HashMap<Move, usize> = moves.iter().enumerate().map(|(i, mv)| (*mv, i)).collect();

        for &root_move in &moves {
            let task = SearchTask {
                root_move,
                position: position.make_move(root_move),
            };
            self.task_tx
                .send(task)
                .map_err(|_| ChessErrors::WorkerPoolClosed)?;
        }

        let mut slots: Vec<Option<SearchResult>> = vec![None; moves.len()];
        let mut received = 0usize;
        while received < moves.len() {
            let outcome = self
                .result_rx
                .recv()
                .map_err(|_| ChessErrors::WorkerPoolClosed)?;
            received += 1;

            match order.get(&outcome.root_move) {
                Some(&index) => slots[index] = Some(outcome.result),
                None => warn!(
                    root_move = %format_move(outcome.root_move, false),
                    "discarding result for a move that was not dispatched"
                ),
            }
        }

        let mut fan_in = FanIn {
            received,
            ..FanIn::default()
        };
        for (root_move, slot) in moves.into_iter().zip(slots) {
            match slot {
                Some(result) if result.best_move.is_some() => {
                    fan_in.usable.push(RootOutcome { root_move, result });
                }
                _ => {
                    warn!(
                        root_move = %format_move(root_move, false),
                        "no reply found after root move; excluding it"
                    );
                    fan_in.dead_ends.push(root_move);
                }
            }
        }

        debug!(
            received = fan_in.received,
            usable = fan_in.usable.len(),
            dead_ends = fan_in.dead_ends.len(),
            "fan-in complete"
        );
        Ok(fan_in)
    }
}

impl Drop for SearchPool {
    fn drop(&mut self) {
        self.control.shutdown();
    }
}

fn run_worker(
    worker_id: usize,
    depth: u8,
    tasks: Receiver<SearchTask>,
    results: Sender<RootOutcome>,
    shutdown: Receiver<()>,
    control: Arc<PoolControl>,
) {
    let mut searched = 0u64;
    loop {
        if control.is_shut_down() {
            break;
        }
        select! {
            recv(tasks) -> task => {
                let Ok(task) = task else { break };
                let Some(result) = search_with_stop(&task.position, depth, &control.stop) else {
                    break;
                };
                searched += 1;
                let outcome = RootOutcome {
                    root_move: task.root_move,
                    result,
                };
                if results.send(outcome).is_err() {
                    break;
                }
            }
            recv(shutdown) -> _ => break,
        }
    }
    debug!(worker_id, searched, "search worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::negamax::search;
    use crate::utils::algebraic::parse_move_text;
    use std::time::Duration;

    #[test]
    fn fan_in_matches_sequential_search_in_generation_order() {
        let pool = SearchPool::start(3, 2).expect("pool should start");
        let start = Position::initial();
        let fan_in = pool.evaluate(&start).expect("fan-in should complete");

        let moves = start.valid_moves();
        assert_eq!(fan_in.received, moves.len());
        assert!(fan_in.dead_ends.is_empty());
        assert_eq!(fan_in.usable.len(), moves.len());
        for (outcome, mv) in fan_in.usable.iter().zip(&moves) {
            assert_eq!(outcome.root_move, *mv);
            assert_eq!(outcome.result, search(&start.make_move(*mv), 2));
        }
    }

    #[test]
    fn consecutive_evaluations_stay_separate() {
        let pool = SearchPool::start(2, 1).expect("pool should start");
        let start = Position::initial();
        let first = pool.evaluate(&start).expect("first fan-in");
        let reply = start.make_move(parse_move_text("e2e4").expect("e2e4"));
        let second = pool.evaluate(&reply).expect("second fan-in");
        assert_eq!(first.received, 20);
        assert_eq!(second.received, reply.valid_moves().len());
        assert_eq!(pool.evaluate(&start).expect("third fan-in"), first);
    }

    #[test]
    fn king_capture_branch_is_a_dead_end() {
        let pool = SearchPool::start(2, 2).expect("pool should start");
        let pos = Position::parse("4k3/4Q3/4K3/8/8/8/8/8 w - - 0 1").expect("notation should parse");
        let fan_in = pool.evaluate(&pos).expect("fan-in should complete");

        let capture = parse_move_text("e7e8").expect("e7e8");
        assert!(fan_in.dead_ends.contains(&capture));
        assert!(fan_in.usable.iter().all(|o| o.root_move != capture));
        assert_eq!(fan_in.usable.len() + fan_in.dead_ends.len(), fan_in.received);
    }

    #[test]
    fn position_without_moves_has_no_solution() {
        let pool = SearchPool::start(1, 2).expect("pool should start");
        let pos = Position::parse("4k3/8/8/8/8/8/8/8 w - - 0 1").expect("notation should parse");
        let fan_in = pool.evaluate(&pos).expect("fan-in should complete");
        assert!(!fan_in.has_solution());
        assert_eq!(fan_in.received, 0);
    }

    #[test]
    fn sizes_are_normalized() {
        let pool = SearchPool::start(0, 0).expect("pool should start");
        assert_eq!(pool.workers(), 1);
        assert_eq!(pool.depth(), 1);
    }

    #[test]
    fn teardown_unblocks_a_waiting_coordinator() {
        let pool = SearchPool::start(1, 8).expect("pool should start");
        let handle = pool.shutdown_handle();
        let killer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            handle.shutdown();
        });

        let outcome = pool.evaluate(&Position::initial());
        killer.join().expect("teardown thread should finish");
        assert_eq!(outcome, Err(ChessErrors::WorkerPoolClosed));
    }

    #[test]
    fn shutdown_is_idempotent_and_closes_the_pool() {
        let pool = SearchPool::start(2, 1).expect("pool should start");
        let handle = pool.shutdown_handle();
        handle.shutdown();
        handle.shutdown();
        pool.shutdown();
        assert!(handle.is_shut_down());
        assert_eq!(pool.evaluate(&Position::initial()), Err(ChessErrors::WorkerPoolClosed));
    }
}
