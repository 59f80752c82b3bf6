//! Lifecycle of the background AI search
//!
//! The supervisor owns at most one [`SearchTask`] and moves through
//! `Idle -> Searching -> Ready -> Idle`. A search can be cancelled from
//! `Searching` at any time, which terminates the worker and drops its result
//! channel unread.
//!
//! Workers are abstracted by [`WorkerLauncher`] / [`SearchWorker`]; the real
//! implementation runs the search in a child process ([`process`]).

pub mod process;
pub mod protocol;

pub use process::{serve_search_request, ProcessLauncher, ProcessWorker};
pub use protocol::{SearchReply, SearchRequest};

use std::time::{Duration, Instant};

use log::{info, warn};
use rand::Rng;

use crate::error::GameResult;
use crate::rules::{GameState, Move};
use crate::search::find_random_move;

/// A running search worker
pub trait SearchWorker {
    /// Non-blocking liveness check
    fn is_alive(&mut self) -> bool;

    /// Read the one-shot reply. Only meaningful once `is_alive` returned false;
    /// `None` when the worker wrote nothing usable.
    fn take_reply(&mut self) -> Option<SearchReply>;

    /// Stop the worker immediately; a reply not yet read is discarded
    fn terminate(&mut self);
}

/// Starts workers from snapshots
pub trait WorkerLauncher {
    type Worker: SearchWorker;

    fn launch(&mut self, request: &SearchRequest) -> GameResult<Self::Worker>;
}

/// A live search: the worker plus the legal-move snapshot it was given
pub struct SearchTask<W> {
    generation: u64,
    valid_moves: Vec<Move>,
    worker: W,
    started: Instant,
}

/// Externally visible supervisor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Ready,
}

enum Status<W> {
    Idle,
    Searching(SearchTask<W>),
    Ready(Move),
}

pub struct SearchSupervisor<L: WorkerLauncher> {
    launcher: L,
    status: Status<L::Worker>,
    generation: u64,
    depth: u8,
}

impl<L: WorkerLauncher> SearchSupervisor<L> {
    pub fn new(launcher: L, depth: u8) -> Self {
        Self {
            launcher,
            status: Status::Idle,
            generation: 0,
            depth,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        match self.status {
            Status::Idle => SearchPhase::Idle,
            Status::Searching(_) => SearchPhase::Searching,
            Status::Ready(_) => SearchPhase::Ready,
        }
    }

    #[inline]
    pub fn is_searching(&self) -> bool {
        matches!(self.status, Status::Searching(_))
    }

    /// Time spent in the current search
    pub fn elapsed(&self) -> Option<Duration> {
        match &self.status {
            Status::Searching(task) => Some(task.started.elapsed()),
            _ => None,
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// `Idle -> Searching`. No-op unless idle.
    ///
    /// If no worker can be started the random fallback is resolved at once
    /// and the supervisor goes straight to `Ready`.
    pub fn start<R: Rng + ?Sized>(&mut self, state: &GameState, valid_moves: &[Move], rng: &mut R) {
        if !matches!(self.status, Status::Idle) {
            return;
        }

        self.generation += 1;
        let request = SearchRequest {
            generation: self.generation,
            fen: state.fen(),
            valid_moves: valid_moves.iter().map(Move::to_uci).collect(),
            depth: self.depth,
        };

        match self.launcher.launch(&request) {
            Ok(worker) => {
                self.status = Status::Searching(SearchTask {
                    generation: self.generation,
                    valid_moves: valid_moves.to_vec(),
                    worker,
                    started: Instant::now(),
                });
            }
            Err(e) => {
                warn!("{}; playing a random move instead", e);
                self.status = match find_random_move(valid_moves, rng) {
                    Some(mv) => Status::Ready(mv),
                    None => Status::Idle,
                };
            }
        }
    }

    /// Check the worker without blocking; `Searching -> Ready` once it has
    /// exited. Returns the phase after polling.
    pub fn poll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SearchPhase {
        let finished = match &mut self.status {
            Status::Searching(task) => !task.worker.is_alive(),
            _ => false,
        };

        if finished {
            let status = std::mem::replace(&mut self.status, Status::Idle);
            if let Status::Searching(mut task) = status {
                let reply = task.worker.take_reply();
                let elapsed = task.started.elapsed();
                match resolve(&task, reply, rng) {
                    Some(mv) => {
                        info!("search resolved {} after {:.2}s", mv, elapsed.as_secs_f32());
                        self.status = Status::Ready(mv);
                    }
                    None => warn!("search finished with no legal move available"),
                }
            }
        }

        self.phase()
    }

    /// `Ready -> Idle`, handing out the resolved move
    pub fn take_move(&mut self) -> Option<Move> {
        match std::mem::replace(&mut self.status, Status::Idle) {
            Status::Ready(mv) => Some(mv),
            other => {
                self.status = other;
                None
            }
        }
    }

    /// `Searching -> Cancelled -> Idle`. Also drops a resolved but unapplied
    /// move. Returns true if a worker was terminated.
    pub fn cancel(&mut self) -> bool {
        match std::mem::replace(&mut self.status, Status::Idle) {
            Status::Searching(mut task) => {
                task.worker.terminate();
                info!("search generation {} cancelled", task.generation);
                true
            }
            _ => false,
        }
    }
}

/// Pick the outcome of a finished task: the worker's move if it names one of
/// the snapshot moves, otherwise a random snapshot move.
fn resolve<W, R: Rng + ?Sized>(
    task: &SearchTask<W>,
    reply: Option<SearchReply>,
    rng: &mut R,
) -> Option<Move> {
    let chosen = match reply {
        Some(reply) if reply.generation != task.generation => {
            warn!(
                "discarding reply for generation {} (expected {})",
                reply.generation, task.generation
            );
            None
        }
        Some(SearchReply {
            best_move: Some(uci),
            ..
        }) => {
            let found = Move::find_uci(&task.valid_moves, &uci).copied();
            if found.is_none() {
                warn!("worker proposed {} which is not in its snapshot", uci);
            }
            found
        }
        _ => None,
    };

    chosen.or_else(|| {
        warn!("search produced no move; falling back to a random move");
        find_random_move(&task.valid_moves, rng)
    })
}
