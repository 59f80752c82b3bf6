//! Move selection for the AI side
//!
//! Contains:
//! - Alpha-beta search used inside the worker process
//! - The uniform random fallback used by the supervisor

pub mod alphabeta;

pub use alphabeta::{SearchResult, Searcher};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::rules::{GameState, Move};

/// Best move among `valid_moves` of `state`, searched to `depth` plies.
///
/// Returns `None` only when `valid_moves` is empty.
pub fn find_best_move(state: &GameState, valid_moves: &[Move], depth: u8) -> Option<Move> {
    let roots: Vec<_> = valid_moves.iter().map(Move::raw).collect();
    let result = Searcher::new().search(state.board(), &roots, depth.max(1));
    log::debug!(
        "searched {} nodes at depth {}, score {}",
        result.nodes,
        depth,
        result.score
    );
    let best = result.best_move?;
    valid_moves.iter().find(|m| m.raw() == best).copied()
}

/// Uniformly chosen move; always succeeds when `valid_moves` is non-empty
pub fn find_random_move<R: Rng + ?Sized>(valid_moves: &[Move], rng: &mut R) -> Option<Move> {
    valid_moves.choose(rng).copied()
}
