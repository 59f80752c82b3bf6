//! Negamax search with alpha-beta pruning
//!
//! Fixed-depth search used by the worker process. Captures are searched
//! first, most valuable victim first; there is no transposition table and no
//! time control: the depth bounds the search.

use cozy_chess::{Board, Move};

use crate::eval::{evaluate, piece_value, DRAW_SCORE, MATE_SCORE};

/// Infinity score for alpha-beta bounds
const INF: i32 = MATE_SCORE + 1;

/// Result of a root search
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Score from the side to move's perspective
    pub score: i32,
    pub nodes: u64,
}

#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `root_moves` of `board` to `depth` plies.
    ///
    /// Only the supplied root moves are considered, so the caller decides
    /// which legal set the answer must come from.
    pub fn search(&mut self, board: &Board, root_moves: &[Move], depth: u8) -> SearchResult {
        self.nodes = 0;
        let mut alpha = -INF;
        let beta = INF;
        let mut best_move = None;

        let mut ordered = root_moves.to_vec();
        order_moves(board, &mut ordered);

        for mv in ordered {
            let mut child = board.clone();
            child.play(mv);
            let score = -self.negamax(&child, depth.saturating_sub(1), 1, -beta, -alpha);
            if best_move.is_none() || score > alpha {
                alpha = score;
                best_move = Some(mv);
            }
        }

        SearchResult {
            best_move,
            score: alpha,
            nodes: self.nodes,
        }
    }

    fn negamax(&mut self, board: &Board, depth: u8, ply: i32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        let mut moves = Vec::new();
        board.generate_moves(|ml| {
            moves.extend(ml);
            false
        });

        if moves.is_empty() {
            // Prefer faster mates
            return if board.checkers().is_empty() {
                DRAW_SCORE
            } else {
                -MATE_SCORE + ply
            };
        }
        if depth == 0 {
            return evaluate(board);
        }

        order_moves(board, &mut moves);
        for mv in moves {
            let mut child = board.clone();
            child.play(mv);
            let score = -self.negamax(&child, depth - 1, ply + 1, -beta, -alpha);
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }
}

/// Captures first, ordered by victim value
fn order_moves(board: &Board, moves: &mut [Move]) {
    let us = board.side_to_move();
    moves.sort_by_key(|mv| match board.color_on(mv.to) {
        Some(color) if color != us => board.piece_on(mv.to).map_or(0, |p| -piece_value(p)),
        _ => 1,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal(board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        board.generate_moves(|ml| {
            moves.extend(ml);
            false
        });
        moves
    }

    #[test]
    fn finds_mate_in_one() {
        // Back-rank mate: Ra1-a8#
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", false).expect("fen");
        let result = Searcher::new().search(&board, &legal(&board), 2);
        assert_eq!(result.best_move.map(|m| format!("{}", m)), Some("a1a8".to_string()));
        assert!(result.score > MATE_SCORE - 10);
    }

    #[test]
    fn takes_hanging_queen() {
        let board = Board::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1", false).expect("fen");
        let result = Searcher::new().search(&board, &legal(&board), 2);
        assert_eq!(result.best_move.map(|m| format!("{}", m)), Some("d2d5".to_string()));
    }

    #[test]
    fn empty_root_set_yields_no_move() {
        let board = Board::default();
        let result = Searcher::new().search(&board, &[], 3);
        assert!(result.best_move.is_none());
    }

    #[test]
    fn root_is_restricted_to_supplied_moves() {
        let board = Board::default();
        let only: Vec<Move> = legal(&board)
            .into_iter()
            .filter(|m| format!("{}", m) == "a2a3")
            .collect();
        let result = Searcher::new().search(&board, &only, 2);
        assert_eq!(result.best_move.map(|m| format!("{}", m)), Some("a2a3".to_string()));
        assert!(result.nodes > 0);
    }
}
