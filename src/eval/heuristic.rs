//! Heuristic evaluation function for chess positions
//!
//! Material in centipawns plus two small positional terms:
//! - Knights and bishops are rewarded for standing near the center
//! - Pawns are rewarded for advancing

use cozy_chess::{Board, Color, Piece, Square};

pub const PAWN: i32 = 100;
pub const KNIGHT: i32 = 320;
pub const BISHOP: i32 = 330;
pub const ROOK: i32 = 500;
pub const QUEEN: i32 = 900;

/// Score of a side that has been checkmated (before ply adjustment)
pub const MATE_SCORE: i32 = 30_000;
pub const DRAW_SCORE: i32 = 0;

/// Per-file / per-rank centrality bonus
const CENTER_BONUS: [i32; 8] = [0, 2, 5, 8, 8, 5, 2, 0];

/// Bonus per rank a pawn has advanced from its starting rank
const PAWN_ADVANCE: i32 = 6;

/// Material value of a piece. Kings are never traded, so they score zero.
#[inline]
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => 0,
    }
}

fn positional(piece: Piece, square: Square, color: Color) -> i32 {
    let file = square.file() as usize;
    let rank = square.rank() as usize;
    match piece {
        Piece::Knight | Piece::Bishop => CENTER_BONUS[file] + CENTER_BONUS[rank],
        Piece::Pawn => {
            let advanced = match color {
                Color::White => rank.saturating_sub(1),
                Color::Black => 6usize.saturating_sub(rank),
            };
            advanced as i32 * PAWN_ADVANCE
        }
        _ => 0,
    }
}

/// Score of one side's pieces
fn side_score(board: &Board, color: Color) -> i32 {
    let mut score = 0;
    for piece in Piece::ALL {
        for square in board.colors(color) & board.pieces(piece) {
            score += piece_value(piece) + positional(piece, square, color);
        }
    }
    score
}

/// Evaluate `board` from the side to move's perspective (negamax-friendly).
///
/// Positive values favor the side to move.
pub fn evaluate(board: &Board) -> i32 {
    let white = side_score(board, Color::White) - side_score(board, Color::Black);
    if board.side_to_move() == Color::White {
        white
    } else {
        -white
    }
}
