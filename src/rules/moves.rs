//! Move value type
//!
//! A [`Move`] is always produced by the rules engine from a concrete
//! position, so it carries both the presentation data (cells, pieces, flags)
//! and the engine's own move value. Input handling builds [`Candidate`]s,
//! which only hold what two clicks can express.

use super::{kind_of, side_of, to_cell};
use crate::board::{Cell, Grid, Piece, PieceKind, DIMENSION};
use cozy_chess::Board;

/// A legal move in a specific position
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub start: Cell,
    pub end: Cell,
    pub piece_moved: Piece,
    /// Captured piece; `None` is the empty marker
    pub piece_captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub is_en_passant: bool,
    pub is_castle: bool,
    raw: cozy_chess::Move,
}

/// Equality is by start cell, end cell and promotion kind.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.candidate() == other.candidate()
    }
}

impl Eq for Move {}

impl Move {
    /// Describe an engine move in the position `board` it is legal in.
    ///
    /// Castling is encoded by the engine as king-takes-own-rook; it is
    /// presented here as the king's two-square move.
    pub(crate) fn from_engine(board: &Board, raw: cozy_chess::Move) -> Option<Self> {
        let mover = side_of(board.side_to_move());
        let kind = kind_of(board.piece_on(raw.from)?);
        let start = to_cell(raw.from);
        let target = to_cell(raw.to);

        let is_castle =
            kind == PieceKind::King && board.color_on(raw.to) == board.color_on(raw.from);
        let is_en_passant = kind == PieceKind::Pawn
            && raw.from.file() != raw.to.file()
            && board.piece_on(raw.to).is_none();

        let end = if is_castle {
            let col = if target.col > start.col { 6 } else { 2 };
            Cell::new(start.row, col)
        } else {
            target
        };

        let piece_captured = if is_castle {
            None
        } else if is_en_passant {
            Some(Piece::new(mover.opponent(), PieceKind::Pawn))
        } else {
            board
                .piece_on(raw.to)
                .zip(board.color_on(raw.to))
                .map(|(p, c)| Piece::new(side_of(c), kind_of(p)))
        };

        Some(Self {
            start,
            end,
            piece_moved: Piece::new(mover, kind),
            piece_captured,
            promotion: raw.promotion.map(kind_of),
            is_en_passant,
            is_castle,
            raw,
        })
    }

    #[inline]
    pub(crate) fn raw(&self) -> cozy_chess::Move {
        self.raw
    }

    /// The fields that take part in equality
    #[inline]
    pub fn candidate(&self) -> Candidate {
        Candidate {
            start: self.start,
            end: self.end,
            promotion: self.promotion,
        }
    }

    #[inline]
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.candidate() == *candidate
    }

    /// Cell of the captured piece (differs from `end` for en passant)
    pub fn capture_cell(&self) -> Option<Cell> {
        self.piece_captured?;
        if self.is_en_passant {
            Some(Cell::new(self.start.row, self.end.col))
        } else {
            Some(self.end)
        }
    }

    /// Row and column deltas from start to end
    #[inline]
    pub fn deltas(&self) -> (i32, i32) {
        (
            self.end.row as i32 - self.start.row as i32,
            self.end.col as i32 - self.start.col as i32,
        )
    }

    /// Engine coordinate notation (e.g. `e2e4`, `e7e8q`); the worker wire format
    pub fn to_uci(&self) -> String {
        format!("{}", self.raw)
    }

    /// Find the move with the given coordinate notation in `moves`
    pub fn find_uci<'a>(moves: &'a [Move], uci: &str) -> Option<&'a Move> {
        moves.iter().find(|m| m.to_uci() == uci)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.letter().to_ascii_uppercase())?;
        }
        Ok(())
    }
}

/// A move as expressed by two clicks, before it is checked against legality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub start: Cell,
    pub end: Cell,
    pub promotion: Option<PieceKind>,
}

impl Candidate {
    /// Build a candidate from two clicked cells. A pawn reaching the last
    /// rank promotes to a queen.
    pub fn from_clicks(start: Cell, end: Cell, grid: &Grid) -> Self {
        let last_rank = end.row == 0 || end.row as usize == DIMENSION - 1;
        let promotion = match start.on(grid) {
            Some(piece) if piece.kind == PieceKind::Pawn && last_rank => Some(PieceKind::Queen),
            _ => None,
        };
        Self { start, end, promotion }
    }
}
