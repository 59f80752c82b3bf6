//! Chess rules adapter
//!
//! Legality, check detection and move application are delegated to
//! `cozy-chess`. This module converts between its square/move encoding and the
//! row/column cells used by input handling and rendering:
//! - [`moves`]: the [`Move`] value type and click-built [`Candidate`]s
//! - [`state`]: [`GameState`], the authoritative position plus history

pub mod moves;
pub mod state;

pub use moves::{Candidate, Move};
pub use state::GameState;

use crate::board::{Cell, PieceKind, Side, DIMENSION};
use cozy_chess::{Color, File, Piece as EnginePiece, Rank, Square};

#[inline]
pub(crate) fn to_square(cell: Cell) -> Square {
    Square::new(
        File::index(cell.col as usize),
        Rank::index(DIMENSION - 1 - cell.row as usize),
    )
}

#[inline]
pub(crate) fn to_cell(square: Square) -> Cell {
    Cell::new(
        (DIMENSION - 1) as u8 - square.rank() as u8,
        square.file() as u8,
    )
}

#[inline]
pub(crate) fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

#[inline]
pub(crate) fn kind_of(piece: EnginePiece) -> PieceKind {
    match piece {
        EnginePiece::Pawn => PieceKind::Pawn,
        EnginePiece::Knight => PieceKind::Knight,
        EnginePiece::Bishop => PieceKind::Bishop,
        EnginePiece::Rook => PieceKind::Rook,
        EnginePiece::Queen => PieceKind::Queen,
        EnginePiece::King => PieceKind::King,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_cell_mapping_is_row_flipped() {
        let e2 = Square::new(File::E, Rank::Second);
        assert_eq!(to_cell(e2), Cell::new(6, 4));
        assert_eq!(to_square(Cell::new(6, 4)), e2);
        assert_eq!(to_square(Cell::new(0, 0)), Square::new(File::A, Rank::Eighth));
    }
}
