//! Authoritative game state

use super::{kind_of, side_of, to_cell, Move};
use crate::board::{Grid, Piece, Side, DIMENSION};
use crate::error::{GameError, GameResult};
use cozy_chess::{Board, Color, Square};

/// Position, move history and terminal flags
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    /// Committed moves, oldest first
    pub history: Vec<Move>,
    pub checkmate: bool,
    pub stalemate: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard initial position
    pub fn new() -> Self {
        Self::with_board(Board::default())
    }

    fn with_board(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
            checkmate: false,
            stalemate: false,
        }
    }

    /// Start from an arbitrary position given as FEN
    pub fn from_fen(fen: &str) -> GameResult<Self> {
        Board::from_fen(fen, false)
            .map(Self::with_board)
            .map_err(|e| GameError::InvalidFen {
                fen: fen.to_string(),
                message: format!("{:?}", e),
            })
    }

    /// Rebuild from the initial position by replaying `moves`
    pub fn from_history(moves: &[Move]) -> Self {
        let mut state = Self::new();
        for &mv in moves {
            state.make_move(mv);
        }
        state
    }

    /// Engine position, for the search
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Position as FEN, the snapshot format handed to the search worker
    pub fn fen(&self) -> String {
        format!("{}", self.board)
    }

    #[inline]
    pub fn white_to_move(&self) -> bool {
        self.board.side_to_move() == Color::White
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        side_of(self.board.side_to_move())
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    /// All legal moves, in the engine's generation order
    pub fn valid_moves(&self) -> Vec<Move> {
        let board = &self.board;
        let mut moves = Vec::new();
        board.generate_moves(|piece_moves| {
            for raw in piece_moves {
                if let Some(mv) = Move::from_engine(board, raw) {
                    moves.push(mv);
                }
            }
            false
        });
        moves
    }

    /// Apply a legal move and append it to the history.
    ///
    /// Callers only pass moves taken from [`GameState::valid_moves`] of this
    /// exact position.
    pub fn make_move(&mut self, mv: Move) {
        self.board.play(mv.raw());
        self.history.push(mv);
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Current position as a cell grid
    pub fn grid(&self) -> Grid {
        let mut grid: Grid = [[None; DIMENSION]; DIMENSION];
        for square in Square::ALL {
            let occupant = (self.board.piece_on(square), self.board.color_on(square));
            if let (Some(piece), Some(color)) = occupant {
                let cell = to_cell(square);
                let piece = Piece::new(side_of(color), kind_of(piece));
                grid[cell.row as usize][cell.col as usize] = Some(piece);
            }
        }
        grid
    }
}
