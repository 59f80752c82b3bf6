//! Board-level value types shared by the rules adapter, input and rendering

/// Board dimension (8x8)
pub const DIMENSION: usize = 8;

/// Side (color) of a piece or of the player to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Get opponent side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

/// Piece kind without color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Single-letter code; pawns use lowercase `p`
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A colored piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }
}

/// Grid of squares; `None` is the empty marker. Row 0 is rank 8, column 0 is file a.
pub type Grid = [[Option<Piece>; DIMENSION]; DIMENSION];

/// A square on the board, addressed top-left first as (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < DIMENSION && (col as usize) < DIMENSION);
        Self { row, col }
    }

    /// Checked constructor for signed coordinates
    #[inline]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if row >= 0 && row < DIMENSION as i32 && col >= 0 && col < DIMENSION as i32 {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Algebraic name, e.g. `e4`
    pub fn name(self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = DIMENSION as u8 - self.row;
        format!("{}{}", file, rank)
    }

    /// Piece occupying this cell in `grid`
    #[inline]
    pub fn on(self, grid: &Grid) -> Option<Piece> {
        grid[self.row as usize][self.col as usize]
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
