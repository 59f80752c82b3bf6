//! Pointer input to two-click move selection

use crate::board::{Cell, DIMENSION};

/// Side length of a board square in pixels
pub const SQUARE_SIZE: f32 = 64.0;

/// Side length of the whole board in pixels
pub const BOARD_PIXELS: f32 = SQUARE_SIZE * DIMENSION as f32;

/// Map board-relative pixel coordinates to a cell; `None` when off the board
pub fn cell_at(x: f32, y: f32) -> Option<Cell> {
    if !(x >= 0.0 && y >= 0.0) {
        return None;
    }
    Cell::try_new((y / SQUARE_SIZE).floor() as i32, (x / SQUARE_SIZE).floor() as i32)
}

/// Up to two selected cells, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickSelection {
    cells: Vec<Cell>,
}

impl ClickSelection {
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Most recently selected cell
    #[inline]
    pub fn selected(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

/// Accumulates clicks into a candidate cell pair
#[derive(Debug, Default)]
pub struct InputResolver {
    selection: ClickSelection,
}

impl InputResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn selection(&self) -> &ClickSelection {
        &self.selection
    }

    /// Register a press on `cell` (`None` = off the board).
    ///
    /// Clicking off the board or on the current selection deselects. The
    /// second distinct click returns the pair; the caller must then either
    /// [`accept`](Self::accept) or [`reject`](Self::reject) it.
    pub fn press(&mut self, cell: Option<Cell>) -> Option<(Cell, Cell)> {
        match cell {
            Some(cell) if self.selection.selected() != Some(cell) => {
                self.selection.cells.push(cell);
                match self.selection.cells[..] {
                    [first, second] => Some((first, second)),
                    _ => None,
                }
            }
            _ => {
                self.selection.clear();
                None
            }
        }
    }

    /// The pair became a move
    pub fn accept(&mut self) {
        self.selection.clear();
    }

    /// The pair was not a legal move; the second click becomes a fresh selection
    pub fn reject(&mut self) {
        if let Some(last) = self.selection.selected() {
            self.selection.cells.clear();
            self.selection.cells.push(last);
        }
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }
}
