//! Board rendering for the chess GUI

use egui::{Align2, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;
use crate::board::{Cell, Grid, Piece, Side, DIMENSION};
use crate::supervisor::WorkerLauncher;
use crate::turn::{TurnCoordinator, BOARD_PIXELS, SQUARE_SIZE};

/// Board view handles rendering and pointer mapping for the game board
pub struct BoardView {
    /// Board drawing area from the last frame
    board_rect: Rect,
    /// Area in which presses count as board input (on or off the board)
    input_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            board_rect: Rect::NOTHING,
            input_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Primary-button press this frame, in board-relative pixels. Uses the
    /// layout of the previous frame so input is read before drawing.
    pub fn pointer_press(&self, ctx: &egui::Context) -> Option<(f32, f32)> {
        let pos = ctx.input(|i| {
            if i.pointer.primary_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            }
        })?;
        if !self.input_rect.contains(pos) {
            return None;
        }
        let rel = pos - self.board_rect.min;
        Some((rel.x, rel.y))
    }

    /// Draw the board, overlays and pieces
    pub fn show<L: WorkerLauncher>(
        &mut self,
        ui: &mut egui::Ui,
        game: &TurnCoordinator<L>,
        theme: &Theme,
    ) {
        self.input_rect = ui.max_rect();
        let (response, painter) = ui.allocate_painter(Vec2::splat(BOARD_PIXELS), Sense::click());
        self.board_rect = response.rect;

        self.draw_squares(&painter, theme);

        match game.animation_frame() {
            Some(frame) => {
                self.draw_pieces(&painter, &frame.job.static_board(), theme);
                let center = self.cell_center(frame.row, frame.col);
                self.draw_piece(&painter, center, frame.job.moving_piece(), theme);
            }
            None => {
                self.draw_highlights(&painter, game, theme);
                self.draw_pieces(&painter, &game.state().grid(), theme);
            }
        }

        if let Some(outcome) = game.announced_outcome() {
            self.draw_end_text(&painter, outcome.message(), theme);
        }
    }

    fn draw_squares(&self, painter: &Painter, theme: &Theme) {
        for row in 0..DIMENSION {
            for col in 0..DIMENSION {
                let color = if (row + col) % 2 == 0 {
                    theme.light_square
                } else {
                    theme.dark_square
                };
                let rect = self.square_rect(row as f32, col as f32);
                painter.rect_filled(rect, CornerRadius::ZERO, color);
            }
        }
    }

    /// Last-move destination, selected piece and its legal targets
    fn draw_highlights<L: WorkerLauncher>(
        &self,
        painter: &Painter,
        game: &TurnCoordinator<L>,
        theme: &Theme,
    ) {
        let state = game.state();
        if let Some(last) = state.last_move() {
            self.fill_cell(painter, last.end, theme.last_move);
        }

        let Some(selected) = game.selection().selected() else {
            return;
        };
        let own_piece = selected
            .on(&state.grid())
            .is_some_and(|p| p.side == state.side_to_move());
        if !own_piece {
            return;
        }

        self.fill_cell(painter, selected, theme.selected);
        for mv in game.valid_moves().iter().filter(|m| m.start == selected) {
            self.fill_cell(painter, mv.end, theme.legal_target);
        }
    }

    fn draw_pieces(&self, painter: &Painter, grid: &Grid, theme: &Theme) {
        for (row, rank) in grid.iter().enumerate() {
            for (col, piece) in rank.iter().enumerate() {
                if let Some(piece) = piece {
                    let center = self.cell_center(row as f32, col as f32);
                    self.draw_piece(painter, center, *piece, theme);
                }
            }
        }
    }

    /// Draw a piece as a disc with its letter
    fn draw_piece(&self, painter: &Painter, center: Pos2, piece: Piece, theme: &Theme) {
        let (fill, letter_color) = match piece.side {
            Side::White => (theme.white_piece, theme.white_piece_letter),
            Side::Black => (theme.black_piece, theme.black_piece_letter),
        };
        let radius = SQUARE_SIZE * PIECE_RADIUS_RATIO;

        painter.circle_filled(center, radius, fill);
        let outline = Stroke::new(PIECE_OUTLINE_WIDTH, theme.piece_outline);
        painter.circle_stroke(center, radius, outline);
        painter.text(
            center,
            Align2::CENTER_CENTER,
            piece.kind.letter().to_ascii_uppercase(),
            FontId::proportional(PIECE_FONT_SIZE),
            letter_color,
        );
    }

    fn draw_end_text(&self, painter: &Painter, text: &str, theme: &Theme) {
        let center = self.board_rect.center();
        let font = FontId::proportional(END_TEXT_SIZE);
        painter.text(center, Align2::CENTER_CENTER, text, font.clone(), theme.end_text_shadow);
        painter.text(
            center + Vec2::new(2.0, 2.0),
            Align2::CENTER_CENTER,
            text,
            font,
            theme.end_text,
        );
    }

    fn fill_cell(&self, painter: &Painter, cell: Cell, color: egui::Color32) {
        painter.rect_filled(
            self.square_rect(cell.row as f32, cell.col as f32),
            CornerRadius::ZERO,
            color,
        );
    }

    /// Screen rect of a (possibly fractional) square position
    fn square_rect(&self, row: f32, col: f32) -> Rect {
        Rect::from_min_size(
            self.board_rect.min + Vec2::new(col * SQUARE_SIZE, row * SQUARE_SIZE),
            Vec2::splat(SQUARE_SIZE),
        )
    }

    fn cell_center(&self, row: f32, col: f32) -> Pos2 {
        self.square_rect(row, col).center()
    }
}
