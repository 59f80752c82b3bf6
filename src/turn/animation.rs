//! Move playback
//!
//! A committed move is replayed as `(|dr| + |dc|) * frames_per_square` steps
//! of linear interpolation, drawing frames `0..=steps`. Frame 0 sits exactly
//! on the start cell and the last frame exactly on the end cell. The
//! scheduler advances one frame per tick.

use crate::board::{Cell, Grid, Piece, DIMENSION};
use crate::rules::Move;

/// A committed move plus the board as it was before the move
#[derive(Debug, Clone)]
pub struct AnimationJob {
    mv: Move,
    board_before: Grid,
    steps: u32,
}

impl AnimationJob {
    pub fn new(mv: Move, board_before: Grid, frames_per_square: u32) -> Self {
        let (dr, dc) = mv.deltas();
        let steps = (dr.unsigned_abs() + dc.unsigned_abs()) * frames_per_square;
        Self {
            mv,
            board_before,
            steps,
        }
    }

    /// Number of frames drawn
    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.steps + 1
    }

    /// Interpolated (row, col) of the moving piece at `frame`
    pub fn position(&self, frame: u32) -> (f32, f32) {
        let start = self.mv.start;
        let end = self.mv.end;
        if self.steps == 0 {
            return (end.row as f32, end.col as f32);
        }
        let (dr, dc) = self.mv.deltas();
        let f = frame.min(self.steps) as f32;
        let steps = self.steps as f32;
        (
            start.row as f32 + dr as f32 * f / steps,
            start.col as f32 + dc as f32 * f / steps,
        )
    }

    /// Board to draw under the moving piece: the pre-move board without the
    /// mover. A captured piece stays visible on its square until playback ends.
    /// When castling, the rook is already on its destination.
    pub fn static_board(&self) -> Grid {
        let mut grid = self.board_before;
        let row = self.mv.start.row as usize;
        grid[row][self.mv.start.col as usize] = None;
        if self.mv.is_castle {
            let (from, to) = if self.mv.end.col > self.mv.start.col {
                (DIMENSION - 1, 5)
            } else {
                (0, 3)
            };
            grid[row][to] = grid[row][from].take();
        }
        grid
    }

    #[inline]
    pub fn moving_piece(&self) -> Piece {
        self.mv.piece_moved
    }

    /// Captured piece and the square it is drawn on (one rank behind the
    /// destination for en passant)
    pub fn captured(&self) -> Option<(Cell, Piece)> {
        self.mv.capture_cell().zip(self.mv.piece_captured)
    }
}

/// One frame of playback
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub job: &'a AnimationJob,
    pub index: u32,
    pub row: f32,
    pub col: f32,
}

#[derive(Debug, Default)]
pub struct AnimationScheduler {
    job: Option<AnimationJob>,
    frame: u32,
}

impl AnimationScheduler {
    /// Begin playback at frame 0, replacing any job in progress
    pub fn start(&mut self, job: AnimationJob) {
        self.job = Some(job);
        self.frame = 0;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.job.is_some()
    }

    /// Step to the next frame. Returns false once playback has completed and
    /// the job has been discarded.
    pub fn advance(&mut self) -> bool {
        let Some(job) = &self.job else {
            return false;
        };
        if self.frame + 1 >= job.frame_count() {
            self.job = None;
            self.frame = 0;
            return false;
        }
        self.frame += 1;
        true
    }

    pub fn current(&self) -> Option<Frame<'_>> {
        let job = self.job.as_ref()?;
        let (row, col) = job.position(self.frame);
        Some(Frame {
            job,
            index: self.frame,
            row,
            col,
        })
    }

    pub fn clear(&mut self) {
        self.job = None;
        self.frame = 0;
    }
}
