//! Game configuration

use crate::board::Side;

/// Who moves for a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Controller {
    Human,
    Ai,
}

/// Settings fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub human_white: bool,
    pub human_black: bool,
    /// Plies searched by the AI worker
    pub search_depth: u8,
    /// Target tick rate of the main loop
    pub max_fps: u32,
    /// Tick rate while a move animation plays
    pub animation_fps: u32,
    pub frames_per_square: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_white: true,
            human_black: false,
            search_depth: 3,
            max_fps: 15,
            animation_fps: 60,
            frames_per_square: 5,
        }
    }
}

impl GameConfig {
    pub fn with_controllers(white: Controller, black: Controller) -> Self {
        Self {
            human_white: white == Controller::Human,
            human_black: black == Controller::Human,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_human(&self, side: Side) -> bool {
        match side {
            Side::White => self.human_white,
            Side::Black => self.human_black,
        }
    }

    #[inline]
    pub fn any_human(&self) -> bool {
        self.human_white || self.human_black
    }
}
