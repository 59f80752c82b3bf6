//! Colors and sizes for the chess GUI
//!
//! Built once into a [`Theme`] and passed by reference to the renderers.

use egui::Color32;

// Sizes
pub const PIECE_RADIUS_RATIO: f32 = 0.38;
pub const PIECE_OUTLINE_WIDTH: f32 = 2.0;
pub const PIECE_FONT_SIZE: f32 = 26.0;
pub const END_TEXT_SIZE: f32 = 36.0;
pub const HIGHLIGHT_ALPHA: u8 = 100;

/// Immutable rendering resources
#[derive(Debug, Clone)]
pub struct Theme {
    // Board
    pub light_square: Color32,
    pub dark_square: Color32,
    pub last_move: Color32,
    pub selected: Color32,
    pub legal_target: Color32,

    // Pieces
    pub white_piece: Color32,
    pub white_piece_letter: Color32,
    pub black_piece: Color32,
    pub black_piece_letter: Color32,
    pub piece_outline: Color32,

    // End-of-game overlay
    pub end_text: Color32,
    pub end_text_shadow: Color32,

    // Side panel
    pub panel_bg: Color32,
    pub card_bg: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub status_ok: Color32,
    pub status_thinking: Color32,
    pub status_over: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            light_square: Color32::WHITE,
            dark_square: Color32::GRAY,
            last_move: Color32::from_rgba_unmultiplied(0, 255, 0, HIGHLIGHT_ALPHA),
            selected: Color32::from_rgba_unmultiplied(0, 0, 255, HIGHLIGHT_ALPHA),
            legal_target: Color32::from_rgba_unmultiplied(255, 255, 0, HIGHLIGHT_ALPHA),

            white_piece: Color32::from_rgb(250, 250, 252),
            white_piece_letter: Color32::from_rgb(30, 30, 35),
            black_piece: Color32::from_rgb(25, 25, 30),
            black_piece_letter: Color32::from_rgb(235, 235, 240),
            piece_outline: Color32::from_rgb(60, 60, 65),

            end_text: Color32::from_rgb(128, 128, 128),
            end_text_shadow: Color32::BLACK,

            panel_bg: Color32::from_rgb(25, 27, 31),
            card_bg: Color32::from_rgb(35, 38, 43),
            text_primary: Color32::from_rgb(240, 240, 245),
            text_secondary: Color32::from_rgb(160, 165, 175),
            text_muted: Color32::from_rgb(120, 125, 135),
            status_ok: Color32::from_rgb(80, 200, 120),
            status_thinking: Color32::from_rgb(255, 180, 50),
            status_over: Color32::from_rgb(50, 220, 50),
        }
    }
}
