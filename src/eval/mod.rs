//! Position evaluation for the search worker

pub mod heuristic;

pub use heuristic::{evaluate, piece_value, DRAW_SCORE, MATE_SCORE};
