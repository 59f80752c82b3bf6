//! GUI module for the chess game
//!
//! Native window built on egui/eframe. Each repaint is one tick of the
//! [`TurnCoordinator`](crate::turn::TurnCoordinator).

mod app;
mod board_view;
mod theme;

pub use app::ChessApp;
pub use board_view::BoardView;
pub use theme::Theme;
