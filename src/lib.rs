//! Interactive chess with a cancellable out-of-process AI
//!
//! A human (or the AI) picks moves on an 8x8 board. The AI searches in a
//! child process that can be abandoned at any time, so the window stays
//! responsive and a reset never waits on a search.
//!
//! # Architecture
//!
//! - [`board`]: Sides, pieces, cells and the display grid
//! - [`rules`]: Legal move generation and game state (backed by `cozy-chess`)
//! - [`eval`]: Static evaluation
//! - [`search`]: Negamax alpha-beta and the random fallback
//! - [`supervisor`]: Worker process lifecycle and its JSON protocol
//! - [`turn`]: Per-tick orchestration: input, validation, animation, game over
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use chess_gui::{find_best_move, GameState};
//!
//! let state = GameState::new();
//! let moves = state.valid_moves();
//! let best = find_best_move(&state, &moves, 2).expect("opening has moves");
//! assert!(moves.contains(&best));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod supervisor;
pub mod turn;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Cell, Grid, Piece, PieceKind, Side, DIMENSION};
pub use config::{Controller, GameConfig};
pub use error::{GameError, GameResult};
pub use rules::{Candidate, GameState, Move};
pub use search::{find_best_move, find_random_move};
pub use supervisor::{ProcessLauncher, SearchPhase, SearchSupervisor};
pub use turn::{Outcome, TickInput, TurnCoordinator};
