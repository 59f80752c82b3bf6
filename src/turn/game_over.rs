//! Terminal position detection

use log::info;

use crate::board::Side;
use crate::rules::{GameState, Move};

/// How the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Side },
    Stalemate,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Checkmate { winner: Side::White } => "White wins by checkmate",
            Outcome::Checkmate { winner: Side::Black } => "Black wins by checkmate",
            Outcome::Stalemate => "Stalemate",
        }
    }
}

/// Inspect the freshly recomputed legal-move set and set the terminal flags
/// on `state`. `Some` means play must freeze.
pub fn detect(state: &mut GameState, valid_moves: &[Move]) -> Option<Outcome> {
    if !valid_moves.is_empty() {
        return None;
    }
    let outcome = if state.in_check() {
        state.checkmate = true;
        Outcome::Checkmate {
            winner: state.side_to_move().opponent(),
        }
    } else {
        state.stalemate = true;
        Outcome::Stalemate
    };
    info!("game over: {}", outcome.message());
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ongoing_game_is_not_over() {
        let mut state = GameState::new();
        let moves = state.valid_moves();
        assert_eq!(detect(&mut state, &moves), None);
        assert!(!state.checkmate && !state.stalemate);
    }

    #[test]
    fn no_moves_in_check_is_checkmate() {
        // Fool's mate, white to move
        let mut state =
            GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .expect("fen");
        let moves = state.valid_moves();
        assert_eq!(detect(&mut state, &moves), Some(Outcome::Checkmate { winner: Side::Black }));
        assert!(state.checkmate);
        assert!(!state.stalemate);
    }

    #[test]
    fn no_moves_without_check_is_stalemate() {
        let mut state = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("fen");
        let moves = state.valid_moves();
        assert_eq!(detect(&mut state, &moves), Some(Outcome::Stalemate));
        assert!(state.stalemate);
        assert_eq!(Outcome::Stalemate.message(), "Stalemate");
    }
}
