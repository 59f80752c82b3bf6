//! Candidate move validation against the legal-move set

use crate::rules::{Candidate, Move};

/// First move of `valid_moves` equal to `candidate`.
///
/// The set's own instance is returned so the engine metadata it carries is
/// preserved.
pub fn validate<'a>(candidate: &Candidate, valid_moves: &'a [Move]) -> Option<&'a Move> {
    valid_moves.iter().find(|m| m.matches(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, PieceKind};
    use crate::rules::GameState;

    #[test]
    fn legal_candidate_returns_set_instance() {
        let state = GameState::new();
        let moves = state.valid_moves();
        let candidate = Candidate::from_clicks(Cell::new(6, 4), Cell::new(4, 4), &state.grid());
        let found = validate(&candidate, &moves).expect("e2e4 is legal");
        assert_eq!(found.to_uci(), "e2e4");
        assert!(moves.iter().any(|m| std::ptr::eq(m, found)));
    }

    #[test]
    fn illegal_candidate_is_rejected() {
        let state = GameState::new();
        let moves = state.valid_moves();
        let candidate = Candidate::from_clicks(Cell::new(6, 4), Cell::new(3, 4), &state.grid());
        assert!(validate(&candidate, &moves).is_none());
    }

    #[test]
    fn pawn_reaching_last_rank_matches_queen_promotion() {
        let state = GameState::from_fen("7k/P7/8/8/8/8/8/7K w - - 0 1").expect("fen");
        let moves = state.valid_moves();
        let candidate = Candidate::from_clicks(Cell::new(1, 0), Cell::new(0, 0), &state.grid());
        let found = validate(&candidate, &moves).expect("promotion is legal");
        assert_eq!(found.promotion, Some(PieceKind::Queen));
        assert_eq!(found.to_uci(), "a7a8q");
    }

    #[test]
    fn castling_matches_king_two_square_click() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("fen");
        let moves = state.valid_moves();
        let candidate = Candidate::from_clicks(Cell::new(7, 4), Cell::new(7, 6), &state.grid());
        let found = validate(&candidate, &moves).expect("castling is legal");
        assert!(found.is_castle);
    }
}
