//! Committing validated moves

use log::info;

use crate::rules::{GameState, Move};

/// Applies moves and records that follow-up work (animation, legal-move
/// recomputation) is due
#[derive(Debug, Default)]
pub struct MoveApplier {
    move_made: bool,
    animate: bool,
}

impl MoveApplier {
    /// Commit `mv`. It must come from the current legal-move set; this is
    /// not re-checked.
    pub fn apply(&mut self, state: &mut GameState, mv: Move) {
        info!("{} plays {}", mv.piece_moved.side.name(), mv);
        state.make_move(mv);
        self.move_made = true;
        self.animate = true;
    }

    /// Consume the commit flags; `Some(animate)` if a move was made
    pub fn take(&mut self) -> Option<bool> {
        if !self.move_made {
            return None;
        }
        let animate = self.animate;
        self.clear();
        Some(animate)
    }

    pub fn clear(&mut self) {
        self.move_made = false;
        self.animate = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_flags_and_history() {
        let mut state = GameState::new();
        let mv = state.valid_moves()[0];
        let mut applier = MoveApplier::default();

        assert_eq!(applier.take(), None);

        applier.apply(&mut state, mv);
        assert_eq!(state.history.len(), 1);

        assert_eq!(applier.take(), Some(true));
        assert_eq!(applier.take(), None);
    }
}
