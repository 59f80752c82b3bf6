//! Turn orchestration
//!
//! [`TurnCoordinator`] is the per-tick state machine that sequences the
//! pieces of this module:
//! - [`input`]: pointer presses to a two-click selection
//! - [`validator`]: candidate moves against the legal-move set
//! - [`applier`]: committing moves
//! - [`animation`]: frame-by-frame playback of the last commit
//! - [`game_over`]: checkmate / stalemate detection and freeze
//!
//! When the side to move is AI-controlled it drives the
//! [`SearchSupervisor`] instead of input handling.

pub mod animation;
pub mod applier;
pub mod game_over;
pub mod input;
pub mod validator;

pub use animation::{AnimationJob, AnimationScheduler, Frame};
pub use applier::MoveApplier;
pub use game_over::Outcome;
pub use input::{cell_at, ClickSelection, InputResolver, BOARD_PIXELS, SQUARE_SIZE};
pub use validator::validate;

use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::Grid;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::rules::{Candidate, GameState, Move};
use crate::supervisor::{ProcessLauncher, SearchPhase, SearchSupervisor, WorkerLauncher};

/// Input gathered for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Pointer press in board-relative pixels
    pub press: Option<(f32, f32)>,
    pub reset: bool,
    pub undo: bool,
}

impl TickInput {
    pub fn press(x: f32, y: f32) -> Self {
        Self {
            press: Some((x, y)),
            ..Self::default()
        }
    }

    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }

    pub fn undo() -> Self {
        Self {
            undo: true,
            ..Self::default()
        }
    }
}

pub struct TurnCoordinator<L: WorkerLauncher = ProcessLauncher> {
    config: GameConfig,
    state: GameState,
    valid_moves: Vec<Move>,
    input: InputResolver,
    applier: MoveApplier,
    supervisor: SearchSupervisor<L>,
    animation: AnimationScheduler,
    /// Set while frozen
    outcome: Option<Outcome>,
    /// Board before the pending commit, for the animation
    board_before: Option<Grid>,
    rng: StdRng,
}

impl TurnCoordinator<ProcessLauncher> {
    /// Coordinator whose AI searches run in child processes of this executable
    pub fn with_process_worker(config: GameConfig) -> GameResult<Self> {
        Ok(Self::new(config, ProcessLauncher::current_exe()?))
    }
}

impl<L: WorkerLauncher> TurnCoordinator<L> {
    pub fn new(config: GameConfig, launcher: L) -> Self {
        let state = GameState::new();
        let valid_moves = state.valid_moves();
        Self {
            config,
            state,
            valid_moves,
            input: InputResolver::new(),
            applier: MoveApplier::default(),
            supervisor: SearchSupervisor::new(launcher, config.search_depth),
            animation: AnimationScheduler::default(),
            outcome: None,
            board_before: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Make the random fallback reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Continue from `state` instead of the initial position. A position with
    /// no legal moves starts frozen.
    pub fn with_state(mut self, state: GameState) -> Self {
        self.discard_transient();
        self.state = state;
        self.valid_moves = self.state.valid_moves();
        self.outcome = game_over::detect(&mut self.state, &self.valid_moves);
        self
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn valid_moves(&self) -> &[Move] {
        &self.valid_moves
    }

    #[inline]
    pub fn selection(&self) -> &ClickSelection {
        self.input.selection()
    }

    #[inline]
    pub fn supervisor(&self) -> &SearchSupervisor<L> {
        &self.supervisor
    }

    #[inline]
    pub fn search_phase(&self) -> SearchPhase {
        self.supervisor.phase()
    }

    /// Current playback frame, if a move is being animated
    #[inline]
    pub fn animation_frame(&self) -> Option<Frame<'_>> {
        self.animation.current()
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Outcome to announce; withheld until the final move has finished playing
    pub fn announced_outcome(&self) -> Option<Outcome> {
        self.outcome.filter(|_| !self.animation.is_playing())
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_human_turn(&self) -> bool {
        self.config.is_human(self.state.side_to_move())
    }

    /// Delay until the next tick
    pub fn frame_interval(&self) -> Duration {
        let fps = if self.animation.is_playing() {
            self.config.animation_fps
        } else {
            self.config.max_fps
        };
        Duration::from_secs_f64(1.0 / fps.max(1) as f64)
    }

    /// Run one tick of the loop
    pub fn tick(&mut self, input: TickInput) {
        if input.reset {
            self.reset();
            return;
        }
        if input.undo {
            self.undo();
            return;
        }

        // Input is not processed during playback
        if self.animation.is_playing() && self.animation.advance() {
            return;
        }

        if self.is_frozen() {
            return;
        }

        let human = self.is_human_turn();
        if let Some((x, y)) = input.press {
            self.handle_press(x, y, human);
        }
        if !human {
            self.drive_search();
        }

        self.finish_commit();
    }

    fn handle_press(&mut self, x: f32, y: f32, human: bool) {
        let cell = cell_at(x, y);
        let Some((first, second)) = self.input.press(cell) else {
            return;
        };

        if !human {
            self.input.reject();
            return;
        }

        let candidate = Candidate::from_clicks(first, second, &self.state.grid());
        match validate(&candidate, &self.valid_moves) {
            Some(&mv) => {
                self.input.accept();
                self.commit(mv);
            }
            None => {
                debug!("no legal move {} -> {}", first, second);
                self.input.reject();
            }
        }
    }

    fn drive_search(&mut self) {
        if self.supervisor.phase() == SearchPhase::Idle {
            self.supervisor.start(&self.state, &self.valid_moves, &mut self.rng);
        }
        if self.supervisor.poll(&mut self.rng) != SearchPhase::Ready {
            return;
        }
        if let Some(mv) = self.supervisor.take_move() {
            match validate(&mv.candidate(), &self.valid_moves) {
                Some(&legal) => self.commit(legal),
                None => warn!("discarding search move {} not legal in the current position", mv),
            }
        }
    }

    fn commit(&mut self, mv: Move) {
        self.board_before = Some(self.state.grid());
        self.applier.apply(&mut self.state, mv);
    }

    /// Post-commit work: animation, legal-move recomputation, game over
    fn finish_commit(&mut self) {
        let Some(animate) = self.applier.take() else {
            return;
        };

        let before = self.board_before.take();
        if let (true, Some(before), Some(&mv)) = (animate, before, self.state.last_move()) {
            self.animation
                .start(AnimationJob::new(mv, before, self.config.frames_per_square));
        }

        self.valid_moves = self.state.valid_moves();
        self.outcome = game_over::detect(&mut self.state, &self.valid_moves);
    }

    /// Drop everything transient: search, animation, selection, flags
    fn discard_transient(&mut self) {
        if self.supervisor.cancel() {
            debug!("in-flight search cancelled");
        }
        self.input.clear();
        self.applier.clear();
        self.animation.clear();
        self.board_before = None;
        self.outcome = None;
    }

    /// Start over from the initial position
    pub fn reset(&mut self) {
        self.discard_transient();
        self.state = GameState::new();
        self.valid_moves = self.state.valid_moves();
        info!("game reset");
    }

    /// Take back the last move, and the AI reply before it when that hands
    /// the turn back to a human
    pub fn undo(&mut self) {
        self.discard_transient();

        let mut history = self.state.history.clone();
        if history.pop().is_none() {
            return;
        }
        let mut state = GameState::from_history(&history);
        let ai_to_move = !self.config.is_human(state.side_to_move());
        if self.config.any_human() && ai_to_move && history.pop().is_some() {
            state = GameState::from_history(&history);
        }

        info!("undo to move {}", history.len());
        self.valid_moves = state.valid_moves();
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Side};
    use crate::supervisor::scripted::{Script, ScriptedLauncher, ScriptedReply};
    use pretty_assertions::assert_eq;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn coordinator(
        human_white: bool,
        human_black: bool,
        script: Script,
    ) -> TurnCoordinator<ScriptedLauncher> {
        let config = GameConfig {
            human_white,
            human_black,
            ..GameConfig::default()
        };
        TurnCoordinator::new(config, ScriptedLauncher::new(script)).with_seed(11)
    }

    fn click(cell: Cell) -> TickInput {
        TickInput::press(
            cell.col as f32 * SQUARE_SIZE + SQUARE_SIZE / 2.0,
            cell.row as f32 * SQUARE_SIZE + SQUARE_SIZE / 2.0,
        )
    }

    /// Cell from algebraic name
    fn sq(name: &str) -> Cell {
        let bytes = name.as_bytes();
        Cell::new(b'8' - bytes[1], bytes[0] - b'a')
    }

    fn settle<L: WorkerLauncher>(game: &mut TurnCoordinator<L>) {
        while game.animation_frame().is_some() {
            game.tick(TickInput::default());
        }
    }

    fn play<L: WorkerLauncher>(game: &mut TurnCoordinator<L>, from: &str, to: &str) {
        game.tick(click(sq(from)));
        game.tick(click(sq(to)));
        settle(game);
    }

    #[test]
    fn two_clicks_commit_a_legal_move() {
        let mut game = coordinator(true, true, Script::Hang);
        game.tick(click(sq("e2")));
        assert_eq!(game.selection().cells(), &[sq("e2")]);
        game.tick(click(sq("e4")));

        assert_eq!(game.state().history.len(), 1);
        assert!(game.selection().is_empty());
        assert!(game.animation_frame().is_some());
        assert!(!game.state().white_to_move());
        assert_eq!(game.valid_moves().len(), 20);
    }

    #[test]
    fn illegal_target_keeps_state_and_reselects_second_click() {
        let mut game = coordinator(true, false, Script::Hang);
        game.tick(click(sq("e2")));
        game.tick(click(sq("e5")));

        assert_eq!(game.state().fen(), START_FEN);
        assert!(game.state().history.is_empty());
        assert_eq!(game.selection().cells(), &[sq("e5")]);
    }

    #[test]
    fn clicks_on_ai_turn_never_move() {
        let mut game = coordinator(false, true, Script::Hang);
        game.tick(click(sq("e2")));
        game.tick(click(sq("e4")));
        assert!(game.state().history.is_empty());
        assert!(game.selection().cells().len() <= 1);
    }

    #[test]
    fn off_board_press_deselects() {
        let mut game = coordinator(true, true, Script::Hang);
        game.tick(click(sq("e2")));
        game.tick(TickInput::press(BOARD_PIXELS + 20.0, 10.0));
        assert!(game.selection().is_empty());
    }

    #[test]
    fn animation_plays_expected_frames_and_blocks_input() {
        let mut game = coordinator(true, true, Script::Hang);
        game.tick(click(sq("g1")));
        game.tick(click(sq("f3")));

        let mut frames = Vec::new();
        while let Some(frame) = game.animation_frame() {
            frames.push((frame.index, frame.row, frame.col));
            // Presses during playback are ignored
            game.tick(click(sq("e7")));
        }
        assert_eq!(frames.len(), 3 * 5 + 1);
        assert_eq!(frames.first().map(|f| (f.1, f.2)), Some((7.0, 6.0)));
        assert_eq!(frames.last().map(|f| (f.1, f.2)), Some((5.0, 5.0)));
        // Only the press in the tick that ended playback was handled
        assert_eq!(game.selection().cells(), &[sq("e7")]);
    }

    #[test]
    fn checkmate_freezes_the_game() {
        let mut game = coordinator(true, true, Script::Hang);
        play(&mut game, "f2", "f3");
        play(&mut game, "e7", "e5");
        play(&mut game, "g2", "g4");
        game.tick(click(sq("d8")));
        game.tick(click(sq("h4")));

        assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Side::Black }));
        assert!(game.state().checkmate);
        assert!(game.is_frozen());
        assert!(game.valid_moves().is_empty());

        settle(&mut game);
        let fen = game.state().fen();
        game.tick(click(sq("a2")));
        game.tick(click(sq("a3")));
        assert_eq!(game.state().fen(), fen);
        assert_eq!(game.state().history.len(), 4);
    }

    #[test]
    fn stalemating_move_freezes_after_playback() {
        let state = GameState::from_fen("7k/8/5Q2/8/8/8/8/6K1 w - - 0 1").expect("fen");
        let mut game = coordinator(true, true, Script::Hang).with_state(state);
        assert!(!game.is_frozen());

        game.tick(click(sq("f6")));
        game.tick(click(sq("f7")));
        assert_eq!(game.outcome(), Some(Outcome::Stalemate));
        assert!(game.state().stalemate);
        assert!(game.is_frozen());
        assert_eq!(game.announced_outcome(), None);

        settle(&mut game);
        assert_eq!(game.announced_outcome(), Some(Outcome::Stalemate));
        let fen = game.state().fen();
        game.tick(click(sq("h8")));
        game.tick(click(sq("g8")));
        game.tick(click(sq("g1")));
        game.tick(click(sq("g2")));
        assert_eq!(game.state().fen(), fen);
        assert_eq!(game.state().history.len(), 1);
    }

    #[test]
    fn terminal_start_position_is_frozen() {
        let state = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("fen");
        let game = coordinator(true, false, Script::Hang).with_state(state);
        assert_eq!(game.announced_outcome(), Some(Outcome::Stalemate));
        assert!(game.valid_moves().is_empty());
    }

    #[test]
    fn ai_turn_spawns_one_search_and_applies_result() {
        let mut game = coordinator(true, false, Script::FinishAfter {
            polls: 2,
            reply: ScriptedReply::Uci("e7e5".to_string()),
        });
        // The search starts in the tick that ends the e4 playback
        play(&mut game, "e2", "e4");
        assert_eq!(game.search_phase(), SearchPhase::Searching);

        game.tick(TickInput::default());
        assert_eq!(game.search_phase(), SearchPhase::Searching);
        assert_eq!(game.state().history.len(), 1);
        game.tick(TickInput::default());

        assert_eq!(game.state().history.len(), 2);
        assert_eq!(game.state().history[1].to_uci(), "e7e5");
        assert_eq!(game.search_phase(), SearchPhase::Idle);
        assert_eq!(game.supervisor().launcher().ledger.borrow().launched, 1);
    }

    #[test]
    fn at_most_one_worker_alive_in_ai_vs_ai() {
        let mut game = coordinator(false, false, Script::FinishAfter {
            polls: 1,
            reply: ScriptedReply::FirstMove,
        });
        for _ in 0..200 {
            game.tick(TickInput::default());
            let ledger = game.supervisor().launcher().ledger.borrow();
            assert!(ledger.live <= 1);
        }
        let ledger = game.supervisor().launcher().ledger.borrow();
        assert_eq!(ledger.max_live, 1);
        assert!(ledger.launched > 1);
    }

    #[test]
    fn sentinel_reply_applies_a_legal_random_move() {
        let mut game = coordinator(true, false, Script::FinishAfter {
            polls: 0,
            reply: ScriptedReply::Sentinel,
        });
        game.tick(click(sq("d2")));
        game.tick(click(sq("d4")));
        let legal = game.valid_moves().to_vec();

        settle(&mut game);
        assert_eq!(game.state().history.len(), 2);
        assert!(legal.contains(&game.state().history[1]));
    }

    #[test]
    fn reset_from_any_state_restores_initial_position() {
        // Mid-search
        let mut game = coordinator(false, true, Script::Hang);
        game.tick(TickInput::default());
        assert_eq!(game.search_phase(), SearchPhase::Searching);
        game.tick(TickInput::reset());
        assert_eq!(game.search_phase(), SearchPhase::Idle);
        assert_eq!(game.state().fen(), START_FEN);
        assert!(game.selection().is_empty());
        assert!(!game.is_frozen());
        assert_eq!(game.supervisor().launcher().ledger.borrow().terminated, 1);

        // Mid-animation with a pending selection
        let mut game = coordinator(true, true, Script::Hang);
        game.tick(click(sq("e2")));
        game.tick(click(sq("e4")));
        assert!(game.animation_frame().is_some());
        game.tick(TickInput::reset());
        assert!(game.animation_frame().is_none());
        assert_eq!(game.state().fen(), START_FEN);
        assert_eq!(game.valid_moves().len(), 20);

        // Frozen
        let mut game = coordinator(true, true, Script::Hang);
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            play(&mut game, from, to);
        }
        assert!(game.is_frozen());
        game.tick(TickInput::reset());
        assert!(!game.is_frozen());
        assert!(!game.state().checkmate);
        assert_eq!(game.state().fen(), START_FEN);
    }

    #[test]
    fn cancelled_search_result_is_never_applied() {
        let mut game = coordinator(false, true, Script::FinishAfter {
            polls: 5,
            reply: ScriptedReply::FirstMove,
        });
        game.tick(TickInput::default());
        game.tick(TickInput::default());
        assert_eq!(game.search_phase(), SearchPhase::Searching);

        game.tick(TickInput::reset());
        {
            let ledger = game.supervisor().launcher().ledger.borrow();
            assert_eq!(ledger.terminated, 1);
            assert_eq!(ledger.delivered, 0);
        }
        assert!(game.state().history.is_empty());

        // The next search is a fresh task; only its reply is applied
        for _ in 0..7 {
            game.tick(TickInput::default());
        }
        let ledger = game.supervisor().launcher().ledger.borrow();
        assert_eq!(ledger.launched, 2);
        assert_eq!(ledger.delivered, 1);
        assert_eq!(game.state().history.len(), 1);
    }

    #[test]
    fn undo_returns_turn_to_human() {
        let mut game = coordinator(true, false, Script::FinishAfter {
            polls: 0,
            reply: ScriptedReply::FirstMove,
        });
        play(&mut game, "e2", "e4");
        game.tick(TickInput::default());
        settle(&mut game);
        assert_eq!(game.state().history.len(), 2);

        game.tick(TickInput::undo());
        assert!(game.state().history.is_empty());
        assert!(game.is_human_turn());
        assert_eq!(game.state().fen(), START_FEN);
    }

    #[test]
    fn undo_mid_search_cancels_and_pops_human_move() {
        let mut game = coordinator(true, false, Script::Hang);
        play(&mut game, "e2", "e4");
        game.tick(TickInput::default());
        assert_eq!(game.search_phase(), SearchPhase::Searching);

        game.tick(TickInput::undo());
        assert_eq!(game.search_phase(), SearchPhase::Idle);
        assert!(game.state().history.is_empty());
        assert_eq!(game.supervisor().launcher().ledger.borrow().terminated, 1);
    }

    #[test]
    fn undo_with_empty_history_only_cancels_search() {
        let mut game = coordinator(false, true, Script::Hang);
        game.tick(TickInput::default());
        assert_eq!(game.search_phase(), SearchPhase::Searching);

        game.tick(TickInput::undo());
        assert_eq!(game.search_phase(), SearchPhase::Idle);
        assert!(game.state().history.is_empty());
        assert_eq!(game.state().fen(), START_FEN);
        assert_eq!(game.supervisor().launcher().ledger.borrow().terminated, 1);

        // White is still the AI, so the next tick searches afresh
        game.tick(TickInput::default());
        assert_eq!(game.search_phase(), SearchPhase::Searching);
        let ledger = game.supervisor().launcher().ledger.borrow();
        assert_eq!(ledger.launched, 2);
        assert_eq!(ledger.max_live, 1);
    }

    #[test]
    fn undo_between_humans_pops_one_move() {
        let mut game = coordinator(true, true, Script::Hang);
        play(&mut game, "e2", "e4");
        play(&mut game, "e7", "e5");
        game.tick(TickInput::undo());
        assert_eq!(game.state().history.len(), 1);
        assert!(!game.state().white_to_move());
    }

    #[test]
    fn frame_interval_speeds_up_during_playback() {
        let mut game = coordinator(true, true, Script::Hang);
        let idle = game.frame_interval();
        game.tick(click(sq("e2")));
        game.tick(click(sq("e4")));
        assert!(game.frame_interval() < idle);
    }
}
