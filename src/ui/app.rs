//! Main application for the chess GUI

use eframe::egui;
use egui::{
    CentralPanel, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel, TopBottomPanel,
};

use super::board_view::BoardView;
use super::theme::Theme;
use crate::board::Side;
use crate::turn::{TickInput, TurnCoordinator};

/// Main chess application
pub struct ChessApp {
    game: TurnCoordinator,
    board_view: BoardView,
    theme: Theme,
    /// Commands from buttons, applied on the next tick
    pending: TickInput,
}

impl ChessApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, game: TurnCoordinator) -> Self {
        Self {
            game,
            board_view: BoardView::default(),
            theme: Theme::default(),
            pending: TickInput::default(),
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("Reset (R)").clicked() {
                        self.pending.reset = true;
                        ui.close_menu();
                    }
                    if ui.button("Undo (U)").clicked() {
                        self.pending.undo = true;
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let config = self.game.config();
                    ui.label(format!(
                        "White: {}  Black: {}",
                        controller_name(config.is_human(Side::White)),
                        controller_name(config.is_human(Side::Black)),
                    ));
                });
            });
        });
    }

    /// Render the side panel with game info
    fn render_side_panel(&mut self, ctx: &Context) {
        let theme = self.theme.clone();
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(theme.panel_bg))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title(ui, &theme);
                ui.add_space(12.0);

                self.render_turn_card(ui, &theme);
                ui.add_space(10.0);

                self.render_actions_card(ui, &theme);
                ui.add_space(10.0);

                self.render_history_card(ui, &theme);
            });
    }

    fn card_frame(theme: &Theme) -> Frame {
        Frame::new()
            .fill(theme.card_bg)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title(&self, ui: &mut egui::Ui, theme: &Theme) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("CHESS").size(22.0).strong().color(theme.text_primary));
        });
    }

    /// Side to move and what the game is waiting on
    fn render_turn_card(&self, ui: &mut egui::Ui, theme: &Theme) {
        Self::card_frame(theme).show(ui, |ui| {
            let side = self.game.state().side_to_move();
            ui.label(
                RichText::new(side.name().to_uppercase())
                    .size(18.0)
                    .strong()
                    .color(theme.text_primary),
            );

            let (status, color) = if let Some(outcome) = self.game.announced_outcome() {
                (outcome.message().to_string(), theme.status_over)
            } else if self.game.animation_frame().is_some() {
                ("Moving...".to_string(), theme.text_secondary)
            } else if self.game.supervisor().is_searching() {
                let secs = self
                    .game
                    .supervisor()
                    .elapsed()
                    .map_or(0.0, |elapsed| elapsed.as_secs_f32());
                (format!("AI thinking... {:.1}s", secs), theme.status_thinking)
            } else if self.game.is_human_turn() {
                ("Your turn".to_string(), theme.status_ok)
            } else {
                ("Waiting for AI".to_string(), theme.text_secondary)
            };
            ui.label(RichText::new(status).size(12.0).color(color));

            if self.game.state().in_check() && !self.game.is_frozen() {
                ui.label(RichText::new("Check").size(12.0).strong().color(theme.status_thinking));
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        Self::card_frame(theme).show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(theme.text_muted));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    self.pending.reset = true;
                }
                if ui.button("Undo").clicked() {
                    self.pending.undo = true;
                }
            });
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.game.state().history.len()))
                    .size(11.0)
                    .color(theme.text_secondary),
            );
        });
    }

    /// Move list, one numbered row per full move
    fn render_history_card(&self, ui: &mut egui::Ui, theme: &Theme) {
        Self::card_frame(theme).show(ui, |ui| {
            ui.label(RichText::new("MOVES").size(10.0).color(theme.text_muted));
            ui.add_space(6.0);
            ScrollArea::vertical()
                .max_height(320.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for (number, pair) in self.game.state().history.chunks(2).enumerate() {
                        let white = pair[0].to_string();
                        let black = pair.get(1).map(|mv| mv.to_string()).unwrap_or_default();
                        ui.label(
                            RichText::new(format!("{:>3}. {:<8} {}", number + 1, white, black))
                                .monospace()
                                .size(12.0)
                                .color(theme.text_primary),
                        );
                    }
                });
        });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            self.board_view.show(ui, &self.game, &self.theme);
        });
    }

    /// Gather this tick's input: keyboard shortcuts, button commands and the
    /// pointer press (mapped through last frame's board layout)
    fn collect_input(&mut self, ctx: &Context) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        ctx.input(|i| {
            // R - Reset
            if i.key_pressed(egui::Key::R) {
                input.reset = true;
            }
            // U - Undo
            if i.key_pressed(egui::Key::U) {
                input.undo = true;
            }
        });
        input.press = self.board_view.pointer_press(ctx);
        input
    }
}

fn controller_name(human: bool) -> &'static str {
    if human {
        "Human"
    } else {
        "AI"
    }
}

impl eframe::App for ChessApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let input = self.collect_input(ctx);
        self.game.tick(input);

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        ctx.request_repaint_after(self.game.frame_interval());
    }
}
