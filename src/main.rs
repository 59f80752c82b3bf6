//! Chess GUI
//!
//! Runs the game window by default. The `search` subcommand turns the
//! process into a one-shot AI worker: it reads a request from stdin and
//! writes its reply to stdout.

use std::io;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use log::info;

use chess_gui::supervisor::serve_search_request;
use chess_gui::ui::ChessApp;
use chess_gui::{Controller, GameConfig, TurnCoordinator};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against a cancellable AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Who plays White
    #[arg(long, value_enum, default_value_t = Controller::Human)]
    white: Controller,

    /// Who plays Black
    #[arg(long, value_enum, default_value_t = Controller::Ai)]
    black: Controller,

    /// AI search depth in plies
    #[arg(long, default_value_t = 3)]
    depth: u8,

    /// Target frames per second outside animations
    #[arg(long, default_value_t = 15)]
    fps: u32,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer one search request on stdin (used by the GUI's worker processes)
    Search,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(Command::Search) = cli.command {
        let stdin = io::stdin();
        let stdout = io::stdout();
        serve_search_request(stdin.lock(), stdout.lock()).context("search worker failed")?;
        return Ok(());
    }

    let config = GameConfig {
        search_depth: cli.depth.max(1),
        max_fps: cli.fps.max(1),
        ..GameConfig::with_controllers(cli.white, cli.black)
    };
    info!(
        "starting game: white={:?} black={:?} depth={} fps={}",
        cli.white, cli.black, config.search_depth, config.max_fps
    );
    let game = TurnCoordinator::with_process_worker(config)
        .context("failed to locate worker executable")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 580.0])
            .with_min_inner_size([780.0, 560.0])
            .with_title("Chess"),
        ..Default::default()
    };

    eframe::run_native(
        "Chess",
        options,
        Box::new(move |cc| Ok(Box::new(ChessApp::new(cc, game)))),
    )
    .map_err(|e| anyhow!("GUI error: {e}"))
}
