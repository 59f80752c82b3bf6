//! Search worker as a separate OS process
//!
//! The GUI side launches the worker with [`ProcessLauncher`]; the snapshot is
//! written to the child's stdin and the reply is read from its stdout once the
//! child has exited. The worker side is [`serve_search_request`], run by the
//! binary's `search` subcommand.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Stdio};

use log::{debug, info, warn};

use super::protocol::{SearchReply, SearchRequest};
use super::{SearchWorker, WorkerLauncher};
use crate::error::{GameError, GameResult};
use crate::rules::{GameState, Move};
use crate::search::find_best_move;

/// Launches worker processes from a program path and fixed arguments
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ProcessLauncher {
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Re-run the current executable in `search` mode
    pub fn current_exe() -> GameResult<Self> {
        let exe = std::env::current_exe().map_err(GameError::WorkerSpawn)?;
        Ok(Self::new(exe, ["search"]))
    }
}

impl WorkerLauncher for ProcessLauncher {
    type Worker = ProcessWorker;

    fn launch(&mut self, request: &SearchRequest) -> GameResult<ProcessWorker> {
        let payload = serde_json::to_string(request)?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(GameError::WorkerSpawn)?;

        info!(
            "spawned search worker pid {} (generation {})",
            child.id(),
            request.generation
        );

        // Dropping stdin after the write closes it, so the worker sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = writeln!(stdin, "{}", payload) {
                warn!("search worker did not accept its snapshot: {}", e);
            }
        }

        let stdout = child.stdout.take();
        Ok(ProcessWorker {
            child,
            stdout,
            exited: false,
        })
    }
}

/// Handle to a running worker process. Killed on drop.
#[derive(Debug)]
pub struct ProcessWorker {
    child: Child,
    stdout: Option<ChildStdout>,
    exited: bool,
}

impl SearchWorker for ProcessWorker {
    fn is_alive(&mut self) -> bool {
        if self.exited {
            return false;
        }
        match self.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!("search worker {} exited with {}", self.child.id(), status);
                self.exited = true;
                false
            }
            Err(e) => {
                warn!("could not poll search worker: {}", e);
                self.exited = true;
                false
            }
        }
    }

    fn take_reply(&mut self) -> Option<SearchReply> {
        let mut stdout = self.stdout.take()?;
        let mut text = String::new();
        if let Err(e) = stdout.read_to_string(&mut text) {
            warn!("could not read search worker output: {}", e);
            return None;
        }
        let line = text.lines().rev().find(|l| !l.trim().is_empty())?;
        match serde_json::from_str(line) {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!("search worker wrote an unreadable reply: {}", e);
                None
            }
        }
    }

    fn terminate(&mut self) {
        // Unread output is discarded with the pipe
        self.stdout = None;
        if self.exited {
            return;
        }
        if let Err(e) = self.child.kill() {
            debug!("kill of search worker {} failed: {}", self.child.id(), e);
        }
        if let Err(e) = self.child.wait() {
            warn!("could not reap search worker {}: {}", self.child.id(), e);
        }
        self.exited = true;
    }
}

impl Drop for ProcessWorker {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Compute the reply for a snapshot
pub fn answer(request: &SearchRequest) -> SearchReply {
    let best_move = match GameState::from_fen(&request.fen) {
        Ok(state) => {
            let snapshot: Vec<Move> = state
                .valid_moves()
                .into_iter()
                .filter(|m| request.valid_moves.iter().any(|uci| *uci == m.to_uci()))
                .collect();
            find_best_move(&state, &snapshot, request.depth).map(|m| m.to_uci())
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    };
    SearchReply {
        generation: request.generation,
        best_move,
    }
}

/// Worker entry point: read one request, write one reply line
pub fn serve_search_request<R: Read, W: Write>(input: R, mut output: W) -> GameResult<()> {
    let request: SearchRequest = serde_json::from_reader(input)?;
    debug!(
        "worker received generation {} with {} moves",
        request.generation,
        request.valid_moves.len()
    );
    let reply = answer(&request);
    serde_json::to_writer(&mut output, &reply)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
