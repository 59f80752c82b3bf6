//! Messages exchanged with the search worker
//!
//! Exactly one message travels in each direction: a [`SearchRequest`]
//! snapshot at spawn and a [`SearchReply`] when the worker finishes.

use serde::{Deserialize, Serialize};

/// Snapshot handed to the worker. It is a copy; the GUI keeps mutating its
/// own state without affecting the worker's view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Identifies the search task this snapshot belongs to
    pub generation: u64,
    pub fen: String,
    /// Legal moves at snapshot time, in coordinate notation
    pub valid_moves: Vec<String>,
    pub depth: u8,
}

/// One-shot result. `best_move: None` is the empty sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReply {
    pub generation: u64,
    pub best_move: Option<String>,
}
