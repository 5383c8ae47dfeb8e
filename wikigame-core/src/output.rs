//! Output types for frontend consumption.
//!
//! These structs are serialized to JSON and handed to the frontend, which
//! renders the board from them.

use serde::Serialize;

use crate::graph::{Edge, Node};
use crate::session::{ActionOutcome, GameSession};

/// Error information shown next to the board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

impl ErrorInfo {
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self { message: err.to_string() }
    }
}

/// The combined board state sent to the frontend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutput {
    pub start_word: String,
    pub end_word: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub has_won: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub winning_path: String,
    /// Ids added by the call that produced this output
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl GameOutput {
    pub fn from_session(session: &GameSession) -> Self {
        let words = session.words();
        Self {
            start_word: words.start.clone(),
            end_word: words.end.clone(),
            nodes: session.graph().nodes().to_vec(),
            edges: session.graph().edges().to_vec(),
            has_won: session.has_won(),
            winning_path: session.winning_path_text(),
            added: Vec::new(),
            error: None,
        }
    }

    pub fn with_outcome(mut self, outcome: ActionOutcome) -> Self {
        self.added = outcome.added;
        self
    }

    /// Board state is still reported alongside the error, so the frontend
    /// never loses what it already shows.
    pub fn with_error(mut self, err: impl std::fmt::Display) -> Self {
        self.error = Some(ErrorInfo::new(err));
        self
    }
}

/// JSON for results that carry no board, e.g. `{"error": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ResultOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl<T: Serialize> ResultOutput<T> {
    pub fn from_result<E: std::fmt::Display>(res: Result<T, E>) -> Self {
        match res {
            Ok(result) => Self { result: Some(result), error: None },
            Err(e) => Self { result: None, error: Some(ErrorInfo::new(e)) },
        }
    }
}
