//! Error types for the game core.
//!
//! The planner and backtracer fail soft wherever they can; the variants here
//! cover invalid input and the game-level failures the board reports to the
//! player.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("invalid placement input: {0}")]
    InvalidInput(String),

    /// The spiral fallback ran out of rings before placing every node.
    #[error("placed {placed} of {requested} nodes within {rings} spiral rings")]
    Exhausted {
        placed: usize,
        requested: usize,
        rings: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("node '{0}' not found")]
    UnknownNode(String),

    #[error("cannot intersect a node with itself")]
    SameNode,

    #[error("No topics generated")]
    NoTopics,

    #[error("No intersection topics generated")]
    NoIntersectionTopics,

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("daily word date '{date}' is not a YYYY-MM-DD date")]
    InvalidDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{0}'")]
pub struct ParseActionError(pub String);
