//! Core of the word-association game.
//!
//! A game starts from one word and tries to reach a target word by asking a
//! language model for related topics. Each answer grows a graph of topics on
//! a 2D board; the game is won when a new topic contains the target.
//!
//! - [`graph`]: nodes, edges and the board that holds them
//! - [`layout`]: collision-free placement of new nodes
//! - [`path`]: backtracing from the target to the start word
//! - [`session`]: one game, applying model responses to the board
//! - [`wasm`]: JSON bindings for the browser frontend

pub mod actions;
pub mod config;
pub mod daily;
pub mod error;
pub mod graph;
pub mod layout;
pub mod output;
pub mod path;
pub mod request;
pub mod session;
pub mod topics;
pub mod wasm;

pub use actions::ActionType;
pub use config::GameConfig;
pub use daily::{DailyWords, WordPair};
pub use error::{ConfigError, GameError, PlacementError};
pub use graph::{Edge, GameGraph, Node, Position};
pub use layout::{PlacementConfig, plan_positions};
pub use path::{PathStep, find_winning_path, format_path};
pub use session::{ActionOutcome, GameSession};
