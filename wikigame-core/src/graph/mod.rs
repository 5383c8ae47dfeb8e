mod store;
mod types;

pub use store::{GameGraph, ROOT_ID};
pub use types::{Edge, Node, Position};
