// Session graph store.
//
// Owns the node/edge collections for one game. The graph only grows:
// nodes and edges are appended in batches and never removed, except by
// `reset`, which clears everything and re-seeds the root.

use serde::Serialize;

use super::{Edge, Node, Position};

/// Id of the seed node every game starts from.
pub const ROOT_ID: &str = "0";

#[derive(Debug, Clone, Serialize)]
pub struct GameGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GameGraph {
    /// A graph holding only the root topic at the origin.
    pub fn new(start_word: &str) -> Self {
        Self {
            nodes: vec![Node::new(ROOT_ID, start_word, Position::ORIGIN)],
            edges: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn positions(&self) -> Vec<Position> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    /// Labels of the nodes generated from `node_id` through `relation`.
    pub fn neighboring_topics(&self, node_id: &str, relation: &str) -> Vec<&str> {
        let targets: Vec<&str> = self
            .edges
            .iter()
            .filter(|e| e.source == node_id && e.relation == relation)
            .map(|e| e.target.as_str())
            .collect();

        self.nodes
            .iter()
            .filter(|n| targets.contains(&n.id.as_str()))
            .map(|n| n.label.as_str())
            .collect()
    }

    /// Whether `topic` was already generated from `node_id` through `relation`.
    /// Labels compare case-insensitively.
    pub fn is_neighbor(&self, node_id: &str, topic: &str, relation: &str) -> bool {
        let topic = topic.to_lowercase();
        self.neighboring_topics(node_id, relation)
            .iter()
            .any(|label| label.to_lowercase() == topic)
    }

    /// Drop the "latest batch" highlight from every node.
    pub fn clear_highlights(&mut self) {
        for node in &mut self.nodes {
            node.is_bold = false;
            node.border_color = None;
        }
    }

    /// Append a batch of nodes and the edges that produced them.
    pub fn extend(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.nodes.extend(nodes);
        self.edges.extend(edges);
    }

    pub fn reset(&mut self, start_word: &str) {
        *self = Self::new(start_word);
    }
}
