//! Winning-path backtrace.
//!
//! Walks provenance edges backwards from the node that matched the target
//! word to the root, so the board can show how the player got there.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actions::INTERSECTION;
use crate::graph::{Edge, Node};

/// One hop of the winning path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub from: String,
    pub to: String,
    pub relation: String,
}

impl PathStep {
    fn new(from: impl Into<String>, to: &str, relation: &str) -> Self {
        Self {
            from: from.into(),
            to: to.to_string(),
            relation: relation.to_string(),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relation == INTERSECTION {
            write!(f, "Intersection of {} → {}", self.from, self.to)
        } else {
            write!(f, "{} → {} ({})", self.from, self.to, self.relation)
        }
    }
}

/// The path as shareable text, one step per line.
pub fn format_path(steps: &[PathStep]) -> String {
    steps
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trace the path from the root to the first node whose label contains
/// `target_label` (case-insensitive). Returns an empty path when no node
/// matches.
///
/// A node with exactly two parents is an intersection: both parents are
/// named in one step and the walk continues from the first parent only.
/// Edges pointing at unknown nodes end the walk early.
pub fn find_winning_path(nodes: &[Node], edges: &[Edge], target_label: &str) -> Vec<PathStep> {
    let target = target_label.to_lowercase();
    let Some(end) = nodes.iter().find(|n| n.label.to_lowercase().contains(&target)) else {
        return Vec::new();
    };

    let mut by_id: HashMap<&str, &Node> = HashMap::new();
    for node in nodes {
        by_id.entry(node.id.as_str()).or_insert(node);
    }
    let mut incoming: HashMap<&str, Vec<&Edge>> = HashMap::new();
    for edge in edges {
        incoming.entry(edge.target.as_str()).or_default().push(edge);
    }

    let mut steps: Vec<PathStep> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = end;

    // A revisit only happens on malformed, cyclic input.
    while visited.insert(current.id.as_str()) {
        let parents: &[&Edge] = incoming
            .get(current.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if parents.is_empty() {
            break;
        }

        if let [first, second] = parents {
            let p1 = by_id.get(first.source.as_str());
            let p2 = by_id.get(second.source.as_str());
            if let (Some(&p1), Some(&p2)) = (p1, p2) {
                steps.push(PathStep::new(
                    format!("{} and {}", p1.label, p2.label),
                    &current.label,
                    INTERSECTION,
                ));
                current = p1;
                continue;
            }
        }

        let edge = parents[0];
        let Some(&parent) = by_id.get(edge.source.as_str()) else {
            break;
        };
        let relation = if edge.relation.is_empty() { "unknown" } else { edge.relation.as_str() };
        steps.push(PathStep::new(parent.label.as_str(), &current.label, relation));
        current = parent;
    }

    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;

    fn node(id: &str, label: &str) -> Node {
        Node::new(id, label, Position::ORIGIN)
    }

    fn edge(source: &str, target: &str, relation: &str) -> Edge {
        Edge::between(source, target, relation)
    }

    #[test]
    fn test_single_hop_substring_match() {
        let nodes = vec![node("0", "USA"), node("0-broader-1", "North America")];
        let edges = vec![edge("0", "0-broader-1", "broader")];

        let path = find_winning_path(&nodes, &edges, "america");
        assert_eq!(
            path,
            vec![PathStep {
                from: "USA".to_string(),
                to: "North America".to_string(),
                relation: "broader".to_string(),
            }]
        );
    }

    #[test]
    fn test_linear_chain_is_root_first() {
        // root -> A -> B
        let nodes = vec![node("0", "Dinosaur"), node("a", "Fossil"), node("b", "Fossil fuel")];
        let edges = vec![edge("0", "a", "deeper"), edge("a", "b", "similar")];

        let path = find_winning_path(&nodes, &edges, "fuel");
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], PathStep::new("Dinosaur", "Fossil", "deeper"));
        assert_eq!(path[1], PathStep::new("Fossil", "Fossil fuel", "similar"));
    }

    #[test]
    fn test_no_match_is_empty() {
        let nodes = vec![node("0", "USA"), node("a", "Canada")];
        let edges = vec![edge("0", "a", "similar")];
        assert!(find_winning_path(&nodes, &edges, "Elon Musk").is_empty());
    }

    #[test]
    fn test_first_matching_node_wins() {
        let nodes = vec![node("0", "USA"), node("a", "Oil"), node("b", "Oil painting")];
        let edges = vec![edge("0", "a", "deeper"), edge("0", "b", "deeper")];

        let path = find_winning_path(&nodes, &edges, "OIL");
        assert_eq!(path, vec![PathStep::new("USA", "Oil", "deeper")]);
    }

    #[test]
    fn test_intersection_follows_first_parent_only() {
        // root -> P1, root -> X -> P2, (P1, P2) -> I
        let nodes = vec![
            node("0", "Pizza"),
            node("p1", "Naples"),
            node("x", "Cheese"),
            node("p2", "Mozzarella"),
            node("i", "Italy"),
        ];
        let edges = vec![
            edge("0", "p1", "places"),
            edge("0", "x", "deeper"),
            edge("x", "p2", "deeper"),
            edge("p1", "i", INTERSECTION),
            edge("p2", "i", INTERSECTION),
        ];

        let path = find_winning_path(&nodes, &edges, "italy");
        assert_eq!(
            path,
            vec![
                PathStep::new("Pizza", "Naples", "places"),
                PathStep::new("Naples and Mozzarella", "Italy", INTERSECTION),
            ]
        );
    }

    #[test]
    fn test_intersection_with_missing_parent_uses_first_edge() {
        let nodes = vec![node("0", "Pizza"), node("i", "Italy")];
        let edges = vec![edge("0", "i", INTERSECTION), edge("ghost", "i", INTERSECTION)];

        let path = find_winning_path(&nodes, &edges, "Italy");
        assert_eq!(path, vec![PathStep::new("Pizza", "Italy", INTERSECTION)]);
    }

    #[test]
    fn test_dangling_edge_truncates_path() {
        // a's parent does not exist: the walk stops after b's step.
        let nodes = vec![node("0", "USA"), node("a", "Texas"), node("b", "Austin")];
        let edges = vec![edge("missing", "a", "deeper"), edge("a", "b", "places")];

        let path = find_winning_path(&nodes, &edges, "austin");
        assert_eq!(path, vec![PathStep::new("Texas", "Austin", "places")]);
    }

    #[test]
    fn test_cycle_does_not_loop() {
        let nodes = vec![node("a", "Chicken"), node("b", "Egg")];
        let edges = vec![edge("a", "b", "past"), edge("b", "a", "future")];

        let path = find_winning_path(&nodes, &edges, "egg");
        assert_eq!(path.len(), 2);
        assert_eq!(path[1], PathStep::new("Chicken", "Egg", "past"));
    }

    #[test]
    fn test_missing_relation_reads_unknown() {
        let nodes = vec![node("0", "USA"), node("a", "Canada")];
        let e = edge("0", "a", "");

        let path = find_winning_path(&nodes, &[e], "canada");
        assert_eq!(path[0].relation, "unknown");
    }

    #[test]
    fn test_format_path() {
        let steps = vec![
            PathStep::new("USA", "North America", "broader"),
            PathStep::new("North America and Tesla", "Elon Musk", INTERSECTION),
        ];
        assert_eq!(
            format_path(&steps),
            "USA → North America (broader)\nIntersection of North America and Tesla → Elon Musk"
        );
        assert_eq!(format_path(&[]), "");
    }
}
