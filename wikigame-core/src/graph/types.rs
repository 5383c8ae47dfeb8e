use serde::{Deserialize, Serialize};

/// A point on the game board.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(&self, other: &Position) -> Position {
        Position {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A seed or generated topic on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub label: String,
    pub position: Position,
    /// Set on the nodes produced by the most recent action.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_bold: bool,
    /// Action color of the most recent batch (cleared with `is_bold`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            is_bold: false,
            border_color: None,
        }
    }

    /// Mark the node as part of the latest batch.
    pub fn highlighted(mut self, color: &str) -> Self {
        self.is_bold = true;
        self.border_color = Some(color.to_string());
        self
    }
}

/// Provenance: `target` was generated from `source` via `relation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Action name ("broader", "intersection", ...). Empty when the
    /// producer did not record one.
    #[serde(default, alias = "actionType")]
    pub relation: String,
}

impl Edge {
    /// Edge with the conventional `e-<source>-<target>` id.
    pub fn between(source: &str, target: &str, relation: &str) -> Self {
        Self {
            id: format!("e-{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            relation: relation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_midpoint() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.midpoint(&b), Position::new(1.5, 2.0));
    }

    #[test]
    fn test_node_json_shape() {
        let node = Node::new("0", "USA", Position::ORIGIN);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"id":"0","label":"USA","position":{"x":0.0,"y":0.0}}"#);

        let bold: Node = serde_json::from_str(
            r#"{"id":"1","label":"Canada","position":{"x":1,"y":2},"isBold":true}"#,
        )
        .unwrap();
        assert!(bold.is_bold);
        assert_eq!(bold.border_color, None);
    }

    #[test]
    fn test_edge_accepts_action_type_alias() {
        let edge: Edge = serde_json::from_str(
            r#"{"id":"e-0-1","source":"0","target":"1","actionType":"broader"}"#,
        )
        .unwrap();
        assert_eq!(edge.relation, "broader");

        let bare: Edge = serde_json::from_str(r#"{"id":"e","source":"0","target":"1"}"#).unwrap();
        assert!(bare.relation.is_empty());
    }

    #[test]
    fn test_edge_between_id() {
        let edge = Edge::between("0", "0-broader-1-0", "broader");
        assert_eq!(edge.id, "e-0-0-broader-1-0");
    }
}
