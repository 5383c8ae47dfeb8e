// Game session.
//
// One game from start word to target word. The session owns the graph and
// the win state and applies model responses to the board:
//
//   response -> parse -> filter -> place -> nodes + edges -> win check
//
// Every apply call is one batch: either all new nodes and edges land in the
// graph, or (on error) the graph is left exactly as it was.

use chrono::NaiveDate;
use log::{debug, info};

use crate::actions::{self, ActionType, INTERSECTION, INTERSECTION_COLOR};
use crate::config::GameConfig;
use crate::daily::WordPair;
use crate::error::GameError;
use crate::graph::{Edge, GameGraph, Node};
use crate::layout::plan_positions;
use crate::path::{self, PathStep};
use crate::topics::{filter_new_topics, parse_topics};

/// What one applied action added to the board.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    /// Ids of the new nodes, in topic order.
    pub added: Vec<String>,
    /// Whether this batch contained the target word.
    pub won: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    words: WordPair,
    graph: GameGraph,
    has_won: bool,
    winning_path: Vec<PathStep>,
}

impl GameSession {
    pub fn new(config: GameConfig, words: WordPair) -> Self {
        let graph = GameGraph::new(&words.start);
        Self {
            config,
            words,
            graph,
            has_won: false,
            winning_path: Vec::new(),
        }
    }

    /// A session playing the configured word pair for `date`.
    pub fn for_date(config: GameConfig, date: NaiveDate) -> Self {
        let words = config.daily_words.for_date(date).clone();
        Self::new(config, words)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn words(&self) -> &WordPair {
        &self.words
    }

    pub fn graph(&self) -> &GameGraph {
        &self.graph
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn winning_path(&self) -> &[PathStep] {
        &self.winning_path
    }

    pub fn winning_path_text(&self) -> String {
        path::format_path(&self.winning_path)
    }

    fn node(&self, id: &str) -> Result<&Node, GameError> {
        self.graph
            .node(id)
            .ok_or_else(|| GameError::UnknownNode(id.to_string()))
    }

    fn node_pair(&self, first_id: &str, second_id: &str) -> Result<(Node, Node), GameError> {
        if first_id == second_id {
            return Err(GameError::SameNode);
        }
        Ok((self.node(first_id)?.clone(), self.node(second_id)?.clone()))
    }

    /// Prompt for running `action` on a node.
    pub fn prompt_for(&self, node_id: &str, action: ActionType) -> Result<String, GameError> {
        let node = self.node(node_id)?;
        let neighbors = self.graph.neighboring_topics(node_id, action.as_str());
        let prompt = actions::build_prompt(action, &node.label, self.config.max_topics, &neighbors);
        debug!("prompt for {} on '{}': {}", action, node.label, prompt);
        Ok(prompt)
    }

    /// Prompt for intersecting two nodes.
    pub fn intersection_prompt(&self, first_id: &str, second_id: &str) -> Result<String, GameError> {
        let (first, second) = self.node_pair(first_id, second_id)?;
        let prompt = actions::build_intersection_prompt(&first.label, &second.label, self.config.max_topics);
        debug!("intersection prompt for '{}' x '{}': {}", first.label, second.label, prompt);
        Ok(prompt)
    }

    /// Apply the model's response to `action` on `node_id`.
    pub fn apply_action(
        &mut self,
        node_id: &str,
        action: ActionType,
        response: &str,
        timestamp_ms: u64,
    ) -> Result<ActionOutcome, GameError> {
        let parent = self.node(node_id)?.clone();
        let relation = action.as_str();

        debug!("raw response for {} on '{}': {:?}", action, parent.label, response);
        let topics = filter_new_topics(
            parse_topics(response, self.config.max_topics),
            &[parent.label.as_str()],
            |topic| self.graph.is_neighbor(&parent.id, topic, relation),
        );
        if topics.is_empty() {
            return Err(GameError::NoTopics);
        }

        let positions = plan_positions(
            parent.position,
            topics.len(),
            &self.graph.positions(),
            &self.config.placement,
        )?;

        let id_for = |stamp: u64, i: usize| format!("{}-{}-{}-{}", parent.id, relation, stamp, i);
        let stamp = self.free_stamp(timestamp_ms, topics.len(), &id_for);
        let nodes: Vec<Node> = topics
            .iter()
            .zip(positions)
            .enumerate()
            .map(|(i, (topic, position))| {
                Node::new(id_for(stamp, i), topic.as_str(), position).highlighted(action.color())
            })
            .collect();
        let edges: Vec<Edge> = nodes
            .iter()
            .map(|n| Edge::between(&parent.id, &n.id, relation))
            .collect();

        Ok(self.commit(nodes, edges))
    }

    /// Apply the model's response to intersecting two nodes. Every new node
    /// gets an edge from both parents.
    pub fn apply_intersection(
        &mut self,
        first_id: &str,
        second_id: &str,
        response: &str,
        timestamp_ms: u64,
    ) -> Result<ActionOutcome, GameError> {
        let (first, second) = self.node_pair(first_id, second_id)?;

        debug!("raw intersection response for '{}' x '{}': {:?}", first.label, second.label, response);
        let topics = filter_new_topics(
            parse_topics(response, self.config.max_topics),
            &[first.label.as_str(), second.label.as_str()],
            |topic| {
                self.graph.is_neighbor(&first.id, topic, INTERSECTION)
                    || self.graph.is_neighbor(&second.id, topic, INTERSECTION)
            },
        );
        if topics.is_empty() {
            return Err(GameError::NoIntersectionTopics);
        }

        let center = first.position.midpoint(&second.position);
        let positions = plan_positions(
            center,
            topics.len(),
            &self.graph.positions(),
            &self.config.placement,
        )?;

        let id_for = |stamp: u64, i: usize| format!("{}-{}-{}", INTERSECTION, stamp, i);
        let stamp = self.free_stamp(timestamp_ms, topics.len(), &id_for);
        let nodes: Vec<Node> = topics
            .iter()
            .zip(positions)
            .enumerate()
            .map(|(i, (topic, position))| {
                Node::new(id_for(stamp, i), topic.as_str(), position).highlighted(INTERSECTION_COLOR)
            })
            .collect();
        let edges: Vec<Edge> = nodes
            .iter()
            .flat_map(|n| {
                [
                    Edge::between(&first.id, &n.id, INTERSECTION),
                    Edge::between(&second.id, &n.id, INTERSECTION),
                ]
            })
            .collect();

        Ok(self.commit(nodes, edges))
    }

    /// First stamp at or after `timestamp_ms` for which none of the batch's
    /// ids is on the board yet. Node ids are never reused.
    fn free_stamp(&self, timestamp_ms: u64, count: usize, id_for: impl Fn(u64, usize) -> String) -> u64 {
        let mut stamp = timestamp_ms;
        while (0..count).any(|i| self.graph.node(&id_for(stamp, i)).is_some()) {
            stamp = stamp.wrapping_add(1);
        }
        if stamp != timestamp_ms {
            debug!("ids for stamp {} taken, using {}", timestamp_ms, stamp);
        }
        stamp
    }

    /// Land a batch on the board and check it for the target word.
    fn commit(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> ActionOutcome {
        let target = self.words.end.trim();
        let needle = target.to_lowercase();
        let won = !needle.is_empty()
            && nodes.iter().any(|n| n.label.to_lowercase().contains(&needle));
        let added: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();

        self.graph.clear_highlights();
        self.graph.extend(nodes, edges);
        debug!("added {} nodes, board has {}", added.len(), self.graph.nodes().len());

        if won {
            self.has_won = true;
            self.winning_path =
                path::find_winning_path(self.graph.nodes(), self.graph.edges(), target);
            info!(
                "reached '{}' from '{}' in {} steps",
                self.words.end,
                self.words.start,
                self.winning_path.len()
            );
        }

        ActionOutcome { added, won }
    }

    /// Start over from the start word.
    pub fn reset(&mut self) {
        self.graph.reset(&self.words.start);
        self.has_won = false;
        self.winning_path.clear();
    }
}
