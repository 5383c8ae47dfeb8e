//! WASM bindings for the wikigame-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Results cross the boundary as JSON strings; failures are logged to the
//! console and reported in an `error` field instead of throwing.

use log::{Level, error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::actions::{ActionType, INTERSECTION, INTERSECTION_COLOR, INTERSECTION_LABEL};
use crate::config::GameConfig;
use crate::daily::WordPair;
use crate::error::ConfigError;
use crate::graph::{Edge, Node, Position};
use crate::layout::{self, PlacementConfig};
use crate::output::{GameOutput, ResultOutput};
use crate::path::{self, PathStep};
use crate::request::TopicRequest;
use crate::session::GameSession;
use crate::topics;

/// Install the console logger and the panic hook.
#[wasm_bindgen(start)]
pub fn init() {
    let _ = console_log::init_with_level(Level::Debug);
    console_error_panic_hook::set_once();
    info!("wikigame-core initialized");
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        error!("Error serializing output: {}", e);
        json!({ "error": { "message": e.to_string() } }).to_string()
    })
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Current UTC date as `YYYY-MM-DD`.
fn today_iso() -> String {
    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    iso.split('T').next().unwrap_or_default().to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceRequest {
    center: Position,
    count: usize,
    #[serde(default)]
    existing: Vec<Position>,
    #[serde(default)]
    config: PlacementConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PathRequest {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    target_label: String,
}

#[derive(Debug, Serialize)]
struct PathResult {
    steps: Vec<PathStep>,
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionInfo {
    #[serde(rename = "type")]
    kind: &'static str,
    label: &'static str,
    color: &'static str,
}

/// Plan positions for new nodes.
/// Input: `{center, count, existing?, config?}`. Output: `{result: [{x, y}, ...]}`.
#[wasm_bindgen]
pub fn plan_positions(request_json: &str) -> String {
    let res = serde_json::from_str::<PlaceRequest>(request_json)
        .map_err(|e| e.to_string())
        .and_then(|req| {
            layout::plan_positions(req.center, req.count, &req.existing, &req.config)
                .map_err(|e| e.to_string())
        });
    if let Err(e) = &res {
        error!("Error planning positions: {}", e);
    }
    to_json(&ResultOutput::from_result(res))
}

/// Trace the path to the target node.
/// Input: `{nodes, edges, targetLabel}`. Output: `{result: {steps, text}}`.
#[wasm_bindgen]
pub fn find_winning_path(request_json: &str) -> String {
    let res = serde_json::from_str::<PathRequest>(request_json).map(|req| {
        let steps = path::find_winning_path(&req.nodes, &req.edges, &req.target_label);
        let text = path::format_path(&steps);
        PathResult { steps, text }
    });
    if let Err(e) = &res {
        error!("Error reading path request: {}", e);
    }
    to_json(&ResultOutput::from_result(res))
}

/// Split a model response into topics. Returns a JSON array of strings.
#[wasm_bindgen]
pub fn parse_topics(response: &str, max_topics: usize) -> String {
    to_json(&topics::parse_topics(response, max_topics))
}

/// Word pair for a `YYYY-MM-DD` date from the built-in table, as `[start, end]`.
#[wasm_bindgen]
pub fn daily_words(date: &str) -> String {
    to_json(GameConfig::default().daily_words.for_iso_date(date))
}

/// Word pair for today (UTC).
#[wasm_bindgen]
pub fn todays_words() -> String {
    daily_words(&today_iso())
}

/// Every action the frontend can offer, intersection last.
#[wasm_bindgen]
pub fn action_types() -> String {
    let mut list: Vec<ActionInfo> = ActionType::ALL
        .iter()
        .map(|a| ActionInfo { kind: a.as_str(), label: a.label(), color: a.color() })
        .collect();
    list.push(ActionInfo { kind: INTERSECTION, label: INTERSECTION_LABEL, color: INTERSECTION_COLOR });
    to_json(&list)
}

/// Chat-completion body for a topic endpoint request body.
/// Output: `{result: {model, messages, ...}}` or `{error: {message}}`.
#[wasm_bindgen]
pub fn topic_chat_request(body: &str, config_json: &str) -> String {
    let res = GameConfig::from_json(config_json)
        .map_err(|e| e.to_string())
        .and_then(|cfg| {
            TopicRequest::parse(body)
                .and_then(|req| req.to_chat_request(&cfg.llm, cfg.max_topics))
                .map_err(|e| e.to_string())
        });
    if let Err(e) = &res {
        error!("Error building chat request: {}", e);
    }
    to_json(&ResultOutput::from_result(res))
}

/// One game, held on the JavaScript side.
#[wasm_bindgen]
pub struct GameHandle {
    session: GameSession,
}

#[wasm_bindgen]
impl GameHandle {
    /// Start a game from a JSON config (blank for defaults) on the pair for
    /// `date` (blank for today).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, date: &str) -> Result<GameHandle, JsError> {
        let date = if date.trim().is_empty() { today_iso() } else { date.to_string() };
        Self::for_date(config_json, &date).map_err(|e| {
            error!("Error reading config: {}", e);
            JsError::new(&e.to_string())
        })
    }

    /// Start a game on an explicit word pair.
    pub fn with_words(config_json: &str, start: &str, end: &str) -> Result<GameHandle, JsError> {
        Self::for_words(config_json, start, end).map_err(|e| {
            error!("Error reading config: {}", e);
            JsError::new(&e.to_string())
        })
    }

    /// Prompt for an action on a node. Output: `{result: "..."}`.
    pub fn prompt_for_action(&self, node_id: &str, action: &str) -> String {
        let res = action
            .parse::<ActionType>()
            .map_err(|e| e.to_string())
            .and_then(|a| self.session.prompt_for(node_id, a).map_err(|e| e.to_string()));
        if let Err(e) = &res {
            error!("Error building prompt: {}", e);
        }
        to_json(&ResultOutput::from_result(res))
    }

    /// Prompt for intersecting two nodes. Output: `{result: "..."}`.
    pub fn prompt_for_intersection(&self, first_id: &str, second_id: &str) -> String {
        let res = self.session.intersection_prompt(first_id, second_id);
        if let Err(e) = &res {
            error!("Error building intersection prompt: {}", e);
        }
        to_json(&ResultOutput::from_result(res))
    }

    /// Apply a model response to an action. Returns the board.
    pub fn apply_action(&mut self, node_id: &str, action: &str, response: &str) -> String {
        self.apply_action_at(node_id, action, response, now_ms())
    }

    /// Apply a model response to an intersection. Returns the board.
    pub fn apply_intersection(&mut self, first_id: &str, second_id: &str, response: &str) -> String {
        self.apply_intersection_at(first_id, second_id, response, now_ms())
    }

    pub fn snapshot(&self) -> String {
        to_json(&GameOutput::from_session(&self.session))
    }

    pub fn winning_path_text(&self) -> String {
        self.session.winning_path_text()
    }

    /// Start over and return the fresh board.
    pub fn reset(&mut self) -> String {
        self.session.reset();
        self.snapshot()
    }
}

impl GameHandle {
    fn for_date(config_json: &str, date: &str) -> Result<Self, ConfigError> {
        let config = GameConfig::from_json(config_json)?;
        let words = config.daily_words.for_iso_date(date).clone();
        info!("new game {} → {} for {}", words.start, words.end, date);
        Ok(Self { session: GameSession::new(config, words) })
    }

    fn for_words(config_json: &str, start: &str, end: &str) -> Result<Self, ConfigError> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(ConfigError::Invalid("start and end words must not be empty".to_string()));
        }
        let config = GameConfig::from_json(config_json)?;
        Ok(Self { session: GameSession::new(config, WordPair::new(start.trim(), end.trim())) })
    }

    fn apply_action_at(&mut self, node_id: &str, action: &str, response: &str, timestamp_ms: u64) -> String {
        let res = action
            .parse::<ActionType>()
            .map_err(|e| e.to_string())
            .and_then(|a| {
                self.session
                    .apply_action(node_id, a, response, timestamp_ms)
                    .map_err(|e| e.to_string())
            });
        self.board_after(res)
    }

    fn apply_intersection_at(&mut self, first_id: &str, second_id: &str, response: &str, timestamp_ms: u64) -> String {
        let res = self
            .session
            .apply_intersection(first_id, second_id, response, timestamp_ms)
            .map_err(|e| e.to_string());
        self.board_after(res)
    }

    fn board_after(&self, res: Result<crate::session::ActionOutcome, String>) -> String {
        let board = GameOutput::from_session(&self.session);
        let output = match res {
            Ok(outcome) => board.with_outcome(outcome),
            Err(e) => {
                error!("Error applying response: {}", e);
                board.with_error(e)
            }
        };
        to_json(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ROOT_ID;
    use serde_json::Value;

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn test_plan_positions_json() {
        let out = parse(&plan_positions(r#"{"center": {"x": 0, "y": 0}, "count": 1, "existing": [{"x": 0, "y": 0}]}"#));
        assert_eq!(out["result"][0]["x"], 120.0);
        assert_eq!(out["result"][0]["y"], 0.0);

        let out = parse(&plan_positions(r#"{"center": {"x": 0, "y": 0}, "count": 1, "config": {"minDistance": -1}}"#));
        assert!(out["error"]["message"].as_str().unwrap().contains("invalid placement input"));

        let out = parse(&plan_positions("{"));
        assert!(out.get("result").is_none());
        assert!(out["error"]["message"].is_string());
    }

    #[test]
    fn test_find_winning_path_json() {
        let out = parse(&find_winning_path(
            r#"{
                "nodes": [
                    {"id": "0", "label": "USA", "position": {"x": 0, "y": 0}},
                    {"id": "a", "label": "Tesla", "position": {"x": 120, "y": 0}}
                ],
                "edges": [{"id": "e-0-a", "source": "0", "target": "a", "actionType": "companies"}],
                "targetLabel": "tesla"
            }"#,
        ));
        assert_eq!(out["result"]["text"], "USA → Tesla (companies)");
        assert_eq!(out["result"]["steps"][0]["relation"], "companies");
    }

    #[test]
    fn test_small_helpers() {
        assert_eq!(parse_topics("rome, , paris", 4), r#"["Rome","Paris"]"#);
        assert_eq!(daily_words("2025-03-11"), r#"["Pizza","Italy"]"#);
        assert_eq!(daily_words("not a date"), r#"["USA","Elon Musk"]"#);

        let actions = parse(&action_types());
        let list = actions.as_array().unwrap();
        assert_eq!(list.len(), ActionType::ALL.len() + 1);
        assert_eq!(list[0]["type"], "broader");
        assert_eq!(list[list.len() - 1]["type"], "intersection");
    }

    #[test]
    fn test_topic_chat_request_json() {
        let out = parse(&topic_chat_request(r#"{"actionType": "future", "nodeLabel": "Cars"}"#, ""));
        assert_eq!(out["result"]["model"], "gpt-4o-mini");
        assert_eq!(out["result"]["messages"][1]["role"], "user");

        let out = parse(&topic_chat_request(r#"{"nodeLabel": "Cars"}"#, ""));
        assert_eq!(out["error"]["message"], "Missing required fields");
    }

    #[test]
    fn test_game_handle_flow() {
        let mut game = GameHandle::for_date("", "2025-03-11").unwrap();
        let board = parse(&game.snapshot());
        assert_eq!(board["startWord"], "Pizza");
        assert_eq!(board["endWord"], "Italy");

        let prompt = parse(&game.prompt_for_action(ROOT_ID, "places"));
        assert!(prompt["result"].as_str().unwrap().contains("\"Pizza\""));

        let board = parse(&game.apply_action_at(ROOT_ID, "places", "Naples, Italy", 7));
        assert_eq!(board["hasWon"], true);
        assert_eq!(board["added"][1], "0-places-7-1");
        assert_eq!(board["winningPath"], "Pizza → Italy (places)");
        assert_eq!(game.winning_path_text(), "Pizza → Italy (places)");

        let board = parse(&game.reset());
        assert_eq!(board["hasWon"], false);
        assert_eq!(board["nodes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_game_handle_errors() {
        let mut game = GameHandle::for_words("", "USA", "Elon Musk").unwrap();

        let board = parse(&game.apply_action_at(ROOT_ID, "sideways", "Canada", 1));
        assert_eq!(board["error"]["message"], "unknown action 'sideways'");

        let board = parse(&game.apply_action_at("ghost", "broader", "Canada", 1));
        assert_eq!(board["error"]["message"], "node 'ghost' not found");
        assert_eq!(board["nodes"].as_array().unwrap().len(), 1);

        let prompt = parse(&game.prompt_for_intersection(ROOT_ID, ROOT_ID));
        assert!(prompt["error"]["message"].is_string());

        assert!(GameHandle::for_words("", "USA", " ").is_err());
        assert!(GameHandle::for_date(r#"{"maxTopics": 0}"#, "2025-03-11").is_err());
    }

    #[test]
    fn test_intersection_through_handle() {
        let mut game = GameHandle::for_words("", "USA", "Elon Musk").unwrap();
        game.apply_action_at(ROOT_ID, "similar", "Canada, Mexico", 1);

        let board = parse(&game.apply_intersection_at("0-similar-1-0", "0-similar-1-1", "Tesla", 2));
        assert_eq!(board["added"][0], "intersection-2-0");
        assert_eq!(board["edges"].as_array().unwrap().len(), 4);
        assert_eq!(board["hasWon"], false);
    }
}
