//! Request and response types for the hosted topic endpoint.
//!
//! The endpoint takes `{actionType, nodeLabel, neighboringTopics}`, asks a
//! chat-completion model for topics and answers `{content}` or `{error}`.
//! The HTTP server and the model call live outside this crate; this module
//! is the part both sides agree on: parsing, validation, the chat body and
//! the status/body mapping.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::actions::{self, ActionType, SYSTEM_PROMPT};
use crate::config::LlmConfig;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Missing required fields")]
    MissingFields,

    /// The model call failed; the detail is for logs only.
    #[error("model request failed: {0}")]
    Upstream(String),
}

impl RequestError {
    /// HTTP status for this failure.
    pub fn status(&self) -> u16 {
        match self {
            RequestError::Malformed(_) | RequestError::MissingFields => 400,
            RequestError::Upstream(_) => 500,
        }
    }

    /// Message safe to send to the client.
    pub fn public_message(&self) -> String {
        match self {
            RequestError::Upstream(_) => "Failed to generate response".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRequest {
    #[serde(default)]
    pub action_type: Option<ActionType>,
    #[serde(default)]
    pub node_label: String,
    #[serde(default)]
    pub neighboring_topics: Vec<String>,
    #[serde(default)]
    pub max_topics: Option<usize>,
}

impl TopicRequest {
    /// Parse and validate a request body.
    pub fn parse(body: &str) -> Result<Self, RequestError> {
        let req: TopicRequest = serde_json::from_str(body)?;
        req.action()?;
        Ok(req)
    }

    fn action(&self) -> Result<ActionType, RequestError> {
        match self.action_type {
            Some(action) if !self.node_label.trim().is_empty() => Ok(action),
            _ => Err(RequestError::MissingFields),
        }
    }

    /// Chat-completion body for this request.
    pub fn to_chat_request(&self, llm: &LlmConfig, default_max_topics: usize) -> Result<ChatRequest, RequestError> {
        let action = self.action()?;
        let max_topics = self.max_topics.unwrap_or(default_max_topics).max(1);
        let neighbors: Vec<&str> = self.neighboring_topics.iter().map(String::as_str).collect();

        Ok(ChatRequest {
            model: llm.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(actions::build_prompt(action, self.node_label.trim(), max_topics, &neighbors)),
            ],
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// OpenAI-style chat completion body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicResponse {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Status code and JSON body for an endpoint result.
pub fn to_http(result: &Result<TopicResponse, RequestError>) -> (u16, String) {
    match result {
        Ok(resp) => (200, json!({ "content": resp.content }).to_string()),
        Err(e) => (e.status(), json!({ "error": e.public_message() }).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_request() {
        let req = TopicRequest::parse(
            r#"{"actionType": "deeper", "nodeLabel": "History", "neighboringTopics": ["Ancient Rome"]}"#,
        )
        .unwrap();
        assert_eq!(req.action_type, Some(ActionType::Deeper));
        assert_eq!(req.neighboring_topics, vec!["Ancient Rome"]);
        assert_eq!(req.max_topics, None);
    }

    #[test]
    fn test_missing_fields() {
        let err = TopicRequest::parse(r#"{"nodeLabel": "History"}"#).unwrap_err();
        assert!(matches!(err, RequestError::MissingFields));
        assert_eq!(err.status(), 400);

        let err = TopicRequest::parse(r#"{"actionType": "past", "nodeLabel": "  "}"#).unwrap_err();
        assert!(matches!(err, RequestError::MissingFields));
    }

    #[test]
    fn test_malformed_bodies() {
        let err = TopicRequest::parse("not json").unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)));
        assert_eq!(err.status(), 400);

        let err = TopicRequest::parse(r#"{"actionType": "sideways", "nodeLabel": "AI"}"#).unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)));
    }

    #[test]
    fn test_chat_request_body() {
        let req = TopicRequest::parse(
            r#"{"actionType": "broader", "nodeLabel": "AI", "neighboringTopics": ["Computer science"], "maxTopics": 3}"#,
        )
        .unwrap();
        let chat = req.to_chat_request(&LlmConfig::default(), 4).unwrap();

        assert_eq!(chat.model, "gpt-4o-mini");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(chat.messages[1].role, Role::User);
        assert!(chat.messages[1].content.starts_with("Respond with 3 broader topics that encompass \"AI\""));
        assert!(chat.messages[1].content.contains("already generated these topics: Computer science."));

        let body = serde_json::to_value(&chat).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["max_tokens"], 100);
    }

    #[test]
    fn test_http_mapping() {
        let ok = Ok(TopicResponse { content: "Robotics, Ethics".to_string() });
        assert_eq!(to_http(&ok), (200, r#"{"content":"Robotics, Ethics"}"#.to_string()));

        let missing = Err(RequestError::MissingFields);
        assert_eq!(to_http(&missing), (400, r#"{"error":"Missing required fields"}"#.to_string()));

        let upstream = Err(RequestError::Upstream("timeout after 30s".to_string()));
        assert_eq!(to_http(&upstream), (500, r#"{"error":"Failed to generate response"}"#.to_string()));
    }
}
