//! Topic actions: what the player can ask the model for.
//!
//! Each action carries its button label, board color and the prompt template
//! sent to the model. Templates use `{topic}` for the node label and `{n}`
//! for the number of topics requested.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseActionError;

/// Relation name for nodes generated from two parents at once.
pub const INTERSECTION: &str = "intersection";
pub const INTERSECTION_COLOR: &str = "#E91E63";
pub const INTERSECTION_LABEL: &str = "Intersection";

const INTERSECTION_PROMPT: &str = "Respond with {n} topics that relate to both \"{topic1}\" and \"{topic2}\", as a comma-separated list with no other text or punctuation. Example format: topic1, topic2. DO NOT RESPOND WITH MORE THAN {n} TOPICS or include either topic itself.";

/// System message paired with every action prompt.
pub const SYSTEM_PROMPT: &str = "You are an AI that ONLY responds with comma-separated values, with no other text or punctuation. Never include explanations or additional formatting.";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Broader,
    Deeper,
    Similar,
    Opposite,
    People,
    Places,
    Good,
    Evil,
    Future,
    Past,
}

impl ActionType {
    /// Every action, in button order.
    pub const ALL: [ActionType; 10] = [
        ActionType::Broader,
        ActionType::Deeper,
        ActionType::Similar,
        ActionType::Opposite,
        ActionType::People,
        ActionType::Places,
        ActionType::Good,
        ActionType::Evil,
        ActionType::Future,
        ActionType::Past,
    ];

    /// Canonical name, also used as the edge relation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Broader => "broader",
            ActionType::Deeper => "deeper",
            ActionType::Similar => "similar",
            ActionType::Opposite => "opposite",
            ActionType::People => "people",
            ActionType::Places => "places",
            ActionType::Good => "good",
            ActionType::Evil => "evil",
            ActionType::Future => "future",
            ActionType::Past => "past",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Broader => "Broader",
            ActionType::Deeper => "Deeper",
            ActionType::Similar => "Similar",
            ActionType::Opposite => "Opposite",
            ActionType::People => "People",
            ActionType::Places => "Places",
            ActionType::Good => "Good",
            ActionType::Evil => "Evil",
            ActionType::Future => "Future",
            ActionType::Past => "Past",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ActionType::Broader => "#9C27B0",  // purple
            ActionType::Deeper => "#2196F3",   // blue
            ActionType::Similar => "#4CAF50",  // green
            ActionType::Opposite => "#F44336", // red
            ActionType::People => "#00BCD4",   // cyan
            ActionType::Places => "#FFEB3B",   // yellow
            ActionType::Good => "#8BC34A",     // light green
            ActionType::Evil => "#607D8B",     // blue grey
            ActionType::Future => "#FF9800",   // orange
            ActionType::Past => "#795548",     // brown
        }
    }

    pub fn prompt_template(&self) -> &'static str {
        match self {
            ActionType::Broader => "Respond with {n} broader topics that encompass \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: broader1, broader2. DO NOT RESPOND WITH MORE THAN {n} TOPICS or include the topic itself.",
            ActionType::Deeper => "Respond with {n} more specific subtopics of \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: subtopic1, subtopic2, subtopic3. DO NOT RESPOND WITH MORE THAN {n} TOPICS or include the topic itself.",
            ActionType::Similar => "Respond with {n} closely related topics to \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: topic1, topic2, topic3, topic4. DO NOT RESPOND WITH MORE THAN {n} TOPICS or include the topic itself.",
            ActionType::Opposite => "Respond with {n} conceptual opposites of \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: opposite1, opposite2. DO NOT RESPOND WITH MORE THAN {n} TOPICS or include the topic itself.",
            ActionType::People => "Respond with {n} notable people closely associated with \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: person1, person2, person3, person4. DO NOT RESPOND WITH MORE THAN {n} TOPICS.",
            ActionType::Places => "Respond with {n} significant places related to \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: place1, place2, place3, place4. DO NOT RESPOND WITH MORE THAN {n} TOPICS.",
            ActionType::Good => "Respond with {n} \"good\" (as in opposite of evil) things related to \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: thing1, thing2, thing3, thing4. DO NOT RESPOND WITH MORE THAN {n} TOPICS.",
            ActionType::Evil => "Respond with {n} \"evil\" things related to \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: thing1, thing2, thing3, thing4. DO NOT RESPOND WITH MORE THAN {n} TOPICS.",
            ActionType::Future => "Respond with {n} future developments related to \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: future1, future2. DO NOT RESPOND WITH MORE THAN {n} TOPICS or include the topic itself.",
            ActionType::Past => "Respond with {n} historical aspects of \"{topic}\", as a comma-separated list with no other text or punctuation. Example format: past1, past2. DO NOT RESPOND WITH MORE THAN {n} TOPICS or include the topic itself.",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ActionType::ALL
            .into_iter()
            .find(|a| a.as_str() == name)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// Prompt for `action` on `topic`. Topics already generated from the same
/// node by the same action are listed so the model avoids repeating them.
pub fn build_prompt(action: ActionType, topic: &str, max_topics: usize, neighboring: &[&str]) -> String {
    let mut prompt = action
        .prompt_template()
        .replacen("{topic}", topic, 1)
        .replace("{n}", &max_topics.to_string());

    if !neighboring.is_empty() {
        prompt.push_str(&format!(
            " You have already generated these topics: {}. Generate new topics.",
            neighboring.join(", ")
        ));
    }
    prompt
}

/// Prompt for topics that sit between two selected nodes.
pub fn build_intersection_prompt(topic1: &str, topic2: &str, max_topics: usize) -> String {
    INTERSECTION_PROMPT
        .replacen("{topic1}", topic1, 1)
        .replacen("{topic2}", topic2, 1)
        .replace("{n}", &max_topics.to_string())
}
