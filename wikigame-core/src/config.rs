//! Game configuration.
//!
//! Every field has a default, so `{}` is a complete configuration and a
//! config file only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::daily::DailyWords;
use crate::error::ConfigError;
use crate::layout::PlacementConfig;

/// Topics requested per action.
pub const DEFAULT_MAX_TOPICS: usize = 4;

/// Parameters for the hosted model behind the topic endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Upper bound on topics kept from one model response.
    pub max_topics: usize,
    pub placement: PlacementConfig,
    pub llm: LlmConfig,
    pub daily_words: DailyWords,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_topics: DEFAULT_MAX_TOPICS,
            placement: PlacementConfig::default(),
            llm: LlmConfig::default(),
            daily_words: DailyWords::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration. Blank input means defaults.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: GameConfig = serde_json::from_str(input)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_topics == 0 {
            return Err(ConfigError::Invalid("maxTopics must be at least 1".to_string()));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "llm.temperature {} is outside 0..=2",
                self.llm.temperature
            )));
        }
        self.placement
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
