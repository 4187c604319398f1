use pagekit_extract::{ChatMessage, GenerateRequest, RepairConfig};
use serde::{Deserialize, Serialize};

/// Generation settings for a page session. Deserialises the `generation`
/// block of `pagekit.config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Token ceiling for the single repair call
    #[serde(default = "default_repair_max_tokens")]
    pub repair_max_tokens: u32,

    /// Messages kept in the conversation history (user + assistant)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_model() -> String {
    "default".to_string()
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_temperature() -> f32 {
    0.7
}

fn default_repair_max_tokens() -> u32 {
    4096
}

fn default_history_limit() -> usize {
    20
}

impl SessionConfig {
    /// Generation call with these settings
    pub fn request(&self, system_prompt: String, history: Vec<ChatMessage>) -> GenerateRequest {
        GenerateRequest {
            system_prompt,
            history,
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    pub fn repair(&self) -> RepairConfig {
        RepairConfig {
            model: self.model.clone(),
            max_tokens: self.repair_max_tokens,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            repair_max_tokens: default_repair_max_tokens(),
            history_limit: default_history_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{ "model": "large", "maxTokens": 2048 }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.model, "large");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.repair_max_tokens, 4096);
        assert_eq!(config.history_limit, 20);
    }

    #[test]
    fn test_request_carries_settings() {
        let config = SessionConfig {
            model: "large".into(),
            temperature: 0.2,
            ..SessionConfig::default()
        };
        let request = config.request("system".into(), vec![ChatMessage::user("hi")]);
        assert_eq!(request.model, "large");
        assert_eq!(request.max_tokens, 8192);
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.history[0].content, "hi");
    }

    #[test]
    fn test_repair_config_uses_session_model() {
        let config = SessionConfig {
            model: "fast".into(),
            repair_max_tokens: 1000,
            ..SessionConfig::default()
        };
        let repair = config.repair();
        assert_eq!(repair.model, "fast");
        assert_eq!(repair.max_tokens, 1000);
    }
}
