use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_LOG_FILE: &str = "study_tutor.log";

pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const BASE_URL_ENV: &str = "STUDY_TUTOR_BASE_URL";
pub const MODEL_ENV: &str = "STUDY_TUTOR_MODEL";
pub const TEMPERATURE_ENV: &str = "STUDY_TUTOR_TEMPERATURE";
pub const MAX_TOKENS_ENV: &str = "STUDY_TUTOR_MAX_TOKENS";
pub const LOG_ENV: &str = "STUDY_TUTOR_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

/// Everything the inference client needs, passed in explicitly at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: ModelConfig,
    pub log_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = ModelConfig::default();
        let model = ModelConfig {
            model: get(MODEL_ENV).unwrap_or(defaults.model),
            temperature: get(TEMPERATURE_ENV)
                .and_then(|v| v.parse::<f32>().ok())
                .or(defaults.temperature),
            max_tokens: get(MAX_TOKENS_ENV)
                .and_then(|v| v.parse::<u32>().ok())
                .or(defaults.max_tokens),
        };

        Self {
            api_key: get(API_KEY_ENV),
            base_url: get(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
            log_path: get(LOG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }

    /// One-line description that is safe to log.
    pub fn describe(&self) -> String {
        format!(
            "model={} base_url={} api_key={}",
            self.model.model,
            self.base_url,
            if self.api_key.is_some() { "set" } else { "missing" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, ModelConfig::default());
        assert_eq!(config.log_path, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "sk-test"),
            (BASE_URL_ENV, "https://api.groq.com/openai/v1/"),
            (MODEL_ENV, "llama-3.1-8b-instant"),
            (TEMPERATURE_ENV, "0.2"),
            (MAX_TOKENS_ENV, "800"),
            (LOG_ENV, "/tmp/tutor.log"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1/");
        assert_eq!(config.model.model, "llama-3.1-8b-instant");
        assert_eq!(config.model.temperature, Some(0.2));
        assert_eq!(config.model.max_tokens, Some(800));
        assert_eq!(config.log_path, PathBuf::from("/tmp/tutor.log"));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = ClientConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "   ")]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (TEMPERATURE_ENV, "warm"),
            (MAX_TOKENS_ENV, "-5"),
        ]));
        assert_eq!(config.model.temperature, Some(DEFAULT_TEMPERATURE));
        assert_eq!(config.model.max_tokens, Some(DEFAULT_MAX_TOKENS));
    }

    #[test]
    fn test_describe_never_contains_key() {
        let config = ClientConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "sk-secret")]));
        let line = config.describe();
        assert!(!line.contains("sk-secret"));
        assert!(line.contains("api_key=set"));
    }
}
