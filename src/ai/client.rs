use crate::ai::prompts::SYSTEM_PROMPT;
use crate::config::{API_KEY_ENV, ClientConfig, ModelConfig};
use crate::error::TutorError;
use async_trait::async_trait;
use openrouter_api::types::chat::{ChatCompletionRequest, Message};

/// Something that turns a prompt into a completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, TutorError>;
}

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    model: ModelConfig,
}

impl OpenRouterClient {
    pub fn new(config: &ClientConfig) -> Result<Self, TutorError> {
        let api_key = config.api_key.clone().ok_or_else(missing_key_error)?;

        let client = openrouter_api::OpenRouterClient::new()
            .with_base_url(config.base_url.as_str())
            .map_err(|e| TutorError::Api(format!("invalid base URL {}: {}", config.base_url, e)))?
            .without_retries()
            .with_api_key(api_key)
            .map_err(|e| TutorError::Api(format!("failed to create client: {}", e)))?;

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        let messages = vec![
            Message::text("system", SYSTEM_PROMPT),
            Message::text("user", prompt),
        ];

        ChatCompletionRequest {
            model: self.model.model.clone(),
            messages,
            provider: None,
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.model.max_tokens,
            temperature: self.model.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String, TutorError> {
        let request = self.build_request(prompt);

        let response = self
            .client
            .chat()
            .map_err(classify_error)?
            .chat_completion(request)
            .await
            .map_err(classify_error)?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| TutorError::Api("no response choices received".to_string()))?;

        let text = match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => text.clone(),
            openrouter_api::MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| {
                    if let openrouter_api::ContentPart::Text(tc) = p {
                        Some(tc.text.clone())
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };

        if text.trim().is_empty() {
            return Err(TutorError::Api("the response contained no text".to_string()));
        }
        Ok(text)
    }
}

/// Stands in for the real client when no API key is configured.
#[derive(Debug, Default)]
pub struct UnconfiguredClient;

#[async_trait]
impl CompletionProvider for UnconfiguredClient {
    async fn complete(&self, _prompt: &str) -> Result<String, TutorError> {
        Err(missing_key_error())
    }
}

/// The real client when it can be built, otherwise one that reports why not.
pub fn build_provider(config: &ClientConfig) -> Box<dyn CompletionProvider> {
    match OpenRouterClient::new(config) {
        Ok(client) => Box::new(client),
        Err(e) => {
            crate::logger::error(&format!("Inference client unavailable: {}", e));
            Box::new(UnconfiguredClient)
        }
    }
}

fn missing_key_error() -> TutorError {
    TutorError::Api(format!(
        "missing API key. Set {} in your environment",
        API_KEY_ENV
    ))
}

/// Network failures become `Transport`; rejected requests and bad envelopes become `Api`.
fn classify_error(err: openrouter_api::Error) -> TutorError {
    match &err {
        openrouter_api::Error::HttpError(http)
            if http.is_connect() || http.is_timeout() || http.is_request() =>
        {
            TutorError::Transport(err.to_string())
        }
        openrouter_api::Error::TimeoutError(_) => TutorError::Transport(err.to_string()),
        _ => TutorError::Api(err.to_string()),
    }
}

#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::Mutex;

/// Replays scripted completions and records the prompts it receives.
#[cfg(test)]
pub struct MockCompletionClient {
    responses: Mutex<VecDeque<Result<String, TutorError>>>,
    prompts: Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockCompletionClient {
    pub fn with_responses(responses: Vec<Result<String, TutorError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CompletionProvider for MockCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, TutorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TutorError::Transport("no scripted response".to_string())))
    }
}
