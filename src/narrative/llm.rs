//! Minimal client for an OpenAI-compatible completion API.
//!
//! Two request shapes are supported: Chat Completions in JSON mode, and the
//! Responses API with the `web_search` tool enabled. Either way the caller
//! gets back the raw JSON text the model produced.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::AppError;
use crate::http::post_json;

/// One completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    /// Sampling temperature. Only sent with Chat Completions.
    pub temperature: f64,
    /// Use the Responses API with web search instead of Chat Completions.
    pub enable_web: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<ResponseItem>,
}

#[derive(Debug, Deserialize)]
struct ResponseItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesResponse {
    /// Concatenated `output_text` parts of every message item.
    fn text(self) -> Option<String> {
        if let Some(text) = self.output_text.filter(|t| !t.trim().is_empty()) {
            return Some(text);
        }
        let text: String = self
            .output
            .into_iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone)]
pub struct LlmClient {
    http: Client,
    api_base: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(http: Client, api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Builds a client on `http` from the config, reading the API key from
    /// the environment. Fails before any network traffic when the key is
    /// missing.
    pub fn from_config(config: &Config, http: Client) -> Result<Self, AppError> {
        let api_key = Config::llm_api_key()?;
        Ok(Self::new(http, config.llm_api_base.clone(), api_key))
    }

    /// Sends one completion request and returns the model's text.
    ///
    /// A response without any text is a schema mismatch: the model answered
    /// but produced nothing that could be parsed.
    #[instrument(skip(self, request), fields(model = request.model, web = request.enable_web))]
    pub async fn complete_json(&self, request: &CompletionRequest<'_>) -> Result<String, AppError> {
        let messages = [
            Message {
                role: "system",
                content: request.system_prompt,
            },
            Message {
                role: "user",
                content: request.user_prompt,
            },
        ];

        let text = if request.enable_web {
            let url = format!("{}/responses", self.api_base);
            let body = json!({
                "model": request.model,
                "tools": [{"type": "web_search"}],
                "input": messages,
                "text": {"format": {"type": "json_object"}},
            });
            info!("Requesting web-enabled completion from {}", request.model);
            let response: ResponsesResponse = post_json(&self.http, &url, &self.api_key, &body).await?;
            response.text()
        } else {
            let url = format!("{}/chat/completions", self.api_base);
            let body = json!({
                "model": request.model,
                "messages": messages,
                "response_format": {"type": "json_object"},
                "temperature": request.temperature,
            });
            info!("Requesting chat completion from {}", request.model);
            let response: ChatCompletionResponse =
                post_json(&self.http, &url, &self.api_key, &body).await?;
            response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|content| !content.trim().is_empty())
        };

        let text = text.ok_or_else(|| {
            AppError::schema_mismatch("completion", "Model returned no message content")
        })?;
        debug!("Completion length: {} chars", text.len());
        Ok(text)
    }
}
