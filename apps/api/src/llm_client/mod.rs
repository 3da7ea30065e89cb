/// LLM Client — the single point of entry for all provider calls in HR Desk.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// All LLM interactions MUST go through `CompletionProvider`.
///
/// No retries: every failure is terminal for the request that caused it.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::catalog::ModelId;

pub mod prompts;
#[cfg(test)]
pub(crate) mod testing;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM provider rejected the credentials: {0}")]
    Auth(String),

    #[error("LLM provider error: {0}")]
    Provider(String),

    #[error("LLM provider returned an unexpected response: {0}")]
    MalformedResponse(String),
}

/// A remote text-completion backend. `LlmClient` is the production
/// implementation; the pipeline only ever sees this trait.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str, model: &ModelId)
        -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if it has any non-blank content.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Client for Groq's OpenAI-compatible Chat Completions API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    temperature: f32,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        base_url: String,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.groq_api_key.clone(),
            config.groq_base_url.clone(),
            config.llm_temperature,
            config.llm_timeout,
        )
    }

    /// Makes a single call to the chat completions endpoint and returns the
    /// full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        model: &ModelId,
    ) -> Result<ChatResponse, LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::Auth("API key is empty".to_string()));
        }

        let request_body = ChatRequest {
            model: model.as_str(),
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Provider("request timed out".to_string())
                } else {
                    LlmError::Provider(format!("HTTP error: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Provider(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            // Try to parse error message
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("LLM API returned {}: {}", status, message);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth(message),
                _ => LlmError::Provider(format!("status {}: {message}", status.as_u16())),
            });
        }

        let chat: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::MalformedResponse(format!("invalid JSON payload: {e}")))?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(
        &self,
        prompt: &str,
        system: &str,
        model: &ModelId,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, system, model).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or_else(|| LlmError::MalformedResponse("response has no text content".to_string()))
    }
}
