// artisan_core/src/ai/client.rs

//! The completion-service seam: send a prompt, get text back or an error.

use crate::ai::prompts::SYSTEM_MESSAGE;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum CompletionError {
  #[error("completion service is not configured")]
  Disabled,

  #[error("completion timed out after {0:?}")]
  Timeout(Duration),

  #[error("transport error: {0}")]
  Transport(String),

  #[error("completion service returned {status}: {body}")]
  Service { status: u16, body: String },

  #[error("malformed completion response: {0}")]
  Malformed(String),
}

impl CompletionError {
  /// Whether another attempt could plausibly succeed.
  pub fn is_retryable(&self) -> bool {
    match self {
      CompletionError::Timeout(_) | CompletionError::Transport(_) => true,
      CompletionError::Service { status, .. } => *status == 429 || *status >= 500,
      CompletionError::Disabled | CompletionError::Malformed(_) => false,
    }
  }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
  async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Used when no API key is configured: every call fails with `Disabled`,
/// so every caller takes its fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCompletionClient;

#[async_trait]
impl CompletionClient for DisabledCompletionClient {
  async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
    Err(CompletionError::Disabled)
  }
}

/// OpenAI-compatible `/chat/completions` client.
#[derive(Clone)]
pub struct HttpCompletionClient {
  http: Client,
  api_key: String,
  base_url: String,
  model: String,
  timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
  model: &'a str,
  messages: [ChatMessage<'a>; 2],
  temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
  role: &'static str,
  content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
  choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
  message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
  content: Option<String>,
}

impl HttpCompletionClient {
  pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, CompletionError> {
    let http = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| CompletionError::Transport(format!("failed to build HTTP client: {}", e)))?;
    Ok(Self {
      http,
      api_key: api_key.into(),
      base_url: "https://api.openai.com/v1".to_string(),
      model: "gpt-4o-mini".to_string(),
      timeout,
    })
  }

  pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
    self.base_url = url.into().trim_end_matches('/').to_string();
    self
  }

  pub fn with_model(mut self, model: impl Into<String>) -> Self {
    self.model = model.into();
    self
  }

  pub fn model(&self) -> &str {
    &self.model
  }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
  #[instrument(name = "HttpCompletionClient::complete", skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
  async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
    let request = ChatRequest {
      model: &self.model,
      messages: [
        ChatMessage {
          role: "system",
          content: SYSTEM_MESSAGE,
        },
        ChatMessage {
          role: "user",
          content: prompt,
        },
      ],
      temperature: 0.7,
    };

    let response = self
      .http
      .post(format!("{}/chat/completions", self.base_url))
      .bearer_auth(&self.api_key)
      .json(&request)
      .send()
      .await
      .map_err(|e| {
        if e.is_timeout() {
          CompletionError::Timeout(self.timeout)
        } else {
          CompletionError::Transport(e.to_string())
        }
      })?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(CompletionError::Service {
        status: status.as_u16(),
        body,
      });
    }

    let chat: ChatResponse = response
      .json()
      .await
      .map_err(|e| CompletionError::Malformed(e.to_string()))?;

    let content = chat
      .choices
      .into_iter()
      .next()
      .and_then(|c| c.message.content)
      .ok_or_else(|| CompletionError::Malformed("no choices in response".to_string()))?;
    debug!(completion_len = content.len(), "Completion received.");
    Ok(content)
  }
}
