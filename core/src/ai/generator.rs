// artisan_core/src/ai/generator.rs

use crate::ai::client::{CompletionClient, CompletionError, DisabledCompletionClient};
use crate::ai::parser::{
  content_fallback, parse_content_suggestion, parse_story, parse_translation, story_fallback,
  translation_fallback,
};
use crate::ai::prompts::{content_generation_prompt, story_prompt, translation_prompt, PromptIntent};
use crate::ai::types::{ContentRequest, ContentSuggestion, StoryRequest, TranslationRequest, TranslationResult};
use rand_core::{OsRng, RngCore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
  /// Upper bound for a single completion attempt.
  pub timeout: Duration,
  /// Extra attempts after the first one, for retryable failures only.
  pub max_retries: u32,
  pub retry_base_delay: Duration,
}

impl Default for GeneratorSettings {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(30),
      max_retries: 0,
      retry_base_delay: Duration::from_millis(250),
    }
  }
}

/// Runs the prompt -> completion -> parse cycle for each intent.
///
/// None of the public operations fail. Any completion or parse failure is
/// logged at `warn` and replaced by the intent's deterministic fallback, so
/// callers always receive a usable value.
#[derive(Clone)]
pub struct ContentGenerator {
  client: Arc<dyn CompletionClient>,
  settings: GeneratorSettings,
}

impl std::fmt::Debug for ContentGenerator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ContentGenerator")
      .field("settings", &self.settings)
      .finish_non_exhaustive()
  }
}

impl ContentGenerator {
  pub fn new(client: Arc<dyn CompletionClient>, settings: GeneratorSettings) -> Self {
    Self { client, settings }
  }

  /// A generator that always answers with fallbacks.
  pub fn disabled() -> Self {
    Self::new(Arc::new(DisabledCompletionClient), GeneratorSettings::default())
  }

  pub fn settings(&self) -> &GeneratorSettings {
    &self.settings
  }

  #[instrument(name = "ContentGenerator::generate_product_content", skip_all, fields(category = %request.category))]
  pub async fn generate_product_content(&self, request: &ContentRequest) -> ContentSuggestion {
    let prompt = content_generation_prompt(request);
    let raw = match self.complete(PromptIntent::ContentGeneration, &prompt).await {
      Ok(raw) => raw,
      Err(e) => {
        warn!(reason = "ai_failure", error = %e, "Content generation failed; using fallback.");
        return content_fallback(request);
      }
    };

    match parse_content_suggestion(&raw) {
      Ok(suggestion) => suggestion,
      Err(e) => {
        warn!(reason = e.kind(), error = %e, "Content suggestion rejected; using fallback.");
        content_fallback(request)
      }
    }
  }

  #[instrument(name = "ContentGenerator::generate_story", skip_all, fields(category = %request.category))]
  pub async fn generate_story(&self, request: &StoryRequest) -> String {
    let prompt = story_prompt(request);
    match self.complete(PromptIntent::StoryGeneration, &prompt).await {
      Ok(raw) => parse_story(&raw).unwrap_or_else(|| {
        warn!(reason = "unparsable", "Story completion was blank; using fallback.");
        story_fallback(&request.category)
      }),
      Err(e) => {
        warn!(reason = "ai_failure", error = %e, "Story generation failed; using fallback.");
        story_fallback(&request.category)
      }
    }
  }

  #[instrument(name = "ContentGenerator::translate", skip_all, fields(target_language = %request.target_language, content_type = %request.content_type))]
  pub async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
    let prompt = translation_prompt(request);
    match self.complete(PromptIntent::Translation, &prompt).await {
      Ok(raw) => parse_translation(&raw, &request.target_language).unwrap_or_else(|| {
        warn!(reason = "unparsable", "Translation completion was blank; returning source text.");
        translation_fallback(request)
      }),
      Err(e) => {
        warn!(reason = "ai_failure", error = %e, "Translation failed; returning source text.");
        translation_fallback(request)
      }
    }
  }

  async fn complete(&self, intent: PromptIntent, prompt: &str) -> Result<String, CompletionError> {
    let mut attempt: u32 = 0;
    loop {
      let result = match tokio::time::timeout(self.settings.timeout, self.client.complete(prompt)).await {
        Ok(inner) => inner,
        Err(_) => Err(CompletionError::Timeout(self.settings.timeout)),
      };

      match result {
        Ok(text) => {
          debug!(intent = intent.as_str(), attempt, "Completion succeeded.");
          return Ok(text);
        }
        Err(e) if e.is_retryable() && attempt < self.settings.max_retries => {
          attempt += 1;
          let delay = self.backoff(attempt);
          debug!(intent = intent.as_str(), attempt, ?delay, error = %e, "Retrying completion.");
          tokio::time::sleep(delay).await;
        }
        Err(e) => return Err(e),
      }
    }
  }

  fn backoff(&self, attempt: u32) -> Duration {
    let base = self.settings.retry_base_delay;
    let exp = base.saturating_mul(1u32 << attempt.saturating_sub(1).min(16));
    let jitter_cap = base.as_millis().max(1) as u64;
    exp + Duration::from_millis(OsRng.next_u64() % jitter_cap)
  }
}
