// artisan_core/src/ai/parser.rs

//! Turns raw completions into structured values, and defines the fallbacks
//! used when a completion is missing or unusable.

use crate::ai::types::{ContentRequest, ContentSuggestion, TranslationRequest, TranslationResult};
use thiserror::Error;

pub const FALLBACK_PRICE: f64 = 500.0;
pub const FALLBACK_CULTURAL_CONTEXT: &str = "A beautiful traditional Indian craft.";

#[derive(Debug, Error)]
pub enum ParseError {
  #[error("completion is not valid JSON: {0}")]
  InvalidJson(#[source] serde_json::Error),

  #[error("completion JSON does not match the suggestion schema: {0}")]
  Schema(String),
}

impl ParseError {
  /// Short label used in logs.
  pub fn kind(&self) -> &'static str {
    match self {
      ParseError::InvalidJson(_) => "unparsable",
      ParseError::Schema(_) => "schema_invalid",
    }
  }
}

/// Removes a surrounding markdown code fence, if any.
///
/// Handles "```json ... ```" and "``` ... ```"; anything else is returned
/// trimmed but otherwise unchanged. This is normalization only: the JSON
/// parse that follows decides whether the completion is usable.
pub fn strip_code_fence(raw: &str) -> &str {
  let trimmed = raw.trim();
  let Some(after_open) = trimmed.strip_prefix("```") else {
    return trimmed;
  };
  let tag_len = after_open
    .find(|c: char| !c.is_ascii_alphanumeric())
    .unwrap_or(after_open.len());
  let body = &after_open[tag_len..];
  let body = body.strip_suffix("```").unwrap_or(body);
  body.trim()
}

pub fn parse_content_suggestion(raw: &str) -> Result<ContentSuggestion, ParseError> {
  let value: serde_json::Value = serde_json::from_str(strip_code_fence(raw)).map_err(ParseError::InvalidJson)?;
  let suggestion: ContentSuggestion =
    serde_json::from_value(value).map_err(|e| ParseError::Schema(e.to_string()))?;

  if !suggestion.price_suggestion.is_finite() || suggestion.price_suggestion <= 0.0 {
    return Err(ParseError::Schema(format!(
      "price_suggestion must be positive, got {}",
      suggestion.price_suggestion
    )));
  }
  Ok(suggestion)
}

pub fn content_fallback(request: &ContentRequest) -> ContentSuggestion {
  ContentSuggestion {
    title: format!("Handcrafted {}", request.category),
    description: request.description.clone(),
    price_suggestion: FALLBACK_PRICE,
    cultural_context: FALLBACK_CULTURAL_CONTEXT.to_string(),
    keywords: vec![
      request.category.clone(),
      "handmade".to_string(),
      "traditional".to_string(),
    ],
  }
}

/// Trimmed story text, or `None` when the completion is blank.
pub fn parse_story(raw: &str) -> Option<String> {
  let story = raw.trim();
  (!story.is_empty()).then(|| story.to_string())
}

pub fn story_fallback(category: &str) -> String {
  format!(
    "This beautiful {} represents the timeless artistry of Indian craftsmanship, created with love and traditional techniques passed down through generations.",
    category
  )
}

pub fn parse_translation(raw: &str, target_language: &str) -> Option<TranslationResult> {
  let text = raw.trim();
  (!text.is_empty()).then(|| TranslationResult {
    translated_text: text.to_string(),
    target_language: target_language.to_string(),
  })
}

/// Identity translation: the source text echoed back for the requested language.
pub fn translation_fallback(request: &TranslationRequest) -> TranslationResult {
  TranslationResult {
    translated_text: request.text.clone(),
    target_language: request.target_language.clone(),
  }
}
