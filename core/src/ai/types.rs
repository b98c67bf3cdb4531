// artisan_core/src/ai/types.rs

use crate::catalog::translations::ContentType;
use serde::{Deserialize, Serialize};

/// Input for listing-content generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
  pub description: String,
  pub category: String,
  #[serde(default)]
  pub materials: Vec<String>,
  #[serde(default)]
  pub artisan_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRequest {
  pub product_title: String,
  pub description: String,
  pub category: String,
  #[serde(default)]
  pub materials: Vec<String>,
  #[serde(default)]
  pub artisan_name: Option<String>,
  /// Text transcribed from the artisan's voice note, if any.
  #[serde(default)]
  pub voice_input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
  pub text: String,
  pub target_language: String,
  #[serde(default)]
  pub content_type: ContentType,
}

/// What the model suggests for a listing. Never absent: when the model's
/// answer is unusable the generator substitutes a deterministic fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSuggestion {
  pub title: String,
  pub description: String,
  pub price_suggestion: f64,
  pub cultural_context: String,
  pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
  pub translated_text: String,
  pub target_language: String,
}
