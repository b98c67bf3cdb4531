// artisan_core/src/ai/prompts.rs

//! Prompt construction for the three generation intents.
//!
//! Every builder is pure: it embeds the request fields verbatim and tells the
//! model exactly what shape of answer to produce.

use crate::ai::types::{ContentRequest, StoryRequest, TranslationRequest};
use crate::catalog::reference::language_name;
use std::fmt::Write as _;

pub const SYSTEM_MESSAGE: &str = "You are an expert assistant for Indian artisans. You help create compelling product \
descriptions, suggest fair pricing, provide cultural context, and craft engaging stories about handmade crafts. You \
understand traditional Indian crafts like pottery, textiles, metalwork, jewelry, woodwork, and regional specialties.";

pub const PRICE_CURRENCY: &str = "INR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptIntent {
  ContentGeneration,
  StoryGeneration,
  Translation,
}

impl PromptIntent {
  pub fn as_str(self) -> &'static str {
    match self {
      PromptIntent::ContentGeneration => "content_generation",
      PromptIntent::StoryGeneration => "story_generation",
      PromptIntent::Translation => "translation",
    }
  }
}

fn materials_line(materials: &[String]) -> String {
  if materials.is_empty() {
    "Not specified".to_string()
  } else {
    materials.join(", ")
  }
}

pub fn content_generation_prompt(request: &ContentRequest) -> String {
  format!(
    "As an expert in Indian handicrafts, generate comprehensive product information for this item:\n\
     \n\
     Description: {description}\n\
     Category: {category}\n\
     Materials: {materials}\n\
     Artisan: {artisan}\n\
     \n\
     Please provide:\n\
     1. TITLE: Compelling, SEO-friendly product title (50-80 characters)\n\
     2. DESCRIPTION: Detailed, engaging product description (150-300 words)\n\
     3. PRICE_SUGGESTION: Fair price in {currency} as a plain number, based on materials, complexity, and market standards\n\
     4. CULTURAL_CONTEXT: 2-3 sentences about the cultural significance and traditional techniques\n\
     5. KEYWORDS: 5-8 relevant keywords for search optimization\n\
     \n\
     Respond with a single JSON object with exactly these keys: title, description, price_suggestion, cultural_context, keywords\n",
    description = request.description,
    category = request.category,
    materials = materials_line(&request.materials),
    artisan = request.artisan_name.as_deref().unwrap_or("Traditional artisan"),
    currency = PRICE_CURRENCY,
  )
}

pub fn story_prompt(request: &StoryRequest) -> String {
  let mut prompt = format!(
    "Create an engaging, emotional story about this handcrafted product that connects buyers with the artisan's skill and cultural heritage:\n\
     \n\
     Product: {title}\n\
     Description: {description}\n\
     Category: {category}\n\
     Materials: {materials}\n\
     Artisan: {artisan}\n",
    title = request.product_title,
    description = request.description,
    category = request.category,
    materials = materials_line(&request.materials),
    artisan = request.artisan_name.as_deref().unwrap_or("A skilled artisan"),
  );

  if let Some(voice) = request.voice_input.as_deref().filter(|v| !v.trim().is_empty()) {
    let _ = writeln!(prompt, "In the artisan's own words: {}", voice);
  }

  prompt.push_str(
    "\n\
     Write a compelling 2-3 paragraph story that:\n\
     - Highlights the artisan's skill and dedication\n\
     - Explains the traditional techniques used\n\
     - Connects the piece to Indian cultural heritage\n\
     - Creates emotional connection with potential buyers\n\
     - Uses vivid, descriptive language\n\
     \n\
     Keep it authentic, respectful, and engaging (150-250 words). Respond with the story prose only.\n",
  );
  prompt
}

pub fn translation_prompt(request: &TranslationRequest) -> String {
  format!(
    "Translate the following {content_type} text to {language}.\n\
     Preserve cultural context and craft terminology. Keep the meaning authentic.\n\
     \n\
     Text: {text}\n\
     \n\
     Provide only the translation, no additional text.\n",
    content_type = request.content_type,
    language = language_name(&request.target_language),
    text = request.text,
  )
}
