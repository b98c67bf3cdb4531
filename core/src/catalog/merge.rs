// artisan_core/src/catalog/merge.rs

//! Combines what the artisan typed with what the AI suggested.
//!
//! For title, description and price the artisan's value wins whenever it is
//! present and non-empty; otherwise the suggestion is used and the field is
//! flagged AI-generated. Cultural context always comes from the AI.

use crate::ai::types::ContentSuggestion;
use crate::catalog::product::{ContentField, Provenance};
use crate::catalog::upload::UploadFields;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedContent {
  pub title: String,
  pub description: String,
  pub price: f64,
  pub cultural_context: String,
  pub provenance: Provenance,
}

pub fn merge_upload(upload: &UploadFields, suggestion: &ContentSuggestion) -> MergedContent {
  let mut provenance = Provenance::new();

  let title = pick(upload.user_title().map(str::to_owned), &suggestion.title, ContentField::Title, &mut provenance);
  let description = pick(
    upload.user_description().map(str::to_owned),
    &suggestion.description,
    ContentField::Description,
    &mut provenance,
  );
  let price = pick(upload.user_price(), &suggestion.price_suggestion, ContentField::Price, &mut provenance);

  provenance.mark(ContentField::CulturalContext, true);

  MergedContent {
    title,
    description,
    price,
    cultural_context: suggestion.cultural_context.clone(),
    provenance,
  }
}

fn pick<T: Clone>(user: Option<T>, suggested: &T, field: ContentField, provenance: &mut Provenance) -> T {
  provenance.mark(field, user.is_none());
  user.unwrap_or_else(|| suggested.clone())
}
