// artisan_core/src/catalog/product.rs

use crate::catalog::merge::MergedContent;
use crate::catalog::translations::Translations;
use crate::catalog::upload::UploadFields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Product fields whose origin (artisan or AI) is tracked.
///
/// Keeping provenance keys as an enum means the map can only ever name fields
/// that actually exist on `Product`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentField {
  Title,
  Description,
  Price,
  CulturalContext,
  Story,
}

impl ContentField {
  pub fn as_str(self) -> &'static str {
    match self {
      ContentField::Title => "title",
      ContentField::Description => "description",
      ContentField::Price => "price",
      ContentField::CulturalContext => "cultural_context",
      ContentField::Story => "story",
    }
  }
}

/// Field name → `true` when the stored value came from the AI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Provenance(BTreeMap<ContentField, bool>);

impl Provenance {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn mark(&mut self, field: ContentField, ai_generated: bool) {
    self.0.insert(field, ai_generated);
  }

  /// `None` when the field has no recorded origin yet.
  pub fn is_ai_generated(&self, field: ContentField) -> Option<bool> {
    self.0.get(&field).copied()
  }

  /// Recorded fields in `ContentField` order.
  pub fn iter(&self) -> impl Iterator<Item = (ContentField, bool)> + '_ {
    self.0.iter().map(|(field, ai)| (*field, *ai))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: String,
  pub artisan_id: String,
  pub title: String,
  pub description: String,
  pub price: f64,
  pub category: String,
  #[serde(default)]
  pub materials: Vec<String>,
  #[serde(default)]
  pub techniques: Vec<String>,
  pub story: Option<String>,
  pub cultural_context: Option<String>,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default)]
  pub translations: Translations,
  #[serde(default, rename = "ai_generated")]
  pub provenance: Provenance,
  pub created_at: DateTime<Utc>,
}

impl Product {
  /// Builds a freshly uploaded listing from the artisan's fields and the merged content.
  pub fn from_listing(
    id: impl Into<String>,
    artisan_id: impl Into<String>,
    upload: &UploadFields,
    merged: MergedContent,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id: id.into(),
      artisan_id: artisan_id.into(),
      title: merged.title,
      description: merged.description,
      price: merged.price,
      category: upload.category.clone(),
      materials: upload.materials.clone(),
      techniques: upload.techniques.clone(),
      story: None,
      cultural_context: Some(merged.cultural_context),
      images: upload.images.clone(),
      translations: Translations::default(),
      provenance: merged.provenance,
      created_at,
    }
  }

  /// Stores an AI-written story; the story is always marked as AI-generated.
  pub fn attach_story(&mut self, story: impl Into<String>) {
    self.story = Some(story.into());
    self.provenance.mark(ContentField::Story, true);
  }
}
