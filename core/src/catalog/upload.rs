// artisan_core/src/catalog/upload.rs

use crate::catalog::reference;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What an artisan submits when listing a product. Every content field is optional;
/// whatever is missing is filled from the AI suggestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadFields {
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub materials: Vec<String>,
  #[serde(default)]
  pub price: Option<f64>,
  /// Reference to an uploaded voice note. Only its presence is recorded.
  #[serde(default)]
  pub voice_note: Option<String>,
  #[serde(default)]
  pub techniques: Vec<String>,
  #[serde(default)]
  pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListingError {
  #[error("category is required")]
  MissingCategory,

  #[error("unknown category '{0}'")]
  UnknownCategory(String),

  #[error("price must be a finite, non-negative number (got {0})")]
  InvalidPrice(f64),
}

impl UploadFields {
  pub fn validate(&self) -> Result<(), ListingError> {
    if self.category.trim().is_empty() {
      return Err(ListingError::MissingCategory);
    }
    if !reference::is_known_category(&self.category) {
      return Err(ListingError::UnknownCategory(self.category.clone()));
    }
    if let Some(price) = self.price {
      if !price.is_finite() || price < 0.0 {
        return Err(ListingError::InvalidPrice(price));
      }
    }
    Ok(())
  }

  /// The title if the artisan actually supplied one.
  pub fn user_title(&self) -> Option<&str> {
    non_blank(self.title.as_deref())
  }

  pub fn user_description(&self) -> Option<&str> {
    non_blank(self.description.as_deref())
  }

  /// A zero price counts as "not supplied".
  pub fn user_price(&self) -> Option<f64> {
    self.price.filter(|p| *p > 0.0)
  }

  pub fn has_voice_note(&self) -> bool {
    non_blank(self.voice_note.as_deref()).is_some()
  }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.trim().is_empty())
}
