// artisan_core/src/catalog/translations.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label naming which textual field a translation belongs to.
///
/// The label is open: besides the well-known ones below, any non-blank label
/// (for example `cultural_context`) is stored under its own key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(String);

impl ContentType {
  pub const TITLE: &'static str = "title";
  pub const DESCRIPTION: &'static str = "description";
  pub const STORY: &'static str = "story";
  pub const GENERAL: &'static str = "general";

  pub fn new(label: impl Into<String>) -> Self {
    Self(label.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_blank(&self) -> bool {
    self.0.trim().is_empty()
  }
}

impl Default for ContentType {
  fn default() -> Self {
    Self::new(Self::GENERAL)
  }
}

impl From<&str> for ContentType {
  fn from(label: &str) -> Self {
    Self::new(label)
  }
}

impl std::fmt::Display for ContentType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// language code → content-type label → translated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<String, BTreeMap<String, String>>);

impl Translations {
  /// Sets exactly `[language][content_type]`; everything else is untouched.
  /// Returns the text previously stored at that path.
  pub fn set(&mut self, language: &str, content_type: &str, text: impl Into<String>) -> Option<String> {
    self
      .0
      .entry(language.to_string())
      .or_default()
      .insert(content_type.to_string(), text.into())
  }

  pub fn get(&self, language: &str, content_type: &str) -> Option<&str> {
    self
      .0
      .get(language)
      .and_then(|fields| fields.get(content_type))
      .map(String::as_str)
  }

  pub fn languages(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  /// Number of stored (language, content type) entries.
  pub fn entry_count(&self) -> usize {
    self.0.values().map(BTreeMap::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.entry_count() == 0
  }
}

/// Pure form of [`Translations::set`]: returns an updated copy of `existing`.
pub fn apply_translation(existing: &Translations, language: &str, content_type: &str, text: &str) -> Translations {
  let mut updated = existing.clone();
  updated.set(language, content_type, text);
  updated
}
