// artisan_core/src/catalog/reference.rs

//! Static reference data: product categories and supported languages.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
  pub id: &'static str,
  pub name: &'static str,
  pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
  pub code: &'static str,
  pub name: &'static str,
  pub native: &'static str,
}

pub const CATEGORIES: &[Category] = &[
  Category { id: "pottery", name: "Pottery & Ceramics", icon: "🏺" },
  Category { id: "textiles", name: "Textiles & Fabrics", icon: "🧵" },
  Category { id: "jewelry", name: "Jewelry & Accessories", icon: "💍" },
  Category { id: "woodwork", name: "Woodwork & Furniture", icon: "🪵" },
  Category { id: "metalwork", name: "Metalwork & Sculptures", icon: "⚒️" },
  Category { id: "paintings", name: "Paintings & Art", icon: "🎨" },
  Category { id: "leather", name: "Leather Crafts", icon: "👜" },
  Category { id: "stone", name: "Stone & Marble Work", icon: "🪨" },
];

pub const LANGUAGES: &[Language] = &[
  Language { code: "en", name: "English", native: "English" },
  Language { code: "hi", name: "Hindi", native: "हिन्दी" },
  Language { code: "ta", name: "Tamil", native: "தமிழ்" },
  Language { code: "te", name: "Telugu", native: "తెలుగు" },
  Language { code: "kn", name: "Kannada", native: "ಕನ್ನಡ" },
  Language { code: "ml", name: "Malayalam", native: "മലയാളം" },
  Language { code: "bn", name: "Bengali", native: "বাংলা" },
  Language { code: "gu", name: "Gujarati", native: "ગુજરાતી" },
  Language { code: "mr", name: "Marathi", native: "मराठी" },
];

pub fn is_known_category(id: &str) -> bool {
  CATEGORIES.iter().any(|c| c.id == id)
}

/// Human-readable language name; unknown codes come back unchanged.
pub fn language_name(code: &str) -> &str {
  LANGUAGES
    .iter()
    .find(|l| l.code == code)
    .map(|l| l.name)
    .unwrap_or(code)
}
