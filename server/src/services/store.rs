// artisan_market/src/services/store.rs

//! Persistence seam for products and users.

use artisan_core::Product;
use async_trait::async_trait;

use crate::errors::Result;
use crate::models::user::User;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
  pub category: Option<String>,
  pub limit: i64,
  pub offset: i64,
}

impl Default for ProductQuery {
  fn default() -> Self {
    Self {
      category: None,
      limit: DEFAULT_PAGE_SIZE,
      offset: 0,
    }
  }
}

impl ProductQuery {
  /// Clamps paging into range; a blank category means "all".
  pub fn new(category: Option<String>, limit: Option<i64>, offset: Option<i64>) -> Self {
    Self {
      category: category.filter(|c| !c.trim().is_empty()),
      limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
      offset: offset.unwrap_or(0).max(0),
    }
  }
}

#[async_trait]
pub trait MarketStore: Send + Sync {
  async fn insert_product(&self, product: &Product) -> Result<()>;

  async fn get_product(&self, product_id: &str) -> Result<Option<Product>>;

  /// Newest first.
  async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>>;

  /// Stores the story and flags it AI-generated. Returns `false` when no
  /// product with that id belongs to `artisan_id`.
  async fn set_story(&self, product_id: &str, artisan_id: &str, story: &str) -> Result<bool>;

  /// Sets exactly `translations[language][content_type]`. Returns `false`
  /// when the product does not exist.
  async fn set_translation(
    &self,
    product_id: &str,
    language: &str,
    content_type: &str,
    text: &str,
  ) -> Result<bool>;

  async fn upsert_user(&self, user: &User) -> Result<User>;

  async fn get_user(&self, user_id: &str) -> Result<Option<User>>;
}
