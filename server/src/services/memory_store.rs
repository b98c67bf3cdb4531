// artisan_market/src/services/memory_store.rs

use artisan_core::catalog::apply_translation;
use artisan_core::Product;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::errors::Result;
use crate::models::user::User;
use crate::services::store::{MarketStore, ProductQuery};

/// Process-local store, used when no database is configured and in tests.
#[derive(Default)]
pub struct InMemoryMarketStore {
  products: RwLock<HashMap<String, Product>>,
  users: RwLock<HashMap<String, User>>,
}

impl InMemoryMarketStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl MarketStore for InMemoryMarketStore {
  #[instrument(name = "InMemoryMarketStore::insert_product", skip_all, fields(product_id = %product.id))]
  async fn insert_product(&self, product: &Product) -> Result<()> {
    self.products.write().insert(product.id.clone(), product.clone());
    debug!("Product stored.");
    Ok(())
  }

  async fn get_product(&self, product_id: &str) -> Result<Option<Product>> {
    Ok(self.products.read().get(product_id).cloned())
  }

  async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
    let mut matching: Vec<Product> = self
      .products
      .read()
      .values()
      .filter(|p| query.category.as_deref().map_or(true, |c| p.category == c))
      .cloned()
      .collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(
      matching
        .into_iter()
        .skip(query.offset as usize)
        .take(query.limit as usize)
        .collect(),
    )
  }

  async fn set_story(&self, product_id: &str, artisan_id: &str, story: &str) -> Result<bool> {
    let mut products = self.products.write();
    match products.get_mut(product_id) {
      Some(product) if product.artisan_id == artisan_id => {
        product.attach_story(story);
        Ok(true)
      }
      _ => Ok(false),
    }
  }

  async fn set_translation(
    &self,
    product_id: &str,
    language: &str,
    content_type: &str,
    text: &str,
  ) -> Result<bool> {
    let mut products = self.products.write();
    let Some(product) = products.get_mut(product_id) else {
      return Ok(false);
    };
    product.translations = apply_translation(&product.translations, language, content_type, text);
    Ok(true)
  }

  async fn upsert_user(&self, user: &User) -> Result<User> {
    let mut users = self.users.write();
    let stored = match users.get(&user.id) {
      // Keep the original creation time and any profile already filled in.
      Some(existing) => User {
        created_at: existing.created_at,
        profile: existing.profile.clone(),
        picture: user.picture.clone().or_else(|| existing.picture.clone()),
        ..user.clone()
      },
      None => user.clone(),
    };
    users.insert(stored.id.clone(), stored.clone());
    Ok(stored)
  }

  async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
    Ok(self.users.read().get(user_id).cloned())
  }
}
