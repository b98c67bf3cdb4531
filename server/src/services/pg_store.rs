// artisan_market/src/services/pg_store.rs

use artisan_core::{Product, Provenance, Translations};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{error, instrument};

use crate::errors::{AppError, Result};
use crate::models::user::User;
use crate::services::identity::Role;
use crate::services::store::{MarketStore, ProductQuery};

const PRODUCT_COLUMNS: &str = "id, artisan_id, title, description, price, category, materials, techniques, \
  story, cultural_context, images, translations, ai_generated, created_at";

const USER_COLUMNS: &str = "id, email, name, picture, role, profile, created_at";

/// Postgres-backed store. List-valued and map-valued product fields live in
/// JSONB columns; see `migrations/0001_init.sql`.
#[derive(Clone)]
pub struct PgMarketStore {
  pool: PgPool,
}

impl PgMarketStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(FromRow)]
struct ProductRow {
  id: String,
  artisan_id: String,
  title: String,
  description: String,
  price: f64,
  category: String,
  materials: Json<Vec<String>>,
  techniques: Json<Vec<String>>,
  story: Option<String>,
  cultural_context: Option<String>,
  images: Json<Vec<String>>,
  translations: Json<Translations>,
  ai_generated: Json<Provenance>,
  created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: row.id,
      artisan_id: row.artisan_id,
      title: row.title,
      description: row.description,
      price: row.price,
      category: row.category,
      materials: row.materials.0,
      techniques: row.techniques.0,
      story: row.story,
      cultural_context: row.cultural_context,
      images: row.images.0,
      translations: row.translations.0,
      provenance: row.ai_generated.0,
      created_at: row.created_at,
    }
  }
}

#[derive(FromRow)]
struct UserRow {
  id: String,
  email: Option<String>,
  name: String,
  picture: Option<String>,
  role: String,
  profile: serde_json::Value,
  created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
  type Error = AppError;

  fn try_from(row: UserRow) -> Result<Self> {
    let role = Role::parse(&row.role)
      .ok_or_else(|| AppError::Internal(format!("user {} has unknown role '{}'", row.id, row.role)))?;
    Ok(User {
      id: row.id,
      email: row.email,
      name: row.name,
      picture: row.picture,
      role,
      profile: row.profile,
      created_at: row.created_at,
    })
  }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
  move |e| {
    error!(error = %e, "Database error while {}.", context);
    AppError::Sqlx(e)
  }
}

#[async_trait]
impl MarketStore for PgMarketStore {
  #[instrument(name = "PgMarketStore::insert_product", skip_all, fields(product_id = %product.id))]
  async fn insert_product(&self, product: &Product) -> Result<()> {
    sqlx::query(&format!(
      "INSERT INTO products ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
      PRODUCT_COLUMNS
    ))
    .bind(&product.id)
    .bind(&product.artisan_id)
    .bind(&product.title)
    .bind(&product.description)
    .bind(product.price)
    .bind(&product.category)
    .bind(Json(&product.materials))
    .bind(Json(&product.techniques))
    .bind(&product.story)
    .bind(&product.cultural_context)
    .bind(Json(&product.images))
    .bind(Json(&product.translations))
    .bind(Json(&product.provenance))
    .bind(product.created_at)
    .execute(&self.pool)
    .await
    .map_err(db_error("inserting a product"))?;
    Ok(())
  }

  #[instrument(name = "PgMarketStore::get_product", skip(self))]
  async fn get_product(&self, product_id: &str) -> Result<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS))
      .bind(product_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(db_error("fetching a product"))?;
    Ok(row.map(Product::from))
  }

  #[instrument(name = "PgMarketStore::list_products", skip(self))]
  async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
    let rows: Vec<ProductRow> = sqlx::query_as(&format!(
      "SELECT {} FROM products WHERE ($1::text IS NULL OR category = $1) \
       ORDER BY created_at DESC, id ASC LIMIT $2 OFFSET $3",
      PRODUCT_COLUMNS
    ))
    .bind(query.category.as_deref())
    .bind(query.limit)
    .bind(query.offset)
    .fetch_all(&self.pool)
    .await
    .map_err(db_error("listing products"))?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  #[instrument(name = "PgMarketStore::set_story", skip(self, story))]
  async fn set_story(&self, product_id: &str, artisan_id: &str, story: &str) -> Result<bool> {
    let result = sqlx::query(
      "UPDATE products SET story = $3, ai_generated = ai_generated || '{\"story\": true}'::jsonb \
       WHERE id = $1 AND artisan_id = $2",
    )
    .bind(product_id)
    .bind(artisan_id)
    .bind(story)
    .execute(&self.pool)
    .await
    .map_err(db_error("storing a story"))?;
    Ok(result.rows_affected() > 0)
  }

  /// Single-statement update of one `[language][content_type]` path, so writes
  /// to other paths of the same product are never lost.
  #[instrument(name = "PgMarketStore::set_translation", skip(self, text))]
  async fn set_translation(
    &self,
    product_id: &str,
    language: &str,
    content_type: &str,
    text: &str,
  ) -> Result<bool> {
    let result = sqlx::query(
      "UPDATE products SET translations = jsonb_set( \
         translations || jsonb_build_object($2::text, COALESCE(translations -> $2::text, '{}'::jsonb)), \
         ARRAY[$2::text, $3::text], \
         to_jsonb($4::text)) \
       WHERE id = $1",
    )
    .bind(product_id)
    .bind(language)
    .bind(content_type)
    .bind(text)
    .execute(&self.pool)
    .await
    .map_err(db_error("storing a translation"))?;
    Ok(result.rows_affected() > 0)
  }

  #[instrument(name = "PgMarketStore::upsert_user", skip_all, fields(user_id = %user.id))]
  async fn upsert_user(&self, user: &User) -> Result<User> {
    let row: UserRow = sqlx::query_as(&format!(
      "INSERT INTO users ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7) \
       ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email, name = EXCLUDED.name, \
         picture = COALESCE(EXCLUDED.picture, users.picture), role = EXCLUDED.role \
       RETURNING {cols}",
      cols = USER_COLUMNS
    ))
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.picture)
    .bind(user.role.as_str())
    .bind(&user.profile)
    .bind(user.created_at)
    .fetch_one(&self.pool)
    .await
    .map_err(db_error("upserting a user"))?;
    User::try_from(row)
  }

  #[instrument(name = "PgMarketStore::get_user", skip(self))]
  async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
      .bind(user_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(db_error("fetching a user"))?;
    row.map(User::try_from).transpose()
  }
}
