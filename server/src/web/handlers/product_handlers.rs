// artisan_market/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use artisan_core::{ContextData, PipelineResult, Product, StoryRequest, TranslationRequest, UploadFields};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::user::User;
use crate::pipelines::contexts::{StoryCtxData, TranslateCtxData, UploadCtxData};
use crate::services::store::ProductQuery;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[derive(Deserialize, Debug, Default)]
pub struct ListProductsQuery {
  pub category: Option<String>,
  pub limit: Option<i64>,
  pub offset: Option<i64>,
}

fn halted(flow: &str) -> AppError {
  warn!(flow, "Pipeline was stopped by a handler.");
  AppError::PipelineHalted
}

/// Serializes `product` and attaches the public part of its artisan's profile.
fn product_with_artisan(product: &Product, artisan: Option<&User>, with_profile: bool) -> Result<Value, AppError> {
  let mut value =
    serde_json::to_value(product).map_err(|e| AppError::Internal(format!("failed to serialize product: {}", e)))?;
  if let (Some(artisan), Some(object)) = (artisan, value.as_object_mut()) {
    let mut summary = json!({ "name": artisan.name, "picture": artisan.picture });
    if with_profile {
      summary["profile"] = artisan.profile.clone();
    }
    object.insert("artisan".to_string(), summary);
  }
  Ok(value)
}

#[instrument(
  name = "handler::upload_product",
  skip(app_state, auth_user, req_payload),
  fields(artisan_id = %auth_user.0.id, category = %req_payload.category)
)]
pub async fn upload_product_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<UploadFields>,
) -> Result<HttpResponse, AppError> {
  let ctx = ContextData::new(UploadCtxData::new(
    app_state.get_ref().clone(),
    auth_user.0,
    req_payload.into_inner(),
  ));

  match app_state.flows.run(ctx.clone()).await? {
    PipelineResult::Completed => {
      let (product, suggestion) = ctx.with(|c| (c.product.clone(), c.suggestion.clone()));
      let product = product.ok_or_else(|| AppError::Internal("upload completed without a product".to_string()))?;
      info!(product_id = %product.id, "Product uploaded.");
      Ok(HttpResponse::Created().json(json!({
        "product": product,
        "ai_suggestions": suggestion,
        "message": "Product uploaded successfully",
      })))
    }
    PipelineResult::Stopped => Err(halted("upload")),
  }
}

#[instrument(
  name = "handler::generate_story",
  skip(app_state, auth_user, path, req_payload),
  fields(product_id = %path.as_ref(), artisan_id = %auth_user.0.id)
)]
pub async fn generate_story_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<String>,
  req_payload: web::Json<StoryRequest>,
) -> Result<HttpResponse, AppError> {
  let ctx = ContextData::new(StoryCtxData {
    app_state: app_state.get_ref().clone(),
    actor: auth_user.0,
    product_id: path.into_inner(),
    request: req_payload.into_inner(),
    story: None,
  });

  match app_state.flows.run(ctx.clone()).await? {
    PipelineResult::Completed => {
      let story = ctx.with(|c| c.story.clone()).unwrap_or_default();
      Ok(HttpResponse::Ok().json(json!({ "story": story })))
    }
    PipelineResult::Stopped => Err(halted("story")),
  }
}

#[instrument(
  name = "handler::translate_product",
  skip(app_state, auth_user, path, req_payload),
  fields(product_id = %path.as_ref(), target_language = %req_payload.target_language)
)]
pub async fn translate_product_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<String>,
  req_payload: web::Json<TranslationRequest>,
) -> Result<HttpResponse, AppError> {
  let ctx = ContextData::new(TranslateCtxData {
    app_state: app_state.get_ref().clone(),
    actor: auth_user.0,
    product_id: path.into_inner(),
    request: req_payload.into_inner(),
    result: None,
  });

  match app_state.flows.run(ctx.clone()).await? {
    PipelineResult::Completed => {
      let result = ctx
        .with(|c| c.result.clone())
        .ok_or_else(|| AppError::Internal("translation completed without a result".to_string()))?;
      Ok(HttpResponse::Ok().json(result))
    }
    PipelineResult::Stopped => Err(halted("translate")),
  }
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let query = query.into_inner();
  let products = app_state
    .store
    .list_products(&ProductQuery::new(query.category, query.limit, query.offset))
    .await?;

  let mut artisans: HashMap<String, Option<User>> = HashMap::new();
  for product in &products {
    if !artisans.contains_key(&product.artisan_id) {
      let artisan = app_state.store.get_user(&product.artisan_id).await?;
      artisans.insert(product.artisan_id.clone(), artisan);
    }
  }

  let listing = products
    .iter()
    .map(|p| product_with_artisan(p, artisans.get(&p.artisan_id).and_then(Option::as_ref), false))
    .collect::<Result<Vec<_>, _>>()?;
  info!(count = listing.len(), "Products listed.");
  Ok(HttpResponse::Ok().json(listing))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let product = app_state
    .store
    .get_product(&product_id)
    .await?
    .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
  let artisan = app_state.store.get_user(&product.artisan_id).await?;

  Ok(HttpResponse::Ok().json(product_with_artisan(&product, artisan.as_ref(), true)?))
}
