// artisan_market/src/web/handlers/catalog_handlers.rs

use actix_web::HttpResponse;
use artisan_core::catalog::{CATEGORIES, LANGUAGES};
use serde_json::json;

pub async fn categories_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "categories": CATEGORIES }))
}

pub async fn languages_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "languages": LANGUAGES }))
}
