// artisan_market/src/web/routes.rs

use actix_web::web;

use crate::state::AppState;
use crate::web::handlers::{auth_handlers, catalog_handlers, product_handlers};

async fn health_check_handler(app_state: web::Data<AppState>) -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({
    "status": "healthy",
    "service": "Artisan Market API",
    "ai_enabled": app_state.config.ai_api_key.is_some(),
  }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .route("/auth/session", web::post().to(auth_handlers::create_session_handler))
      .route("/users/me", web::get().to(auth_handlers::current_user_handler))
      .route("/categories", web::get().to(catalog_handlers::categories_handler))
      .route("/languages", web::get().to(catalog_handlers::languages_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/upload", web::post().to(product_handlers::upload_product_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}/story", web::post().to(product_handlers::generate_story_handler))
          .route("/{product_id}/translate", web::post().to(product_handlers::translate_product_handler)),
      ),
  );
}
