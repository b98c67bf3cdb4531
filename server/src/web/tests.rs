// artisan_market/src/web/tests.rs

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use artisan_core::ContentGenerator;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{configure_app_routes, cors_policy};
use crate::config::AppConfig;
use crate::services::identity::{DevTokenVerifier, StaticTokenVerifier, TokenVerifier};
use crate::services::memory_store::InMemoryMarketStore;
use crate::state::AppState;

const DEV_AUTH: (&str, &str) = ("Authorization", "Bearer dev-token");

fn state_with(verifier: Arc<dyn TokenVerifier>) -> AppState {
  AppState::new(
    Arc::new(InMemoryMarketStore::new()),
    Arc::new(ContentGenerator::disabled()),
    verifier,
    Arc::new(AppConfig::default()),
  )
}

fn dev_state() -> AppState {
  state_with(Arc::new(DevTokenVerifier))
}

macro_rules! init_app {
  ($state:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($state))
        .configure(configure_app_routes),
    )
    .await
  };
}

macro_rules! upload {
  ($app:expr, $body:expr) => {{
    let req = test::TestRequest::post()
      .uri("/api/products/upload")
      .insert_header(DEV_AUTH)
      .set_json($body)
      .to_request();
    let resp = test::call_service(&$app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    body
  }};
}

#[actix_web::test]
async fn health_reports_service_status() {
  let app = init_app!(dev_state());
  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["status"], "healthy");
  assert_eq!(body["ai_enabled"], false);
}

#[actix_web::test]
async fn upload_with_ai_unreachable_uses_fallback_content() {
  let app = init_app!(dev_state());

  let body = upload!(
    app,
    json!({ "category": "pottery", "description": "Beautiful handmade terracotta pot" })
  );

  let product = &body["product"];
  assert_eq!(product["title"], "Handcrafted pottery");
  assert_eq!(product["description"], "Beautiful handmade terracotta pot");
  assert_eq!(product["price"], 500.0);
  assert_eq!(product["cultural_context"], "A beautiful traditional Indian craft.");
  assert_eq!(product["artisan_id"], "user_123");
  assert_eq!(
    product["ai_generated"],
    json!({ "title": true, "description": false, "price": true, "cultural_context": true })
  );
  assert_eq!(body["ai_suggestions"]["keywords"], json!(["pottery", "handmade", "traditional"]));
  assert_eq!(body["message"], "Product uploaded successfully");
}

#[actix_web::test]
async fn upload_keeps_user_supplied_fields() {
  let app = init_app!(dev_state());

  let body = upload!(
    app,
    json!({
      "title": "Blue Pottery Vase",
      "description": "Hand-painted in Jaipur",
      "category": "pottery",
      "materials": ["quartz", "glass"],
      "techniques": ["wheel throwing"],
      "images": ["https://img.example/vase.jpg"],
      "price": 1800.0
    })
  );

  let product = &body["product"];
  assert_eq!(product["title"], "Blue Pottery Vase");
  assert_eq!(product["description"], "Hand-painted in Jaipur");
  assert_eq!(product["price"], 1800.0);
  assert_eq!(product["materials"], json!(["quartz", "glass"]));
  assert_eq!(product["techniques"], json!(["wheel throwing"]));
  assert_eq!(product["images"], json!(["https://img.example/vase.jpg"]));
  assert_eq!(
    product["ai_generated"],
    json!({ "title": false, "description": false, "price": false, "cultural_context": true })
  );
}

#[actix_web::test]
async fn upload_without_description_uses_default_prompt_text() {
  let app = init_app!(dev_state());

  let body = upload!(app, json!({ "category": "textiles" }));

  assert_eq!(body["product"]["title"], "Handcrafted textiles");
  assert_eq!(body["product"]["description"], "Beautiful handcrafted item");
  assert_eq!(body["product"]["ai_generated"]["description"], true);
}

#[actix_web::test]
async fn upload_rejects_bad_input_and_missing_auth() {
  let app = init_app!(dev_state());

  let unauthenticated = test::TestRequest::post()
    .uri("/api/products/upload")
    .set_json(json!({ "category": "pottery" }))
    .to_request();
  assert_eq!(test::call_service(&app, unauthenticated).await.status(), StatusCode::UNAUTHORIZED);

  for body in [
    json!({ "category": "spaceships" }),
    json!({ "category": "" }),
    json!({ "category": "pottery", "price": -5.0 }),
  ] {
    let req = test::TestRequest::post()
      .uri("/api/products/upload")
      .insert_header(DEV_AUTH)
      .set_json(&body)
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST, "{}", body);
  }
}

#[actix_web::test]
async fn translate_with_ai_unreachable_echoes_source_text() {
  let app = init_app!(dev_state());
  let product_id = upload!(app, json!({ "category": "textiles", "title": "Handwoven silk scarf" }))["product"]["id"]
    .as_str()
    .unwrap()
    .to_string();

  let req = test::TestRequest::post()
    .uri(&format!("/api/products/{}/translate", product_id))
    .insert_header(DEV_AUTH)
    .set_json(json!({ "text": "Handwoven silk scarf", "target_language": "ta", "content_type": "title" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "translated_text": "Handwoven silk scarf", "target_language": "ta" }));

  let detail = test::TestRequest::get().uri(&format!("/api/products/{}", product_id)).to_request();
  let detail: Value = test::call_and_read_body_json(&app, detail).await;
  assert_eq!(detail["translations"]["ta"]["title"], "Handwoven silk scarf");
}

#[actix_web::test]
async fn translations_accumulate_across_languages_and_fields() {
  let app = init_app!(dev_state());
  let product_id = upload!(app, json!({ "category": "pottery" }))["product"]["id"]
    .as_str()
    .unwrap()
    .to_string();

  for (language, content_type, text) in [
    ("hi", "title", "Clay pot"),
    ("ta", "description", "Made by hand"),
    ("hi", "description", "Fired in a kiln"),
  ] {
    let req = test::TestRequest::post()
      .uri(&format!("/api/products/{}/translate", product_id))
      .insert_header(DEV_AUTH)
      .set_json(json!({ "text": text, "target_language": language, "content_type": content_type }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
  }

  let detail = test::TestRequest::get().uri(&format!("/api/products/{}", product_id)).to_request();
  let detail: Value = test::call_and_read_body_json(&app, detail).await;
  assert_eq!(
    detail["translations"],
    json!({
      "hi": { "title": "Clay pot", "description": "Fired in a kiln" },
      "ta": { "description": "Made by hand" }
    })
  );
}

#[actix_web::test]
async fn translate_stores_any_content_label_and_defaults_to_general() {
  let app = init_app!(dev_state());
  let product_id = upload!(app, json!({ "category": "pottery" }))["product"]["id"]
    .as_str()
    .unwrap()
    .to_string();

  for body in [
    json!({ "text": "A beautiful traditional Indian craft.", "target_language": "hi", "content_type": "cultural_context" }),
    json!({ "text": "Terracotta pot", "target_language": "hi" }),
  ] {
    let req = test::TestRequest::post()
      .uri(&format!("/api/products/{}/translate", product_id))
      .insert_header(DEV_AUTH)
      .set_json(&body)
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK, "{}", body);
  }

  let detail = test::TestRequest::get().uri(&format!("/api/products/{}", product_id)).to_request();
  let detail: Value = test::call_and_read_body_json(&app, detail).await;
  assert_eq!(
    detail["translations"]["hi"],
    json!({
      "cultural_context": "A beautiful traditional Indian craft.",
      "general": "Terracotta pot"
    })
  );
}

#[actix_web::test]
async fn translate_errors_map_to_client_statuses() {
  let app = init_app!(dev_state());

  let missing = test::TestRequest::post()
    .uri("/api/products/no-such-product/translate")
    .insert_header(DEV_AUTH)
    .set_json(json!({ "text": "Handwoven silk scarf", "target_language": "ta" }))
    .to_request();
  assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::NOT_FOUND);

  let product_id = upload!(app, json!({ "category": "pottery" }))["product"]["id"]
    .as_str()
    .unwrap()
    .to_string();
  for body in [
    json!({ "text": "  ", "target_language": "ta" }),
    json!({ "text": "Scarf", "target_language": "" }),
    json!({ "text": "Scarf", "target_language": "ta", "content_type": " " }),
  ] {
    let req = test::TestRequest::post()
      .uri(&format!("/api/products/{}/translate", product_id))
      .insert_header(DEV_AUTH)
      .set_json(&body)
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST, "{}", body);
  }
}

#[actix_web::test]
async fn story_is_stored_for_owner_only() {
  let verifier = StaticTokenVerifier::from_grants("owner-token:user_123:Test Artisan:artisan,other-token:u2:Ravi:artisan")
    .unwrap();
  let app = init_app!(state_with(Arc::new(verifier)));

  let req = test::TestRequest::post()
    .uri("/api/products/upload")
    .insert_header(("Authorization", "Bearer owner-token"))
    .set_json(json!({ "category": "pottery", "title": "Terracotta Water Pot" }))
    .to_request();
  let uploaded: Value = test::call_and_read_body_json(&app, req).await;
  let product_id = uploaded["product"]["id"].as_str().unwrap().to_string();

  let story_body = json!({
    "product_title": "Terracotta Water Pot",
    "description": "Wheel thrown and sun dried",
    "category": "pottery"
  });

  let foreign = test::TestRequest::post()
    .uri(&format!("/api/products/{}/story", product_id))
    .insert_header(("Authorization", "Bearer other-token"))
    .set_json(&story_body)
    .to_request();
  assert_eq!(test::call_service(&app, foreign).await.status(), StatusCode::NOT_FOUND);

  let owned = test::TestRequest::post()
    .uri(&format!("/api/products/{}/story", product_id))
    .insert_header(("Authorization", "Bearer owner-token"))
    .set_json(&story_body)
    .to_request();
  let resp = test::call_service(&app, owned).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  let story = body["story"].as_str().unwrap();
  assert!(story.starts_with("This beautiful pottery represents the timeless artistry"));

  let detail = test::TestRequest::get().uri(&format!("/api/products/{}", product_id)).to_request();
  let detail: Value = test::call_and_read_body_json(&app, detail).await;
  assert_eq!(detail["story"], story);
  assert_eq!(detail["ai_generated"]["story"], true);
  assert_eq!(detail["ai_generated"]["title"], false);

  let unknown_token = test::TestRequest::post()
    .uri(&format!("/api/products/{}/story", product_id))
    .insert_header(("Authorization", "Bearer nobody"))
    .set_json(&story_body)
    .to_request();
  assert_eq!(test::call_service(&app, unknown_token).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn listing_filters_by_category_and_includes_artisan() {
  let app = init_app!(dev_state());

  let session = test::TestRequest::post().uri("/api/auth/session").insert_header(DEV_AUTH).to_request();
  let user: Value = test::call_and_read_body_json(&app, session).await;
  assert_eq!(user["id"], "user_123");
  assert_eq!(user["name"], "Test Artisan");

  upload!(app, json!({ "category": "pottery" }));
  upload!(app, json!({ "category": "pottery" }));
  upload!(app, json!({ "category": "jewelry" }));

  let all: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/products").to_request()).await;
  assert_eq!(all.as_array().unwrap().len(), 3);
  assert_eq!(all[0]["artisan"]["name"], "Test Artisan");
  assert!(all[0]["artisan"].get("profile").is_none());

  let pottery: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/api/products?category=pottery").to_request(),
  )
  .await;
  assert_eq!(pottery.as_array().unwrap().len(), 2);
  assert!(pottery.as_array().unwrap().iter().all(|p| p["category"] == "pottery"));

  let page: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/api/products?limit=1&offset=1").to_request(),
  )
  .await;
  assert_eq!(page.as_array().unwrap().len(), 1);

  let id = all[0]["id"].as_str().unwrap();
  let detail: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri(&format!("/api/products/{}", id)).to_request(),
  )
  .await;
  assert_eq!(detail["artisan"]["profile"], json!({}));
}

#[actix_web::test]
async fn unknown_product_is_not_found() {
  let app = init_app!(dev_state());
  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/missing").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn current_user_falls_back_to_token_identity() {
  let app = init_app!(dev_state());
  let req = test::TestRequest::get().uri("/api/users/me").insert_header(DEV_AUTH).to_request();
  let me: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(me["id"], "user_123");
  assert_eq!(me["role"], "artisan");
  assert_eq!(me["email"], "artisan@example.com");
}

#[actix_web::test]
async fn reference_data_is_exposed() {
  let app = init_app!(dev_state());

  let categories: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/categories").to_request()).await;
  let categories = categories["categories"].as_array().unwrap();
  assert_eq!(categories.len(), 8);
  assert_eq!(categories[0], json!({ "id": "pottery", "name": "Pottery & Ceramics", "icon": "🏺" }));

  let languages: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/languages").to_request()).await;
  let languages = languages["languages"].as_array().unwrap();
  assert!(languages.iter().any(|l| l["code"] == "ta" && l["name"] == "Tamil"));
}

#[actix_web::test]
async fn configured_origin_is_allowed_for_browsers() {
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(dev_state()))
      .wrap(cors_policy(&["https://shop.example".to_string()]))
      .configure(configure_app_routes),
  )
  .await;

  let preflight = test::TestRequest::default()
    .method(actix_web::http::Method::OPTIONS)
    .uri("/api/products/upload")
    .insert_header(("Origin", "https://shop.example"))
    .insert_header(("Access-Control-Request-Method", "POST"))
    .insert_header(("Access-Control-Request-Headers", "authorization, content-type"))
    .to_request();
  let resp = test::call_service(&app, preflight).await;
  assert!(resp.status().is_success());
  assert_eq!(
    resp.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
    Some("https://shop.example")
  );

  let req = test::TestRequest::get()
    .uri("/api/categories")
    .insert_header(("Origin", "https://shop.example"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    resp.headers().get("access-control-allow-credentials").and_then(|v| v.to_str().ok()),
    Some("true")
  );
}

#[actix_web::test]
async fn wildcard_origin_allows_any_site() {
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(dev_state()))
      .wrap(cors_policy(&AppConfig::default().cors_origins))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::get()
    .uri("/api/health")
    .insert_header(("Origin", "http://localhost:3000"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    resp.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
    Some("http://localhost:3000")
  );
}
