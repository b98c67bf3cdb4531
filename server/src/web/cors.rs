// artisan_market/src/web/cors.rs

use actix_cors::Cors;

use crate::config::ANY_ORIGIN;

/// Browser access policy: the configured origins (or any origin when `*` is
/// listed), any method and header, credentials allowed.
pub fn cors_policy(origins: &[String]) -> Cors {
  let cors = Cors::default()
    .allow_any_method()
    .allow_any_header()
    .supports_credentials()
    .max_age(3600);

  if origins.iter().any(|o| o == ANY_ORIGIN) {
    return cors.allow_any_origin();
  }
  origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
}
