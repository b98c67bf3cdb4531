// artisan_market/src/web/extractors.rs

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::errors::AppError;
use crate::services::identity::{AuthError, Identity};
use crate::state::AppState;

/// The verified caller, taken from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

fn bearer_token(req: &HttpRequest) -> Option<String> {
  let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?.trim();
  let (scheme, token) = value.split_once(' ')?;
  scheme
    .eq_ignore_ascii_case("bearer")
    .then(|| token.trim().to_string())
    .filter(|t| !t.is_empty())
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let verifier = req.app_data::<web::Data<AppState>>().map(|state| state.verifier.clone());
    let token = bearer_token(req);

    Box::pin(async move {
      let verifier = verifier.ok_or_else(|| AppError::Internal("application state is not configured".to_string()))?;
      let Some(token) = token else {
        warn!("AuthenticatedUser extractor: missing or malformed Authorization header.");
        return Err(AuthError::MissingToken.into());
      };
      let identity = verifier.verify(&token).await?;
      Ok(AuthenticatedUser(identity))
    })
  }
}
